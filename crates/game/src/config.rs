use crate::prelude::*;

use std::collections::HashMap;
use winit::keyboard::KeyCode;

/// Semantic meaning of a discrete key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    ToggleFlightMode,
    NextCamera,
    PreviousCamera,
    SetManual,
    SetAutonomous,
    StopAll,
    ToggleLightRotation,
    ToggleHitboxes,
    ZoomIn,
    ZoomOut,
    TogglePause,
}

/// Held keys read by the manual pilot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlightKeys {
    pub forward: KeyCode,
    pub backward: KeyCode,
    pub reset_speed: KeyCode,
    pub yaw_left: KeyCode,
    pub yaw_right: KeyCode,
    pub pitch_up: KeyCode,
    pub pitch_down: KeyCode,
    pub roll_left: KeyCode,
    pub roll_right: KeyCode,
    pub fire: KeyCode,
}

impl Default for FlightKeys {
    fn default() -> Self {
        Self {
            forward: KeyCode::KeyW,
            backward: KeyCode::KeyS,
            reset_speed: KeyCode::Backspace,
            yaw_left: KeyCode::KeyA,
            yaw_right: KeyCode::KeyD,
            pitch_up: KeyCode::KeyR,
            pitch_down: KeyCode::KeyF,
            roll_left: KeyCode::KeyQ,
            roll_right: KeyCode::KeyE,
            fire: KeyCode::Space,
        }
    }
}

/// Held keys read by a free camera. With a modifier held the arrows turn the
/// camera instead of moving it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CameraKeys {
    pub forward: KeyCode,
    pub backward: KeyCode,
    pub left: KeyCode,
    pub right: KeyCode,
    pub up: KeyCode,
    pub down: KeyCode,
    pub modifiers: [KeyCode; 2],
}

impl Default for CameraKeys {
    fn default() -> Self {
        Self {
            forward: KeyCode::ArrowUp,
            backward: KeyCode::ArrowDown,
            left: KeyCode::ArrowLeft,
            right: KeyCode::ArrowRight,
            up: KeyCode::PageUp,
            down: KeyCode::PageDown,
            modifiers: [KeyCode::ControlLeft, KeyCode::ControlRight],
        }
    }
}

/// How freshly assigned autopilots are seeded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutopilotSettings {
    pub seeded_goals: usize,
    /// Goals are drawn uniformly from a cube of this half-extent around the origin.
    pub goal_spread: f32,
}

impl Default for AutopilotSettings {
    fn default() -> Self {
        Self {
            seeded_goals: 5,
            goal_spread: 40.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomSettings {
    pub step: f32,
    pub min_fovy: f32,
    pub max_fovy: f32,
}

impl Default for ZoomSettings {
    fn default() -> Self {
        Self {
            step: 0.05,
            min_fovy: 0.2,
            max_fovy: 2.0,
        }
    }
}

/// Key bindings and tuning knobs of the control layer.
#[derive(Resource, Debug, Clone)]
pub struct ControlConfig {
    pub actions: HashMap<KeyCode, Action>,
    pub flight: FlightKeys,
    pub camera: CameraKeys,
    pub autopilot: AutopilotSettings,
    pub zoom: ZoomSettings,
}

impl ControlConfig {
    pub fn action_for(&self, key: KeyCode) -> Option<Action> {
        self.actions.get(&key).copied()
    }
}

impl Default for ControlConfig {
    fn default() -> Self {
        let actions = HashMap::from([
            (KeyCode::Tab, Action::ToggleFlightMode),
            (KeyCode::BracketRight, Action::NextCamera),
            (KeyCode::BracketLeft, Action::PreviousCamera),
            (KeyCode::F1, Action::SetManual),
            (KeyCode::F2, Action::SetAutonomous),
            (KeyCode::KeyX, Action::StopAll),
            (KeyCode::KeyL, Action::ToggleLightRotation),
            (KeyCode::KeyH, Action::ToggleHitboxes),
            (KeyCode::Equal, Action::ZoomIn),
            (KeyCode::Minus, Action::ZoomOut),
            (KeyCode::KeyP, Action::TogglePause),
        ]);

        Self {
            actions,
            flight: FlightKeys::default(),
            camera: CameraKeys::default(),
            autopilot: AutopilotSettings::default(),
            zoom: ZoomSettings::default(),
        }
    }
}
