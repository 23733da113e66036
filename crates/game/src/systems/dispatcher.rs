use crate::prelude::*;

use bevy_ecs::system::SystemParam;

use crate::systems::{autonomous_flight, camera_rig, manual_flight};

/// Everything a discrete action may touch.
#[derive(SystemParam)]
pub struct DispatchTargets<'w, 's> {
    config: Res<'w, ControlConfig>,
    director: ResMut<'w, CameraDirector>,
    toggles: ResMut<'w, SceneToggles>,
    state: ResMut<'w, DispatchState>,
    seeder: ResMut<'w, GoalSeeder>,
    controllers: Query<'w, 's, (Entity, &'static mut Controller, Option<&'static Tag>)>,
    cameras: Query<'w, 's, &'static mut Camera>,
    hitboxes: Query<'w, 's, &'static mut HitboxVisibility>,
    burns: Query<'w, 's, &'static mut ThrusterBurnSet>,
}

/// Drain the discrete key queue once and apply every bound action in order.
pub fn dispatch_key_events(mut input: ResMut<InputState>, mut targets: DispatchTargets) {
    for key in input.drain_key_events() {
        let action = targets.config.action_for(key);
        match action {
            Some(action) => targets.apply(action),
            None => log::trace!("No action bound to {:?}", key),
        }
    }
}

/// Drop despawned cameras from the director so cycling never lands on them.
pub fn forget_despawned_cameras(
    mut removed: RemovedComponents<Camera>,
    mut director: ResMut<CameraDirector>,
) {
    for camera in removed.read() {
        director.remove(camera);
        if director.is_empty() {
            log::warn!("Camera {:?} removed, no cameras left", camera);
        } else {
            log::info!("Camera {:?} removed, {} left", camera, director.len());
        }
    }
}

/// Run condition keeping controllers idle while paused.
pub fn controls_running(state: Res<DispatchState>) -> bool {
    !state.paused
}

/// Per-tick control schedule: bookkeeping and discrete events first, then
/// every controller.
pub fn control_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.add_systems(
        (
            forget_despawned_cameras,
            dispatch_key_events,
            (manual_flight, autonomous_flight, camera_rig)
                .chain()
                .run_if(controls_running),
        )
            .chain(),
    );
    schedule
}

/// Insert every resource the control schedule reads, keeping any already present.
pub fn install_control_resources(world: &mut World) {
    world.init_resource::<InputState>();
    world.init_resource::<ControlConfig>();
    world.init_resource::<CameraDirector>();
    world.init_resource::<SceneToggles>();
    world.init_resource::<DispatchState>();
    world.init_resource::<GoalSeeder>();
}

impl DispatchTargets<'_, '_> {
    fn apply(&mut self, action: Action) {
        match action {
            Action::ToggleFlightMode => self.toggle_flight_modes(),
            Action::NextCamera => {
                let camera = self.director.next();
                log::info!("Switched to camera {:?}", camera);
            }
            Action::PreviousCamera => {
                let camera = self.director.previous();
                log::info!("Switched to camera {:?}", camera);
            }
            Action::SetManual => self.assign(Controller::Manual(ManualPilot::default())),
            Action::SetAutonomous => {
                let settings = self.config.autopilot;
                let pilot = self.seeder.autopilot(&settings);
                log::debug!(
                    "Seeded goals {:?}",
                    pilot.goals().map(Goal::position).collect::<Vec<_>>()
                );
                self.assign(Controller::Autonomous(pilot));
            }
            Action::StopAll => self.stop_all(),
            Action::ToggleLightRotation => {
                self.toggles.light_rotation = !self.toggles.light_rotation;
                log::info!("Light rotation {}", on_off(self.toggles.light_rotation));
            }
            Action::ToggleHitboxes => {
                let mut visible = None;
                for mut hitbox in self.hitboxes.iter_mut() {
                    hitbox.0 = !hitbox.0;
                    visible = Some(hitbox.0);
                }
                match visible {
                    Some(visible) => log::info!("Hitboxes {}", on_off(visible)),
                    None => log::debug!("No hitboxes to toggle"),
                }
            }
            Action::ZoomIn => {
                let step = self.config.zoom.step;
                self.zoom(-step);
            }
            Action::ZoomOut => {
                let step = self.config.zoom.step;
                self.zoom(step);
            }
            Action::TogglePause => {
                self.state.paused = !self.state.paused;
                if self.state.paused {
                    for mut burns in self.burns.iter_mut() {
                        burns.reset();
                    }
                    log::info!("Controls paused, thrusters cut");
                } else {
                    log::info!("Controls resumed");
                }
            }
        }
    }

    fn toggle_flight_modes(&mut self) {
        for (_, mut controller, tag) in self.controllers.iter_mut() {
            if let Controller::Manual(pilot) = &mut *controller {
                let mode = pilot.toggle_mode();
                log::info!("{} now flies {:?}", label(tag), mode);
            }
        }
    }

    fn stop_all(&mut self) {
        for (_, mut controller, _) in self.controllers.iter_mut() {
            match &mut *controller {
                Controller::Manual(pilot) => pilot.intended_speed = 0.0,
                Controller::Autonomous(pilot) => pilot.stop(),
                Controller::Camera(_) => {}
            }
        }
        log::info!("All ships told to stop");
    }

    /// Entity followed by the active camera, if any.
    fn target(&self) -> Option<Entity> {
        let camera = self.director.active()?;
        self.cameras.get(camera).ok()?.followed()
    }

    /// Replace the controller of the active camera's target.
    fn assign(&mut self, next: Controller) {
        let Some(target) = self.target() else {
            log::warn!("Active camera follows nothing, controller unchanged");
            return;
        };

        let Ok((_, mut controller, tag)) = self.controllers.get_mut(target) else {
            log::warn!("{:?} has no controller to replace", target);
            return;
        };
        if !controller.is_flight() {
            log::debug!("{} is a camera, controller unchanged", label(tag));
            return;
        }

        log::info!("{} handed from {} to {}", label(tag), controller.kind(), next.kind());
        *controller = next;
    }

    fn zoom(&mut self, delta: f32) {
        let settings = self.config.zoom;
        let Some(active) = self.director.active() else {
            log::debug!("No camera to zoom");
            return;
        };

        match self.cameras.get_mut(active) {
            Ok(mut camera) => {
                camera.zoom(delta, settings.min_fovy, settings.max_fovy);
                log::debug!("Field of view {:.2}", camera.fovy);
            }
            Err(_) => log::warn!("Active camera {:?} has no camera state", active),
        }
    }
}

fn label(tag: Option<&Tag>) -> &str {
    tag.map_or("entity", |tag| tag.label.as_str())
}

fn on_off(enabled: bool) -> &'static str {
    if enabled { "on" } else { "off" }
}
