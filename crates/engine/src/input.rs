use crate::prelude::*;

use std::collections::{HashSet, VecDeque};
use winit::keyboard::KeyCode;

/// Resource that tracks keyboard input state
///
/// Held keys are sampled continuously; every fresh press is also queued as a
/// discrete key event which the control dispatcher drains once per tick.
#[derive(Resource, Default, Debug, Clone)]
pub struct InputState {
    /// Currently pressed keys
    pub keys_pressed: HashSet<KeyCode>,
    /// Presses not yet consumed, oldest first
    key_events: VecDeque<KeyCode>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a key is currently pressed
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Check if any of the given keys is currently pressed
    pub fn is_any_pressed(&self, keys: &[KeyCode]) -> bool {
        keys.iter().any(|key| self.is_key_pressed(*key))
    }

    /// Handle key press. A key that is already held does not queue another event.
    pub fn press_key(&mut self, key: KeyCode) {
        if self.keys_pressed.insert(key) {
            self.key_events.push_back(key);
        }
    }

    /// Handle key release
    pub fn release_key(&mut self, key: KeyCode) {
        self.keys_pressed.remove(&key);
    }

    /// Queue a discrete key event without touching the held set
    pub fn push_key_event(&mut self, key: KeyCode) {
        self.key_events.push_back(key);
    }

    pub fn pending_key_events(&self) -> usize {
        self.key_events.len()
    }

    /// Take every queued key event, leaving the queue empty
    pub fn drain_key_events(&mut self) -> Vec<KeyCode> {
        self.key_events.drain(..).collect()
    }
}
