use crate::prelude::*;

use std::ops::Deref;
use std::sync::Arc;

/// Actuator limits shared by every ship of one class.
#[derive(Debug, Clone, PartialEq)]
pub struct PropulsionClass {
    pub name: String,
    /// Maximum linear thrust of a single channel at full burn.
    pub max_thrust: f32,
    /// Maximum angular thrust of a single channel at full burn, per unit inertia.
    pub max_angular_thrust: f32,
}

impl PropulsionClass {
    pub fn new(name: impl Into<String>, max_thrust: f32, max_angular_thrust: f32) -> Self {
        Self {
            name: name.into(),
            max_thrust,
            max_angular_thrust,
        }
    }

    /// Linear acceleration a full burn gives a body of `mass`.
    pub fn acceleration(&self, mass: f32) -> f32 {
        if mass > 0.0 {
            self.max_thrust / mass
        } else {
            0.0
        }
    }

    /// Angular acceleration a full burn gives.
    pub fn angular_acceleration(&self) -> f32 {
        self.max_angular_thrust
    }
}

/// Per-entity handle to a shared [`PropulsionClass`].
#[derive(Component, Debug, Clone)]
pub struct Propulsion(pub Arc<PropulsionClass>);

impl Propulsion {
    pub fn new(class: &Arc<PropulsionClass>) -> Self {
        Self(Arc::clone(class))
    }
}

impl Deref for Propulsion {
    type Target = PropulsionClass;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
