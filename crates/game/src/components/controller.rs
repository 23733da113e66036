use crate::prelude::*;

/// The single controller driving an entity.
///
/// Living on the controlled entity keeps control one-to-one: handing the
/// entity to another controller replaces this value and drops the old one.
#[derive(Component, Debug, Clone, PartialEq)]
pub enum Controller {
    Manual(ManualPilot),
    Autonomous(Autopilot),
    Camera(CameraOperator),
}

impl Controller {
    pub fn kind(&self) -> &'static str {
        match self {
            Controller::Manual(_) => "manual",
            Controller::Autonomous(_) => "autonomous",
            Controller::Camera(_) => "camera",
        }
    }

    pub fn is_flight(&self) -> bool {
        !matches!(self, Controller::Camera(_))
    }
}

impl Default for Controller {
    fn default() -> Self {
        Controller::Manual(ManualPilot::default())
    }
}
