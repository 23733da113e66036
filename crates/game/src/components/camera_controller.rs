/// Capabilities of a camera controller. Each flag gates one half of the rig:
/// turning and moving in free mode, orientation and position in follow mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CameraOperator {
    pub controls_orientation: bool,
    pub controls_position: bool,
}

impl Default for CameraOperator {
    fn default() -> Self {
        Self {
            controls_orientation: true,
            controls_position: true,
        }
    }
}

impl CameraOperator {
    /// Operator that only turns the camera, e.g. a turret view.
    pub fn orientation_only() -> Self {
        Self {
            controls_position: false,
            ..Default::default()
        }
    }
}
