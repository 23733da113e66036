use crate::prelude::*;

/// Non-owning link from a camera to the entity it rides along with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Follow {
    pub target: Entity,
    /// Camera pose in the followed entity's local frame.
    pub offset: Isometry3<f32>,
}

/// Camera rig state.
///
/// Velocities are in the camera's local frame and expressed per tick. Angular
/// velocity components are pitch (x), roll (y) and yaw (z) rates.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Point3<f32>,
    pub orientation: UnitQuaternion<f32>,
    pub velocity: Vector3<f32>,
    pub angular_velocity: Vector3<f32>,
    /// Per-axis speed cap.
    pub max_speed: Vector3<f32>,
    /// Per-axis speed change per tick, both when pushing and when decaying.
    pub acceleration: Vector3<f32>,
    /// Per-axis turn rate cap.
    pub max_turn: Vector3<f32>,
    /// Per-axis turn rate change per tick.
    pub angular_acceleration: Vector3<f32>,
    pub fovy: f32,
    pub follow: Option<Follow>,
}

impl Camera {
    /// Free-flying camera at the given pose.
    pub fn free(position: Point3<f32>, orientation: UnitQuaternion<f32>) -> Self {
        Self {
            position,
            orientation,
            ..Default::default()
        }
    }

    /// Camera bound to `target` at `offset`.
    pub fn following(target: Entity, offset: Isometry3<f32>) -> Self {
        Self {
            follow: Some(Follow { target, offset }),
            ..Default::default()
        }
    }

    pub fn isometry(&self) -> Isometry3<f32> {
        Isometry3::from_parts(Translation3::from(self.position.coords), self.orientation)
    }

    pub fn set_isometry(&mut self, isometry: &Isometry3<f32>) {
        self.position = Point3::from(isometry.translation.vector);
        self.orientation = isometry.rotation;
    }

    pub fn followed(&self) -> Option<Entity> {
        self.follow.map(|follow| follow.target)
    }

    /// Change the field of view by `delta`, keeping it within `[min, max]`.
    pub fn zoom(&mut self, delta: f32, min: f32, max: f32) {
        self.fovy = (self.fovy + delta).clamp(min, max);
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Point3::origin(),
            orientation: UnitQuaternion::identity(),
            velocity: Vector3::zeros(),
            angular_velocity: Vector3::zeros(),
            max_speed: Vector3::new(0.5, 0.5, 0.5),
            acceleration: Vector3::new(0.02, 0.02, 0.02),
            max_turn: Vector3::new(0.03, 0.03, 0.03),
            angular_acceleration: Vector3::new(0.002, 0.002, 0.002),
            fovy: 1.0,
            follow: None,
        }
    }
}
