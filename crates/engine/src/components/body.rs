use crate::prelude::*;

/// Local forward axis of every controlled body.
pub const FORWARD: Vector3<f32> = Vector3::new(0.0, 1.0, 0.0);
/// Local up axis.
pub const UP: Vector3<f32> = Vector3::new(0.0, 0.0, 1.0);

/// Rigid-body state of a flying entity.
///
/// Position and orientation can only be changed through the setters so the
/// cached world-to-local transform always matches them. Velocities are in
/// world space and expressed per tick; angular velocity is a rotation vector.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Body {
    position: Point3<f32>,
    orientation: UnitQuaternion<f32>,
    pub velocity: Vector3<f32>,
    pub angular_velocity: Vector3<f32>,
    pub mass: f32,
    inverse: Isometry3<f32>,
}

impl Body {
    pub fn new(position: Point3<f32>, orientation: UnitQuaternion<f32>, mass: f32) -> Self {
        let mut body = Self {
            position,
            orientation,
            velocity: Vector3::zeros(),
            angular_velocity: Vector3::zeros(),
            mass,
            inverse: Isometry3::identity(),
        };
        body.refresh_inverse();
        body
    }

    /// Body at rest at `position`, facing +Y, with unit mass.
    pub fn at(position: Point3<f32>) -> Self {
        Self::new(position, UnitQuaternion::identity(), 1.0)
    }

    pub fn with_velocity(mut self, velocity: Vector3<f32>) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_angular_velocity(mut self, angular_velocity: Vector3<f32>) -> Self {
        self.angular_velocity = angular_velocity;
        self
    }

    pub fn with_mass(mut self, mass: f32) -> Self {
        self.mass = mass;
        self
    }

    pub fn position(&self) -> &Point3<f32> {
        &self.position
    }

    pub fn orientation(&self) -> &UnitQuaternion<f32> {
        &self.orientation
    }

    /// Local-to-world transform.
    pub fn isometry(&self) -> Isometry3<f32> {
        Isometry3::from_parts(Translation3::from(self.position.coords), self.orientation)
    }

    /// Cached world-to-local transform.
    pub fn inverse(&self) -> &Isometry3<f32> {
        &self.inverse
    }

    pub fn set_position(&mut self, position: Point3<f32>) {
        self.position = position;
        self.refresh_inverse();
    }

    pub fn set_orientation(&mut self, orientation: UnitQuaternion<f32>) {
        self.orientation = orientation;
        self.refresh_inverse();
    }

    pub fn set_isometry(&mut self, isometry: &Isometry3<f32>) {
        self.position = Point3::from(isometry.translation.vector);
        self.orientation = isometry.rotation;
        self.refresh_inverse();
    }

    /// Express a world-space direction in the body's local frame.
    pub fn to_local_vector(&self, vector: &Vector3<f32>) -> Vector3<f32> {
        self.inverse.transform_vector(vector)
    }

    fn refresh_inverse(&mut self) {
        self.inverse = self.isometry().inverse();
    }
}

impl Default for Body {
    fn default() -> Self {
        Self::at(Point3::origin())
    }
}
