use crate::prelude::*;

/// Per-tick rotation rates read off the predicted turning frame, in radians
/// per tick. Signs follow [`RotationAxis::positive`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TurnRates {
    pub yaw: f32,
    pub pitch: f32,
    pub roll: f32,
}

impl TurnRates {
    /// Read the rates of a local-frame rotation.
    pub fn of(turning: &UnitQuaternion<f32>) -> Self {
        let nose = turning * FORWARD;
        let up = turning * UP;
        Self {
            yaw: yaw_angle(&nose),
            pitch: pitch_angle(&nose),
            roll: roll_angle(&up),
        }
    }
}

/// Quantities derived from a [`Body`] for one tick. Never kept across ticks.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyView {
    pub speed: f32,
    /// World direction of the nose.
    pub direction: Vector3<f32>,
    /// World direction of travel, zero at rest.
    pub velocity_direction: Vector3<f32>,
    pub local_velocity: Vector3<f32>,
    /// Local direction of travel, zero at rest.
    pub local_velocity_direction: Vector3<f32>,
    /// One tick of angular velocity expressed in the body frame.
    pub turning: UnitQuaternion<f32>,
    pub turn_rates: TurnRates,
}

impl BodyView {
    pub fn of(body: &Body) -> Self {
        let speed = body.velocity.norm();
        let velocity_direction = if speed > 0.0 {
            body.velocity / speed
        } else {
            Vector3::zeros()
        };

        let step = UnitQuaternion::from_scaled_axis(body.angular_velocity);
        let turning = body.inverse().rotation * step * body.orientation();

        Self {
            speed,
            direction: body.orientation() * FORWARD,
            velocity_direction,
            local_velocity: body.to_local_vector(&body.velocity),
            local_velocity_direction: body.to_local_vector(&velocity_direction),
            turning,
            turn_rates: TurnRates::of(&turning),
        }
    }
}
