use crate::prelude::*;

use crate::tuning::DEADBAND;

/// Fraction of a full burn needed to cancel `error` in one tick.
///
/// `limit` is the thrust of a full burn and `inertia` the mass it acts on;
/// the result is capped at a full burn. Degenerate inputs give no burn.
pub fn burn_fraction(error: f32, limit: f32, inertia: f32) -> f32 {
    if !error.is_finite() || !limit.is_finite() || limit <= 0.0 {
        return 0.0;
    }

    (error.abs() * inertia.max(0.0) / limit).min(1.0)
}

/// Burn fraction cancelling a linear velocity error on a body of `mass`.
pub fn linear_burn(error: f32, propulsion: &PropulsionClass, mass: f32) -> f32 {
    burn_fraction(error, propulsion.max_thrust, mass)
}

/// Burn fraction cancelling a rotation rate error.
pub fn angular_burn(error: f32, propulsion: &PropulsionClass) -> f32 {
    burn_fraction(error, propulsion.max_angular_thrust, 1.0)
}

/// Rotation axis in the body frame, with the thruster pair that drives it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationAxis {
    Yaw,
    Pitch,
    Roll,
}

impl RotationAxis {
    /// Channel producing a positive rate reading.
    pub fn positive(self) -> ThrusterChannel {
        match self {
            RotationAxis::Yaw => ThrusterChannel::YawLeft,
            RotationAxis::Pitch => ThrusterChannel::PitchUp,
            RotationAxis::Roll => ThrusterChannel::RollRight,
        }
    }

    pub fn negative(self) -> ThrusterChannel {
        self.positive().opposite()
    }

    pub fn rate(self, rates: &TurnRates) -> f32 {
        match self {
            RotationAxis::Yaw => rates.yaw,
            RotationAxis::Pitch => rates.pitch,
            RotationAxis::Roll => rates.roll,
        }
    }
}

/// Brake a rotation about `axis`. Rates inside the deadband are left alone.
///
/// Returns whether a burn was written.
pub fn damp_rotation(
    axis: RotationAxis,
    rate: f32,
    propulsion: &PropulsionClass,
    burns: &mut ThrusterBurnSet,
) -> bool {
    if rate.abs() <= DEADBAND {
        return false;
    }

    let channel = if rate > 0.0 {
        axis.negative()
    } else {
        axis.positive()
    };
    burns.set(channel, angular_burn(rate, propulsion));
    true
}
