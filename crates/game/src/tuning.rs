//! Flight control tuning.
//!
//! These values set the feel of both pilots. They were tuned together, so
//! changing one usually means re-tuning the others.

/// Rotation rate (radians per tick) above which a held turn key stops adding burn.
pub const TURNING_LIMIT: f32 = 0.1;

/// Tolerance around a velocity or rotation target inside which nothing fires.
pub const DEADBAND: f32 = 1e-4;

/// Burn used by held keys: inertial thrust and turn acceleration.
pub const MANUAL_BURN: f32 = 0.5;

/// Burn used by the autopilot to accelerate a rotation toward the goal.
pub const TURN_BURN: f32 = 0.5;

/// A goal closer than this counts as reached.
pub const ARRIVAL_RADIUS: f32 = 0.5;

/// Forward burn while cruising toward a goal with nothing to correct.
pub const CRUISE_BURN: f32 = 0.5;

/// Forward burn kept up while bleeding off sideways drift on a good heading.
pub const TRIM_BURN: f32 = 0.375;

/// Brake cap while drifting but still on a good heading.
pub const DRIFT_BRAKE_CAP: f32 = 0.25;

/// Brake cap while drifting off heading or too fast to stop.
pub const DRIFT_BRAKE_ESCALATED_CAP: f32 = 0.75;

/// Heading error (radians) below which drift is trimmed rather than braked hard.
pub const HEADING_TOLERANCE: f32 = 0.1;
