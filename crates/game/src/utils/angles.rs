use crate::prelude::*;

/// Signed angle in radians that rotates `from` onto `to`, counter-clockwise
/// positive. Zero-length inputs give 0.
pub fn signed_angle(from: &Vector2<f32>, to: &Vector2<f32>) -> f32 {
    let (Some(from), Some(to)) = (
        from.try_normalize(f32::EPSILON),
        to.try_normalize(f32::EPSILON),
    ) else {
        return 0.0;
    };

    let cross = from.x * to.y - from.y * to.x;
    cross.atan2(from.dot(&to))
}

// Plane projections. Each one is laid out so a positive signed angle matches
// the positive rotation direction of its axis.
fn yaw_plane(v: &Vector3<f32>) -> Vector2<f32> {
    Vector2::new(v.x, v.y)
}

fn pitch_plane(v: &Vector3<f32>) -> Vector2<f32> {
    Vector2::new(v.y, v.z)
}

fn roll_plane(v: &Vector3<f32>) -> Vector2<f32> {
    Vector2::new(v.z, v.x)
}

/// Yaw (left positive) from the forward axis to a local-frame direction.
pub fn yaw_angle(local: &Vector3<f32>) -> f32 {
    signed_angle(&yaw_plane(&FORWARD), &yaw_plane(local))
}

/// Pitch (up positive) from the forward axis to a local-frame direction.
pub fn pitch_angle(local: &Vector3<f32>) -> f32 {
    signed_angle(&pitch_plane(&FORWARD), &pitch_plane(local))
}

/// Roll (right positive) from the up axis to a local-frame up direction.
pub fn roll_angle(local_up: &Vector3<f32>) -> f32 {
    signed_angle(&roll_plane(&UP), &roll_plane(local_up))
}
