//! Small scalar helpers layered on top of `glam`.

use glam::Vec2;

/// Sign of `value`, with zero mapped to `+1.0` so a direction is always defined.
pub fn sign_or_positive(value: f32) -> f32 {
    if value < 0.0 {
        -1.0
    } else {
        1.0
    }
}

/// Arithmetic mean of two coefficients.
pub fn mean(a: f32, b: f32) -> f32 {
    0.5 * (a + b)
}

/// Zeroes components whose magnitude is below `threshold`.
pub fn snap_to_zero(v: Vec2, threshold: f32) -> Vec2 {
    Vec2::new(
        if v.x.abs() < threshold { 0.0 } else { v.x },
        if v.y.abs() < threshold { 0.0 } else { v.y },
    )
}
