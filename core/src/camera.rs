//! Pane camera follow smoothing

use glam::Vec2;

/// Default approach rate of pane cameras toward their player (per second)
pub const DEFAULT_FOLLOW_RATE: f32 = 5.0;

/// Move `current` toward `target` with an exponential approach.
///
/// The fraction of the remaining distance covered is `1 - e^(-rate * dt)`,
/// so two half-length steps land where one full step does and the result
/// always lies on the segment between `current` and `target`. A non-positive
/// or non-finite `delta_seconds` or `rate` leaves the camera where it is.
pub fn smooth_toward(current: Vec2, target: Vec2, rate: f32, delta_seconds: f32) -> Vec2 {
    let t = follow_fraction(rate, delta_seconds);
    current + (target - current) * t
}

/// Fraction of the remaining distance covered in one step, in `[0, 1]`
#[inline]
pub fn follow_fraction(rate: f32, delta_seconds: f32) -> f32 {
    if !(rate.is_finite() && delta_seconds.is_finite()) || rate <= 0.0 || delta_seconds <= 0.0 {
        return 0.0;
    }
    (1.0 - (-rate * delta_seconds).exp()).clamp(0.0, 1.0)
}
