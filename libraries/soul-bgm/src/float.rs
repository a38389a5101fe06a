//! Approximate float comparison for fade completion checks
//!
//! Repeated additive volume steps never land exactly on the target, so fade
//! completion uses a relative epsilon scaled by the larger operand.

/// Relative-epsilon equality: `|a - b| <= EPSILON * max(a, b)`
///
/// Against zero the tolerance collapses to zero, so only an exact `0.0`
/// matches. Fade-out relies on `max(0.0, v - step)` clamping exactly to zero.
#[inline]
pub fn approx_eq(first: f32, second: f32) -> bool {
    (first - second).abs() <= f32::EPSILON * first.max(second)
}
