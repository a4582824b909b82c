/// Inertia assigned to a body that must not rotate.
pub const INFINITE_INERTIA: f32 = f32::INFINITY;

/// Clamp `val` into `[min, max]`.
///
/// Unlike `f32::clamp` this never panics: when `min > max` (an element wider
/// than its container) the lower bound wins.
#[inline]
pub fn clamp(val: f32, min: f32, max: f32) -> f32 {
    val.min(max).max(min)
}

/// Anything at or above 1e30 is treated as infinite inertia.
#[inline]
pub fn is_effectively_infinite(value: f32) -> bool {
    value >= 1.0e30
}
