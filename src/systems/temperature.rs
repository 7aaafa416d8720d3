//! Lumped thermal model shared by fragments and the liquid pool.
//!
//! - Heating falls off as `gain / (1 + d²)`, finite at `d = 0`.
//! - Cooling is exponential smoothing toward the room temperature.
//! - Mixing is volume-weighted.

/// Heat added in one tick by a source `distance` away.
#[inline]
pub fn heat_gain(gain: f32, distance: f32) -> f32 {
    gain / (1.0 + distance * distance)
}

/// Exponential smoothing of `value` toward `target`.
///
/// Written as `target + (value - target)·(1 - factor)` so a value above the
/// target never crosses it for `factor` in (0, 1].
#[inline]
pub fn ease_toward(value: f32, target: f32, factor: f32) -> f32 {
    target + (value - target) * (1.0 - factor)
}

/// Volume-weighted temperature of two bodies merged together.
#[inline]
pub fn mix_temperature(t_old: f32, v_old: f32, t_in: f32, v_in: f32) -> f32 {
    let total = v_old + v_in;
    if total > 0.0 {
        (t_old * v_old + t_in * v_in) / total
    } else {
        t_in
    }
}
