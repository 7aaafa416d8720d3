use glam::{Quat, Vec3};
use rand::Rng;

use crate::domain::config::{ThermalConfig, VaporTuning};
use crate::systems::liquid::surface_radius;

/// Particles per tick the pool wants to emit; zero unless superheated.
///
/// Scales with whole `emission_temp_step` steps above sublimation and with
/// the pool volume, clamped so a small pool still emits a little.
pub fn emission_rate(volume: f32, temperature: f32, thermal: &ThermalConfig, tuning: &VaporTuning) -> f32 {
    if volume <= 0.0 || temperature <= thermal.sublimation_temp {
        return 0.0;
    }
    let volume_factor = (volume / tuning.volume_factor_divisor).clamp(tuning.min_volume_factor, 1.0);
    let steps = ((temperature - thermal.sublimation_temp) / tuning.emission_temp_step).floor();
    steps * tuning.emission_per_step * volume_factor
}

/// Uniform angle, uniform radius on the surface disk at `y = −R + depth`,
/// rotated into the vessel by the pool orientation.
pub fn sample_surface_point<R: Rng>(rng: &mut R, depth: f32, chamber_radius: f32, orientation: Quat) -> Vec3 {
    let angle = rng.random::<f32>() * std::f32::consts::TAU;
    let radius = rng.random::<f32>() * surface_radius(depth, chamber_radius);
    let local = Vec3::new(angle.cos() * radius, -chamber_radius + depth, angle.sin() * radius);
    orientation * local
}
