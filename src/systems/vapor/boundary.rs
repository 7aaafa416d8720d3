use glam::Vec3;

use crate::domain::config::{GeometryConfig, VaporTuning};
use crate::domain::VaporParticle;

/// Fraction of the wall radius a colliding particle is clamped back to.
const WALL_INSET: f32 = 0.99;

#[inline]
fn radial(position: Vec3) -> f32 {
    (position.y * position.y + position.z * position.z).sqrt()
}

/// True inside the pass-through gap where the channel meets the chamber.
#[inline]
fn near_channel_mouth(position: Vec3, geometry: &GeometryConfig, tuning: &VaporTuning) -> bool {
    position.x > geometry.chamber_radius * tuning.opening_fraction
        && radial(position) < geometry.channel_radius * tuning.opening_margin
}

/// Bounce off the chamber sphere. Returns true on contact.
pub(super) fn collide_chamber(p: &mut VaporParticle, geometry: &GeometryConfig, tuning: &VaporTuning) -> bool {
    if p.position.length() <= geometry.chamber_radius || near_channel_mouth(p.position, geometry, tuning) {
        return false;
    }
    let normal = p.position.normalize_or_zero();
    p.velocity = p.velocity.reflect(normal) * -tuning.wall_restitution;
    p.position = normal * (geometry.chamber_radius * WALL_INSET);
    true
}

/// Bounce off the channel's cylindrical wall, between the channel start
/// and the aperture. Returns true on contact.
pub(super) fn collide_channel(p: &mut VaporParticle, geometry: &GeometryConfig, tuning: &VaporTuning) -> bool {
    let x = p.position.x;
    if x <= geometry.channel_start() || x >= geometry.aperture_x() {
        return false;
    }
    if radial(p.position) <= geometry.channel_radius {
        return false;
    }
    let normal = Vec3::new(0.0, p.position.y, p.position.z).normalize_or_zero();
    p.velocity = p.velocity.reflect(normal) * -tuning.wall_restitution;
    let clamp = geometry.channel_radius * WALL_INSET;
    p.position.y = normal.y * clamp;
    p.position.z = normal.z * clamp;
    true
}
