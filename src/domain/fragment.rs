use glam::{EulerRot, Quat, Vec3};
use rand::Rng;

use crate::core::random::centered;

/// Points sampled per fragment for the renderer's convex hull.
pub const HULL_POINTS: usize = 10;

/// Phase of a fragment. `Liquid` fragments are inert: their volume and heat
/// already live in the liquid pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Solid,
    Liquid,
}

/// A solid piece of substance inside the chamber.
#[derive(Debug, Clone)]
pub struct Fragment {
    /// Vessel-local position.
    pub position: Vec3,
    /// Units per tick.
    pub velocity: Vec3,
    /// Radians per tick, applied as an XYZ Euler delta.
    pub angular_velocity: Vec3,
    pub orientation: Quat,
    /// °C
    pub temperature: f32,
    /// Edge length of the bounding cube; volume is `size³`.
    pub size: f32,
    pub phase: Phase,
    /// Hull points relative to the centre, inside `[-size/2, size/2]³`.
    pub hull: [Vec3; HULL_POINTS],
}

impl Fragment {
    /// A resting solid fragment with a freshly sampled hull.
    pub fn new<R: Rng>(rng: &mut R, position: Vec3, size: f32, temperature: f32) -> Self {
        let half = size * 0.5;
        let hull = std::array::from_fn(|_| {
            Vec3::new(
                centered(rng, half),
                centered(rng, half),
                centered(rng, half),
            )
        });
        Self {
            position,
            velocity: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            temperature,
            size,
            phase: Phase::Solid,
            hull,
        }
    }

    #[inline]
    pub fn is_solid(&self) -> bool {
        self.phase == Phase::Solid
    }

    #[inline]
    pub fn volume(&self) -> f32 {
        self.size * self.size * self.size
    }

    /// Half the edge length; the collision radius.
    #[inline]
    pub fn half_size(&self) -> f32 {
        self.size * 0.5
    }

    /// Advance the orientation by one tick of angular velocity.
    pub fn spin(&mut self) {
        let w = self.angular_velocity;
        let delta = Quat::from_euler(EulerRot::XYZ, w.x, w.y, w.z);
        self.orientation = (delta * self.orientation).normalize();
    }
}
