use glam::Vec3;

/// A gas-phase point mass. Removed once `lifespan <= 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VaporParticle {
    pub position: Vec3,
    pub velocity: Vec3,
    /// Remaining ticks.
    pub lifespan: i32,
}

impl VaporParticle {
    pub fn new(position: Vec3, velocity: Vec3, lifespan: i32) -> Self {
        Self { position, velocity, lifespan }
    }

    #[inline]
    pub fn is_expired(&self) -> bool {
        self.lifespan <= 0
    }

    /// Mark for removal at the end of this tick.
    #[inline]
    pub fn expire(&mut self) {
        self.lifespan = 0;
    }
}
