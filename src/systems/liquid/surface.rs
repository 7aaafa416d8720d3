use glam::Quat;

use crate::domain::config::LiquidTuning;

/// Pool depth measured from the chamber floor, never below `min_depth`.
#[inline]
pub fn surface_depth(volume: f32, tuning: &LiquidTuning) -> f32 {
    (volume.cbrt() * tuning.depth_scale).max(tuning.min_depth)
}

/// Radius of the surface disk of a spherical cap of height `depth`.
///
/// Zero once the cap would overfill the sphere.
#[inline]
pub fn surface_radius(depth: f32, chamber_radius: f32) -> f32 {
    (depth * (2.0 * chamber_radius - depth)).max(0.0).sqrt()
}

/// Render-facing state of the pool surface.
#[derive(Debug, Clone)]
pub struct LiquidSurface {
    pub visible: bool,
    pub depth: f32,
    pub orientation: Quat,
    /// `(radius, y)` pairs for a lathe, bottom pole to surface centre.
    profile: Vec<[f32; 2]>,
}

impl LiquidSurface {
    pub fn new() -> Self {
        Self {
            visible: false,
            depth: 0.0,
            orientation: Quat::IDENTITY,
            profile: Vec::new(),
        }
    }

    pub fn profile(&self) -> &[[f32; 2]] {
        &self.profile
    }

    pub(super) fn hide(&mut self) {
        self.visible = false;
    }

    /// Recompute depth and, unless the cap is degenerate, the lathe profile.
    /// A degenerate cap keeps the previous profile.
    pub(super) fn rebuild(&mut self, volume: f32, chamber_radius: f32, tuning: &LiquidTuning) {
        self.visible = true;
        self.depth = surface_depth(volume, tuning);
        if self.depth >= 2.0 * chamber_radius {
            return;
        }

        let r = chamber_radius;
        let segments = tuning.profile_segments;
        self.profile.clear();
        self.profile.reserve(segments + 2);
        self.profile.push([0.0, -r]);
        for i in 1..=segments {
            let y = -r + self.depth * i as f32 / segments as f32;
            self.profile.push([(r * r - y * y).max(0.0).sqrt(), y]);
        }
        self.profile.push([0.0, -r + self.depth]);
    }
}

impl Default for LiquidSurface {
    fn default() -> Self {
        Self::new()
    }
}
