//! Placement of the vessel in the world.
//!
//! The vessel sits at `position`, is uniformly scaled by `scale` and rolled
//! about the world X axis by the current pipe tilt.

use glam::{Quat, Vec3};

use super::config::GeometryConfig;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VesselFrame {
    pub position: Vec3,
    pub scale: f32,
    pub rotation: Quat,
}

impl VesselFrame {
    pub fn new(geometry: &GeometryConfig, tilt: f32) -> Self {
        Self {
            position: geometry.vessel_position,
            scale: geometry.vessel_scale,
            rotation: Quat::from_rotation_x(tilt),
        }
    }

    /// Vessel-local point to world space.
    #[inline]
    pub fn to_world(&self, local: Vec3) -> Vec3 {
        self.position + self.rotation * (local * self.scale)
    }

    /// World-space direction expressed in the vessel frame.
    #[inline]
    pub fn direction_to_local(&self, world: Vec3) -> Vec3 {
        self.rotation.inverse() * world
    }
}
