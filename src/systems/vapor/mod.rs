//! Vapor particle system.
//!
//! Particles are emitted from the superheated pool surface, drift upward
//! with a little lateral noise, and are pulled toward the aperture while
//! suction is active. They bounce off the chamber sphere (except across the
//! channel mouth) and the channel's cylindrical wall. Any bounce may leave a
//! residue point and consume the particle; passing the aperture consumes it
//! and feeds the stimulation level.

mod boundary;
mod emission;
mod system;

pub use emission::{emission_rate, sample_surface_point};
pub use system::{VaporStepCounts, VaporSystem};
