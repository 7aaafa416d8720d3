//! FragmentSystem - the solid-body pool
//!
//! Owns every fragment ever created in the current session. Fragments are
//! never removed: melting flips them to `Phase::Liquid` and they drop out of
//! integration, collision and rendering.
//!
//! Per tick:
//! - Gravity integration for solid fragments.
//! - A fixed number of relaxation passes, each a chamber-wall pass followed
//!   by an O(n²) pairwise pass, then one closing wall pass so no fragment is
//!   left outside the chamber.
//! - Damping, spin, heating, cooling and the melt transition into the pool.

mod collision;
mod system;
mod thermal;

pub use system::{FragmentStepCounts, FragmentSystem};
