//! Liquid pool: a single lumped volume/temperature pair fed by melting
//! fragments, heated by the flame, and relaxed toward room temperature.
//!
//! When supercooled it can give volume back as a new solid fragment; when
//! superheated the vapor system draws on it for emission. The pool also
//! keeps the render-facing surface state (orientation, depth, lathe profile).

mod pool;
mod surface;

pub use pool::{LiquidPool, LiquidStep};
pub use surface::{surface_depth, surface_radius, LiquidSurface};
