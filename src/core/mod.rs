//! Core utilities shared by every system: errors, logging and randomness.

pub mod error;
pub mod logging;
pub mod random;
