//! Vapor Engine - simulation core of the vapor vessel toy, built for WASM
//!
//! A heated vessel holds solid fragments that melt into a pooled liquid,
//! boil off into a vapor cloud, and can be drawn out through a channel by
//! suction, leaving residue on the walls.
//!
//! Architecture:
//! - core/       - errors, logging, math and randomness helpers
//! - domain/     - constants, config and plain records
//! - systems/    - fragments, liquid, vapor, residue, session
//! - simulation/ - `EngineCore` orchestration and the `Engine` JS facade

pub mod core;
pub mod domain;
pub mod systems;
pub mod simulation;

use wasm_bindgen::prelude::*;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize panic reporting and logging. Safe to call more than once.
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    core::logging::init_logging();
    log::info!("vapor engine {} initialized", env!("CARGO_PKG_VERSION"));
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Default shard size for the reset control.
#[wasm_bindgen]
pub fn initial_shard_size() -> f32 {
    domain::constants::INITIAL_SHARD_SIZE
}

#[wasm_bindgen]
pub fn min_shard_size() -> f32 {
    domain::constants::MIN_SHARD_SIZE
}

#[wasm_bindgen]
pub fn max_shard_size() -> f32 {
    domain::constants::MAX_SHARD_SIZE
}

#[wasm_bindgen]
pub fn max_vapor() -> usize {
    domain::constants::MAX_VAPOR
}

#[wasm_bindgen]
pub fn max_residue() -> usize {
    domain::constants::MAX_RESIDUE
}

// Re-export main types
pub use core::error::{EngineError, Result};
pub use domain::config::SimConfig;
pub use domain::{PhaseChangeEvent, PhaseChangeKind, SubtitleEvent};
pub use simulation::{Engine, EngineCore, EngineObserver, PerfStats, Stats};
