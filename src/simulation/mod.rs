//! Engine - the vapor vessel simulation context
//!
//! `EngineCore` owns every piece of simulation state and only orchestrates:
//! - fragments, liquid pool and vapor live in `systems/`
//! - inputs arrive through commands, outputs leave through stats, the render
//!   buffers and the observer
//!
//! Per tick: session → fragments → liquid → vapor → stimulation → snapshot.

use glam::Vec3;
use rand::rngs::StdRng;

use crate::core::error::Result;
use crate::domain::config::SimConfig;
use crate::domain::{PhaseChangeEvent, SubtitleEvent, VesselFrame};
use crate::systems::fragments::FragmentSystem;
use crate::systems::liquid::LiquidPool;
use crate::systems::residue::ResidueStore;
use crate::systems::session::SessionState;
use crate::systems::vapor::VaporSystem;

#[path = "perf/phase_clock.rs"]
mod phase_clock;
#[path = "perf/perf_stats.rs"]
mod perf_stats;
#[path = "stats/stats.rs"]
mod stats;
#[path = "events/observer.rs"]
mod observer;
#[path = "init/init.rs"]
mod init;
#[path = "init/settings.rs"]
mod settings;
#[path = "commands/commands.rs"]
mod commands;
#[path = "step/step.rs"]
mod step;
#[path = "render/render_extract.rs"]
mod render_extract;
mod facade;

pub use facade::{Engine, RenderLayout};
pub use observer::EngineObserver;
pub use perf_stats::PerfStats;
pub use render_extract::{RenderBuffer, FRAGMENT_TRANSFORM_STRIDE};
pub use stats::Stats;

use phase_clock::PhaseClock;

/// Packed per-tick output for the renderer that no system owns.
struct RenderBuffers {
    fragment_transforms: Vec<f32>,
    fragment_hulls: Vec<f32>,
    liquid_profile: Vec<f32>,
}

/// The simulation context
pub struct EngineCore {
    config: SimConfig,
    rng: StdRng,

    fragments: FragmentSystem,
    pool: LiquidPool,
    vapor: VaporSystem,
    residue: ResidueStore,
    session: SessionState,
    vessel: VesselFrame,

    shard_size: f32,
    tick_count: u64,
    accumulator: f32,

    // Outputs
    stats: Stats,
    subtitle: Option<SubtitleEvent>,
    phase_events: Vec<PhaseChangeEvent>,
    observer: Option<Box<dyn EngineObserver>>,
    render: RenderBuffers,

    // Perf metrics
    perf_enabled: bool,
    perf_stats: PerfStats,
}

impl EngineCore {
    /// Create an engine with default config. `None` draws a random seed.
    pub fn new(seed: Option<u64>) -> Self {
        init::create_engine_core(SimConfig::default(), seed)
    }

    /// Build from an in-memory config. Rejected configs never reach the tick.
    pub fn with_config(config: SimConfig, seed: Option<u64>) -> Result<Self> {
        config.validate()?;
        Ok(init::create_engine_core(config, seed))
    }

    /// Parse, validate and build from a JSON config.
    pub fn from_config_json(json: &str, seed: Option<u64>) -> Result<Self> {
        let config = SimConfig::from_json(json)?;
        log::info!("config loaded");
        Ok(init::create_engine_core(config, seed))
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn shard_size(&self) -> f32 {
        self.shard_size
    }

    // === SETTINGS ===

    /// Enable or disable per-step perf metrics
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        settings::enable_perf_metrics(self, enabled);
    }

    /// Last step perf snapshot (zeros when perf disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        settings::get_perf_stats(self)
    }

    pub fn set_gravity(&mut self, gravity: Vec3) {
        settings::set_gravity(self, gravity);
    }

    pub fn set_room_temperature(&mut self, temp: f32) {
        settings::set_room_temperature(self, temp);
    }

    pub fn get_room_temperature(&self) -> f32 {
        settings::get_room_temperature(self)
    }

    pub fn set_observer(&mut self, observer: Box<dyn EngineObserver>) {
        settings::set_observer(self, Some(observer));
    }

    pub fn clear_observer(&mut self) {
        settings::set_observer(self, None);
    }

    // === INPUTS ===

    pub fn set_heat_source(&mut self, position: Vec3) {
        commands::set_heat_source(self, position);
    }

    pub fn set_lighter_held(&mut self, held: bool) {
        commands::set_lighter_held(self, held);
    }

    pub fn set_inhaling(&mut self, inhaling: bool) {
        commands::set_inhaling(self, inhaling);
    }

    /// Toggle the tilt target between +45° and level
    pub fn toggle_tilt_forward(&mut self) {
        commands::toggle_tilt_forward(self);
    }

    /// Toggle the tilt target between −45° and level
    pub fn toggle_tilt_backward(&mut self) {
        commands::toggle_tilt_backward(self);
    }

    /// Replace every fragment with a fresh batch of `size` and empty the pool.
    pub fn reset(&mut self, size: f32) {
        commands::reset(self, size);
    }

    // === STEPPING ===

    /// Advance by `dt` seconds of wall-clock time.
    pub fn step(&mut self, dt: f32) {
        step::step(self, dt);
    }

    // === OUTPUTS ===

    pub fn stats(&self) -> Stats {
        self.stats
    }

    pub fn stimulation(&self) -> f32 {
        self.session.stimulation.level()
    }

    pub fn is_heating(&self) -> bool {
        self.session.heating
    }

    pub fn pipe_tilt(&self) -> f32 {
        self.session.tilt.current
    }

    pub fn vessel(&self) -> &VesselFrame {
        &self.vessel
    }

    /// Most recent subtitle, cleared by the call.
    pub fn take_subtitle(&mut self) -> Option<SubtitleEvent> {
        self.subtitle.take()
    }

    pub fn fragments(&self) -> &FragmentSystem {
        &self.fragments
    }

    pub fn pool(&self) -> &LiquidPool {
        &self.pool
    }

    pub fn vapor(&self) -> &VaporSystem {
        &self.vapor
    }

    pub fn residue(&self) -> &ResidueStore {
        &self.residue
    }

    pub fn vapor_positions(&self) -> &[f32] {
        self.vapor.positions()
    }

    pub fn residue_positions(&self) -> &[f32] {
        self.residue.positions()
    }

    pub fn fragment_transforms(&self) -> &[f32] {
        &self.render.fragment_transforms
    }

    pub fn fragment_hulls(&self) -> &[f32] {
        &self.render.fragment_hulls
    }

    pub fn liquid_profile(&self) -> &[f32] {
        &self.render.liquid_profile
    }

    /// Look up a render buffer by name (`vapor`, `residue`, `fragments`,
    /// `hulls`, `liquid_profile`).
    pub fn render_buffer(&self, name: &str) -> Result<&[f32]> {
        render_extract::buffer_by_name(self, name)
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
