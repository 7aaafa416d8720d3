use crate::core::random::make_rng;
use crate::domain::config::SimConfig;
use crate::domain::constants::INITIAL_SHARD_SIZE;
use crate::domain::VesselFrame;
use crate::systems::fragments::FragmentSystem;
use crate::systems::liquid::LiquidPool;
use crate::systems::residue::ResidueStore;
use crate::systems::session::SessionState;
use crate::systems::vapor::VaporSystem;

use super::perf_stats::PerfStats;
use super::stats::Stats;
use super::{render_extract, stats, EngineCore, RenderBuffers};

/// Build an engine with its first batch of fragments already in place.
pub(super) fn create_engine_core(config: SimConfig, seed: Option<u64>) -> EngineCore {
    let room = config.thermal.room_temp;
    let fragment_cap = config.fragments.reset_count.max(config.fragments.max_solid);

    let mut engine = EngineCore {
        rng: make_rng(seed),
        fragments: FragmentSystem::new(),
        pool: LiquidPool::new(room),
        vapor: VaporSystem::new(config.vapor.max_vapor),
        residue: ResidueStore::new(config.vapor.max_residue),
        session: SessionState::default(),
        vessel: VesselFrame::new(&config.geometry, 0.0),

        shard_size: INITIAL_SHARD_SIZE,
        tick_count: 0,
        accumulator: 0.0,

        stats: Stats::default(),
        subtitle: None,
        phase_events: Vec::new(),
        observer: None,
        render: RenderBuffers {
            fragment_transforms: Vec::with_capacity(fragment_cap * render_extract::FRAGMENT_TRANSFORM_STRIDE),
            fragment_hulls: Vec::with_capacity(fragment_cap * render_extract::FRAGMENT_HULL_STRIDE),
            liquid_profile: Vec::with_capacity((config.liquid.profile_segments + 2) * 2),
        },

        perf_enabled: false,
        perf_stats: PerfStats::default(),

        config,
    };

    engine.fragments.reset(&mut engine.rng, engine.shard_size, &mut engine.pool, &engine.config);
    render_extract::refresh(&mut engine);
    engine.stats = stats::snapshot(&engine);
    engine
}
