use glam::Vec3;

use super::{render_extract, stats, EngineCore};

pub(super) fn set_heat_source(engine: &mut EngineCore, position: Vec3) {
    engine.session.heat_source = position;
}

pub(super) fn set_lighter_held(engine: &mut EngineCore, held: bool) {
    engine.session.lighter_held = held;
}

pub(super) fn set_inhaling(engine: &mut EngineCore, inhaling: bool) {
    engine.session.inhaling = inhaling;
}

pub(super) fn toggle_tilt_forward(engine: &mut EngineCore) {
    engine.session.tilt.toggle_forward();
}

pub(super) fn toggle_tilt_backward(engine: &mut EngineCore) {
    engine.session.tilt.toggle_backward();
}

/// The size is trusted; the shard-size control clamps it to its range.
pub(super) fn reset(engine: &mut EngineCore, size: f32) {
    engine.shard_size = size;
    engine
        .fragments
        .reset(&mut engine.rng, size, &mut engine.pool, &engine.config);
    render_extract::refresh(engine);
    engine.stats = stats::snapshot(engine);
}
