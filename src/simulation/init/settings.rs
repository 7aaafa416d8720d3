use glam::Vec3;

use super::observer::EngineObserver;
use super::perf_stats::PerfStats;
use super::EngineCore;

pub(super) fn enable_perf_metrics(engine: &mut EngineCore, enabled: bool) {
    engine.perf_enabled = enabled;
    if !enabled {
        engine.perf_stats.reset();
    }
}

pub(super) fn get_perf_stats(engine: &EngineCore) -> PerfStats {
    engine.perf_stats.clone()
}

/// World-space gravity; the vessel-local vector is derived every tick.
pub(super) fn set_gravity(engine: &mut EngineCore, gravity: Vec3) {
    engine.config.geometry.world_gravity = gravity;
}

pub(super) fn set_room_temperature(engine: &mut EngineCore, temp: f32) {
    engine.config.thermal.room_temp = temp;
}

pub(super) fn get_room_temperature(engine: &EngineCore) -> f32 {
    engine.config.thermal.room_temp
}

pub(super) fn set_observer(engine: &mut EngineCore, observer: Option<Box<dyn EngineObserver>>) {
    engine.observer = observer;
}
