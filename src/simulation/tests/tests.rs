use std::cell::RefCell;
use std::rc::Rc;

use super::*;
use crate::domain::constants::{IMPATIENCE_TEXT, STIMULATION_MAX};
use crate::domain::{PhaseChangeKind, VaporParticle};

const DT: f32 = 1.0 / 60.0;

#[derive(Default)]
struct Recorded {
    knocks: u32,
    subtitles: Vec<String>,
    melts: u32,
    nucleations: u32,
}

struct Recorder(Rc<RefCell<Recorded>>);

impl EngineObserver for Recorder {
    fn on_knock(&mut self) {
        self.0.borrow_mut().knocks += 1;
    }

    fn on_subtitle(&mut self, event: &SubtitleEvent) {
        self.0.borrow_mut().subtitles.push(event.text.clone());
    }

    fn on_phase_change(&mut self, event: &PhaseChangeEvent) {
        let mut r = self.0.borrow_mut();
        match event.kind {
            PhaseChangeKind::Melt => r.melts += 1,
            PhaseChangeKind::Nucleation => r.nucleations += 1,
        }
    }
}

fn engine_with_recorder(seed: u64) -> (EngineCore, Rc<RefCell<Recorded>>) {
    let mut engine = EngineCore::new(Some(seed));
    let recorded = Rc::new(RefCell::new(Recorded::default()));
    engine.set_observer(Box::new(Recorder(recorded.clone())));
    (engine, recorded)
}

fn assert_contained(engine: &EngineCore) {
    let r = engine.config.geometry.chamber_radius;
    for f in engine.fragments.fragments().iter().filter(|f| f.is_solid()) {
        assert!(
            f.position.length() <= r - f.half_size() + 1e-4,
            "fragment escaped: |p| = {}",
            f.position.length()
        );
    }
}

#[test]
fn new_engine_starts_with_a_batch() {
    let engine = EngineCore::new(Some(1));
    assert_eq!(engine.fragments.len(), 25);
    assert_eq!(engine.pool.volume(), 0.0);
    assert_eq!(engine.shard_size(), 0.5);
    assert_eq!(engine.fragment_transforms().len(), 25 * FRAGMENT_TRANSFORM_STRIDE);
    assert_eq!(engine.fragment_hulls().len(), 25 * 30);
    assert!(engine.liquid_profile().is_empty());
}

#[test]
fn same_seed_same_run() {
    let mut a = EngineCore::new(Some(99));
    let mut b = EngineCore::new(Some(99));
    for engine in [&mut a, &mut b] {
        let origin = engine.config.geometry.vessel_position;
        engine.set_lighter_held(true);
        engine.set_heat_source(origin);
        for _ in 0..300 {
            engine.step(DT);
        }
    }
    assert_eq!(a.fragment_transforms(), b.fragment_transforms());
    assert_eq!(a.stats(), b.stats());
}

#[test]
fn melt_moves_exactly_size_cubed_into_pool() {
    let (mut engine, recorded) = engine_with_recorder(2);
    engine.fragments.fragments_mut().truncate(1);
    engine.fragments.fragments_mut()[0].temperature = 400.0;
    let size = engine.fragments.fragments()[0].size;

    engine.step(DT);

    assert!(!engine.fragments.fragments()[0].is_solid());
    assert!((engine.pool.volume() - size * size * size).abs() < 1e-6);
    assert_eq!(recorded.borrow().melts, 1);
    // Hidden in the transform buffer.
    assert_eq!(engine.fragment_transforms()[FRAGMENT_TRANSFORM_STRIDE - 1], 0.0);
}

#[test]
fn reset_is_idempotent() {
    let mut engine = EngineCore::new(Some(3));
    engine.pool.set_state(1.0, 200.0);
    engine.reset(0.8);
    engine.reset(0.8);
    assert_eq!(engine.fragments.len(), 25);
    assert_eq!(engine.fragments.solid_count(), 25);
    assert_eq!(engine.pool.volume(), 0.0);
    assert_eq!(engine.pool.temperature(), engine.config.thermal.room_temp);
    assert!(engine.fragments.fragments().iter().all(|f| f.size == 0.8));
}

#[test]
fn fragments_stay_inside_while_tilting() {
    let mut engine = EngineCore::new(Some(4));
    engine.reset(1.2);
    for i in 0..900 {
        if i % 200 == 0 {
            engine.toggle_tilt_forward();
        }
        if i % 300 == 0 {
            engine.toggle_tilt_backward();
        }
        engine.step(DT);
        assert_contained(&engine);
    }
}

#[test]
fn heat_then_cool() {
    let (mut engine, recorded) = engine_with_recorder(5);
    engine.fragments.fragments_mut().truncate(1);
    {
        let f = &mut engine.fragments.fragments_mut()[0];
        f.temperature = 20.0;
        f.size = 0.5;
    }
    engine.set_lighter_held(true);

    for _ in 0..100 {
        let local = engine.fragments.fragments()[0].position;
        let world = engine.vessel.to_world(local);
        engine.set_heat_source(world);
        engine.step(DT);
    }
    assert_eq!(recorded.borrow().melts, 1);
    assert!(!engine.fragments.fragments()[0].is_solid());
    let hot = engine.pool.temperature();
    assert!(hot > engine.config.thermal.melting_temp);

    engine.set_lighter_held(false);
    let room = engine.config.thermal.room_temp;
    let mut last = hot;
    for _ in 0..1000 {
        engine.step(DT);
        let t = engine.pool.temperature();
        assert!(t <= last + 1e-4, "pool warmed without heat: {last} -> {t}");
        assert!(t >= room, "pool undershot room temperature: {t}");
        last = t;
    }
    assert!(last < hot);
    assert_eq!(recorded.borrow().melts, 1);
}

#[test]
fn superheated_pool_emits_within_one_tick() {
    let mut engine = EngineCore::new(Some(6));
    let sublimation = engine.config.thermal.sublimation_temp;
    engine.pool.set_state(2.0, sublimation + 10.0);

    let rate = crate::systems::vapor::emission_rate(
        2.0,
        sublimation + 10.0,
        &engine.config.thermal,
        &engine.config.vapor,
    );
    assert!(rate > 0.0);

    engine.step(DT);
    assert!(engine.vapor.len() >= 1);
    assert_eq!(engine.stats().vapor_count() as usize, engine.vapor.len());
    assert_eq!(engine.vapor_positions().len(), engine.vapor.len() * 3);
}

#[test]
fn exit_adds_exactly_one_increment() {
    let mut engine = EngineCore::new(Some(7));
    engine.set_inhaling(true);
    let x = engine.config.geometry.aperture_x() + 0.5;
    engine
        .vapor
        .spawn(VaporParticle::new(Vec3::new(x, 0.0, 0.0), Vec3::ZERO, 600));

    engine.step(DT);

    assert_eq!(engine.stimulation(), 0.05);
    assert!(engine.vapor.is_empty());
}

#[test]
fn stimulation_decays_when_not_inhaling() {
    let mut engine = EngineCore::new(Some(7));
    engine.session.stimulation.record_exit(0.12);
    engine.step(DT);
    assert!((engine.stimulation() - 0.07).abs() < 1e-6);
    for _ in 0..10 {
        engine.step(DT);
    }
    assert_eq!(engine.stimulation(), 0.0);
}

#[test]
fn populations_and_stimulation_stay_bounded() {
    let mut config = SimConfig::default();
    config.vapor.max_vapor = 300;
    config.vapor.max_residue = 40;
    let mut engine = EngineCore::with_config(config, Some(8)).expect("valid config");
    engine.pool.set_state(4.0, 900.0);
    let origin = engine.config.geometry.vessel_position;
    engine.set_lighter_held(true);
    engine.set_heat_source(origin);

    for i in 0..1500 {
        engine.set_inhaling(i % 400 < 250);
        engine.step(DT);
        assert!(engine.vapor.len() <= 300);
        assert!(engine.residue.len() <= 40);
        let s = engine.stimulation();
        assert!((0.0..=STIMULATION_MAX).contains(&s));
    }
    assert!(engine.residue.len() > 0);
}

#[test]
fn impatience_fires_once_per_episode() {
    let (mut engine, recorded) = engine_with_recorder(9);
    engine.set_inhaling(true);
    for _ in 0..(60 * 10) {
        engine.step(DT);
    }
    assert_eq!(recorded.borrow().knocks, 1);
    assert_eq!(recorded.borrow().subtitles, vec![IMPATIENCE_TEXT.to_string()]);

    let subtitle = engine.take_subtitle().expect("subtitle should be pending");
    assert!(subtitle.visible);
    assert_eq!(subtitle.display_seconds, 3.5);
    assert!(engine.take_subtitle().is_none());

    engine.set_inhaling(false);
    engine.step(DT);
    engine.set_inhaling(true);
    for _ in 0..(60 * 10) {
        engine.step(DT);
    }
    assert_eq!(recorded.borrow().knocks, 2);
}

#[test]
fn impatience_without_observer_still_queues_subtitle() {
    let mut engine = EngineCore::new(Some(9));
    engine.set_inhaling(true);
    engine.step(9.0);
    assert!(engine.take_subtitle().is_some());
}

#[test]
fn heating_requires_proximity() {
    let mut engine = EngineCore::new(Some(10));
    engine.set_lighter_held(true);
    engine.set_heat_source(Vec3::new(50.0, 0.0, 0.0));
    engine.step(DT);
    assert!(!engine.stats().is_heating());

    let origin = engine.config.geometry.vessel_position;
    engine.set_heat_source(origin);
    engine.step(DT);
    assert!(engine.stats().is_heating());
}

#[test]
fn tilt_shows_up_in_stats() {
    let mut engine = EngineCore::new(Some(11));
    engine.toggle_tilt_forward();
    for _ in 0..400 {
        engine.step(DT);
    }
    assert!((engine.stats().pipe_rotation_degrees() - 45.0).abs() < 0.01);
    engine.toggle_tilt_forward();
    for _ in 0..400 {
        engine.step(DT);
    }
    assert!(engine.stats().pipe_rotation_degrees().abs() < 0.01);
}

#[test]
fn fixed_step_runs_whole_ticks_and_drops_backlog() {
    let mut config = SimConfig::default();
    config.time.fixed_step_hz = Some(60.0);
    config.time.max_substeps = 4;
    let mut engine = EngineCore::with_config(config, Some(12)).expect("valid config");
    engine.enable_perf_metrics(true);

    engine.step(0.051);
    assert_eq!(engine.tick_count(), 3);
    assert_eq!(engine.get_perf_stats().ticks(), 3);

    engine.step(1.0);
    assert_eq!(engine.tick_count(), 7);
    assert!(engine.accumulator < 1.0 / 60.0);
}

#[test]
fn liquid_profile_appears_with_volume() {
    let mut engine = EngineCore::new(Some(13));
    engine.pool.set_state(1.0, 150.0);
    engine.step(DT);
    let segments = engine.config.liquid.profile_segments;
    assert_eq!(engine.liquid_profile().len(), (segments + 2) * 2);
    assert!(engine.pool.surface().visible);
}

#[test]
fn render_buffers_by_name() {
    let engine = EngineCore::new(Some(14));
    assert_eq!(engine.render_buffer("fragments").map(|b| b.len()).ok(), Some(25 * 9));
    assert!(engine.render_buffer("vapor").map(|b| b.is_empty()).unwrap_or(false));
    assert!(engine.render_buffer("smoke").is_err());
}

#[test]
fn perf_counters_track_work() {
    let mut engine = EngineCore::new(Some(15));
    engine.enable_perf_metrics(true);
    engine.step(DT);
    let perf = engine.get_perf_stats();
    assert_eq!(perf.ticks(), 1);
    assert_eq!(perf.fragment_count(), 25);
    assert!(perf.step_ms() >= 0.0);

    engine.enable_perf_metrics(false);
    engine.step(DT);
    assert_eq!(engine.get_perf_stats().ticks(), 0);
}
