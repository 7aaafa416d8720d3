use vapor_engine::Engine;

#[test]
fn perf_smoke_step() {
    let mut engine = Engine::new(Some(1));
    engine.enable_perf_metrics(true);
    engine.set_lighter_held(true);
    engine.set_heat_source(0.0, 2.5, 2.0);
    for _ in 0..600 {
        engine.step(1.0 / 60.0);
    }
    let stats = engine.get_perf_stats();
    assert!(stats.step_ms() >= 0.0);
    assert_eq!(stats.ticks(), 1);
    assert_eq!(stats.fragment_count() as usize, engine.fragment_count());
}

#[test]
fn perf_smoke_full_vapor_load() {
    let mut engine = Engine::new(Some(2));
    engine.enable_perf_metrics(true);
    engine.set_lighter_held(true);
    engine.set_heat_source(0.0, 2.5, 2.0);
    engine.set_inhaling(true);
    for _ in 0..1200 {
        engine.step(1.0 / 60.0);
    }
    let stats = engine.stats();
    assert!(stats.vapor_count() as usize <= vapor_engine::max_vapor());
    assert!(engine.get_perf_stats().vapor_ms() >= 0.0);
}
