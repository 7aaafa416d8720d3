use crate::domain::constants::{IMPATIENCE_TEXT, SUBTITLE_DISPLAY_SECONDS};
use crate::domain::{PhaseChangeKind, SubtitleEvent, VesselFrame};

use super::{render_extract, stats, EngineCore, PhaseClock};

/// Advance by `dt` seconds.
///
/// Without a fixed rate every call is one tick. With `fixed_step_hz` the
/// time is accumulated and spent in whole ticks, at most `max_substeps` per
/// call; anything left over past that is dropped.
pub(super) fn step(engine: &mut EngineCore, dt: f32) {
    let perf_on = engine.perf_enabled;
    if perf_on {
        engine.perf_stats.reset();
    }
    let mut clock = PhaseClock::new(perf_on);

    match engine.config.time.fixed_step_hz {
        None => tick(engine, dt),
        Some(hz) => {
            let h = 1.0 / hz;
            let max_substeps = engine.config.time.max_substeps;
            engine.accumulator += dt.max(0.0);
            let mut substeps = 0;
            while engine.accumulator >= h && substeps < max_substeps {
                tick(engine, h);
                engine.accumulator -= h;
                substeps += 1;
            }
            if engine.accumulator >= h {
                log::trace!("dropping {:.4}s of accumulated time", engine.accumulator);
                engine.accumulator = 0.0;
            }
        }
    }

    clock.lap();
    render_extract::refresh(engine);

    if perf_on {
        engine.perf_stats.render_ms = clock.lap();
        engine.perf_stats.step_ms = clock.total();
        engine.perf_stats.fragment_count = engine.fragments.len() as u32;
        engine.perf_stats.vapor_count = engine.vapor.len() as u32;
        engine.perf_stats.residue_count = engine.residue.len() as u32;
    }
}

/// One simulation tick.
pub(super) fn tick(engine: &mut EngineCore, dt: f32) {
    let perf_on = engine.perf_enabled;

    // === SESSION ===
    if engine.session.advance(dt, &engine.config.session) {
        fire_impatience(engine);
    }
    engine.vessel = VesselFrame::new(&engine.config.geometry, engine.session.tilt.current);
    engine.session.update_heating(&engine.config.geometry);
    let heat_source = engine.session.active_heat_source();
    let local_gravity = engine.vessel.direction_to_local(engine.config.geometry.world_gravity);

    // === FRAGMENTS ===
    let mut clock = PhaseClock::new(perf_on);
    let fragment_counts = engine.fragments.update(
        &engine.config,
        &engine.vessel,
        local_gravity,
        heat_source,
        &mut engine.pool,
        &mut engine.phase_events,
    );

    let fragments_ms = clock.lap();

    // === LIQUID ===
    let liquid = engine.pool.update(
        &mut engine.rng,
        &engine.config,
        &engine.vessel,
        local_gravity,
        heat_source,
        engine.fragments.solid_count(),
        &mut engine.phase_events,
    );
    let nucleated = liquid.nucleated.is_some();
    if let Some(fragment) = liquid.nucleated {
        engine.fragments.push(fragment);
    }

    let liquid_ms = clock.lap();

    // === VAPOR ===
    let vapor_counts = engine.vapor.update(
        &mut engine.rng,
        &engine.config,
        &mut engine.pool,
        engine.session.inhaling,
        &mut engine.residue,
        &mut engine.session.stimulation,
    );

    if !engine.session.inhaling {
        engine.session.stimulation.decay(engine.config.session.stimulation_decay);
    }

    let vapor_ms = clock.lap();

    if perf_on {
        let p = &mut engine.perf_stats;
        p.fragments_ms += fragments_ms;
        p.liquid_ms += liquid_ms;
        p.vapor_ms += vapor_ms;
        p.ticks += 1;
        p.melts += fragment_counts.melted;
        p.collision_pairs += fragment_counts.contacts;
        p.nucleations += u32::from(nucleated);
        p.emitted += vapor_counts.emitted;
        p.exits += vapor_counts.exits;
        p.deposits += vapor_counts.deposits;
        p.expired += vapor_counts.expired;
    }

    dispatch_phase_events(engine);
    engine.stats = stats::snapshot(engine);
    engine.tick_count += 1;
}

fn fire_impatience(engine: &mut EngineCore) {
    let event = SubtitleEvent {
        text: IMPATIENCE_TEXT.to_string(),
        visible: true,
        display_seconds: SUBTITLE_DISPLAY_SECONDS,
    };
    log::info!("impatience after {:.1}s of suction", engine.session.suction.elapsed);
    match engine.observer.as_mut() {
        Some(observer) => {
            observer.on_knock();
            observer.on_subtitle(&event);
        }
        None => log::warn!("impatience fired with no observer installed"),
    }
    engine.subtitle = Some(event);
}

fn dispatch_phase_events(engine: &mut EngineCore) {
    if engine.phase_events.is_empty() {
        return;
    }
    if let Some(observer) = engine.observer.as_mut() {
        for event in &engine.phase_events {
            observer.on_phase_change(event);
        }
    } else {
        let melts = engine
            .phase_events
            .iter()
            .filter(|e| e.kind == PhaseChangeKind::Melt)
            .count();
        log::trace!("{} phase changes ({} melts), no observer", engine.phase_events.len(), melts);
    }
    engine.phase_events.clear();
}
