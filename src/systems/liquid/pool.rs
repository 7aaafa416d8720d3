use glam::{Quat, Vec3};
use rand::Rng;

use crate::domain::config::SimConfig;
use crate::domain::{Fragment, PhaseChangeEvent, PhaseChangeKind, VesselFrame};
use crate::systems::temperature::{ease_toward, heat_gain, mix_temperature};

use super::surface::LiquidSurface;

/// The molten pool. Volume is in cubic units consistent with `size³`.
#[derive(Debug, Clone)]
pub struct LiquidPool {
    volume: f32,
    temperature: f32,
    surface: LiquidSurface,
}

/// What one pool tick produced.
#[derive(Debug, Default)]
pub struct LiquidStep {
    /// A fragment re-nucleated out of the pool, to be handed to the fragment system.
    pub nucleated: Option<Fragment>,
}

impl LiquidPool {
    pub fn new(room_temp: f32) -> Self {
        Self {
            volume: 0.0,
            temperature: room_temp,
            surface: LiquidSurface::new(),
        }
    }

    #[inline]
    pub fn volume(&self) -> f32 {
        self.volume
    }

    #[inline]
    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    pub fn surface(&self) -> &LiquidSurface {
        &self.surface
    }

    /// Orientation of the surface's up axis within the vessel.
    pub fn orientation(&self) -> Quat {
        self.surface.orientation
    }

    pub fn is_active(&self) -> bool {
        self.volume > 0.0
    }

    pub fn reset(&mut self, room_temp: f32) {
        self.volume = 0.0;
        self.temperature = room_temp;
        self.surface.hide();
    }

    /// Merge `volume` at `temperature` into the pool.
    pub fn absorb(&mut self, volume: f32, temperature: f32) {
        self.temperature = mix_temperature(self.temperature, self.volume, temperature, volume);
        self.volume += volume;
    }

    /// Remove up to `amount` of volume, never going negative.
    pub fn debit(&mut self, amount: f32) {
        self.volume = (self.volume - amount).max(0.0);
    }

    #[cfg(test)]
    pub(crate) fn set_state(&mut self, volume: f32, temperature: f32) {
        self.volume = volume;
        self.temperature = temperature;
    }

    /// Advance the pool by one tick.
    ///
    /// `heat_source` is the world position of an active heat source; the
    /// pool measures its distance from the vessel origin. `solid_count` gates
    /// re-nucleation against the solid fragment cap.
    pub fn update<R: Rng>(
        &mut self,
        rng: &mut R,
        config: &SimConfig,
        frame: &VesselFrame,
        local_gravity: Vec3,
        heat_source: Option<Vec3>,
        solid_count: usize,
        events: &mut Vec<PhaseChangeEvent>,
    ) -> LiquidStep {
        let mut step = LiquidStep::default();
        if !self.is_active() {
            self.surface.hide();
            return step;
        }

        let tuning = &config.liquid;
        let chamber_radius = config.geometry.chamber_radius;
        self.surface.rebuild(self.volume, chamber_radius, tuning);

        let down = local_gravity.normalize_or(Vec3::NEG_Y);
        let target = Quat::from_rotation_arc(Vec3::Y, -down);
        self.surface.orientation = self
            .surface
            .orientation
            .slerp(target, tuning.orientation_smoothing)
            .normalize();

        if let Some(source) = heat_source {
            let distance = frame.position.distance(source);
            self.temperature += heat_gain(tuning.heat_gain, distance);
        }
        self.temperature = ease_toward(self.temperature, config.thermal.room_temp, tuning.cooling);

        if self.temperature < config.thermal.recrystallization_temp
            && rng.random::<f32>() < tuning.nucleation_chance
            && solid_count < config.fragments.max_solid
        {
            step.nucleated = self.nucleate(rng, config, down, events);
        }

        step
    }

    fn nucleate<R: Rng>(
        &mut self,
        rng: &mut R,
        config: &SimConfig,
        down: Vec3,
        events: &mut Vec<PhaseChangeEvent>,
    ) -> Option<Fragment> {
        let tuning = &config.liquid;
        let size = rng.random_range(tuning.nucleation_size_min..=tuning.nucleation_size_max);
        let volume = size * size * size;
        if self.volume < volume {
            return None;
        }
        self.volume -= volume;

        let jitter = Vec3::new(
            rng.random::<f32>() - 0.5,
            rng.random::<f32>() - 0.5,
            rng.random::<f32>() - 0.5,
        ) * 0.2;
        let position = down * (config.geometry.chamber_radius - size * 1.5) + jitter;
        let fragment = Fragment::new(rng, position, size, self.temperature);

        log::debug!(
            "nucleation: size {:.2} at {:.1}°C, pool left {:.3}",
            size,
            self.temperature,
            self.volume
        );
        events.push(PhaseChangeEvent {
            kind: PhaseChangeKind::Nucleation,
            position,
            volume,
            temperature: self.temperature,
        });
        Some(fragment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::random::make_rng;
    use approx::assert_abs_diff_eq;

    fn frame(config: &SimConfig) -> VesselFrame {
        VesselFrame::new(&config.geometry, 0.0)
    }

    #[test]
    fn absorb_into_empty_pool_takes_incoming_temperature() {
        let mut pool = LiquidPool::new(20.0);
        pool.absorb(0.125, 185.0);
        assert_eq!(pool.volume(), 0.125);
        assert_eq!(pool.temperature(), 185.0);
    }

    #[test]
    fn absorb_mixes_by_volume() {
        let mut pool = LiquidPool::new(20.0);
        pool.absorb(1.0, 100.0);
        pool.absorb(1.0, 200.0);
        assert_abs_diff_eq!(pool.temperature(), 150.0, epsilon = 1e-4);
        assert_eq!(pool.volume(), 2.0);
    }

    #[test]
    fn debit_clamps_at_zero() {
        let mut pool = LiquidPool::new(20.0);
        pool.absorb(0.1, 200.0);
        pool.debit(1.0);
        assert_eq!(pool.volume(), 0.0);
    }

    #[test]
    fn empty_pool_is_inert() {
        let config = SimConfig::default();
        let mut rng = make_rng(Some(1));
        let mut pool = LiquidPool::new(20.0);
        let mut events = Vec::new();
        let step = pool.update(&mut rng, &config, &frame(&config), Vec3::NEG_Y, Some(Vec3::ZERO), 0, &mut events);
        assert!(step.nucleated.is_none());
        assert!(!pool.surface().visible);
        assert_eq!(pool.temperature(), 20.0);
    }

    #[test]
    fn cools_toward_room_without_undershoot() {
        let config = SimConfig::default();
        let mut rng = make_rng(Some(1));
        let mut pool = LiquidPool::new(20.0);
        pool.set_state(1.0, 250.0);
        let f = frame(&config);
        let mut events = Vec::new();
        let mut last = pool.temperature();
        for _ in 0..2000 {
            // A full solid count keeps nucleation from draining the pool.
            pool.update(&mut rng, &config, &f, Vec3::NEG_Y, None, usize::MAX, &mut events);
            assert!(pool.temperature() <= last);
            assert!(pool.temperature() >= 20.0);
            last = pool.temperature();
        }
        assert!(last < 30.0);
    }

    #[test]
    fn heating_measures_from_vessel_origin() {
        let config = SimConfig::default();
        let mut rng = make_rng(Some(1));
        let mut pool = LiquidPool::new(20.0);
        pool.set_state(1.0, 200.0);
        let f = frame(&config);
        let mut events = Vec::new();
        pool.update(&mut rng, &config, &f, Vec3::NEG_Y, Some(f.position), 0, &mut events);
        assert_abs_diff_eq!(pool.temperature(), 20.0 + 280.0 * 0.995, epsilon = 1e-3);
    }

    #[test]
    fn surface_levels_against_gravity() {
        let config = SimConfig::default();
        let mut rng = make_rng(Some(1));
        let mut pool = LiquidPool::new(20.0);
        pool.set_state(1.0, 200.0);
        let f = frame(&config);
        let mut events = Vec::new();
        let gravity = Vec3::new(0.0, -1.0, -1.0).normalize() * 0.001;
        for _ in 0..200 {
            pool.update(&mut rng, &config, &f, gravity, None, 0, &mut events);
        }
        let up = pool.orientation() * Vec3::Y;
        assert_abs_diff_eq!(up.dot(-gravity.normalize()), 1.0, epsilon = 1e-3);
    }

    #[test]
    fn zero_gravity_does_not_poison_orientation() {
        let config = SimConfig::default();
        let mut rng = make_rng(Some(1));
        let mut pool = LiquidPool::new(20.0);
        pool.set_state(1.0, 200.0);
        let mut events = Vec::new();
        pool.update(&mut rng, &config, &frame(&config), Vec3::ZERO, None, 0, &mut events);
        assert!(pool.orientation().is_finite());
    }

    #[test]
    fn cold_pool_renucleates_and_debits_volume() {
        let config = SimConfig::default();
        let mut rng = make_rng(Some(4));
        let mut pool = LiquidPool::new(20.0);
        pool.set_state(5.0, 50.0);
        let f = frame(&config);
        let mut events = Vec::new();
        let mut spawned = None;
        for _ in 0..1000 {
            let before = pool.volume();
            let step = pool.update(&mut rng, &config, &f, Vec3::NEG_Y, None, 0, &mut events);
            if let Some(frag) = step.nucleated {
                assert_abs_diff_eq!(before - pool.volume(), frag.volume(), epsilon = 1e-5);
                spawned = Some(frag);
                break;
            }
        }
        let frag = spawned.expect("a cold pool should re-nucleate within 1000 ticks");
        assert!(frag.size >= 0.3 && frag.size <= 0.7);
        assert_eq!(frag.velocity, Vec3::ZERO);
        assert!(frag.position.y < 0.0);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, PhaseChangeKind::Nucleation);
    }

    #[test]
    fn solid_cap_blocks_nucleation() {
        let config = SimConfig::default();
        let mut rng = make_rng(Some(4));
        let mut pool = LiquidPool::new(20.0);
        pool.set_state(5.0, 50.0);
        let f = frame(&config);
        let mut events = Vec::new();
        for _ in 0..500 {
            let step = pool.update(&mut rng, &config, &f, Vec3::NEG_Y, None, 30, &mut events);
            assert!(step.nucleated.is_none());
        }
        assert_eq!(pool.volume(), 5.0);
    }
}
