use glam::Vec3;
use rand::Rng;

use crate::core::random::centered;
use crate::domain::config::SimConfig;
use crate::domain::VaporParticle;
use crate::systems::liquid::{surface_depth, LiquidPool};
use crate::systems::residue::ResidueStore;
use crate::systems::session::Stimulation;

use super::boundary::{collide_channel, collide_chamber};
use super::emission::{emission_rate, sample_surface_point};

/// Bounded pool of live vapor particles plus their packed render positions.
pub struct VaporSystem {
    particles: Vec<VaporParticle>,
    positions: Vec<f32>,
    capacity: usize,
}

/// What one vapor tick did, for perf stats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VaporStepCounts {
    pub emitted: u32,
    pub exits: u32,
    pub deposits: u32,
    pub expired: u32,
}

impl VaporSystem {
    pub fn new(capacity: usize) -> Self {
        Self {
            particles: Vec::with_capacity(capacity),
            positions: vec![0.0; capacity * 3],
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn particles(&self) -> &[VaporParticle] {
        &self.particles
    }

    /// Add a particle directly. Dropped when the pool is full.
    pub fn spawn(&mut self, particle: VaporParticle) -> bool {
        if self.particles.len() >= self.capacity {
            return false;
        }
        self.particles.push(particle);
        true
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    /// Packed positions of the survivors of the last update.
    pub fn positions(&self) -> &[f32] {
        &self.positions[..self.particles.len() * 3]
    }

    pub fn positions_ptr(&self) -> *const f32 {
        self.positions.as_ptr()
    }

    /// Emit from the pool surface if it is superheated. Returns the number
    /// of particles created.
    pub fn emit<R: Rng>(&mut self, rng: &mut R, config: &SimConfig, pool: &mut LiquidPool) -> u32 {
        let tuning = &config.vapor;
        if !pool.is_active() || self.particles.len() >= self.capacity {
            return 0;
        }
        let rate = emission_rate(pool.volume(), pool.temperature(), &config.thermal, tuning);
        if rate <= 0.0 {
            return 0;
        }

        let room = self.capacity - self.particles.len();
        let wanted = (rate.ceil() as usize).min(room);
        let chamber_radius = config.geometry.chamber_radius;
        let orientation = pool.orientation();
        let mut emitted = 0u32;
        for _ in 0..wanted {
            let depth = surface_depth(pool.volume(), &config.liquid);
            let position = sample_surface_point(rng, depth, chamber_radius, orientation);
            let velocity = Vec3::new(
                centered(rng, tuning.initial_speed),
                centered(rng, tuning.initial_speed),
                centered(rng, tuning.initial_speed),
            );
            let lifespan = rng.random_range(tuning.lifespan_min..=tuning.lifespan_max);
            self.particles.push(VaporParticle::new(position, velocity, lifespan));
            emitted += 1;

            if tuning.debits_volume {
                pool.debit(tuning.volume_per_particle);
                if !pool.is_active() {
                    break;
                }
            }
        }
        emitted
    }

    /// Emit, then advance every live particle one tick.
    ///
    /// Survivors are packed into the position buffer in iteration order
    /// (newest first).
    pub fn update<R: Rng>(
        &mut self,
        rng: &mut R,
        config: &SimConfig,
        pool: &mut LiquidPool,
        inhaling: bool,
        residue: &mut ResidueStore,
        stimulation: &mut Stimulation,
    ) -> VaporStepCounts {
        let mut counts = VaporStepCounts {
            emitted: self.emit(rng, config, pool),
            ..Default::default()
        };

        let geometry = &config.geometry;
        let tuning = &config.vapor;
        let aperture_x = geometry.aperture_x();
        let suction_target = Vec3::new(aperture_x, 0.0, 0.0);
        let mut active = 0usize;

        let mut i = self.particles.len();
        while i > 0 {
            i -= 1;
            let p = &mut self.particles[i];

            p.velocity.y += tuning.buoyancy;
            p.velocity.x += centered(rng, tuning.jitter);
            p.velocity.z += centered(rng, tuning.jitter);

            if inhaling {
                let to_target = suction_target - p.position;
                let distance = to_target.length();
                let pull = tuning.suction_gain / (1.0 + distance * tuning.suction_falloff);
                p.velocity += to_target.normalize_or_zero() * pull;
            }

            p.position += p.velocity;
            p.lifespan -= 1;

            let hit_chamber = collide_chamber(p, geometry, tuning);
            let hit_channel = collide_channel(p, geometry, tuning);

            let mut consumed = false;
            if p.position.x > aperture_x {
                p.expire();
                stimulation.record_exit(config.session.stimulation_per_exit);
                counts.exits += 1;
                consumed = true;
            }

            if (hit_chamber || hit_channel)
                && rng.random::<f32>() < tuning.deposit_chance
                && residue.deposit(p.position)
            {
                p.expire();
                counts.deposits += 1;
                consumed = true;
            }

            if p.is_expired() {
                if !consumed {
                    counts.expired += 1;
                }
                // Everything past `i` is already processed, so the swap keeps order.
                self.particles.swap_remove(i);
            } else {
                let base = active * 3;
                self.positions[base..base + 3].copy_from_slice(&p.position.to_array());
                active += 1;
            }
        }

        log::trace!(
            "vapor: {} live, +{} emitted, {} exits, {} deposits, {} expired",
            self.particles.len(),
            counts.emitted,
            counts.exits,
            counts.deposits,
            counts.expired
        );
        counts
    }
}
