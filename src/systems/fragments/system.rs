use glam::Vec3;
use rand::Rng;

use crate::domain::config::SimConfig;
use crate::domain::{Fragment, Phase, PhaseChangeEvent, PhaseChangeKind, VesselFrame};
use crate::systems::liquid::LiquidPool;

use super::collision::{resolve_boundary, resolve_pairs};
use super::thermal::update_fragment_temperature;

/// Manages the solid-body pool.
pub struct FragmentSystem {
    fragments: Vec<Fragment>,
}

/// Work done by one `update`, for perf stats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FragmentStepCounts {
    pub melted: u32,
    pub contacts: u32,
}

impl FragmentSystem {
    pub fn new() -> Self {
        Self { fragments: Vec::new() }
    }

    /// Drop every fragment, empty the pool, and scatter a fresh batch of
    /// fragments of edge `size` near the chamber floor.
    ///
    /// `size` is trusted: the shard-size control clamps it before calling.
    pub fn reset<R: Rng>(&mut self, rng: &mut R, size: f32, pool: &mut LiquidPool, config: &SimConfig) {
        self.fragments.clear();
        pool.reset(config.thermal.room_temp);

        let floor = -config.geometry.chamber_radius;
        let count = config.fragments.reset_count;
        self.fragments.reserve(count);
        for _ in 0..count {
            let position = Vec3::new(
                (rng.random::<f32>() - 0.5) * 0.5,
                floor + 0.5 + rng.random::<f32>() * 0.5,
                (rng.random::<f32>() - 0.5) * 0.5,
            );
            self.fragments
                .push(Fragment::new(rng, position, size, config.thermal.room_temp));
        }
        log::info!("reset: {} fragments of size {:.2}", count, size);
    }

    /// Add a fragment produced by re-nucleation.
    pub fn push(&mut self, fragment: Fragment) {
        self.fragments.push(fragment);
    }

    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    #[cfg(test)]
    pub(crate) fn fragments_mut(&mut self) -> &mut Vec<Fragment> {
        &mut self.fragments
    }

    /// Total fragments, melted ones included.
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    pub fn solid_count(&self) -> usize {
        self.fragments.iter().filter(|f| f.is_solid()).count()
    }

    /// Advance the pool by one tick.
    ///
    /// `heat_source` is the world position of an active heat source, or
    /// `None` when nothing is heating the vessel. Melted fragments transfer
    /// `size³` and their temperature into `pool` exactly once.
    pub fn update(
        &mut self,
        config: &SimConfig,
        frame: &VesselFrame,
        local_gravity: Vec3,
        heat_source: Option<Vec3>,
        pool: &mut LiquidPool,
        events: &mut Vec<PhaseChangeEvent>,
    ) -> FragmentStepCounts {
        let tuning = &config.fragments;
        let chamber_radius = config.geometry.chamber_radius;
        let mut counts = FragmentStepCounts::default();

        for f in self.fragments.iter_mut().filter(|f| f.is_solid()) {
            f.velocity += local_gravity;
            f.position += f.velocity;
        }

        for _ in 0..tuning.collision_iterations {
            resolve_boundary(&mut self.fragments, chamber_radius, tuning.wall_restitution);
            counts.contacts += resolve_pairs(&mut self.fragments, tuning.pair_restitution);
        }
        resolve_boundary(&mut self.fragments, chamber_radius, tuning.wall_restitution);

        for f in self.fragments.iter_mut().filter(|f| f.is_solid()) {
            f.velocity *= tuning.linear_damping;
            f.angular_velocity *= tuning.angular_damping;
            f.spin();

            let world = frame.to_world(f.position);
            if update_fragment_temperature(f, world, heat_source, tuning, &config.thermal) {
                f.phase = Phase::Liquid;
                pool.absorb(f.volume(), f.temperature);
                counts.melted += 1;
                log::debug!(
                    "melt: size {:.2} at {:.1}°C, pool now {:.3}",
                    f.size,
                    f.temperature,
                    pool.volume()
                );
                events.push(PhaseChangeEvent {
                    kind: PhaseChangeKind::Melt,
                    position: f.position,
                    volume: f.volume(),
                    temperature: f.temperature,
                });
            }
        }

        counts
    }
}

impl Default for FragmentSystem {
    fn default() -> Self {
        Self::new()
    }
}
