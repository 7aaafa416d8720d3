//! Cross-cutting session scalars: input flags, pipe tilt, the suction timer
//! with its one-shot impatience latch, and the stimulation accumulator.

use glam::Vec3;

use crate::domain::config::{GeometryConfig, SessionTuning};
use crate::domain::constants::{STIMULATION_MAX, TILT_ANGLE};
use crate::systems::temperature::ease_toward;

/// Pipe tilt about the vessel X axis, in radians.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PipeTilt {
    pub target: f32,
    pub current: f32,
}

impl PipeTilt {
    /// Toggle between +45° and level.
    pub fn toggle_forward(&mut self) {
        self.target = if self.target == TILT_ANGLE { 0.0 } else { TILT_ANGLE };
    }

    /// Toggle between −45° and level.
    pub fn toggle_backward(&mut self) {
        self.target = if self.target == -TILT_ANGLE { 0.0 } else { -TILT_ANGLE };
    }

    pub fn ease(&mut self, factor: f32) {
        self.current = ease_toward(self.current, self.target, factor);
    }

    pub fn degrees(&self) -> f32 {
        self.current.to_degrees()
    }
}

/// Whether the impatience event may still fire this suction episode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ImpatienceLatch {
    #[default]
    Armed,
    Fired,
}

/// Time spent continuously inhaling.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SuctionTimer {
    pub elapsed: f32,
    pub latch: ImpatienceLatch,
}

impl SuctionTimer {
    /// Advance the timer. Returns true exactly once per suction episode, on
    /// the tick the elapsed time first exceeds `threshold`.
    pub fn update(&mut self, inhaling: bool, dt: f32, threshold: f32) -> bool {
        if !inhaling {
            self.elapsed = 0.0;
            self.latch = ImpatienceLatch::Armed;
            return false;
        }
        self.elapsed += dt;
        if self.elapsed > threshold && self.latch == ImpatienceLatch::Armed {
            self.latch = ImpatienceLatch::Fired;
            return true;
        }
        false
    }
}

/// The 0–100 stimulation level fed by aperture exits.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Stimulation(f32);

impl Stimulation {
    #[inline]
    pub fn level(&self) -> f32 {
        self.0
    }

    pub fn record_exit(&mut self, amount: f32) {
        self.0 = (self.0 + amount).min(STIMULATION_MAX);
    }

    pub fn decay(&mut self, amount: f32) {
        self.0 = (self.0 - amount).max(0.0);
    }
}

/// Per-session state owned by the engine core.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    /// Raw input: the heat source is being held.
    pub lighter_held: bool,
    /// Derived each tick from `lighter_held` and proximity.
    pub heating: bool,
    pub inhaling: bool,
    pub heat_source: Vec3,
    pub tilt: PipeTilt,
    pub suction: SuctionTimer,
    pub stimulation: Stimulation,
}

impl SessionState {
    /// Heating is active only while held and within reach of the vessel.
    pub fn update_heating(&mut self, geometry: &GeometryConfig) {
        let reach = geometry.chamber_radius * geometry.vessel_scale + geometry.heat_reach;
        let distance = self.heat_source.distance(geometry.vessel_position);
        self.heating = self.lighter_held && distance < reach;
    }

    /// World position of the heat source if it is currently heating.
    pub fn active_heat_source(&self) -> Option<Vec3> {
        self.heating.then_some(self.heat_source)
    }

    /// Tilt easing, suction timer and latch. Returns true when the
    /// impatience event fires.
    pub fn advance(&mut self, dt: f32, tuning: &SessionTuning) -> bool {
        let fired = self.suction.update(self.inhaling, dt, tuning.impatience_seconds);
        self.tilt.ease(tuning.tilt_smoothing);
        fired
    }
}
