//! Tunable engine configuration.
//!
//! Every field defaults to the values in [`constants`](super::constants) or to
//! the tuned collision, damping and smoothing factors, so an empty JSON object
//! is a valid config.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::core::error::{EngineError, Result};

use super::constants::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometryConfig {
    pub chamber_radius: f32,
    pub channel_radius: f32,
    pub channel_length: f32,
    /// Radius of the bulb drawn at the channel end. Only the renderer uses it;
    /// exits are detected by axial position (see [`Self::aperture_x`]).
    pub aperture_radius: f32,
    /// Vessel origin in world space.
    pub vessel_position: Vec3,
    /// Uniform vessel scale in world space.
    pub vessel_scale: f32,
    /// Gravity in world space (units per tick²).
    pub world_gravity: Vec3,
    pub heat_reach: f32,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            chamber_radius: CHAMBER_RADIUS,
            channel_radius: CHANNEL_RADIUS,
            channel_length: CHANNEL_LENGTH,
            aperture_radius: APERTURE_RADIUS,
            vessel_position: Vec3::from_array(VESSEL_POSITION),
            vessel_scale: VESSEL_SCALE,
            world_gravity: Vec3::from_array(WORLD_GRAVITY),
            heat_reach: HEAT_REACH,
        }
    }
}

impl GeometryConfig {
    /// X coordinate where the channel leaves the chamber.
    pub fn channel_start(&self) -> f32 {
        channel_start(self.chamber_radius)
    }

    /// X coordinate of the aperture; vapor past it has left the vessel.
    pub fn aperture_x(&self) -> f32 {
        self.channel_start() + self.channel_length
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThermalConfig {
    pub room_temp: f32,
    pub melting_temp: f32,
    pub recrystallization_temp: f32,
    pub sublimation_temp: f32,
}

impl Default for ThermalConfig {
    fn default() -> Self {
        Self {
            room_temp: ROOM_TEMP,
            melting_temp: MELTING_TEMP,
            recrystallization_temp: RECRYSTALLIZATION_TEMP,
            sublimation_temp: SUBLIMATION_TEMP,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FragmentTuning {
    pub reset_count: usize,
    pub max_solid: usize,
    pub collision_iterations: u32,
    /// Speed kept after bouncing off the chamber wall.
    pub wall_restitution: f32,
    /// Velocity scale applied to both bodies of a colliding pair.
    pub pair_restitution: f32,
    pub linear_damping: f32,
    pub angular_damping: f32,
    pub heat_gain: f32,
    pub cooling: f32,
}

impl Default for FragmentTuning {
    fn default() -> Self {
        Self {
            reset_count: RESET_FRAGMENT_COUNT,
            max_solid: MAX_SOLID_FRAGMENTS,
            collision_iterations: 4,
            wall_restitution: 0.1,
            pair_restitution: 0.75,
            linear_damping: 0.97,
            angular_damping: 0.95,
            heat_gain: 60.0,
            cooling: 0.01,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LiquidTuning {
    pub heat_gain: f32,
    pub cooling: f32,
    pub orientation_smoothing: f32,
    pub depth_scale: f32,
    pub min_depth: f32,
    pub nucleation_chance: f32,
    pub nucleation_size_min: f32,
    pub nucleation_size_max: f32,
    /// Segments of the lathe profile handed to the renderer.
    pub profile_segments: usize,
}

impl Default for LiquidTuning {
    fn default() -> Self {
        Self {
            heat_gain: 100.0,
            cooling: 0.005,
            orientation_smoothing: 0.1,
            depth_scale: 0.2,
            min_depth: 0.01,
            nucleation_chance: 0.05,
            nucleation_size_min: 0.3,
            nucleation_size_max: 0.7,
            profile_segments: 16,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VaporTuning {
    pub max_vapor: usize,
    pub max_residue: usize,
    pub emission_temp_step: f32,
    pub emission_per_step: f32,
    pub volume_factor_divisor: f32,
    pub min_volume_factor: f32,
    pub lifespan_min: i32,
    pub lifespan_max: i32,
    pub initial_speed: f32,
    pub buoyancy: f32,
    pub jitter: f32,
    pub suction_gain: f32,
    pub suction_falloff: f32,
    pub wall_restitution: f32,
    pub deposit_chance: f32,
    /// Chamber pass-through gap: radial margin around the channel mouth.
    pub opening_margin: f32,
    /// Chamber pass-through gap: fraction of the radius the particle must be past.
    pub opening_fraction: f32,
    /// Debit the pool for every emitted particle.
    pub debits_volume: bool,
    pub volume_per_particle: f32,
}

impl Default for VaporTuning {
    fn default() -> Self {
        Self {
            max_vapor: MAX_VAPOR,
            max_residue: MAX_RESIDUE,
            emission_temp_step: 1.5,
            emission_per_step: 100.0,
            volume_factor_divisor: 4.0,
            min_volume_factor: 0.1,
            lifespan_min: 500,
            lifespan_max: 1000,
            initial_speed: 0.0025,
            buoyancy: 0.00005,
            jitter: 0.002,
            suction_gain: 0.008,
            suction_falloff: 0.2,
            wall_restitution: 0.3,
            deposit_chance: 0.015,
            opening_margin: 1.1,
            opening_fraction: 0.6,
            debits_volume: false,
            volume_per_particle: 0.0005,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionTuning {
    pub impatience_seconds: f32,
    pub tilt_smoothing: f32,
    pub stimulation_decay: f32,
    pub stimulation_per_exit: f32,
}

impl Default for SessionTuning {
    fn default() -> Self {
        Self {
            impatience_seconds: IMPATIENCE_SECONDS,
            tilt_smoothing: 0.05,
            stimulation_decay: 0.05,
            stimulation_per_exit: 0.05,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeConfig {
    /// `None` runs one tick per `step` call.
    pub fixed_step_hz: Option<f32>,
    pub max_substeps: u32,
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            fixed_step_hz: None,
            max_substeps: 4,
        }
    }
}

/// Full engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub geometry: GeometryConfig,
    pub thermal: ThermalConfig,
    pub fragments: FragmentTuning,
    pub liquid: LiquidTuning,
    pub vapor: VaporTuning,
    pub session: SessionTuning,
    pub time: TimeConfig,
}

impl SimConfig {
    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values that would break the geometry or the caps.
    pub fn validate(&self) -> Result<()> {
        let g = &self.geometry;
        positive("geometry.chamber_radius", g.chamber_radius)?;
        positive("geometry.channel_radius", g.channel_radius)?;
        positive("geometry.channel_length", g.channel_length)?;
        positive("geometry.aperture_radius", g.aperture_radius)?;
        positive("geometry.vessel_scale", g.vessel_scale)?;
        if g.channel_radius >= g.chamber_radius {
            return Err(EngineError::InvalidParam(
                "geometry.channel_radius must be smaller than chamber_radius".into(),
            ));
        }
        if !g.vessel_position.is_finite() || !g.world_gravity.is_finite() {
            return Err(EngineError::InvalidParam(
                "geometry vectors must be finite".into(),
            ));
        }

        let t = &self.thermal;
        if t.recrystallization_temp >= t.melting_temp {
            return Err(EngineError::InvalidParam(
                "thermal.recrystallization_temp must be below melting_temp".into(),
            ));
        }
        if t.sublimation_temp <= t.melting_temp {
            return Err(EngineError::InvalidParam(
                "thermal.sublimation_temp must be above melting_temp".into(),
            ));
        }

        let f = &self.fragments;
        if f.reset_count == 0 {
            return Err(EngineError::InvalidParam("fragments.reset_count must be > 0".into()));
        }
        unit_interval("fragments.cooling", f.cooling)?;
        unit_interval("fragments.linear_damping", f.linear_damping)?;
        unit_interval("fragments.angular_damping", f.angular_damping)?;

        let l = &self.liquid;
        unit_interval("liquid.cooling", l.cooling)?;
        unit_interval("liquid.orientation_smoothing", l.orientation_smoothing)?;
        positive("liquid.nucleation_size_min", l.nucleation_size_min)?;
        if l.nucleation_size_max < l.nucleation_size_min {
            return Err(EngineError::InvalidParam(
                "liquid.nucleation_size_max must be >= nucleation_size_min".into(),
            ));
        }
        if l.profile_segments == 0 {
            return Err(EngineError::InvalidParam("liquid.profile_segments must be > 0".into()));
        }

        let v = &self.vapor;
        if v.max_vapor == 0 || v.max_residue == 0 {
            return Err(EngineError::InvalidParam(
                "vapor.max_vapor and vapor.max_residue must be > 0".into(),
            ));
        }
        positive("vapor.emission_temp_step", v.emission_temp_step)?;
        positive("vapor.volume_factor_divisor", v.volume_factor_divisor)?;
        if v.lifespan_min <= 0 || v.lifespan_max < v.lifespan_min {
            return Err(EngineError::InvalidParam(
                "vapor lifespan range must be positive and ordered".into(),
            ));
        }
        if !(0.0..=1.0).contains(&v.deposit_chance) {
            return Err(EngineError::InvalidParam(
                "vapor.deposit_chance must be in [0, 1]".into(),
            ));
        }

        let s = &self.session;
        unit_interval("session.tilt_smoothing", s.tilt_smoothing)?;
        positive("session.impatience_seconds", s.impatience_seconds)?;

        if let Some(hz) = self.time.fixed_step_hz {
            positive("time.fixed_step_hz", hz)?;
            if self.time.max_substeps == 0 {
                return Err(EngineError::InvalidParam("time.max_substeps must be > 0".into()));
            }
        }
        Ok(())
    }
}

fn positive(name: &str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(EngineError::InvalidParam(format!("{name} must be finite and > 0")))
    }
}

fn unit_interval(name: &str, value: f32) -> Result<()> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(EngineError::InvalidParam(format!("{name} must be in (0, 1]")))
    }
}
