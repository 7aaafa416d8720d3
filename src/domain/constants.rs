//! Vessel geometry and simulation thresholds.
//!
//! Distances are vessel-local units, temperatures are °C, rates are per tick
//! at a nominal 60 Hz.

// === Geometry ===

/// Radius of the spherical chamber holding the substance.
pub const CHAMBER_RADIUS: f32 = 2.0;
/// Radius of the straight channel leading to the aperture.
pub const CHANNEL_RADIUS: f32 = 0.25;
/// Length of the channel along +X.
pub const CHANNEL_LENGTH: f32 = 8.0;
/// Radius of the aperture bulb at the channel end.
pub const APERTURE_RADIUS: f32 = 0.3;
/// The channel begins this far inside the chamber wall.
pub const CHANNEL_INSET: f32 = 0.2;

// === Thresholds ===

pub const ROOM_TEMP: f32 = 20.0;
pub const MELTING_TEMP: f32 = 180.0;
pub const RECRYSTALLIZATION_TEMP: f32 = 100.0;
pub const SUBLIMATION_TEMP: f32 = 300.0;

// === Population caps ===

pub const MAX_VAPOR: usize = 5000;
pub const MAX_RESIDUE: usize = 10000;
/// Fragments created by a reset.
pub const RESET_FRAGMENT_COUNT: usize = 25;
/// Re-nucleation stops once this many solid fragments exist.
pub const MAX_SOLID_FRAGMENTS: usize = 30;

// === Session ===

/// Seconds of continuous suction before the impatience event fires.
pub const IMPATIENCE_SECONDS: f32 = 8.0;
pub const IMPATIENCE_TEXT: &str = "Come on. What are you doing in there?";
/// How long the display collaborator keeps a subtitle on screen.
pub const SUBTITLE_DISPLAY_SECONDS: f32 = 3.5;
pub const STIMULATION_MAX: f32 = 100.0;
/// ±45° tilt target.
pub const TILT_ANGLE: f32 = std::f32::consts::FRAC_PI_4;

// === Shard size control ===

pub const INITIAL_SHARD_SIZE: f32 = 0.5;
pub const MIN_SHARD_SIZE: f32 = 0.1;
pub const MAX_SHARD_SIZE: f32 = 1.5;

// === Vessel placement in the world ===

pub const VESSEL_POSITION: [f32; 3] = [0.0, 2.5, 2.0];
pub const VESSEL_SCALE: f32 = 0.3;
/// World gravity in units per tick².
pub const WORLD_GRAVITY: [f32; 3] = [0.0, -0.001, 0.0];
/// Extra reach of the heat source beyond the scaled chamber radius.
pub const HEAT_REACH: f32 = 1.0;

/// X coordinate where the channel begins.
#[inline]
pub const fn channel_start(chamber_radius: f32) -> f32 {
    chamber_radius - CHANNEL_INSET
}
