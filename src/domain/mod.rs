//! Domain data: vessel geometry, tunables and the simulated records.

pub mod config;
pub mod constants;
pub mod events;
pub mod fragment;
pub mod vapor;
pub mod vessel;

pub use config::SimConfig;
pub use events::{PhaseChangeEvent, PhaseChangeKind, SubtitleEvent};
pub use fragment::{Fragment, Phase, HULL_POINTS};
pub use vapor::VaporParticle;
pub use vessel::VesselFrame;
