//! Notifications the engine raises for external collaborators.

use glam::Vec3;
use serde::Serialize;

/// One-shot on-screen text. The display collaborator owns the timing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubtitleEvent {
    pub text: String,
    pub visible: bool,
    pub display_seconds: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PhaseChangeKind {
    /// A fragment melted into the pool.
    Melt,
    /// The pool re-nucleated a new fragment.
    Nucleation,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PhaseChangeEvent {
    pub kind: PhaseChangeKind,
    /// Vessel-local position of the fragment.
    pub position: Vec3,
    pub volume: f32,
    pub temperature: f32,
}
