use crate::domain::{PhaseChangeEvent, SubtitleEvent};

/// Hooks for the audio and UI collaborators.
///
/// Every method defaults to a no-op, so an implementor only picks the
/// events it cares about. Calls happen synchronously inside `step`.
pub trait EngineObserver {
    /// The impatience knock.
    fn on_knock(&mut self) {}

    fn on_subtitle(&mut self, _event: &SubtitleEvent) {}

    /// A fragment melted into the pool or re-nucleated out of it.
    fn on_phase_change(&mut self, _event: &PhaseChangeEvent) {}
}
