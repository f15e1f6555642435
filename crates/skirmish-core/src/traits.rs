//! Collaborator traits consumed by the engine.

/// Receives human-readable report lines.
///
/// Called from worker threads, so implementations must be `Send + Sync`
/// and should not block for long.
pub trait EventSink: Send + Sync {
    /// Accept one line of UTF-8 text (no trailing newline).
    fn emit(&self, line: &str);
}

/// Discards every line.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, _line: &str) {}
}

/// Source of six-sided die rolls for combat.
///
/// Owned exclusively by the resolver worker, hence `&mut self`.
pub trait Dice: Send {
    /// Roll one die: a uniform integer in `1..=6`.
    fn roll(&mut self) -> u8;
}
