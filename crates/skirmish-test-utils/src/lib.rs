//! Test utilities and fixtures for Skirmish development.
//!
//! Provides deterministic stand-ins for the engine's collaborators
//! ([`ScriptedDice`] for [`Dice`], [`RecordingSink`] for [`EventSink`])
//! and small constructors for hand-placed entities.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{entity, placed, statue_table};

use std::collections::VecDeque;
use std::sync::Mutex;

use skirmish_core::{Dice, EventSink};

/// Dice that return a fixed script of rolls.
///
/// Panics when the script runs out, so a test that expects no rolls
/// (e.g. a stale task) can hand it an empty script.
#[derive(Debug)]
pub struct ScriptedDice {
    rolls: VecDeque<u8>,
}

impl ScriptedDice {
    /// Rolls are consumed front to back. The resolver rolls the
    /// attacker first, then the defender.
    pub fn new(rolls: impl IntoIterator<Item = u8>) -> Self {
        Self {
            rolls: rolls.into_iter().collect(),
        }
    }

    /// Rolls not yet consumed.
    pub fn remaining(&self) -> usize {
        self.rolls.len()
    }
}

impl Dice for ScriptedDice {
    fn roll(&mut self) -> u8 {
        self.rolls
            .pop_front()
            .expect("ScriptedDice ran out of rolls")
    }
}

/// Dice that always roll the same face.
#[derive(Clone, Copy, Debug)]
pub struct LoadedDice(pub u8);

impl Dice for LoadedDice {
    fn roll(&mut self) -> u8 {
        self.0
    }
}

/// Sink that records every line for later assertions.
#[derive(Debug, Default)]
pub struct RecordingSink {
    lines: Mutex<Vec<String>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything emitted so far.
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }

    /// Lines starting with `prefix`.
    pub fn lines_starting_with(&self, prefix: &str) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter(|l| l.starts_with(prefix))
            .collect()
    }
}

impl EventSink for RecordingSink {
    fn emit(&self, line: &str) {
        self.lines.lock().unwrap().push(line.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_dice_replay_in_order() {
        let mut dice = ScriptedDice::new([6, 1, 3]);
        assert_eq!(dice.roll(), 6);
        assert_eq!(dice.roll(), 1);
        assert_eq!(dice.remaining(), 1);
    }

    #[test]
    #[should_panic(expected = "ran out")]
    fn scripted_dice_panic_when_exhausted() {
        ScriptedDice::new([]).roll();
    }

    #[test]
    fn recording_sink_filters_by_prefix() {
        let sink = RecordingSink::new();
        sink.emit("BATTLE: a vs b -> a wins!");
        sink.emit("=== MAP 10x10 ===");
        assert_eq!(sink.lines().len(), 2);
        assert_eq!(sink.lines_starting_with("BATTLE").len(), 1);
    }
}
