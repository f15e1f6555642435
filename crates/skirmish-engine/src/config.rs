//! World configuration, validation, and error types.
//!
//! [`WorldConfig`] is the builder-input for a [`Simulation`](crate::Simulation).
//! [`validate()`](WorldConfig::validate) checks every structural invariant
//! before any entity is constructed, so a bad roster never yields a
//! partially built registry.

use std::time::Duration;

use skirmish_core::{MapBounds, Position, SpeciesTable};
use thiserror::Error;

// ── DetectionPolicy ────────────────────────────────────────────────

/// Which kill radii a detection pass evaluates for a pair `(i, j)`, `i < j`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DetectionPolicy {
    /// Only the lower-indexed entity threatens: enqueue `(i, j)` when `j`
    /// is inside `i`'s kill radius. The reverse relation is never checked.
    #[default]
    LowerIndexAttacks,
    /// Both directions are checked: `(i, j)` when `i` reaches `j`, and
    /// additionally `(j, i)` when `j` reaches `i`.
    SymmetricThreat,
}

// ── SpawnSpec ──────────────────────────────────────────────────────

/// One entry of the initial roster.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpawnSpec {
    /// Display name.
    pub name: String,
    /// Species name, looked up in [`WorldConfig::species`].
    pub species: String,
    /// Starting cell.
    pub position: Position,
}

impl SpawnSpec {
    /// Convenience constructor.
    pub fn new(name: impl Into<String>, species: impl Into<String>, x: i32, y: i32) -> Self {
        Self {
            name: name.into(),
            species: species.into(),
            position: Position::new(x, y),
        }
    }
}

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`WorldConfig::validate()`].
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Map width or height is not positive.
    #[error("map dimensions must be positive, got {width}x{height}")]
    InvalidMap {
        /// Configured width.
        width: i32,
        /// Configured height.
        height: i32,
    },
    /// A worker interval is zero.
    #[error("{name} must be non-zero")]
    InvalidInterval {
        /// Which interval.
        name: &'static str,
    },
    /// A roster entry names a species missing from the table.
    #[error("roster entry {index}: unknown species '{species}'")]
    UnknownSpecies {
        /// Roster index.
        index: usize,
        /// The unresolved species name.
        species: String,
    },
    /// A roster entry starts off the map.
    #[error("roster entry {index}: position [{x},{y}] is outside the map")]
    OutOfBounds {
        /// Roster index.
        index: usize,
        /// Requested x.
        x: i32,
        /// Requested y.
        y: i32,
    },
    /// The roster does not fit in a `u32` ID space.
    #[error("roster of {count} entities exceeds u32::MAX")]
    RosterTooLarge {
        /// Roster length.
        count: usize,
    },
}

// ── WorldConfig ────────────────────────────────────────────────────

/// Complete configuration for constructing a simulation.
#[derive(Clone, Debug)]
pub struct WorldConfig {
    /// Map width in cells. Default: 100.
    pub width: i32,
    /// Map height in cells. Default: 100.
    pub height: i32,
    /// Entities to create, in registry order.
    pub roster: Vec<SpawnSpec>,
    /// Species stat table the roster is resolved against.
    pub species: SpeciesTable,
    /// RNG seed for movement and dice.
    pub seed: u64,
    /// Movement/detection tick period. Default: 100 ms.
    pub tick_interval: Duration,
    /// Periodic report period. Default: 1 s.
    pub report_interval: Duration,
    /// How long [`Simulation::start`](crate::Simulation::start) runs
    /// before stopping. Default: 30 s.
    pub run_duration: Duration,
    /// Pairwise threat policy. Default: [`DetectionPolicy::LowerIndexAttacks`].
    pub detection: DetectionPolicy,
    /// Living entities listed per periodic report. Default: 5.
    pub report_sample: usize,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 100,
            height: 100,
            roster: Vec::new(),
            species: SpeciesTable::standard(),
            seed: 0,
            tick_interval: Duration::from_millis(100),
            report_interval: Duration::from_secs(1),
            run_duration: Duration::from_secs(30),
            detection: DetectionPolicy::default(),
            report_sample: 5,
        }
    }
}

impl WorldConfig {
    /// Validate all structural invariants and return the map bounds.
    pub fn validate(&self) -> Result<MapBounds, ConfigError> {
        // 1. Map must have at least one cell.
        let bounds = self.bounds()?;
        // 2. Timer workers need a period.
        if self.tick_interval.is_zero() {
            return Err(ConfigError::InvalidInterval {
                name: "tick_interval",
            });
        }
        if self.report_interval.is_zero() {
            return Err(ConfigError::InvalidInterval {
                name: "report_interval",
            });
        }
        // 3. IDs are u32.
        if u32::try_from(self.roster.len()).is_err() {
            return Err(ConfigError::RosterTooLarge {
                count: self.roster.len(),
            });
        }
        // 4. Every roster entry resolves and starts on the map.
        for (index, spawn) in self.roster.iter().enumerate() {
            if self.species.lookup(&spawn.species).is_err() {
                return Err(ConfigError::UnknownSpecies {
                    index,
                    species: spawn.species.clone(),
                });
            }
            if !bounds.contains(spawn.position) {
                return Err(ConfigError::OutOfBounds {
                    index,
                    x: spawn.position.x,
                    y: spawn.position.y,
                });
            }
        }
        Ok(bounds)
    }

    /// The configured map, or [`ConfigError::InvalidMap`].
    pub fn bounds(&self) -> Result<MapBounds, ConfigError> {
        MapBounds::new(self.width, self.height).ok_or(ConfigError::InvalidMap {
            width: self.width,
            height: self.height,
        })
    }
}
