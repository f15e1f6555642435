//! Skirmish: a multi-threaded battle simulation on a bounded grid.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the Skirmish sub-crates.
//!
//! # Quick start
//!
//! ```rust
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use skirmish::prelude::*;
//!
//! let mut config = WorldConfig {
//!     width: 40,
//!     height: 40,
//!     seed: 42,
//!     tick_interval: Duration::from_millis(5),
//!     report_interval: Duration::from_millis(20),
//!     run_duration: Duration::from_millis(50),
//!     ..WorldConfig::default()
//! };
//! config.roster = seeded_roster(10, config.bounds().unwrap(), &config.species, config.seed);
//!
//! let mut sim = Simulation::new(config, Arc::new(NullSink)).unwrap();
//! let report = sim.start().unwrap();
//! assert_eq!(report.alive + report.dead, 10);
//! assert_eq!(sim.state(), SupervisorState::Stopped);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `skirmish-core` | IDs, geometry, species, entities, combat rules, sink and dice traits |
//! | [`engine`] | `skirmish-engine` | Registry, workers, combat queue, supervisor |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, rules, and traits (`skirmish-core`).
pub use skirmish_core as types;

/// The threaded engine (`skirmish-engine`).
///
/// [`engine::Simulation`] is the entry point; the per-pass components
/// ([`engine::MovementScheduler`], [`engine::CombatDetector`],
/// [`engine::CombatResolver`]) are usable on their own.
pub use skirmish_engine as engine;

/// Common imports for typical Skirmish usage.
pub mod prelude {
    // Core
    pub use skirmish_core::{
        CombatOutcome, CombatTask, Dice, Entity, EntityId, EntityRef, EntityView, EventSink,
        MapBounds, NullSink, Position, SpeciesStats, SpeciesTable,
    };

    // Engine
    pub use skirmish_engine::roster::seeded_roster;
    pub use skirmish_engine::{
        ConfigError, DetectionPolicy, InterruptHandle, LifecycleError, RunReport, ShutdownReport,
        Simulation, SpawnSpec, SupervisorState, TracingSink, WorldConfig,
    };
}
