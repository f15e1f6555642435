//! Simulation engine for Skirmish worlds.
//!
//! Runs a fixed population of entities on a bounded grid with three
//! long-lived workers: a tick thread (movement followed by combat
//! detection), a single combat resolver fed by a FIFO queue, and a
//! periodic reporter. [`Simulation`] owns their lifecycles and shuts
//! them down in a fixed order.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod detector;
pub mod metrics;
pub mod movement;
pub mod queue;
pub mod registry;
pub mod report;
pub mod resolver;
pub mod roster;
pub mod supervisor;

mod shutdown;
mod tick_thread;

pub use config::{ConfigError, DetectionPolicy, SpawnSpec, WorldConfig};
pub use detector::CombatDetector;
pub use metrics::{EngineMetrics, MetricsSnapshot};
pub use movement::MovementScheduler;
pub use queue::{CombatQueue, QueueClosed};
pub use registry::EntityRegistry;
pub use report::TracingSink;
pub use resolver::{CombatResolver, SeededDice};
pub use supervisor::{
    InterruptHandle, LifecycleError, RunReport, ShutdownReport, Simulation, SupervisorState,
};
