//! Core types and traits for the Skirmish simulation framework.
//!
//! This is the leaf crate with no internal dependencies. It defines the
//! data the engine shares between workers: entity identifiers, map
//! geometry, the species stat table, entity records with per-entity
//! locking, combat tasks, and the collaborator traits ([`EventSink`],
//! [`Dice`]).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod combat;
pub mod entity;
pub mod error;
pub mod geometry;
pub mod id;
pub mod species;
pub mod traits;

pub use combat::{contest, CombatOutcome, CombatTask, Side};
pub use entity::{Entity, EntityRef, EntityState, EntityView};
pub use error::SpeciesError;
pub use geometry::{MapBounds, Position};
pub use id::EntityId;
pub use species::{SpeciesStats, SpeciesTable};
pub use traits::{Dice, EventSink, NullSink};
