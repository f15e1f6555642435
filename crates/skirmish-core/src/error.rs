//! Error types for species lookup and registration.

use thiserror::Error;

/// Errors from the [`SpeciesTable`](crate::SpeciesTable).
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SpeciesError {
    /// No species with this name is registered.
    #[error("unknown species '{name}'")]
    Unknown {
        /// The name that was looked up.
        name: String,
    },
    /// A stat tuple failed validation on insert.
    #[error("invalid stats for species '{name}': {reason}")]
    InvalidStats {
        /// The species being registered.
        name: String,
        /// Which constraint was violated.
        reason: String,
    },
}
