//! Strongly-typed entity identifiers.

use std::fmt;

/// Identifies an entity within a registry.
///
/// Entities are registered once at world creation and assigned
/// sequential IDs. `EntityId(n)` is the n-th entry of the registry, so
/// ID order is registry order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u32);

impl EntityId {
    /// The registry index this ID refers to.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for EntityId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}
