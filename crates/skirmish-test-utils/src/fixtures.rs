//! Hand-placed entities for scenario tests.

use std::sync::Arc;

use skirmish_core::{Entity, EntityId, EntityRef, Position, SpeciesStats, SpeciesTable};

/// An entity with explicit radii at `(x, y)`, 10 hit points.
pub fn entity(id: u32, move_radius: i32, kill_radius: i32, x: i32, y: i32) -> EntityRef {
    Arc::new(Entity::new(
        EntityId(id),
        format!("E_{id}"),
        "Test",
        SpeciesStats::new(10, move_radius, kill_radius),
        Position::new(x, y),
    ))
}

/// A named entity that never moves.
pub fn placed(id: u32, name: &str, kill_radius: i32, x: i32, y: i32) -> EntityRef {
    Arc::new(Entity::new(
        EntityId(id),
        name,
        "Statue",
        SpeciesStats::new(10, 0, kill_radius),
        Position::new(x, y),
    ))
}

/// A table with immobile species, so combat outcomes depend only on
/// starting positions: `Statue` (kill radius 10) and `Pebble` (kill
/// radius 0).
pub fn statue_table() -> SpeciesTable {
    let mut table = SpeciesTable::empty();
    table
        .insert("Statue", SpeciesStats::new(10, 0, 10))
        .expect("valid stats");
    table
        .insert("Pebble", SpeciesStats::new(10, 0, 0))
        .expect("valid stats");
    table
}
