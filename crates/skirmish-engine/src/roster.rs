//! Random initial rosters.
//!
//! Picks a species uniformly from the table for each entity, names it
//! `<Species>_<n>` (1-based), and drops it on a uniformly random cell.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use skirmish_core::{MapBounds, Position, SpeciesTable};

use crate::config::SpawnSpec;

/// Generate `count` spawns using `rng`. Empty if the table is empty.
pub fn random_roster<R: Rng + ?Sized>(
    count: usize,
    bounds: MapBounds,
    table: &SpeciesTable,
    rng: &mut R,
) -> Vec<SpawnSpec> {
    if table.is_empty() {
        return Vec::new();
    }
    (0..count)
        .filter_map(|i| {
            let (species, _) = table.get_index(rng.gen_range(0..table.len()))?;
            let position = Position::new(
                rng.gen_range(0..bounds.width()),
                rng.gen_range(0..bounds.height()),
            );
            Some(SpawnSpec {
                name: format!("{species}_{}", i + 1),
                species: species.to_string(),
                position,
            })
        })
        .collect()
}

/// [`random_roster`] with a ChaCha8 stream seeded from `seed`.
pub fn seeded_roster(
    count: usize,
    bounds: MapBounds,
    table: &SpeciesTable,
    seed: u64,
) -> Vec<SpawnSpec> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    random_roster(count, bounds, table, &mut rng)
}
