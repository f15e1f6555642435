//! Species stat table.
//!
//! Every species differs from the others only by three constants, so
//! species are rows in a [`SpeciesTable`] rather than types. The table
//! keeps insertion order, which is what random roster generation
//! samples by index.

use indexmap::IndexMap;

use crate::error::SpeciesError;

/// Fixed per-species constants copied into each entity at construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpeciesStats {
    /// Starting hit points. Always positive.
    pub health: i32,
    /// Maximum per-axis step magnitude per movement tick.
    pub move_radius: i32,
    /// Maximum Euclidean engagement distance.
    pub kill_radius: i32,
}

impl SpeciesStats {
    /// Construct a stat tuple.
    pub const fn new(health: i32, move_radius: i32, kill_radius: i32) -> Self {
        Self {
            health,
            move_radius,
            kill_radius,
        }
    }

    fn validate(&self) -> Result<(), String> {
        if self.health <= 0 {
            return Err(format!("health must be positive, got {}", self.health));
        }
        if self.move_radius < 0 {
            return Err(format!(
                "move_radius must be non-negative, got {}",
                self.move_radius
            ));
        }
        if self.kill_radius < 0 {
            return Err(format!(
                "kill_radius must be non-negative, got {}",
                self.kill_radius
            ));
        }
        Ok(())
    }
}

/// The standard bestiary.
const STANDARD_SPECIES: [(&str, SpeciesStats); 16] = [
    ("Orc", SpeciesStats::new(100, 20, 10)),
    ("Squirrel", SpeciesStats::new(30, 5, 5)),
    ("Druid", SpeciesStats::new(80, 10, 10)),
    ("Knight", SpeciesStats::new(120, 30, 10)),
    ("Elf", SpeciesStats::new(70, 10, 50)),
    ("Dragon", SpeciesStats::new(200, 50, 30)),
    ("Bear", SpeciesStats::new(150, 5, 10)),
    ("Bandit", SpeciesStats::new(90, 10, 10)),
    ("Werewolf", SpeciesStats::new(110, 40, 5)),
    ("Princess", SpeciesStats::new(40, 1, 1)),
    ("Toad", SpeciesStats::new(20, 1, 10)),
    ("Slaver", SpeciesStats::new(85, 10, 10)),
    ("Pegasus", SpeciesStats::new(95, 30, 10)),
    ("Bittern", SpeciesStats::new(35, 50, 10)),
    ("Desman", SpeciesStats::new(25, 5, 20)),
    ("Bull", SpeciesStats::new(130, 30, 10)),
];

/// Ordered mapping from species name to [`SpeciesStats`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpeciesTable {
    entries: IndexMap<String, SpeciesStats>,
}

impl SpeciesTable {
    /// A table with no species.
    pub fn empty() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// The 16 standard species.
    pub fn standard() -> Self {
        let entries = STANDARD_SPECIES
            .iter()
            .map(|(name, stats)| ((*name).to_string(), *stats))
            .collect();
        Self { entries }
    }

    /// Register (or replace) a species.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        stats: SpeciesStats,
    ) -> Result<(), SpeciesError> {
        let name = name.into();
        stats
            .validate()
            .map_err(|reason| SpeciesError::InvalidStats {
                name: name.clone(),
                reason,
            })?;
        self.entries.insert(name, stats);
        Ok(())
    }

    /// Look up a species by exact name.
    pub fn lookup(&self, name: &str) -> Result<SpeciesStats, SpeciesError> {
        self.entries
            .get(name)
            .copied()
            .ok_or_else(|| SpeciesError::Unknown {
                name: name.to_string(),
            })
    }

    /// The `index`-th species in insertion order.
    pub fn get_index(&self, index: usize) -> Option<(&str, SpeciesStats)> {
        self.entries
            .get_index(index)
            .map(|(name, stats)| (name.as_str(), *stats))
    }

    /// Number of registered species.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no species are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate species in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, SpeciesStats)> + '_ {
        self.entries.iter().map(|(name, stats)| (name.as_str(), *stats))
    }
}

impl Default for SpeciesTable {
    fn default() -> Self {
        Self::standard()
    }
}
