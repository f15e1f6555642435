//! Fixed-size shared entity registry.
//!
//! [`EntityRegistry`] holds the ordered list of [`EntityRef`]s behind a
//! reader/writer lock. The list is built once and never resized, so all
//! runtime access is through the read side: [`snapshot`] clones the
//! handles under the lock and releases it before any per-entity work.
//! Entity fields are guarded separately by each entity's own lock.
//!
//! [`snapshot`]: EntityRegistry::snapshot

use std::sync::{Arc, PoisonError, RwLock};

use skirmish_core::{Entity, EntityId, EntityRef, EntityView};

use crate::config::{ConfigError, WorldConfig};

/// Ordered, fixed-length collection of shared entity handles.
#[derive(Debug)]
pub struct EntityRegistry {
    entities: RwLock<Vec<EntityRef>>,
    len: usize,
}

// Compile-time assertion: EntityRegistry must be Send + Sync.
const _: fn() = || {
    fn assert<T: Send + Sync>() {}
    assert::<EntityRegistry>();
};

impl EntityRegistry {
    /// Build the registry from a configuration's roster.
    ///
    /// Validates the whole configuration first; on error nothing is
    /// constructed.
    pub fn from_config(config: &WorldConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut entities = Vec::with_capacity(config.roster.len());
        for (index, spawn) in config.roster.iter().enumerate() {
            let stats =
                config
                    .species
                    .lookup(&spawn.species)
                    .map_err(|_| ConfigError::UnknownSpecies {
                        index,
                        species: spawn.species.clone(),
                    })?;
            let id = u32::try_from(index).map_err(|_| ConfigError::RosterTooLarge {
                count: config.roster.len(),
            })?;
            entities.push(Arc::new(Entity::new(
                EntityId(id),
                spawn.name.clone(),
                spawn.species.clone(),
                stats,
                spawn.position,
            )));
        }
        Ok(Self::from_entities(entities))
    }

    /// Wrap already-constructed entities. Their IDs should match their
    /// positions in `entities`.
    pub fn from_entities(entities: Vec<EntityRef>) -> Self {
        debug_assert!(
            entities
                .iter()
                .enumerate()
                .all(|(i, e)| e.id().index() == i),
            "entity IDs must match registry order"
        );
        let len = entities.len();
        Self {
            entities: RwLock::new(entities),
            len,
        }
    }

    /// Clone every handle, in registry order, under the read lock.
    pub fn snapshot(&self) -> Vec<EntityRef> {
        self.entities
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of entities. Fixed at construction.
    pub fn size(&self) -> usize {
        self.len
    }

    /// True if the registry holds no entities.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Handle for one entity.
    pub fn get(&self, id: EntityId) -> Option<EntityRef> {
        self.entities
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id.index())
            .cloned()
    }

    /// Number of living entities. Values read concurrently with a
    /// running simulation may be momentarily stale.
    pub fn alive_count(&self) -> usize {
        self.snapshot().iter().filter(|e| e.is_alive()).count()
    }

    /// Number of dead entities.
    pub fn dead_count(&self) -> usize {
        self.size() - self.alive_count()
    }

    /// Views of the living entities, in registry order.
    pub fn survivors(&self) -> Vec<EntityView> {
        self.views().into_iter().filter(|v| v.state.alive).collect()
    }

    /// Views of every entity, in registry order.
    pub fn views(&self) -> Vec<EntityView> {
        self.snapshot().iter().map(|e| e.view()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SpawnSpec;

    fn config() -> WorldConfig {
        WorldConfig {
            roster: vec![
                SpawnSpec::new("Orc_1", "Orc", 1, 1),
                SpawnSpec::new("Elf_2", "Elf", 2, 2),
                SpawnSpec::new("Toad_3", "Toad", 3, 3),
            ],
            ..WorldConfig::default()
        }
    }

    #[test]
    fn builds_in_roster_order() {
        let reg = EntityRegistry::from_config(&config()).unwrap();
        assert_eq!(reg.size(), 3);
        let snap = reg.snapshot();
        let names: Vec<_> = snap.iter().map(|e| e.name().to_string()).collect();
        assert_eq!(names, ["Orc_1", "Elf_2", "Toad_3"]);
        for (i, e) in snap.iter().enumerate() {
            assert_eq!(e.id(), EntityId(i as u32));
        }
    }

    #[test]
    fn stats_come_from_species_table() {
        let reg = EntityRegistry::from_config(&config()).unwrap();
        let elf = reg.get(EntityId(1)).unwrap();
        assert_eq!(elf.health(), 70);
        assert_eq!(elf.kill_radius(), 50);
        assert_eq!(elf.move_radius(), 10);
    }

    #[test]
    fn unknown_species_builds_nothing() {
        let mut cfg = config();
        cfg.roster[1].species = "Lich".into();
        let err = EntityRegistry::from_config(&cfg).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownSpecies { index: 1, .. }));
    }

    #[test]
    fn snapshot_shares_entities() {
        let reg = EntityRegistry::from_config(&config()).unwrap();
        let a = reg.snapshot();
        let b = reg.snapshot();
        assert!(Arc::ptr_eq(&a[0], &b[0]));
        a[0].kill();
        assert!(!b[0].is_alive());
    }

    #[test]
    fn counts_track_kills() {
        let reg = EntityRegistry::from_config(&config()).unwrap();
        assert_eq!((reg.alive_count(), reg.dead_count()), (3, 0));
        reg.get(EntityId(2)).unwrap().kill();
        assert_eq!((reg.alive_count(), reg.dead_count()), (2, 1));
        let survivors: Vec<_> = reg.survivors().into_iter().map(|v| v.name).collect();
        assert_eq!(survivors, ["Orc_1", "Elf_2"]);
    }

    #[test]
    fn get_out_of_range_is_none() {
        let reg = EntityRegistry::from_config(&config()).unwrap();
        assert!(reg.get(EntityId(3)).is_none());
    }

    #[test]
    fn empty_roster_is_allowed() {
        let reg = EntityRegistry::from_config(&WorldConfig::default()).unwrap();
        assert!(reg.is_empty());
        assert!(reg.survivors().is_empty());
    }
}
