//! Entity records shared between workers.
//!
//! An [`Entity`] splits into an immutable identity (name, species,
//! radii) and a mutable [`EntityState`] (position, health, aliveness)
//! behind its own `Mutex`. Workers hold [`EntityRef`]s and take the
//! state lock only for the duration of one read-modify-write, so the
//! movement worker and the combat resolver never race on the same
//! fields.
//!
//! Once `alive` is false it never becomes true again and `health` is 0.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::geometry::Position;
use crate::id::EntityId;
use crate::species::SpeciesStats;

/// Shared handle to an entity. The registry is the long-lived owner;
/// workers clone these out of registry snapshots.
pub type EntityRef = Arc<Entity>;

/// The mutable part of an entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EntityState {
    /// Current cell.
    pub position: Position,
    /// Hit points, never negative.
    pub health: i32,
    /// `alive == (health > 0)`.
    pub alive: bool,
}

impl EntityState {
    fn spawned(position: Position, health: i32) -> Self {
        Self {
            position,
            health,
            alive: health > 0,
        }
    }

    /// Instant kill. Returns `true` if this call performed the
    /// `alive -> dead` transition.
    pub fn kill(&mut self) -> bool {
        let was_alive = self.alive;
        self.health = 0;
        self.alive = false;
        was_alive
    }

    /// Subtract `amount` hit points. Non-positive amounts are ignored.
    /// Returns `true` if this call performed the `alive -> dead`
    /// transition.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        if amount <= 0 || !self.alive {
            return false;
        }
        self.health = self.health.saturating_sub(amount);
        if self.health <= 0 {
            return self.kill();
        }
        false
    }
}

/// A simulated agent.
#[derive(Debug)]
pub struct Entity {
    id: EntityId,
    name: String,
    species: String,
    move_radius: i32,
    kill_radius: i32,
    state: Mutex<EntityState>,
}

// Compile-time assertion: Entity must be Send + Sync.
const _: fn() = || {
    fn assert<T: Send + Sync>() {}
    assert::<Entity>();
};

impl Entity {
    /// Construct a living entity from its species stats.
    pub fn new(
        id: EntityId,
        name: impl Into<String>,
        species: impl Into<String>,
        stats: SpeciesStats,
        position: Position,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            species: species.into(),
            move_radius: stats.move_radius,
            kill_radius: stats.kill_radius,
            state: Mutex::new(EntityState::spawned(position, stats.health)),
        }
    }

    /// Registry ID.
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Species tag.
    pub fn species(&self) -> &str {
        &self.species
    }

    /// Maximum per-axis step.
    pub fn move_radius(&self) -> i32 {
        self.move_radius
    }

    /// Maximum engagement distance.
    pub fn kill_radius(&self) -> i32 {
        self.kill_radius
    }

    /// Lock the mutable state.
    ///
    /// Hold the guard for one read-modify-write only. Callers locking
    /// two entities at once must lock the lower [`EntityId`] first.
    pub fn lock_state(&self) -> MutexGuard<'_, EntityState> {
        // Critical sections are plain field updates; a poisoned state is
        // still consistent.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Copy of the current state.
    pub fn state(&self) -> EntityState {
        *self.lock_state()
    }

    /// Current aliveness.
    pub fn is_alive(&self) -> bool {
        self.lock_state().alive
    }

    /// Current position.
    pub fn position(&self) -> Position {
        self.lock_state().position
    }

    /// Current health.
    pub fn health(&self) -> i32 {
        self.lock_state().health
    }

    /// Instant kill. See [`EntityState::kill`].
    pub fn kill(&self) -> bool {
        self.lock_state().kill()
    }

    /// Apply damage. See [`EntityState::take_damage`].
    pub fn take_damage(&self, amount: i32) -> bool {
        self.lock_state().take_damage(amount)
    }

    /// True if `other` is within this entity's kill radius right now.
    pub fn can_reach(&self, other: &Entity) -> bool {
        let own = self.position();
        let theirs = other.position();
        own.within(&theirs, self.kill_radius)
    }

    /// Owned read-only copy of identity and state.
    pub fn view(&self) -> EntityView {
        EntityView {
            id: self.id,
            name: self.name.clone(),
            species: self.species.clone(),
            move_radius: self.move_radius,
            kill_radius: self.kill_radius,
            state: self.state(),
        }
    }
}

/// A detached copy of an entity, safe to hold after the run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntityView {
    /// Registry ID.
    pub id: EntityId,
    /// Display name.
    pub name: String,
    /// Species tag.
    pub species: String,
    /// Maximum per-axis step.
    pub move_radius: i32,
    /// Maximum engagement distance.
    pub kill_radius: i32,
    /// State at the time the view was taken.
    pub state: EntityState,
}

impl fmt::Display for EntityView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} '{}' {} HP:{} M:{} K:{} {}",
            self.species,
            self.name,
            self.state.position,
            self.state.health,
            self.move_radius,
            self.kill_radius,
            if self.state.alive { "ALIVE" } else { "DEAD" }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn orc(x: i32, y: i32) -> Entity {
        Entity::new(
            EntityId(0),
            "Orc_1",
            "Orc",
            SpeciesStats::new(100, 20, 10),
            Position::new(x, y),
        )
    }

    #[test]
    fn spawns_alive_with_species_health() {
        let e = orc(1, 2);
        let s = e.state();
        assert!(s.alive);
        assert_eq!(s.health, 100);
        assert_eq!(s.position, Position::new(1, 2));
        assert_eq!(e.move_radius(), 20);
        assert_eq!(e.kill_radius(), 10);
    }

    #[test]
    fn kill_is_permanent_and_reports_transition_once() {
        let e = orc(0, 0);
        assert!(e.kill());
        assert!(!e.kill());
        assert!(!e.is_alive());
        assert_eq!(e.health(), 0);
    }

    #[test]
    fn damage_clamps_to_zero() {
        let e = orc(0, 0);
        assert!(!e.take_damage(40));
        assert_eq!(e.health(), 60);
        assert!(e.take_damage(500));
        assert_eq!(e.health(), 0);
        assert!(!e.is_alive());
    }

    #[test]
    fn damage_never_heals() {
        let e = orc(0, 0);
        e.take_damage(-50);
        assert_eq!(e.health(), 100);
    }

    #[test]
    fn dead_entities_take_no_damage() {
        let e = orc(0, 0);
        e.kill();
        assert!(!e.take_damage(10));
        assert_eq!(e.health(), 0);
    }

    #[test]
    fn can_reach_uses_own_kill_radius() {
        let a = orc(0, 0);
        let b = Entity::new(
            EntityId(1),
            "Princess_2",
            "Princess",
            SpeciesStats::new(40, 1, 1),
            Position::new(0, 10),
        );
        assert!(a.can_reach(&b));
        assert!(!b.can_reach(&a));
    }

    #[test]
    fn view_renders_like_a_roster_line() {
        let e = orc(3, 4);
        assert_eq!(
            e.view().to_string(),
            "Orc 'Orc_1' [3,4] HP:100 M:20 K:10 ALIVE"
        );
        e.kill();
        assert!(e.view().to_string().ends_with("HP:0 M:20 K:10 DEAD"));
    }
}
