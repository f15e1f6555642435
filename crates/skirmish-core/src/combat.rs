//! Combat tasks and the dice contest rule.

use std::fmt;
use std::sync::Arc;

use crate::entity::EntityRef;

/// One pending engagement, captured at detection time.
///
/// A task records intent, not a guarantee: either participant may die
/// to another task before this one is resolved.
#[derive(Clone)]
pub struct CombatTask {
    /// The entity whose kill radius triggered the task.
    pub attacker: EntityRef,
    /// The entity inside that radius.
    pub defender: EntityRef,
}

impl CombatTask {
    /// Pair an attacker with a defender.
    pub fn new(attacker: EntityRef, defender: EntityRef) -> Self {
        Self { attacker, defender }
    }

    /// True if both sides are the same two entities as `other`, in the
    /// same roles.
    pub fn same_pair(&self, other: &CombatTask) -> bool {
        Arc::ptr_eq(&self.attacker, &other.attacker)
            && Arc::ptr_eq(&self.defender, &other.defender)
    }
}

impl PartialEq for CombatTask {
    fn eq(&self, other: &Self) -> bool {
        self.same_pair(other)
    }
}

impl Eq for CombatTask {}

impl fmt::Debug for CombatTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CombatTask")
            .field("attacker", &self.attacker.id())
            .field("defender", &self.defender.id())
            .finish()
    }
}

/// Which side of a contest won.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    /// The attacker rolled strictly higher.
    Attacker,
    /// The defender rolled higher or tied.
    Defender,
}

/// Decide a contest from two die rolls. Ties go to the defender.
pub fn contest(attacker_roll: u8, defender_roll: u8) -> Side {
    if attacker_roll > defender_roll {
        Side::Attacker
    } else {
        Side::Defender
    }
}

/// What resolving one task did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CombatOutcome {
    /// A participant was already dead; nothing changed.
    Stale,
    /// The defender was killed.
    AttackerWon,
    /// The attacker was killed.
    DefenderWon,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn tie_goes_to_defender() {
        for r in 1..=6 {
            assert_eq!(contest(r, r), Side::Defender);
        }
    }

    #[test]
    fn six_beats_one() {
        assert_eq!(contest(6, 1), Side::Attacker);
        assert_eq!(contest(1, 6), Side::Defender);
    }

    proptest! {
        #[test]
        fn attacker_wins_iff_strictly_greater(a in 1u8..=6, d in 1u8..=6) {
            let side = contest(a, d);
            prop_assert_eq!(side == Side::Attacker, a > d);
        }
    }
}
