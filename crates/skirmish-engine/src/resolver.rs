//! The single combat-resolution worker.
//!
//! Exactly one [`CombatResolver`] consumes the [`CombatQueue`], so all
//! health mutations coming from combat are serialized. Each task is
//! resolved with both participants' state locks held (lower
//! [`EntityId`](skirmish_core::EntityId) first), which makes the
//! "both still alive" check and the kill a single atomic step with
//! respect to the movement worker.

use std::sync::Arc;

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use skirmish_core::{contest, CombatOutcome, CombatTask, Dice, EventSink, Side};
use tracing::{debug, trace};

use crate::metrics::EngineMetrics;
use crate::queue::CombatQueue;

/// Fair six-sided die backed by a seeded ChaCha8 stream.
#[derive(Debug)]
pub struct SeededDice {
    rng: ChaCha8Rng,
}

impl SeededDice {
    /// Dice with a deterministic roll sequence for `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Dice for SeededDice {
    fn roll(&mut self) -> u8 {
        self.rng.gen_range(1..=6)
    }
}

/// Resolves combat tasks one at a time.
pub struct CombatResolver {
    dice: Box<dyn Dice>,
    sink: Arc<dyn EventSink>,
    metrics: Arc<EngineMetrics>,
}

impl CombatResolver {
    /// Create a resolver that rolls `dice` and narrates to `sink`.
    pub fn new(dice: Box<dyn Dice>, sink: Arc<dyn EventSink>, metrics: Arc<EngineMetrics>) -> Self {
        Self {
            dice,
            sink,
            metrics,
        }
    }

    /// Resolve one task.
    ///
    /// If either participant is already dead the task is stale and
    /// nothing changes. Otherwise each side rolls one die; the attacker
    /// wins only on a strictly higher roll, and the loser is killed.
    pub fn resolve(&mut self, task: &CombatTask) -> CombatOutcome {
        if Arc::ptr_eq(&task.attacker, &task.defender) {
            self.metrics.record_stale();
            return CombatOutcome::Stale;
        }

        let attacker_first = task.attacker.id() <= task.defender.id();
        let (mut first, mut second) = if attacker_first {
            (task.attacker.lock_state(), task.defender.lock_state())
        } else {
            (task.defender.lock_state(), task.attacker.lock_state())
        };
        let (attacker, defender) = if attacker_first {
            (&mut *first, &mut *second)
        } else {
            (&mut *second, &mut *first)
        };

        if !attacker.alive || !defender.alive {
            drop((first, second));
            trace!(
                attacker = %task.attacker.id(),
                defender = %task.defender.id(),
                "stale combat task discarded"
            );
            self.metrics.record_stale();
            return CombatOutcome::Stale;
        }

        let attack_roll = self.dice.roll();
        let defence_roll = self.dice.roll();
        let outcome = match contest(attack_roll, defence_roll) {
            Side::Attacker => {
                defender.kill();
                CombatOutcome::AttackerWon
            }
            Side::Defender => {
                attacker.kill();
                CombatOutcome::DefenderWon
            }
        };
        drop((first, second));

        let winner = match outcome {
            CombatOutcome::AttackerWon => task.attacker.name(),
            _ => task.defender.name(),
        };
        debug!(
            attacker = %task.attacker.id(),
            defender = %task.defender.id(),
            attack_roll,
            defence_roll,
            ?outcome,
            "combat resolved"
        );
        self.sink.emit(&format!(
            "BATTLE: {} vs {} -> {} wins!",
            task.attacker.name(),
            task.defender.name(),
            winner
        ));
        self.metrics.record_resolved();
        outcome
    }

    /// Worker loop: resolve tasks until the queue is closed and drained.
    /// Returns the number of tasks taken off the queue.
    pub fn run(mut self, queue: &CombatQueue) -> u64 {
        let mut handled = 0;
        while let Some(task) = queue.pop() {
            self.resolve(&task);
            handled += 1;
        }
        debug!(handled, "combat resolver exiting");
        handled
    }
}

impl std::fmt::Debug for CombatResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CombatResolver").finish_non_exhaustive()
    }
}
