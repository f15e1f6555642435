//! Pairwise proximity scan that emits combat tasks.
//!
//! A pass walks all unordered pairs `(i, j)`, `i < j`, in registry
//! order. Positions and aliveness are copied once at the start of the
//! pass so each entity lock is taken exactly once per pass. No
//! deduplication happens: a pair still in range next tick is emitted
//! again even if its earlier task has not been resolved.

use skirmish_core::{CombatTask, EntityRef, EntityState};

use crate::config::DetectionPolicy;

/// Stateless combat detector.
#[derive(Clone, Copy, Debug, Default)]
pub struct CombatDetector {
    policy: DetectionPolicy,
}

impl CombatDetector {
    /// Detector applying `policy`.
    pub fn new(policy: DetectionPolicy) -> Self {
        Self { policy }
    }

    /// The configured policy.
    pub fn policy(&self) -> DetectionPolicy {
        self.policy
    }

    /// Run one pass, handing each task to `emit` in detection order.
    ///
    /// `emit` returns `false` to abandon the rest of the pass (e.g. on
    /// shutdown). Returns the number of tasks `emit` accepted.
    pub fn pass<F>(&self, entities: &[EntityRef], mut emit: F) -> usize
    where
        F: FnMut(CombatTask) -> bool,
    {
        let states: Vec<EntityState> = entities.iter().map(|e| e.state()).collect();
        let mut emitted = 0;

        for i in 0..entities.len() {
            if !states[i].alive {
                continue;
            }
            for j in (i + 1)..entities.len() {
                if !states[j].alive {
                    continue;
                }
                let (pi, pj) = (states[i].position, states[j].position);

                if pi.within(&pj, entities[i].kill_radius()) {
                    let task = CombatTask::new(entities[i].clone(), entities[j].clone());
                    if !emit(task) {
                        return emitted;
                    }
                    emitted += 1;
                }

                if self.policy == DetectionPolicy::SymmetricThreat
                    && pj.within(&pi, entities[j].kill_radius())
                {
                    let task = CombatTask::new(entities[j].clone(), entities[i].clone());
                    if !emit(task) {
                        return emitted;
                    }
                    emitted += 1;
                }
            }
        }
        emitted
    }

    /// Run one pass and collect every task.
    pub fn scan(&self, entities: &[EntityRef]) -> Vec<CombatTask> {
        let mut tasks = Vec::new();
        self.pass(entities, |task| {
            tasks.push(task);
            true
        });
        tasks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skirmish_test_utils::entity;

    fn ids(tasks: &[CombatTask]) -> Vec<(u32, u32)> {
        tasks
            .iter()
            .map(|t| (t.attacker.id().0, t.defender.id().0))
            .collect()
    }

    #[test]
    fn pair_at_exact_radius_is_detected() {
        let all = vec![entity(0, 1, 10, 0, 0), entity(1, 1, 1, 0, 10)];
        let tasks = CombatDetector::default().scan(&all);
        assert_eq!(ids(&tasks), [(0, 1)]);
    }

    #[test]
    fn only_lower_index_attacks_by_default() {
        // Entity 1 reaches entity 0, but entity 0 cannot reach entity 1.
        let all = vec![entity(0, 1, 1, 0, 0), entity(1, 1, 10, 0, 5)];
        let detector = CombatDetector::default();
        assert_eq!(detector.policy(), DetectionPolicy::LowerIndexAttacks);
        assert!(detector.scan(&all).is_empty());
    }

    #[test]
    fn symmetric_policy_checks_reverse_direction() {
        let all = vec![entity(0, 1, 1, 0, 0), entity(1, 1, 10, 0, 5)];
        let tasks = CombatDetector::new(DetectionPolicy::SymmetricThreat).scan(&all);
        assert_eq!(ids(&tasks), [(1, 0)]);
    }

    #[test]
    fn symmetric_policy_emits_both_when_mutual() {
        let all = vec![entity(0, 1, 10, 0, 0), entity(1, 1, 10, 0, 5)];
        let tasks = CombatDetector::new(DetectionPolicy::SymmetricThreat).scan(&all);
        assert_eq!(ids(&tasks), [(0, 1), (1, 0)]);
    }

    #[test]
    fn dead_entities_are_skipped() {
        let all = vec![entity(0, 1, 50, 0, 0), entity(1, 1, 50, 0, 0)];
        all[0].kill();
        all[1].kill();
        assert!(CombatDetector::default().scan(&all).is_empty());
    }

    #[test]
    fn one_dead_partner_is_skipped() {
        let all = vec![entity(0, 1, 50, 0, 0), entity(1, 1, 50, 1, 1), entity(2, 1, 50, 2, 2)];
        all[1].kill();
        assert_eq!(ids(&CombatDetector::default().scan(&all)), [(0, 2)]);
    }

    #[test]
    fn tasks_come_out_in_registry_order() {
        let all: Vec<_> = (0..4).map(|i| entity(i, 1, 100, i as i32, 0)).collect();
        let tasks = CombatDetector::default().scan(&all);
        assert_eq!(
            ids(&tasks),
            [(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]
        );
    }

    #[test]
    fn emit_can_stop_the_pass() {
        let all: Vec<_> = (0..4).map(|i| entity(i, 1, 100, 0, 0)).collect();
        let mut seen = 0;
        let accepted = CombatDetector::default().pass(&all, |_| {
            seen += 1;
            seen < 3
        });
        assert_eq!(seen, 3);
        assert_eq!(accepted, 2);
    }

    #[test]
    fn out_of_range_pairs_ignored() {
        let all = vec![entity(0, 1, 5, 0, 0), entity(1, 1, 5, 50, 50)];
        assert!(CombatDetector::default().scan(&all).is_empty());
    }
}
