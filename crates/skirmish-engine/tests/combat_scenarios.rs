//! Detection → queue → resolution scenarios with hand-placed entities
//! and scripted dice.

use std::sync::Arc;

use skirmish_core::{CombatOutcome, CombatTask, EntityId, NullSink};
use skirmish_engine::{
    CombatDetector, CombatQueue, CombatResolver, DetectionPolicy, EngineMetrics, EntityRegistry,
    SpawnSpec, WorldConfig,
};
use skirmish_test_utils::{placed, statue_table, RecordingSink, ScriptedDice};

fn registry(roster: Vec<SpawnSpec>) -> EntityRegistry {
    let config = WorldConfig {
        species: statue_table(),
        roster,
        ..WorldConfig::default()
    };
    EntityRegistry::from_config(&config).unwrap()
}

#[test]
fn single_engagement_attacker_wins() {
    let reg = registry(vec![
        SpawnSpec::new("A", "Statue", 0, 0),
        SpawnSpec::new("B", "Statue", 0, 10),
    ]);
    let queue = CombatQueue::new();
    let enqueued = CombatDetector::default().pass(&reg.snapshot(), |task| queue.push(task).is_ok());
    assert_eq!(enqueued, 1);
    assert_eq!(queue.len(), 1);

    let task = queue.try_pop().unwrap();
    assert_eq!(task.attacker.id(), EntityId(0));
    assert_eq!(task.defender.id(), EntityId(1));

    let sink = Arc::new(RecordingSink::new());
    let mut resolver = CombatResolver::new(
        Box::new(ScriptedDice::new([6, 1])),
        sink.clone(),
        Arc::new(EngineMetrics::new()),
    );
    let a_before = task.attacker.state();
    assert_eq!(resolver.resolve(&task), CombatOutcome::AttackerWon);

    let b = reg.get(EntityId(1)).unwrap();
    assert_eq!(b.health(), 0);
    assert!(!b.is_alive());
    assert_eq!(reg.get(EntityId(0)).unwrap().state(), a_before);
    assert_eq!(sink.lines(), ["BATTLE: A vs B -> A wins!"]);
}

#[test]
fn dead_registry_produces_no_tasks() {
    let reg = registry(vec![
        SpawnSpec::new("A", "Statue", 5, 5),
        SpawnSpec::new("B", "Statue", 5, 5),
    ]);
    for e in reg.snapshot() {
        e.kill();
    }
    assert!(CombatDetector::default().scan(&reg.snapshot()).is_empty());
    assert!(CombatDetector::new(DetectionPolicy::SymmetricThreat)
        .scan(&reg.snapshot())
        .is_empty());
}

#[test]
fn task_made_stale_by_earlier_task_is_discarded() {
    let a = placed(0, "A", 10, 0, 0);
    let b = placed(1, "B", 10, 0, 5);
    let c = placed(2, "C", 10, 0, 9);

    let queue = CombatQueue::new();
    queue.push(CombatTask::new(a.clone(), b.clone())).unwrap();
    queue.push(CombatTask::new(b.clone(), c.clone())).unwrap();

    let metrics = Arc::new(EngineMetrics::new());
    // Only two rolls: the second task must not reach the dice.
    let mut resolver = CombatResolver::new(
        Box::new(ScriptedDice::new([5, 2])),
        Arc::new(NullSink),
        metrics.clone(),
    );

    let first = queue.try_pop().unwrap();
    assert_eq!(resolver.resolve(&first), CombatOutcome::AttackerWon);
    assert!(!b.is_alive());

    let (b_before, c_before) = (b.state(), c.state());
    let second = queue.try_pop().unwrap();
    assert_eq!(resolver.resolve(&second), CombatOutcome::Stale);
    assert_eq!(b.state(), b_before);
    assert_eq!(c.state(), c_before);
    assert_eq!(metrics.snapshot().stale_tasks, 1);
}

#[test]
fn reverse_threat_needs_symmetric_policy() {
    // Pebble (kill radius 0) precedes Statue (kill radius 10).
    let reg = registry(vec![
        SpawnSpec::new("P", "Pebble", 0, 0),
        SpawnSpec::new("S", "Statue", 0, 3),
    ]);
    let entities = reg.snapshot();
    assert!(CombatDetector::default().scan(&entities).is_empty());

    let tasks = CombatDetector::new(DetectionPolicy::SymmetricThreat).scan(&entities);
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].attacker.name(), "S");
    assert_eq!(tasks[0].defender.name(), "P");
}

#[test]
fn repeated_detection_before_resolution_is_tolerated() {
    let reg = registry(vec![
        SpawnSpec::new("A", "Statue", 0, 0),
        SpawnSpec::new("B", "Statue", 3, 4),
    ]);
    let queue = CombatQueue::new();
    let detector = CombatDetector::default();
    for _ in 0..3 {
        detector.pass(&reg.snapshot(), |task| queue.push(task).is_ok());
    }
    assert_eq!(queue.len(), 3);
    queue.close();

    let metrics = Arc::new(EngineMetrics::new());
    let resolver = CombatResolver::new(
        Box::new(ScriptedDice::new([1, 1])),
        Arc::new(NullSink),
        metrics.clone(),
    );
    assert_eq!(resolver.run(&queue), 3);
    let m = metrics.snapshot();
    assert_eq!((m.tasks_resolved, m.stale_tasks, m.kills), (1, 2, 1));
    // Tie: the defender survives.
    assert!(!reg.get(EntityId(0)).unwrap().is_alive());
    assert!(reg.get(EntityId(1)).unwrap().is_alive());
}
