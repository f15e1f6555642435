//! Random-walk movement.
//!
//! Each tick every living entity steps by an independent uniform offset
//! in `[-move_radius, +move_radius]` on each axis and is clamped back
//! onto the map. Dead entities never move. Entities do not constrain
//! each other, so positions may overlap.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use skirmish_core::{Entity, EntityRef, MapBounds};

/// Moves every living entity once per call to [`pass`](Self::pass).
#[derive(Debug)]
pub struct MovementScheduler {
    bounds: MapBounds,
    rng: ChaCha8Rng,
}

impl MovementScheduler {
    /// Scheduler over `bounds` with a deterministic RNG stream.
    pub fn new(bounds: MapBounds, seed: u64) -> Self {
        Self {
            bounds,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// The map entities are clamped to.
    pub fn bounds(&self) -> MapBounds {
        self.bounds
    }

    /// Move every living entity in `entities`. Returns how many moved.
    pub fn pass(&mut self, entities: &[EntityRef]) -> usize {
        entities
            .iter()
            .filter(|e| step_entity(e, self.bounds, &mut self.rng))
            .count()
    }
}

/// Move one entity. Returns `false` (and leaves it untouched) if it is
/// dead.
///
/// Aliveness is checked under the same lock that writes the position,
/// so an entity killed mid-tick stays where it died. A negative move
/// radius behaves like zero.
pub fn step_entity<R: Rng + ?Sized>(entity: &Entity, bounds: MapBounds, rng: &mut R) -> bool {
    let radius = entity.move_radius().max(0);
    let mut state = entity.lock_state();
    if !state.alive {
        return false;
    }
    let dx = rng.gen_range(-radius..=radius);
    let dy = rng.gen_range(-radius..=radius);
    state.position = bounds.clamp(
        i64::from(state.position.x) + i64::from(dx),
        i64::from(state.position.y) + i64::from(dy),
    );
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use skirmish_core::Position;
    use skirmish_test_utils::entity;

    #[test]
    fn dead_entities_stay_put() {
        let bounds = MapBounds::new(100, 100).unwrap();
        let e = entity(0, 50, 1, 40, 40);
        e.kill();
        let mut sched = MovementScheduler::new(bounds, 7);
        for _ in 0..100 {
            assert_eq!(sched.pass(std::slice::from_ref(&e)), 0);
        }
        assert_eq!(e.position(), Position::new(40, 40));
    }

    #[test]
    fn zero_radius_never_moves() {
        let bounds = MapBounds::new(10, 10).unwrap();
        let e = entity(0, 0, 1, 5, 5);
        let mut sched = MovementScheduler::new(bounds, 1);
        for _ in 0..20 {
            sched.pass(std::slice::from_ref(&e));
        }
        assert_eq!(e.position(), Position::new(5, 5));
    }

    #[test]
    fn negative_radius_is_treated_as_zero() {
        let bounds = MapBounds::new(10, 10).unwrap();
        let e = entity(0, -1, 1, 5, 5);
        let mut sched = MovementScheduler::new(bounds, 1);
        for _ in 0..20 {
            assert_eq!(sched.pass(std::slice::from_ref(&e)), 1);
        }
        assert_eq!(e.position(), Position::new(5, 5));
        assert_eq!(sched.bounds(), bounds);
    }

    #[test]
    fn step_stays_within_radius_when_unclamped() {
        let bounds = MapBounds::new(1000, 1000).unwrap();
        let e = entity(0, 3, 1, 500, 500);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..200 {
            let before = e.position();
            step_entity(&e, bounds, &mut rng);
            let after = e.position();
            assert!((after.x - before.x).abs() <= 3);
            assert!((after.y - before.y).abs() <= 3);
        }
    }

    #[test]
    fn same_seed_same_walk() {
        let bounds = MapBounds::new(100, 100).unwrap();
        let a = entity(0, 20, 1, 50, 50);
        let b = entity(0, 20, 1, 50, 50);
        let mut sa = MovementScheduler::new(bounds, 42);
        let mut sb = MovementScheduler::new(bounds, 42);
        for _ in 0..10 {
            sa.pass(std::slice::from_ref(&a));
            sb.pass(std::slice::from_ref(&b));
            assert_eq!(a.position(), b.position());
        }
    }

    #[test]
    fn pass_counts_only_living() {
        let bounds = MapBounds::new(100, 100).unwrap();
        let all = vec![entity(0, 5, 1, 1, 1), entity(1, 5, 1, 2, 2), entity(2, 5, 1, 3, 3)];
        all[1].kill();
        let mut sched = MovementScheduler::new(bounds, 9);
        assert_eq!(sched.pass(&all), 2);
    }

    proptest! {
        #[test]
        fn movement_never_leaves_the_map(
            w in 1i32..64,
            h in 1i32..64,
            radius in 0i32..80,
            seed in any::<u64>(),
            fx in 0.0f64..1.0,
            fy in 0.0f64..1.0,
        ) {
            let bounds = MapBounds::new(w, h).unwrap();
            let start = Position::new((w as f64 * fx) as i32, (h as f64 * fy) as i32);
            let e = entity(0, radius, 1, start.x, start.y);
            let mut sched = MovementScheduler::new(bounds, seed);
            for _ in 0..25 {
                sched.pass(std::slice::from_ref(&e));
                prop_assert!(bounds.contains(e.position()));
            }
        }

        #[test]
        fn dead_stay_put_after_random_walk(
            radius in 1i32..30,
            seed in any::<u64>(),
            moves_before_death in 0usize..10,
        ) {
            let bounds = MapBounds::new(50, 50).unwrap();
            let e = entity(0, radius, 1, 25, 25);
            let mut sched = MovementScheduler::new(bounds, seed);
            for _ in 0..moves_before_death {
                sched.pass(std::slice::from_ref(&e));
            }
            e.kill();
            let frozen = e.position();
            for _ in 0..10 {
                prop_assert_eq!(sched.pass(std::slice::from_ref(&e)), 0);
                prop_assert_eq!(e.position(), frozen);
            }
        }
    }
}
