//! Movement and detection loop.
//!
//! The tick thread owns the [`MovementScheduler`] and its RNG
//! exclusively. Each tick it snapshots the registry under the read
//! lock, moves every living entity, then runs one detection pass that
//! pushes tasks straight into the [`CombatQueue`] so the resolver can
//! start on them while the pass is still running.

use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::select;
use tracing::{debug, trace};

use crate::detector::CombatDetector;
use crate::metrics::EngineMetrics;
use crate::movement::MovementScheduler;
use crate::queue::CombatQueue;
use crate::registry::EntityRegistry;
use crate::shutdown::StopToken;

/// State held by the tick thread's main loop.
pub(crate) struct TickThreadState {
    pub registry: Arc<EntityRegistry>,
    pub movement: MovementScheduler,
    pub detector: CombatDetector,
    pub queue: Arc<CombatQueue>,
    pub metrics: Arc<EngineMetrics>,
    pub interval: Duration,
    pub stop: StopToken,
}

impl TickThreadState {
    /// Main tick loop. Runs until the stop signal fires.
    pub fn run(mut self) {
        let ticker = crossbeam_channel::tick(self.interval);
        loop {
            // A missed interval is simply picked up by the next one.
            select! {
                recv(self.stop.receiver()) -> _ => break,
                recv(ticker) -> _ => {}
            }
            if self.stop.is_stopped() {
                break;
            }
            self.execute_tick();
        }
        debug!("tick thread exiting");
    }

    /// One movement pass followed by one detection pass.
    pub fn execute_tick(&mut self) {
        let entities = self.registry.snapshot();
        let moved = self.movement.pass(&entities);

        let queue = &self.queue;
        let metrics = &self.metrics;
        let stop = &self.stop;
        let enqueued = self.detector.pass(&entities, |task| {
            if stop.is_stopped() {
                return false;
            }
            match queue.push(task) {
                Ok(()) => {
                    metrics.record_enqueued();
                    true
                }
                Err(_) => {
                    metrics.record_rejected();
                    false
                }
            }
        });

        self.metrics.record_tick();
        trace!(moved, enqueued, "tick complete");
    }
}
