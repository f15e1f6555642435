//! User-facing [`Simulation`] and its lifecycle state machine.
//!
//! # Architecture
//!
//! ```text
//! Supervisor             Tick Thread               Resolver Thread        Reporter Thread
//!     |                       |                          |                       |
//!     |--launch()------------>| tick(interval)           |                       |
//!     |                       | registry.snapshot()      |                       |
//!     |                       | movement.pass()          |                       |
//!     |                       | detector.pass() --push-->| queue.pop()           |
//!     |                       |                          | lock both, roll, kill |
//!     |                       |                          |                       | tick(report)
//!     |                       |                          |                       | registry.views()
//!     |--stop()               |                          |                       |
//!     |  stop_signal.trigger  |                          |                       |
//!     |  queue.close()        |                          |                       |
//!     |  join tick ---------->X                          |                       |
//!     |  join resolver (drains queue) ------------------>X                       |
//!     |  join reporter ------------------------------------------------------->X
//! ```
//!
//! States: `Idle -> Running -> Stopping -> Stopped`. `Stopped` is terminal.

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Instant;

use crossbeam_channel::{Receiver, Sender};
use skirmish_core::{Dice, EntityView, EventSink, MapBounds};
use thiserror::Error;
use tracing::{info, warn};

use crate::config::{ConfigError, WorldConfig};
use crate::detector::CombatDetector;
use crate::metrics::{EngineMetrics, MetricsSnapshot};
use crate::movement::MovementScheduler;
use crate::queue::CombatQueue;
use crate::registry::EntityRegistry;
use crate::report::{emit_all, survivor_lines, ReporterState};
use crate::resolver::{CombatResolver, SeededDice};
use crate::shutdown::StopSignal;
use crate::tick_thread::TickThreadState;

/// Mixed into the world seed so dice and movement draw from different
/// streams.
const DICE_SEED_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

// ── Error types ──────────────────────────────────────────────────

/// Lifecycle misuse or failure to bring workers up.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LifecycleError {
    /// `start()`/`launch()` called while workers are running.
    #[error("simulation is already running")]
    AlreadyRunning,
    /// `start()`/`launch()` called after the simulation stopped.
    #[error("simulation has already stopped")]
    AlreadyStopped,
    /// The OS refused to create a worker thread.
    #[error("failed to spawn {name} thread: {reason}")]
    ThreadSpawnFailed {
        /// Which worker.
        name: &'static str,
        /// OS error text.
        reason: String,
    },
}

// ── Reports ──────────────────────────────────────────────────────

/// Report from [`Simulation::stop`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShutdownReport {
    /// Wall time spent in the shutdown sequence.
    pub total_ms: u64,
    /// Worker threads joined by this call.
    pub workers_joined: usize,
    /// Worker threads that had panicked.
    pub workers_panicked: usize,
    /// Counters after every worker stopped.
    pub metrics: MetricsSnapshot,
}

/// Report from a complete [`Simulation::start`] run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunReport {
    /// How shutdown went.
    pub shutdown: ShutdownReport,
    /// Living entities at the end.
    pub alive: usize,
    /// Dead entities at the end.
    pub dead: usize,
    /// The living entities, in registry order.
    pub survivors: Vec<EntityView>,
}

// ── SupervisorState ──────────────────────────────────────────────

/// Lifecycle of a [`Simulation`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SupervisorState {
    /// Built, no workers yet.
    Idle,
    /// Workers running.
    Running,
    /// Shutdown in progress.
    Stopping,
    /// All workers joined. Terminal.
    Stopped,
}

// ── InterruptHandle ──────────────────────────────────────────────

/// Ends a blocking [`Simulation::start`] before its run duration is up.
///
/// Cloneable and usable from any thread. Interrupting a simulation that
/// is not inside `start` takes effect on the next `start`.
#[derive(Clone, Debug)]
pub struct InterruptHandle {
    tx: Sender<()>,
}

impl InterruptHandle {
    /// Request the end of the current run. Idempotent.
    pub fn interrupt(&self) {
        // A full slot means an interrupt is already pending.
        let _ = self.tx.try_send(());
    }
}

// ── Simulation ───────────────────────────────────────────────────

/// A running (or runnable) battle.
///
/// Owns the registry, the combat queue, and the three worker threads.
pub struct Simulation {
    config: WorldConfig,
    bounds: MapBounds,
    registry: Arc<EntityRegistry>,
    queue: Arc<CombatQueue>,
    metrics: Arc<EngineMetrics>,
    sink: Arc<dyn EventSink>,
    dice: Option<Box<dyn Dice>>,
    stop_signal: StopSignal,
    interrupt_tx: Sender<()>,
    interrupt_rx: Receiver<()>,
    tick_thread: Option<JoinHandle<()>>,
    resolver_thread: Option<JoinHandle<u64>>,
    reporter_thread: Option<JoinHandle<()>>,
    state: SupervisorState,
}

impl Simulation {
    /// Validate `config` and build the registry. No threads are started.
    pub fn new(config: WorldConfig, sink: Arc<dyn EventSink>) -> Result<Self, ConfigError> {
        let bounds = config.validate()?;
        let registry = Arc::new(EntityRegistry::from_config(&config)?);
        info!(
            entities = registry.size(),
            map = %bounds,
            "created {} entities on {} map",
            registry.size(),
            bounds
        );
        let (interrupt_tx, interrupt_rx) = crossbeam_channel::bounded(1);
        Ok(Self {
            config,
            bounds,
            registry,
            queue: Arc::new(CombatQueue::new()),
            metrics: Arc::new(EngineMetrics::new()),
            sink,
            dice: None,
            stop_signal: StopSignal::new(),
            interrupt_tx,
            interrupt_rx,
            tick_thread: None,
            resolver_thread: None,
            reporter_thread: None,
            state: SupervisorState::Idle,
        })
    }

    /// Replace the resolver's dice. Only meaningful before launch.
    pub fn with_dice(mut self, dice: Box<dyn Dice>) -> Self {
        self.dice = Some(dice);
        self
    }

    /// Handle that cuts a blocking [`start`](Self::start) short.
    pub fn interrupt_handle(&self) -> InterruptHandle {
        InterruptHandle {
            tx: self.interrupt_tx.clone(),
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SupervisorState {
        self.state
    }

    /// The configuration this simulation was built from.
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// The map.
    pub fn bounds(&self) -> MapBounds {
        self.bounds
    }

    /// The shared registry.
    pub fn registry(&self) -> &Arc<EntityRegistry> {
        &self.registry
    }

    /// Current counters.
    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    /// Living entities. May be momentarily stale while running.
    pub fn alive_count(&self) -> usize {
        self.registry.alive_count()
    }

    /// Dead entities. May be momentarily stale while running.
    pub fn dead_count(&self) -> usize {
        self.registry.dead_count()
    }

    /// Views of the living entities, in registry order.
    pub fn survivors(&self) -> Vec<EntityView> {
        self.registry.survivors()
    }

    /// Run for the configured duration, stop, and emit the survivor
    /// report. Blocks for the whole run unless an [`InterruptHandle`]
    /// fires first.
    pub fn start(&mut self) -> Result<RunReport, LifecycleError> {
        self.launch()?;
        info!(
            duration_ms = self.config.run_duration.as_millis() as u64,
            "simulation started"
        );
        if self
            .interrupt_rx
            .recv_timeout(self.config.run_duration)
            .is_ok()
        {
            info!("run interrupted before its duration elapsed");
        }
        let shutdown = self.stop();

        // Every worker has joined, so nothing mutates the registry now.
        let survivors = self.survivors();
        emit_all(&*self.sink, &survivor_lines(&self.registry.views()));

        Ok(RunReport {
            shutdown,
            alive: survivors.len(),
            dead: self.registry.size() - survivors.len(),
            survivors,
        })
    }

    /// Spawn the workers and return immediately (`Idle -> Running`).
    pub fn launch(&mut self) -> Result<(), LifecycleError> {
        match self.state {
            SupervisorState::Idle => {}
            SupervisorState::Running | SupervisorState::Stopping => {
                return Err(LifecycleError::AlreadyRunning)
            }
            SupervisorState::Stopped => return Err(LifecycleError::AlreadyStopped),
        }

        self.state = SupervisorState::Running;
        if let Err(e) = self.spawn_workers() {
            warn!(error = %e, "worker start-up failed, shutting down");
            self.stop();
            return Err(e);
        }
        Ok(())
    }

    fn spawn_workers(&mut self) -> Result<(), LifecycleError> {
        let tick = TickThreadState {
            registry: Arc::clone(&self.registry),
            movement: MovementScheduler::new(self.bounds, self.config.seed),
            detector: CombatDetector::new(self.config.detection),
            queue: Arc::clone(&self.queue),
            metrics: Arc::clone(&self.metrics),
            interval: self.config.tick_interval,
            stop: self.stop_signal.token(),
        };
        self.tick_thread = Some(spawn_named("tick", move || tick.run())?);

        let dice_seed = self.config.seed ^ DICE_SEED_SALT;
        let dice: Box<dyn Dice> = match self.dice.take() {
            Some(dice) => dice,
            None => Box::new(SeededDice::new(dice_seed)),
        };
        let resolver = CombatResolver::new(dice, Arc::clone(&self.sink), Arc::clone(&self.metrics));
        let queue = Arc::clone(&self.queue);
        self.resolver_thread = Some(spawn_named("resolver", move || resolver.run(&queue))?);

        let reporter = ReporterState {
            registry: Arc::clone(&self.registry),
            bounds: self.bounds,
            sink: Arc::clone(&self.sink),
            metrics: Arc::clone(&self.metrics),
            interval: self.config.report_interval,
            sample: self.config.report_sample,
            stop: self.stop_signal.token(),
        };
        self.reporter_thread = Some(spawn_named("reporter", move || reporter.run())?);
        Ok(())
    }

    /// Stop every worker and wait for them. Idempotent.
    ///
    /// 1. Set the stop flag and wake the timer workers.
    /// 2. Close the combat queue, waking the resolver even if it is empty.
    /// 3. Join the tick thread, then the resolver (which drains what is
    ///    still queued), then the reporter.
    ///
    /// Calling this on an `Idle` simulation moves it straight to
    /// `Stopped`.
    pub fn stop(&mut self) -> ShutdownReport {
        match self.state {
            SupervisorState::Stopped => {
                return ShutdownReport {
                    total_ms: 0,
                    workers_joined: 0,
                    workers_panicked: 0,
                    metrics: self.metrics.snapshot(),
                };
            }
            SupervisorState::Idle => {
                self.stop_signal.trigger();
                self.queue.close();
                self.state = SupervisorState::Stopped;
                return ShutdownReport {
                    total_ms: 0,
                    workers_joined: 0,
                    workers_panicked: 0,
                    metrics: self.metrics.snapshot(),
                };
            }
            SupervisorState::Running | SupervisorState::Stopping => {}
        }

        let start = Instant::now();
        self.state = SupervisorState::Stopping;
        self.stop_signal.trigger();
        self.queue.close();

        let mut joined = Joined::default();
        joined.join("tick", self.tick_thread.take());
        joined.join("resolver", self.resolver_thread.take());
        joined.join("reporter", self.reporter_thread.take());

        self.state = SupervisorState::Stopped;
        let report = ShutdownReport {
            total_ms: start.elapsed().as_millis() as u64,
            workers_joined: joined.ok,
            workers_panicked: joined.panicked,
            metrics: self.metrics.snapshot(),
        };
        info!(
            total_ms = report.total_ms,
            workers_joined = report.workers_joined,
            ticks = report.metrics.ticks,
            kills = report.metrics.kills,
            "simulation stopped"
        );
        report
    }
}

impl Drop for Simulation {
    fn drop(&mut self) {
        if self.state != SupervisorState::Stopped {
            self.stop();
        }
    }
}

impl std::fmt::Debug for Simulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulation")
            .field("state", &self.state)
            .field("bounds", &self.bounds)
            .field("entities", &self.registry.size())
            .finish_non_exhaustive()
    }
}

fn spawn_named<T, F>(name: &'static str, f: F) -> Result<JoinHandle<T>, LifecycleError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    thread::Builder::new()
        .name(format!("skirmish-{name}"))
        .spawn(f)
        .map_err(|e| LifecycleError::ThreadSpawnFailed {
            name,
            reason: e.to_string(),
        })
}

#[derive(Default)]
struct Joined {
    ok: usize,
    panicked: usize,
}

impl Joined {
    fn join<T>(&mut self, name: &'static str, handle: Option<JoinHandle<T>>) {
        let Some(handle) = handle else {
            return;
        };
        match handle.join() {
            Ok(_) => self.ok += 1,
            Err(_) => {
                warn!(worker = name, "worker thread panicked");
                self.panicked += 1;
            }
        }
    }
}
