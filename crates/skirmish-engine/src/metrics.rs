//! Run-wide counters for the simulation engine.
//!
//! [`EngineMetrics`] is shared by all workers and updated with relaxed
//! atomics; [`MetricsSnapshot`] is the plain copy handed to callers.

use std::sync::atomic::{AtomicU64, Ordering};

/// Live counters, shared via `Arc` between workers.
#[derive(Debug, Default)]
pub struct EngineMetrics {
    ticks: AtomicU64,
    tasks_enqueued: AtomicU64,
    tasks_rejected: AtomicU64,
    tasks_resolved: AtomicU64,
    stale_tasks: AtomicU64,
    kills: AtomicU64,
    reports: AtomicU64,
}

/// Point-in-time copy of [`EngineMetrics`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    /// Movement/detection ticks completed.
    pub ticks: u64,
    /// Combat tasks accepted by the queue.
    pub tasks_enqueued: u64,
    /// Combat tasks refused because the queue was closed.
    pub tasks_rejected: u64,
    /// Tasks dequeued and resolved with a dice contest.
    pub tasks_resolved: u64,
    /// Tasks discarded because a participant was already dead.
    pub stale_tasks: u64,
    /// Entities killed.
    pub kills: u64,
    /// Periodic reports emitted.
    pub reports: u64,
}

impl EngineMetrics {
    /// All counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_tick(&self) {
        self.ticks.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_enqueued(&self) {
        self.tasks_enqueued.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_rejected(&self) {
        self.tasks_rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_resolved(&self) {
        self.tasks_resolved.fetch_add(1, Ordering::Relaxed);
        self.kills.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_stale(&self) {
        self.stale_tasks.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_report(&self) {
        self.reports.fetch_add(1, Ordering::Relaxed);
    }

    /// Copy every counter.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            ticks: self.ticks.load(Ordering::Relaxed),
            tasks_enqueued: self.tasks_enqueued.load(Ordering::Relaxed),
            tasks_rejected: self.tasks_rejected.load(Ordering::Relaxed),
            tasks_resolved: self.tasks_resolved.load(Ordering::Relaxed),
            stale_tasks: self.stale_tasks.load(Ordering::Relaxed),
            kills: self.kills.load(Ordering::Relaxed),
            reports: self.reports.load(Ordering::Relaxed),
        }
    }
}
