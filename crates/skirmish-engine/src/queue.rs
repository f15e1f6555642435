//! Combat task hand-off between the detector and the resolver.
//!
//! [`CombatQueue`] is an unbounded FIFO backed by a crossbeam channel,
//! plus a close flag. The consumer blocks in [`pop`](CombatQueue::pop)
//! until a task arrives or the queue is closed; closing drops the wake
//! sender, which disconnects the wake channel and releases a blocked
//! consumer immediately even when no task is pending. After close the
//! consumer drains whatever is still queued, then `pop` returns `None`.
//!
//! Pushes hold the read side of the wake lock and `close` takes the
//! write side, so every push that succeeds lands before the close flag
//! is set and is seen by the draining consumer.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{PoisonError, RwLock};

use crossbeam_channel::{select, Receiver, Sender};
use skirmish_core::CombatTask;
use thiserror::Error;

/// Returned by [`CombatQueue::push`] once the queue has been closed.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("combat queue is closed")]
pub struct QueueClosed(pub CombatTask);

/// Unbounded multi-producer, single-consumer FIFO of combat tasks.
pub struct CombatQueue {
    tx: Sender<CombatTask>,
    rx: Receiver<CombatTask>,
    closed: AtomicBool,
    wake_tx: RwLock<Option<Sender<()>>>,
    wake_rx: Receiver<()>,
}

// Compile-time assertion: CombatQueue must be Send + Sync.
const _: fn() = || {
    fn assert<T: Send + Sync>() {}
    assert::<CombatQueue>();
};

impl Default for CombatQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl CombatQueue {
    /// Create an open, empty queue.
    pub fn new() -> Self {
        let (tx, rx) = crossbeam_channel::unbounded();
        let (wake_tx, wake_rx) = crossbeam_channel::bounded(1);
        Self {
            tx,
            rx,
            closed: AtomicBool::new(false),
            wake_tx: RwLock::new(Some(wake_tx)),
            wake_rx,
        }
    }

    /// Append a task. Fails once the queue is closed.
    pub fn push(&self, task: CombatTask) -> Result<(), QueueClosed> {
        let open = self.wake_tx.read().unwrap_or_else(PoisonError::into_inner);
        if open.is_none() {
            return Err(QueueClosed(task));
        }
        // Both channel ends live in `self`, so the channel cannot be
        // disconnected while we hold `&self`.
        self.tx.send(task).map_err(|e| QueueClosed(e.into_inner()))
    }

    /// Block until a task is available or the queue is closed and empty.
    ///
    /// Returns `None` only when the queue is closed and fully drained.
    pub fn pop(&self) -> Option<CombatTask> {
        loop {
            if self.is_closed() {
                return self.rx.try_recv().ok();
            }
            select! {
                recv(self.rx) -> msg => return msg.ok(),
                recv(self.wake_rx) -> _ => continue,
            }
        }
    }

    /// Take the next task without blocking.
    pub fn try_pop(&self) -> Option<CombatTask> {
        self.rx.try_recv().ok()
    }

    /// Close the queue and wake a blocked consumer. Idempotent.
    pub fn close(&self) {
        let mut wake = self.wake_tx.write().unwrap_or_else(PoisonError::into_inner);
        self.closed.store(true, Ordering::Release);
        wake.take();
    }

    /// True once [`close`](Self::close) has been called.
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Number of tasks waiting.
    pub fn len(&self) -> usize {
        self.rx.len()
    }

    /// True if no tasks are waiting.
    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }
}

impl std::fmt::Debug for CombatQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CombatQueue")
            .field("len", &self.len())
            .field("closed", &self.is_closed())
            .finish()
    }
}
