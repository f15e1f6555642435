//! One-shot stop signal shared by the timer workers.
//!
//! The flag is for cheap polling inside a tick; the channel is for
//! blocking waits. Triggering drops the only sender, so every
//! `recv` on a cloned receiver returns at once.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crossbeam_channel::{Receiver, Sender};

/// Owned by the supervisor.
pub(crate) struct StopSignal {
    stopped: Arc<AtomicBool>,
    tx: Option<Sender<()>>,
    rx: Receiver<()>,
}

/// Held by each worker.
#[derive(Clone)]
pub(crate) struct StopToken {
    stopped: Arc<AtomicBool>,
    rx: Receiver<()>,
}

impl StopSignal {
    pub fn new() -> Self {
        let (tx, rx) = crossbeam_channel::bounded(0);
        Self {
            stopped: Arc::new(AtomicBool::new(false)),
            tx: Some(tx),
            rx,
        }
    }

    pub fn token(&self) -> StopToken {
        StopToken {
            stopped: Arc::clone(&self.stopped),
            rx: self.rx.clone(),
        }
    }

    /// Idempotent.
    pub fn trigger(&mut self) {
        self.stopped.store(true, Ordering::Release);
        self.tx.take();
    }
}

impl StopToken {
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Acquire)
    }

    /// Becomes ready (disconnected) once the signal fires.
    pub fn receiver(&self) -> &Receiver<()> {
        &self.rx
    }
}
