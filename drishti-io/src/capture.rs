//! Blocking latest-reading cell for interrupt-style measurement producers.
//!
//! The echo-pulse capture on the real platform is edge-triggered: an ISR
//! finishes the measurement and the consumer busy-waits on a flag. Here the
//! same contract is a single mutable slot with a happens-before guarantee:
//! the producer's `publish` completes before the consumer's blocking `wait`
//! returns. One producer, one consumer, no locks beyond the slot itself.

use std::sync::{Condvar, Mutex};

/// Single-slot cell holding the most recent measurement.
///
/// `publish` overwrites any unconsumed value; `wait` blocks until a value is
/// present and takes it. There is deliberately no timeout: a measurement
/// source that never produces stalls the consumer, matching the physical
/// system's behavior.
#[derive(Debug, Default)]
pub struct LatestCell<T> {
    slot: Mutex<Option<T>>,
    ready: Condvar,
}

impl<T> LatestCell<T> {
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(None),
            ready: Condvar::new(),
        }
    }

    /// Store a value, replacing any unconsumed one, and wake the consumer.
    pub fn publish(&self, value: T) {
        let mut guard = self.slot.lock().unwrap_or_else(|e| e.into_inner());
        *guard = Some(value);
        self.ready.notify_one();
    }

    /// Block until a value is available, then take it.
    pub fn wait(&self) -> T {
        let mut guard = self.slot.lock().unwrap_or_else(|e| e.into_inner());
        loop {
            if let Some(value) = guard.take() {
                return value;
            }
            guard = self.ready.wait(guard).unwrap_or_else(|e| e.into_inner());
        }
    }

    /// Take the value if one is present, without blocking.
    pub fn try_take(&self) -> Option<T> {
        self.slot.lock().unwrap_or_else(|e| e.into_inner()).take()
    }
}
