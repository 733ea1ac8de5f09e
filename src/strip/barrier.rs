use std::sync::{
    Mutex,
    atomic::{AtomicUsize, Ordering},
};

use crate::foundation::error::{BoothError, BoothResult};

/// Counts per-frame completions and elects exactly one finisher.
///
/// Each of the `expected` slots may arrive once. The arrival that fills the last slot is told
/// to finalize; every other arrival, and any arrival after that, is not.
#[derive(Debug)]
pub struct CompletionBarrier {
    expected: usize,
    arrived: Mutex<Vec<bool>>,
    fired: AtomicUsize,
}

impl CompletionBarrier {
    /// Barrier waiting for `expected` arrivals.
    pub fn new(expected: usize) -> Self {
        Self {
            expected,
            arrived: Mutex::new(vec![false; expected]),
            fired: AtomicUsize::new(0),
        }
    }

    /// Number of slots.
    pub fn expected(&self) -> usize {
        self.expected
    }

    /// Record completion of slot `index`. Returns `true` for the arrival that completes the set.
    pub fn arrive(&self, index: usize) -> BoothResult<bool> {
        let mut arrived = self
            .arrived
            .lock()
            .map_err(|_| BoothError::render("completion barrier poisoned"))?;
        let slot = arrived
            .get_mut(index)
            .ok_or_else(|| BoothError::render(format!("arrival for unknown slot {index}")))?;
        if *slot {
            return Err(BoothError::render(format!("slot {index} arrived twice")));
        }
        *slot = true;

        let complete = arrived.iter().all(|&a| a);
        if complete {
            self.fired.fetch_add(1, Ordering::SeqCst);
        }
        tracing::debug!(index, complete, "frame arrived");
        Ok(complete)
    }

    /// How many times the barrier has fired; `1` once complete, never more.
    pub fn fired(&self) -> usize {
        self.fired.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/strip/barrier.rs"]
mod tests;
