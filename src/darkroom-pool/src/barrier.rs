use std::{
    mem,
    sync::{Condvar, Mutex},
    time::{Duration, Instant},
};

/// Completion tracking for a batch of identified work units.
///
/// A barrier is created with the number of units in the batch. Workers
/// report each finished unit through [`CompletionBarrier::mark_done`];
/// any number of threads may block in [`CompletionBarrier::wait_all`]
/// until every unit has been reported at least once.
///
/// Completion is monotonic. Slots never reset and marking the same
/// unit twice has no further effect.
pub struct CompletionBarrier {
    state: Mutex<BarrierState>,
    complete: Condvar,
}

struct BarrierState {
    done: Box<[bool]>,
    remaining: usize,
}

impl CompletionBarrier {
    /// Creates a barrier tracking `units` work units.
    ///
    /// A barrier over zero units is complete from the start.
    pub fn new(units: usize) -> Self {
        Self {
            state: Mutex::new(BarrierState {
                done: vec![false; units].into_boxed_slice(),
                remaining: units,
            }),
            complete: Condvar::new(),
        }
    }

    /// Marks the unit at `index` as done and wakes all waiters.
    ///
    /// Waiters re-check the completion predicate under the lock, so
    /// waking them on a partially completed batch is harmless.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range for the tracked batch.
    pub fn mark_done(&self, index: usize) {
        let mut state = self.state.lock().unwrap();

        assert!(
            index < state.done.len(),
            "unit index {index} out of range for a batch of {} units",
            state.done.len()
        );

        if !mem::replace(&mut state.done[index], true) {
            state.remaining -= 1;
        }
        drop(state);

        self.complete.notify_all();
    }

    /// Blocks until every tracked unit has been marked done.
    ///
    /// Returns immediately if the batch is already complete. Any
    /// number of threads may wait at the same time.
    pub fn wait_all(&self) {
        let mut state = self.state.lock().unwrap();
        while state.remaining > 0 {
            state = self.complete.wait(state).unwrap();
        }
    }

    /// Like [`CompletionBarrier::wait_all`], but gives up once
    /// `timeout` has elapsed.
    ///
    /// Returns whether the batch completed before the deadline.
    pub fn wait_all_for(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;

        let mut state = self.state.lock().unwrap();
        while state.remaining > 0 {
            let Some(timeout) = deadline.checked_duration_since(Instant::now()) else {
                return false;
            };

            let (guard, _) = self.complete.wait_timeout(state, timeout).unwrap();
            state = guard;
        }

        true
    }

    /// Whether every tracked unit has been marked done.
    pub fn is_complete(&self) -> bool {
        self.state.lock().unwrap().remaining == 0
    }
}
