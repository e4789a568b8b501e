use std::{
    collections::VecDeque,
    sync::{Condvar, Mutex},
    time::{Duration, Instant},
};

/// An unbounded FIFO hand-off queue between producers and workers.
///
/// Any number of threads may push and pop concurrently. Items are
/// dequeued in push order across the whole queue and every item is
/// handed to exactly one [`WorkQueue::pop`] caller.
pub struct WorkQueue<T> {
    items: Mutex<VecDeque<T>>,
    not_empty: Condvar,
}

impl<T> WorkQueue<T> {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self {
            items: Mutex::new(VecDeque::new()),
            not_empty: Condvar::new(),
        }
    }

    /// Appends an item to the back of the queue.
    ///
    /// Wakes one thread blocked in [`WorkQueue::pop`], if any.
    pub fn push(&self, item: T) {
        let mut items = self.items.lock().unwrap();
        items.push_back(item);
        drop(items);

        self.not_empty.notify_one();
    }

    /// Removes and returns the item at the front of the queue,
    /// blocking while the queue is empty.
    pub fn pop(&self) -> T {
        let mut items = self.items.lock().unwrap();
        loop {
            match items.pop_front() {
                Some(item) => return item,
                None => items = self.not_empty.wait(items).unwrap(),
            }
        }
    }

    /// Like [`WorkQueue::pop`], but gives up once `timeout` has
    /// elapsed with the queue still empty.
    ///
    /// A zero timeout degrades to a non-blocking check.
    pub fn pop_timeout(&self, timeout: Duration) -> Option<T> {
        let deadline = Instant::now() + timeout;

        let mut items = self.items.lock().unwrap();
        loop {
            if let Some(item) = items.pop_front() {
                return Some(item);
            }

            let timeout = deadline.checked_duration_since(Instant::now())?;
            let (guard, _) = self.not_empty.wait_timeout(items, timeout).unwrap();
            items = guard;
        }
    }

    /// Gets the number of currently queued items.
    pub fn len(&self) -> usize {
        self.items.lock().unwrap().len()
    }

    /// Whether the queue currently holds no items.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> Default for WorkQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
