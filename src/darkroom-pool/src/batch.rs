use std::{
    any::Any,
    io,
    num::NonZeroUsize,
    panic::{self, AssertUnwindSafe},
    sync::Mutex,
    thread,
};

use thiserror::Error;

use crate::{CompletionBarrier, WorkQueue};

const WORKER_NAME: &str = "darkroom-worker";
const WORKER_STACK: usize = 1_048_576;

/// The number of workers used when the caller does not configure one.
pub const DEFAULT_WORKERS: NonZeroUsize = match NonZeroUsize::new(4) {
    Some(n) => n,
    None => unreachable!(),
};

/// A unit of work dispatched to the pool.
///
/// Units are constructed by the batch producer and handed to exactly
/// one worker each.
#[derive(Debug)]
pub struct Task<T> {
    /// The unit's position in its batch.
    ///
    /// Unique within a batch and used as the completion-tracking key.
    pub index: usize,
    /// The data the transform operates on.
    pub payload: T,
}

/// Messages travelling through the pool's [`WorkQueue`].
#[derive(Debug)]
pub enum Message<T> {
    /// A work unit to process.
    Task(Task<T>),
    /// Instructs the receiving worker to stop.
    ///
    /// Consumed exactly once per worker; one per worker is enqueued
    /// at the end of every batch.
    Shutdown,
}

/// A work unit whose transform panicked.
#[derive(Debug)]
pub struct UnitFailure {
    /// The index of the failed unit.
    pub index: usize,
    /// The panic message, where one was given.
    pub reason: String,
}

/// Errors that may occur when running a batch on the pool.
#[derive(Debug, Error)]
pub enum BatchError {
    /// Spawning a worker thread failed.
    ///
    /// Workers spawned before the failure are shut down before this
    /// error is returned; the batch itself is never dispatched.
    #[error("failed to spawn worker thread: {0}")]
    Spawn(#[from] io::Error),

    /// One or more transforms panicked during the batch.
    ///
    /// Every unit still settled and the pool was shut down cleanly.
    #[error("{} of {total} work units failed", .failures.len())]
    Failed {
        /// The number of units in the batch.
        total: usize,
        /// The units whose transform panicked.
        failures: Vec<UnitFailure>,
    },
}

/// A fixed-size pool of workers for processing batches of independent
/// work units.
///
/// The pool itself only holds the validated configuration; worker
/// threads live per batch. [`WorkerPool::run_batch`] spawns them
/// scoped to the call, which lets units borrow data owned by the
/// caller, disjoint `&mut` row views included.
#[derive(Clone, Debug)]
pub struct WorkerPool {
    workers: NonZeroUsize,
}

impl WorkerPool {
    /// Creates a pool running `workers` worker threads per batch.
    pub fn new(workers: NonZeroUsize) -> Self {
        Self { workers }
    }

    /// Gets the number of worker threads used per batch.
    #[inline]
    pub fn workers(&self) -> usize {
        self.workers.get()
    }

    /// Runs a batch of work units to completion on the pool.
    ///
    /// Spawns the configured number of workers, enqueues one
    /// [`Message::Task`] per unit with indices in push order, waits
    /// until the workers have marked every unit done and stops the
    /// pool again with one [`Message::Shutdown`] per worker. The
    /// shutdown messages are sent on every path out of this function,
    /// so no worker ever outlives the call.
    ///
    /// `transform` runs on worker threads and must not assume any
    /// particular assignment of units to workers. A panicking
    /// transform does not abort the batch; the affected units are
    /// reported through [`BatchError::Failed`] once every unit has
    /// settled.
    pub fn run_batch<T, F>(&self, units: Vec<T>, transform: F) -> Result<(), BatchError>
    where
        T: Send,
        F: Fn(T) + Sync,
    {
        let total = units.len();

        let queue = WorkQueue::new();
        let barrier = CompletionBarrier::new(total);
        let failures = Mutex::new(Vec::new());

        thread::scope(|scope| {
            let mut spawned = 0;

            for id in 0..self.workers.get() {
                let spawn = thread::Builder::new()
                    .name(format!("{WORKER_NAME}-{id}"))
                    .stack_size(WORKER_STACK)
                    .spawn_scoped(scope, || {
                        worker_loop(&queue, &barrier, &failures, &transform)
                    });

                if let Err(e) = spawn {
                    // The workers that did start still get their
                    // shutdown messages before the error surfaces.
                    for _ in 0..spawned {
                        queue.push(Message::Shutdown);
                    }

                    return Err(BatchError::Spawn(e));
                }

                spawned += 1;
            }

            for (index, payload) in units.into_iter().enumerate() {
                queue.push(Message::Task(Task { index, payload }));
            }

            barrier.wait_all();

            for _ in 0..spawned {
                queue.push(Message::Shutdown);
            }

            Ok(())
        })?;

        let failures = failures.into_inner().unwrap();
        if failures.is_empty() {
            Ok(())
        } else {
            Err(BatchError::Failed { total, failures })
        }
    }
}

fn worker_loop<T, F>(
    queue: &WorkQueue<Message<T>>,
    barrier: &CompletionBarrier,
    failures: &Mutex<Vec<UnitFailure>>,
    transform: &F,
) where
    F: Fn(T),
{
    loop {
        let Task { index, payload } = match queue.pop() {
            Message::Task(task) => task,
            Message::Shutdown => break,
        };

        if let Err(panic) = panic::catch_unwind(AssertUnwindSafe(|| transform(payload))) {
            let reason = panic_reason(panic);
            log::error!("work unit {index} panicked: {reason}");

            failures.lock().unwrap().push(UnitFailure { index, reason });
        }

        // A failed unit settles like any other so the batch as a
        // whole always completes.
        barrier.mark_done(index);
    }
}

fn panic_reason(panic: Box<dyn Any + Send>) -> String {
    match panic.downcast::<String>() {
        Ok(message) => *message,
        Err(panic) => match panic.downcast::<&str>() {
            Ok(message) => message.to_string(),
            Err(_) => "opaque panic payload".to_string(),
        },
    }
}
