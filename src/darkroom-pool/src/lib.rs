//! Implementation of a worker pool for row-parallel batch processing.
//!
//! # Motivation
//!
//! Darkroom's unit of work is one image row. A single batch produces
//! many cheap, independent units whose results all land in one shared
//! pixel buffer, so the interesting part is not the transform but the
//! coordination: handing units to a fixed set of workers and knowing
//! when every last one of them has settled.
//!
//! # Design
//!
//! The main thread produces all units of a batch up front, blocks on a
//! [`CompletionBarrier`] until the workers have marked each unit done,
//! and only then stops the pool by sending one [`Message::Shutdown`]
//! per worker through the shared [`WorkQueue`].
//!
//! Workers borrow the data they process. [`WorkerPool::run_batch`]
//! spawns them inside [`std::thread::scope`], which is what allows a
//! batch over disjoint `&mut [u8]` row views without handing the pool
//! any ownership of the buffer.

#![deny(rust_2018_idioms, rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod barrier;
pub use barrier::*;

mod batch;
pub use batch::*;

mod queue;
pub use queue::*;
