// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! pdfq-queue: the filesystem-resident job queue engine (spec §4.2).
//!
//! No locks, only atomic renames. See [`Queue`] for the full operation set.

mod error;
mod io;
mod queue;
mod stats;

pub use error::{QueueError, QueueResult};
pub use io::{FileStat, FsQueueIo, QueueIo};
pub use queue::Queue;
pub use stats::{StateStats, Stats};

#[cfg(test)]
pub(crate) use io::fake::FakeQueueIo;
