// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The filesystem job queue engine (spec §4.2): init, submit, move, claim,
//! release, finalize, status. Every write-side operation uses
//! `std::fs::rename` as its atomicity primitive; the two-rename operations
//! (submit's copy pair, move, claim, release, finalize) revert the first
//! step on second-step failure, best-effort (spec §7 rollback policy).

use crate::error::{QueueError, QueueResult};
use crate::io::{FsQueueIo, QueueIo};
use pdfq_core::{job_path, JobId, Kind, Lock, State};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// A handle onto one root directory's job queue.
pub struct Queue<IO: QueueIo = FsQueueIo> {
    root: PathBuf,
    io: IO,
}

impl Queue<FsQueueIo> {
    /// Open a queue rooted at `root`, using the real filesystem.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_io(root, FsQueueIo)
    }
}

impl<IO: QueueIo> Queue<IO> {
    /// Open a queue rooted at `root`, with a caller-supplied I/O layer (tests
    /// use this to inject a fake that can fail specific renames).
    pub fn with_io(root: impl Into<PathBuf>, io: IO) -> Self {
        Self { root: root.into(), io }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub(crate) fn io(&self) -> &IO {
        &self.io
    }

    /// Create the four state directories if absent. Idempotent (spec §4.2).
    pub fn init(&self) -> QueueResult<()> {
        for state in State::ALL {
            self.io
                .create_dir_all(&self.root.join(state.dir_name()))
                .map_err(QueueError::Io)?;
        }
        Ok(())
    }

    /// Copy `pdf_src`/`meta_src` into the live PDF/metadata paths under
    /// `jobs` or `priority_jobs` (spec §4.2 `submit`). If the metadata copy
    /// fails, the PDF copy is unlinked.
    pub fn submit(
        &self,
        uuid: &JobId,
        pdf_src: &Path,
        meta_src: &Path,
        priority: bool,
    ) -> QueueResult<()> {
        if !self.io.exists(pdf_src) {
            return Err(QueueError::NotFound(format!(
                "pdf source not found: {}",
                pdf_src.display()
            )));
        }
        if !self.io.exists(meta_src) {
            return Err(QueueError::NotFound(format!(
                "metadata source not found: {}",
                meta_src.display()
            )));
        }

        let state = if priority { State::PriorityJobs } else { State::Jobs };
        let pdf_dst = job_path(&self.root, state, uuid, Kind::Pdf, Lock::Live);
        let meta_dst = job_path(&self.root, state, uuid, Kind::Metadata, Lock::Live);

        self.io.copy(pdf_src, &pdf_dst).map_err(QueueError::Io)?;

        if let Err(e) = self.io.copy(meta_src, &meta_dst) {
            if let Err(revert_err) = self.io.remove_file(&pdf_dst) {
                warn!(uuid = %uuid, error = %revert_err, "failed to revert pdf copy after metadata copy failure");
            }
            return Err(QueueError::Io(e));
        }

        debug!(uuid = %uuid, state = %state, "submitted job");
        Ok(())
    }

    /// Rename live PDF then live metadata from `from` to `to` (spec §4.2
    /// `move`). If the metadata rename fails, the PDF rename is reverted,
    /// best-effort.
    pub fn move_job(&self, uuid: &JobId, from: State, to: State) -> QueueResult<()> {
        let pdf_from = job_path(&self.root, from, uuid, Kind::Pdf, Lock::Live);
        let meta_from = job_path(&self.root, from, uuid, Kind::Metadata, Lock::Live);
        let pdf_to = job_path(&self.root, to, uuid, Kind::Pdf, Lock::Live);
        let meta_to = job_path(&self.root, to, uuid, Kind::Metadata, Lock::Live);

        if !self.io.exists(&pdf_from) || !self.io.exists(&meta_from) {
            return Err(QueueError::NotFound(format!(
                "job {uuid} not claimable in state {from}"
            )));
        }

        self.io.rename(&pdf_from, &pdf_to).map_err(QueueError::Io)?;

        if let Err(e) = self.io.rename(&meta_from, &meta_to) {
            if let Err(revert_err) = self.io.rename(&pdf_to, &pdf_from) {
                warn!(uuid = %uuid, error = %revert_err, "failed to revert pdf rename after move failure");
            }
            return Err(QueueError::Io(e));
        }

        debug!(uuid = %uuid, %from, %to, "moved job");
        Ok(())
    }

    /// Scan `priority_jobs` then `jobs` (or the reverse, per
    /// `prefer_priority`), atomically claiming the first claimable job found
    /// (spec §4.2.1). The PDF rename is the linearisation point: only one
    /// concurrent claimer can win it.
    pub fn claim_next(&self, prefer_priority: bool) -> QueueResult<(JobId, State)> {
        let order = if prefer_priority {
            [State::PriorityJobs, State::Jobs]
        } else {
            [State::Jobs, State::PriorityJobs]
        };

        for state in order {
            if let Some(uuid) = self.try_claim_in(state)? {
                return Ok((uuid, state));
            }
        }

        Err(QueueError::NotFound("no claimable job".into()))
    }

    fn try_claim_in(&self, state: State) -> QueueResult<Option<JobId>> {
        let dir = self.root.join(state.dir_name());
        let names = match self.io.read_dir(&dir) {
            Ok(n) => n,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(QueueError::Io(e)),
        };

        for name in names {
            let Some(uuid) = name.strip_suffix(".pdf.job").and_then(|u| JobId::parse(u).ok())
            else {
                continue;
            };

            let meta_live = job_path(&self.root, state, &uuid, Kind::Metadata, Lock::Live);
            if !self.io.exists(&meta_live) {
                continue;
            }

            let pdf_live = job_path(&self.root, state, &uuid, Kind::Pdf, Lock::Live);
            let pdf_locked = job_path(&self.root, state, &uuid, Kind::Pdf, Lock::Locked);

            if self.io.rename(&pdf_live, &pdf_locked).is_err() {
                // Lost the race to another claimer; keep scanning.
                continue;
            }

            let meta_locked = job_path(&self.root, state, &uuid, Kind::Metadata, Lock::Locked);
            if let Err(e) = self.io.rename(&meta_live, &meta_locked) {
                if let Err(revert_err) = self.io.rename(&pdf_locked, &pdf_live) {
                    warn!(uuid = %uuid, error = %revert_err, "failed to revert pdf lock after metadata lock failure");
                }
                debug!(uuid = %uuid, error = %e, "metadata lock failed, skipping");
                continue;
            }

            debug!(uuid = %uuid, %state, "claimed job");
            return Ok(Some(uuid));
        }

        Ok(None)
    }

    /// Rename locked → live for PDF then metadata (spec §4.2 `release`).
    pub fn release(&self, uuid: &JobId, state: State) -> QueueResult<()> {
        let pdf_locked = job_path(&self.root, state, uuid, Kind::Pdf, Lock::Locked);
        let pdf_live = job_path(&self.root, state, uuid, Kind::Pdf, Lock::Live);

        if !self.io.exists(&pdf_locked) {
            return Err(QueueError::NotFound(format!(
                "locked pdf not found for {uuid} in {state}"
            )));
        }

        self.io.rename(&pdf_locked, &pdf_live).map_err(QueueError::Io)?;

        let meta_locked = job_path(&self.root, state, uuid, Kind::Metadata, Lock::Locked);
        let meta_live = job_path(&self.root, state, uuid, Kind::Metadata, Lock::Live);
        if let Err(e) = self.io.rename(&meta_locked, &meta_live) {
            if let Err(revert_err) = self.io.rename(&pdf_live, &pdf_locked) {
                warn!(uuid = %uuid, error = %revert_err, "failed to revert pdf release after metadata release failure");
            }
            return Err(QueueError::Io(e));
        }

        debug!(uuid = %uuid, %state, "released job");
        Ok(())
    }

    /// Rename locked-form in `from` to live-form in `to` for PDF then
    /// metadata (spec §4.2 `finalize`).
    pub fn finalize(&self, uuid: &JobId, from: State, to: State) -> QueueResult<()> {
        let pdf_locked = job_path(&self.root, from, uuid, Kind::Pdf, Lock::Locked);
        let pdf_live_to = job_path(&self.root, to, uuid, Kind::Pdf, Lock::Live);

        if !self.io.exists(&pdf_locked) {
            return Err(QueueError::NotFound(format!(
                "locked pdf not found for {uuid} in {from}"
            )));
        }

        self.io
            .rename(&pdf_locked, &pdf_live_to)
            .map_err(QueueError::Io)?;

        let meta_locked = job_path(&self.root, from, uuid, Kind::Metadata, Lock::Locked);
        let meta_live_to = job_path(&self.root, to, uuid, Kind::Metadata, Lock::Live);
        if let Err(e) = self.io.rename(&meta_locked, &meta_live_to) {
            if let Err(revert_err) = self.io.rename(&pdf_live_to, &pdf_locked) {
                warn!(uuid = %uuid, error = %revert_err, "failed to revert pdf finalize after metadata finalize failure");
            }
            return Err(QueueError::Io(e));
        }

        debug!(uuid = %uuid, %from, %to, "finalized job");
        Ok(())
    }

    /// Probe, in the fixed order `priority_jobs, jobs, complete, error`, for
    /// the presence of the PDF (live then locked) in each state (spec §4.2
    /// `status`). The documented open question: a job racily moved between
    /// `priority_jobs` and `jobs` may be reported in the earlier-searched
    /// state for a brief window (spec §9) — this is intentional, not a bug.
    pub fn status(&self, uuid: &JobId) -> QueueResult<(State, bool)> {
        for state in State::STATUS_SEARCH_ORDER {
            let live = job_path(&self.root, state, uuid, Kind::Pdf, Lock::Live);
            if self.io.exists(&live) {
                return Ok((state, false));
            }
            let locked = job_path(&self.root, state, uuid, Kind::Pdf, Lock::Locked);
            if self.io.exists(&locked) {
                return Ok((state, true));
            }
        }
        Err(QueueError::NotFound(format!("job {uuid} not found")))
    }
}

#[cfg(test)]
#[path = "queue_tests.rs"]
mod tests;
