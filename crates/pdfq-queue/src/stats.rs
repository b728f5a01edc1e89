// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `collect_stats` (spec §4.2): a best-effort single walk of all four state
//! directories, classifying each entry by suffix and aggregating byte totals,
//! orphan counts, and oldest/newest modification times.

use crate::error::{QueueError, QueueResult};
use crate::io::QueueIo;
use crate::queue::Queue;
use pdfq_core::{parse_filename, Kind, Lock, State};
use serde::Serialize;
use std::collections::HashMap;
use std::time::SystemTime;

/// Counts for one state directory.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct StateStats {
    pub live_pdf: u64,
    pub live_metadata: u64,
    pub live_report: u64,
    pub locked_pdf: u64,
    pub locked_metadata: u64,
    pub locked_report: u64,
    pub orphans: u64,
    pub bytes: u64,
}

impl StateStats {
    pub fn locked(&self) -> u64 {
        // A job is "locked" in a state iff both locked pdf and locked
        // metadata exist (spec I2); approximate per-file locked count as the
        // number of locked pdf entries, since a locked pdf with no locked
        // metadata is the transient state counted separately below via the
        // caller's total_locked aggregation (see `Stats::totals`).
        self.locked_pdf
    }
}

/// Aggregate totals plus a breakdown per state (spec §6 metrics JSON shape).
#[derive(Debug, Clone, Default, Serialize)]
pub struct Stats {
    pub jobs: StateStats,
    pub priority: StateStats,
    pub complete: StateStats,
    pub error: StateStats,
    pub total_files: u64,
    pub total_locked: u64,
    pub total_orphans: u64,
    pub total_bytes: u64,
    #[serde(with = "time_opt")]
    pub oldest_mtime: Option<SystemTime>,
    #[serde(with = "time_opt")]
    pub newest_mtime: Option<SystemTime>,
}

impl Stats {
    fn state_mut(&mut self, state: State) -> &mut StateStats {
        match state {
            State::Jobs => &mut self.jobs,
            State::PriorityJobs => &mut self.priority,
            State::Complete => &mut self.complete,
            State::Error => &mut self.error,
        }
    }

    pub fn state(&self, state: State) -> &StateStats {
        match state {
            State::Jobs => &self.jobs,
            State::PriorityJobs => &self.priority,
            State::Complete => &self.complete,
            State::Error => &self.error,
        }
    }
}

mod time_opt {
    use serde::Serializer;
    use std::time::SystemTime;

    pub fn serialize<S: Serializer>(v: &Option<SystemTime>, s: S) -> Result<S::Ok, S::Error> {
        match v {
            Some(t) => {
                let secs = t
                    .duration_since(SystemTime::UNIX_EPOCH)
                    .map(|d| d.as_secs())
                    .unwrap_or(0);
                s.serialize_some(&secs)
            }
            None => s.serialize_none(),
        }
    }
}

impl<IO: QueueIo> Queue<IO> {
    /// Walk all four state directories once, classifying each entry by
    /// suffix. Best-effort: concurrent mutation may cause slight miscounts
    /// but must not fail the call unless a state directory itself is
    /// unreadable for a reason other than not existing yet.
    pub fn collect_stats(&self) -> QueueResult<Stats> {
        let mut stats = Stats::default();

        for state in State::ALL {
            let dir = self.root().join(state.dir_name());
            let names = match self.io_read_dir(&dir) {
                Ok(n) => n,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
                Err(e) => return Err(QueueError::Io(e)),
            };

            // uuid -> (live_pdf, live_metadata) presence, for orphan detection.
            let mut live_pdf_seen: HashMap<String, bool> = HashMap::new();
            let mut live_meta_seen: HashMap<String, bool> = HashMap::new();

            for name in &names {
                let Some((uuid, kind, lock)) = parse_filename(name) else {
                    continue;
                };
                let path = dir.join(name);
                let file_stat = self.io_stat(&path).ok();

                let entry = stats.state_mut(state);
                match (kind, lock) {
                    (Kind::Pdf, Lock::Live) => {
                        entry.live_pdf += 1;
                        live_pdf_seen.insert(uuid.as_str().to_string(), true);
                    }
                    (Kind::Metadata, Lock::Live) => {
                        entry.live_metadata += 1;
                        live_meta_seen.insert(uuid.as_str().to_string(), true);
                    }
                    (Kind::Report, Lock::Live) => entry.live_report += 1,
                    (Kind::Pdf, Lock::Locked) => entry.locked_pdf += 1,
                    (Kind::Metadata, Lock::Locked) => entry.locked_metadata += 1,
                    (Kind::Report, Lock::Locked) => entry.locked_report += 1,
                }

                if let Some(fs) = file_stat {
                    entry.bytes += fs.len;
                    stats.total_bytes += fs.len;
                    stats.oldest_mtime = Some(match stats.oldest_mtime {
                        Some(cur) if cur <= fs.modified => cur,
                        _ => fs.modified,
                    });
                    stats.newest_mtime = Some(match stats.newest_mtime {
                        Some(cur) if cur >= fs.modified => cur,
                        _ => fs.modified,
                    });
                }
                stats.total_files += 1;
            }

            let orphan_pdfs = live_pdf_seen
                .keys()
                .filter(|u| !live_meta_seen.contains_key(*u))
                .count() as u64;
            let orphan_metas = live_meta_seen
                .keys()
                .filter(|u| !live_pdf_seen.contains_key(*u))
                .count() as u64;
            let orphans = orphan_pdfs + orphan_metas;
            stats.state_mut(state).orphans = orphans;
            stats.total_orphans += orphans;
            stats.total_locked += stats.state(state).locked_pdf;
        }

        Ok(stats)
    }

    fn io_read_dir(&self, path: &std::path::Path) -> std::io::Result<Vec<String>> {
        self.io().read_dir(path)
    }

    fn io_stat(&self, path: &std::path::Path) -> std::io::Result<crate::io::FileStat> {
        self.io().stat(path)
    }
}

#[cfg(test)]
#[path = "stats_tests.rs"]
mod tests;
