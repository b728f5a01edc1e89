// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job state and artifact kind — the two axes of the on-disk path model
//! (spec §3, §4.1).

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the four directories a job can live under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum State {
    Jobs,
    PriorityJobs,
    Complete,
    Error,
}

impl State {
    /// The four states in a fixed iteration order, used by `status` (spec §4.2:
    /// priority_jobs, then jobs, then complete, then error).
    pub const STATUS_SEARCH_ORDER: [State; 4] =
        [State::PriorityJobs, State::Jobs, State::Complete, State::Error];

    /// All four states, used by `collect_stats` (order does not matter there).
    pub const ALL: [State; 4] = [State::Jobs, State::PriorityJobs, State::Complete, State::Error];

    /// Fixed on-disk directory name for this state.
    pub fn dir_name(self) -> &'static str {
        match self {
            State::Jobs => "jobs",
            State::PriorityJobs => "priority_jobs",
            State::Complete => "complete",
            State::Error => "error",
        }
    }

    /// A state is non-locked (suitable as `from`/`to` for `move`) if it is not
    /// a terminal state reached only by `finalize`. The spec does not in fact
    /// forbid `move` into complete/error, but `move` is specified as acting
    /// between "non-locked states", which all four satisfy identically here —
    /// lockedness is a per-file suffix, not a per-state property. Kept as a
    /// named predicate so callers (the HTTP `/move` handler) have one place to
    /// express "this is a queue-to-queue move, not a terminal transition".
    pub fn is_queue_state(self) -> bool {
        matches!(self, State::Jobs | State::PriorityJobs)
    }

    pub fn parse(s: &str) -> Result<State, CoreError> {
        match s {
            "jobs" => Ok(State::Jobs),
            "priority_jobs" => Ok(State::PriorityJobs),
            "complete" => Ok(State::Complete),
            "error" => Ok(State::Error),
            other => Err(CoreError::InvalidArgument(format!("unknown state: {other}"))),
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.dir_name())
    }
}

/// One of the three artifact kinds co-located under a job's state directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    Pdf,
    Metadata,
    Report,
}

impl Kind {
    /// The file-extension portion of the live filename, before the `.job[.lock]` suffix.
    pub fn extension(self) -> &'static str {
        match self {
            Kind::Pdf => "pdf",
            Kind::Metadata => "metadata",
            Kind::Report => "report.html",
        }
    }

    pub fn parse(s: &str) -> Result<Kind, CoreError> {
        match s {
            "pdf" => Ok(Kind::Pdf),
            "metadata" => Ok(Kind::Metadata),
            "report" => Ok(Kind::Report),
            other => Err(CoreError::InvalidArgument(format!("unknown kind: {other}"))),
        }
    }
}
