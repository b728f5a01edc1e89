// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Canonical mapping from `(root, state, uuid, kind, locked?)` to an on-disk
//! path (spec §4.1). Pure; no I/O here.

use crate::error::CoreError;
use crate::state::{Kind, State};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Maximum length of a job uuid (spec §3).
pub const MAX_UUID_LEN: usize = 128;

crate::define_id! {
    /// A job's identifier: ASCII alphanumerics plus `.`, `_`, `-`, length ≤128
    /// (spec §3). Construct via [`JobId::parse`] to enforce the charset;
    /// the `new`/`From` impls from [`crate::define_id`] do not validate and
    /// exist for call sites that already hold a trusted uuid (e.g. one this
    /// process just generated).
    pub struct JobId;
}

impl JobId {
    /// Validate and wrap a caller-supplied uuid string (spec invariant I4:
    /// no path separators, no `..`, no control characters, bounded length).
    pub fn parse(s: &str) -> Result<JobId, CoreError> {
        if s.is_empty() {
            return Err(CoreError::InvalidArgument("uuid must not be empty".into()));
        }
        if s.len() > MAX_UUID_LEN {
            return Err(CoreError::InvalidArgument(format!(
                "uuid exceeds {MAX_UUID_LEN} bytes"
            )));
        }
        if !s
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'.' | b'_' | b'-'))
        {
            return Err(CoreError::InvalidArgument(
                "uuid contains characters outside [A-Za-z0-9._-]".into(),
            ));
        }
        // The charset check above already excludes '/', '\\', and control
        // bytes, but reject a literal ".." segment explicitly since it is
        // the one path-traversal token expressible purely in '.' characters.
        if s == "." || s == ".." || s.split('.').any(|seg| seg == "..") {
            return Err(CoreError::InvalidArgument(
                "uuid must not contain a '..' segment".into(),
            ));
        }
        Ok(JobId(s.to_string()))
    }
}

/// Whether a path should be constructed in its live or `.lock`-suffixed form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lock {
    Live,
    Locked,
}

impl Lock {
    fn suffix(self) -> &'static str {
        match self {
            Lock::Live => "",
            Lock::Locked => ".lock",
        }
    }
}

/// Build the absolute path for `(root, state, uuid, kind, lock)` (spec §4.1).
///
/// Fails with [`CoreError::InvalidArgument`] if `uuid` fails [`JobId::parse`];
/// state and kind are already-validated enums so they cannot fail here.
pub fn job_path(root: &Path, state: State, uuid: &JobId, kind: Kind, lock: Lock) -> PathBuf {
    let filename = format!("{}.{}.job{}", uuid.as_str(), kind.extension(), lock.suffix());
    root.join(state.dir_name()).join(filename)
}

/// Parse a filename of the form `<uuid>.<ext>.job[.lock]` back into its
/// `(uuid, kind, lock)` parts, used by `claim_next` and `collect_stats` when
/// walking a directory. Returns `None` for filenames that don't match any
/// known kind/suffix combination (directory entries the queue does not own).
pub fn parse_filename(name: &str) -> Option<(JobId, Kind, Lock)> {
    let (lock, base) = match name.strip_suffix(".lock") {
        Some(base) => (Lock::Locked, base),
        None => (Lock::Live, name),
    };
    for kind in [Kind::Pdf, Kind::Metadata, Kind::Report] {
        let suffix = format!(".{}.job", kind.extension());
        if let Some(uuid) = base.strip_suffix(&suffix) {
            if let Ok(id) = JobId::parse(uuid) {
                return Some((id, kind, lock));
            }
        }
    }
    None
}

impl fmt::Display for Lock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lock::Live => write!(f, "live"),
            Lock::Locked => write!(f, "locked"),
        }
    }
}
