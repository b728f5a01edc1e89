// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Path confinement (spec §4.5.4, design note I5): defuses `..` and symlink
//! escapes by canonicalising and checking a prefix with a trailing
//! separator, never a plain string prefix.

use std::path::{Path, PathBuf};

use crate::error::{ServerError, ServerResult};

/// Rejects empty input, absolute paths, `.`/`..`/empty segments, and any
/// byte that is a control character, `:`, or `\`.
pub fn is_safe_relpath(path: &str) -> bool {
    if path.is_empty() {
        return false;
    }
    if path.starts_with('/') {
        return false;
    }
    if path.bytes().any(|b| b.is_ascii_control() || b == b':' || b == b'\\') {
        return false;
    }
    for segment in path.split('/') {
        if segment.is_empty() || segment == "." || segment == ".." {
            return false;
        }
    }
    true
}

/// Resolves `relpath` under `root`, confining the canonical result to be
/// `root` itself or a descendant of it. The path must already exist (this is
/// used for retrieval-style lookups where the target is expected on disk).
///
/// A syntactically unsafe `relpath` (e.g. containing `..`) is a client input
/// error (`400`, spec §7 `invalid_argument`); only a path that passes the
/// syntactic check but still resolves outside `root` after `realpath` (a
/// symlink escape) is `403` (spec §8 property 5).
pub fn confine_existing(root: &Path, relpath: &str) -> ServerResult<PathBuf> {
    if !is_safe_relpath(relpath) {
        return Err(ServerError::InvalidArgument(format!("unsafe path: {relpath}")));
    }
    let candidate = root.join(relpath);
    let canonical_root = root.canonicalize().map_err(ServerError::Io)?;
    let canonical = candidate.canonicalize().map_err(|_| ServerError::NotFound(relpath.to_string()))?;
    if is_confined(&canonical_root, &canonical) {
        Ok(canonical)
    } else {
        Err(ServerError::Forbidden(format!("{relpath} resolves outside root")))
    }
}

/// Confines a relpath that does not yet need to exist (e.g. an upload
/// destination directory about to be created).
pub fn confine_new(root: &Path, relpath: &str) -> ServerResult<PathBuf> {
    if !is_safe_relpath(relpath) {
        return Err(ServerError::InvalidArgument(format!("unsafe path: {relpath}")));
    }
    Ok(root.join(relpath))
}

fn is_confined(canonical_root: &Path, canonical_target: &Path) -> bool {
    if canonical_target == canonical_root {
        return true;
    }
    let mut root_str = canonical_root.to_string_lossy().into_owned();
    if !root_str.ends_with('/') {
        root_str.push('/');
    }
    canonical_target.to_string_lossy().starts_with(&root_str)
}
