// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Filesystem operations behind a trait, so claim/release/finalize crash
//! scenarios (spec §7 rollback policy, §8 property 4) can be exercised with a
//! fake that injects rename failures deterministically, the same way
//! `CheckpointWriter`/`FsCheckpointWriter` abstract checkpoint I/O.

use std::fs;
use std::io;
use std::path::Path;
use std::time::SystemTime;

/// Metadata the stats pass needs about one file, without holding the file open.
#[derive(Debug, Clone, Copy)]
pub struct FileStat {
    pub len: u64,
    pub modified: SystemTime,
}

/// Filesystem operations used by the queue engine. Production code uses
/// [`FsQueueIo`]; tests substitute a fake that can fail the second rename of
/// a two-step operation to exercise the rollback path.
pub trait QueueIo: Send + Sync {
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;
    fn exists(&self, path: &Path) -> bool;
    fn copy(&self, from: &Path, to: &Path) -> io::Result<u64>;
    fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;
    fn remove_file(&self, path: &Path) -> io::Result<()>;
    fn read_dir(&self, path: &Path) -> io::Result<Vec<String>>;
    fn stat(&self, path: &Path) -> io::Result<FileStat>;
}

/// Production implementation: direct `std::fs` calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsQueueIo;

impl QueueIo for FsQueueIo {
    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn copy(&self, from: &Path, to: &Path) -> io::Result<u64> {
        fs::copy(from, to)
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        fs::rename(from, to)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(path)? {
            let entry = entry?;
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }
        Ok(names)
    }

    fn stat(&self, path: &Path) -> io::Result<FileStat> {
        let meta = fs::metadata(path)?;
        Ok(FileStat {
            len: meta.len(),
            modified: meta.modified()?,
        })
    }
}

#[cfg(test)]
pub(crate) mod fake {
    //! A fake [`QueueIo`] that delegates to the real filesystem but can be
    //! configured to fail a rename of a specific path once, for exercising
    //! the rollback path of two-rename operations (spec §7).
    use super::*;
    use std::collections::HashSet;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct FakeQueueIo {
        inner: FsQueueIo,
        fail_rename_from: Mutex<HashSet<std::path::PathBuf>>,
    }

    impl FakeQueueIo {
        pub fn new() -> Self {
            Self::default()
        }

        /// The next rename whose `from` matches `path` will fail with
        /// `ErrorKind::Other`, then the fault is cleared (fires once).
        pub fn fail_next_rename_from(&self, path: &Path) {
            self.fail_rename_from
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .insert(path.to_path_buf());
        }
    }

    impl QueueIo for FakeQueueIo {
        fn create_dir_all(&self, path: &Path) -> io::Result<()> {
            self.inner.create_dir_all(path)
        }

        fn exists(&self, path: &Path) -> bool {
            self.inner.exists(path)
        }

        fn copy(&self, from: &Path, to: &Path) -> io::Result<u64> {
            self.inner.copy(from, to)
        }

        fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
            let mut guard = self.fail_rename_from.lock().unwrap_or_else(|e| e.into_inner());
            if guard.remove(from) {
                return Err(io::Error::other("injected rename failure"));
            }
            drop(guard);
            self.inner.rename(from, to)
        }

        fn remove_file(&self, path: &Path) -> io::Result<()> {
            self.inner.remove_file(path)
        }

        fn read_dir(&self, path: &Path) -> io::Result<Vec<String>> {
            self.inner.read_dir(path)
        }

        fn stat(&self, path: &Path) -> io::Result<FileStat> {
            self.inner.stat(path)
        }
    }
}
