use std::fs;
use std::io;
use std::path::Path;

use tracing::{debug, trace};

use super::paths::PathSet;
use super::stats::UsageStats;
use crate::{QuotaError, Result};

/// Synchronous, fail-fast usage walker.
///
/// Symlinks are never followed: every entry is counted by its own `lstat`
/// size. Anything that vanishes between listing and lookup counts as zero.
/// Any other I/O failure aborts the walk.
#[derive(Debug, Default)]
pub struct UsageWalker {
    stats: UsageStats,
}

impl UsageWalker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> &UsageStats {
        &self.stats
    }

    /// Bytes used by a single root
    pub fn usage(&mut self, path: &Path, is_file: bool) -> Result<u64> {
        let mut total = 0;
        if is_file {
            self.file_usage(path, &mut total)?;
        } else {
            self.dir_usage(path, &mut total)?;
        }
        Ok(total)
    }

    fn file_usage(&mut self, path: &Path, total: &mut u64) -> Result<()> {
        match fs::symlink_metadata(path) {
            Ok(meta) => {
                self.add_file(meta.len(), total);
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                trace!(path = %path.display(), "mailbox file does not exist");
                self.stats.vanished += 1;
                Ok(())
            }
            Err(source) => Err(QuotaError::Stat {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    fn dir_usage(&mut self, dir: &Path, total: &mut u64) -> Result<()> {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                trace!(path = %dir.display(), "directory does not exist");
                self.stats.vanished += 1;
                return Ok(());
            }
            Err(source) => {
                return Err(QuotaError::OpenDir {
                    path: dir.to_path_buf(),
                    source,
                });
            }
        };
        self.stats.dirs += 1;

        // `read_dir` never yields `.` or `..`. The handle is closed when
        // `entries` is dropped, including on early return.
        for entry in entries {
            let entry = entry.map_err(|source| QuotaError::ReadDir {
                path: dir.to_path_buf(),
                source,
            })?;
            let path = entry.path();

            let meta = match fs::symlink_metadata(&path) {
                Ok(meta) => meta,
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    trace!(path = %path.display(), "entry vanished during walk");
                    self.stats.vanished += 1;
                    continue;
                }
                Err(source) => return Err(QuotaError::Stat { path, source }),
            };

            if meta.is_dir() {
                self.dir_usage(&path, total)?;
            } else {
                self.add_file(meta.len(), total);
            }
        }

        Ok(())
    }

    fn add_file(&mut self, size: u64, total: &mut u64) {
        *total += size;
        self.stats.files += 1;
        self.stats.bytes += size;
    }
}

/// Sum the usage of every root in the set.
///
/// Stops at the first error; a partial total is never returned.
pub fn compute_usage(paths: &PathSet) -> Result<u64> {
    let mut walker = UsageWalker::new();
    compute_usage_with(&mut walker, paths)
}

/// Like [`compute_usage`], reusing a caller-owned walker so its statistics
/// stay available afterwards
pub fn compute_usage_with(walker: &mut UsageWalker, paths: &PathSet) -> Result<u64> {
    let mut total = 0u64;
    for entry in paths {
        let bytes = walker.usage(&entry.path, entry.is_file)?;
        debug!(
            path = %entry.path.display(),
            is_file = entry.is_file,
            bytes,
            "counted quota root path"
        );
        total += bytes;
    }
    Ok(total)
}
