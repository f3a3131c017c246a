use crate::config::SECONDS_PER_DAY;
use crate::error::{Result, SweepError};
use std::fs::{self, Metadata};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// A filesystem object as seen at visit time.
///
/// Entries are never cached: `from_path` stats the path without following
/// symlinks each time it is called.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub path: PathBuf,
    pub is_directory: bool,
    pub is_symlink: bool,
    /// Own size in bytes, always 0 for directories
    pub size_bytes: u64,
    /// Seconds since last modification, negative for mtimes in the future
    pub age_seconds: f64,
}

impl Entry {
    /// Stat `path` (symlink-unaware) and derive its age relative to `now`.
    pub fn from_path(path: &Path, now: SystemTime) -> Result<Self> {
        let metadata = fs::symlink_metadata(path).map_err(|source| SweepError::Metadata {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_metadata(path, &metadata, now)
    }

    pub fn from_metadata(path: &Path, metadata: &Metadata, now: SystemTime) -> Result<Self> {
        let modified = metadata.modified().map_err(|source| SweepError::Metadata {
            path: path.to_path_buf(),
            source,
        })?;
        let is_directory = metadata.is_dir();

        Ok(Self {
            path: path.to_path_buf(),
            is_directory,
            is_symlink: metadata.file_type().is_symlink(),
            size_bytes: if is_directory { 0 } else { metadata.len() },
            age_seconds: age_between(modified, now),
        })
    }

    /// Whole days since last modification.
    pub fn age_days(&self) -> i64 {
        (self.age_seconds / SECONDS_PER_DAY).floor() as i64
    }

    /// Whether a directory currently has no children. Queried on demand so
    /// that children removed earlier in the same pass are accounted for.
    pub fn is_empty(&self) -> Result<bool> {
        if !self.is_directory {
            return Ok(false);
        }
        let mut children =
            fs::read_dir(&self.path).map_err(|err| SweepError::from_io(&self.path, err))?;
        Ok(children.next().is_none())
    }
}

fn age_between(modified: SystemTime, now: SystemTime) -> f64 {
    match now.duration_since(modified) {
        Ok(elapsed) => elapsed.as_secs_f64(),
        Err(ahead) => -ahead.duration().as_secs_f64(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_age_is_negative_for_future_mtime() {
        let now = SystemTime::UNIX_EPOCH + Duration::from_secs(1_000);
        let later = now + Duration::from_secs(10);
        assert_eq!(age_between(later, now), -10.0);
        assert_eq!(age_between(now, later), 10.0);
    }
}
