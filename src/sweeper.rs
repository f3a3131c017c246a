use crate::config::ThresholdConfig;
use crate::entry::Entry;
use crate::error::{Result, SweepError};
use crate::platform;
use crate::report::{format_size, Severity, SweepObserver};
use std::collections::HashSet;
use std::fs;
use std::io;
use std::ops::AddAssign;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::{debug, info};
use walkdir::WalkDir;

/// What to do with a visited entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Keep,
    /// Stale file, or large file past the large-file age
    Delete,
    /// Stale directory with no children left
    PruneDirectory,
}

/// Classify an entry against the thresholds.
///
/// Directories are only ever removed once empty; a stale directory that still
/// has children is kept. Emptiness is only queried for stale directories.
pub fn classify(config: &ThresholdConfig, entry: &Entry) -> Result<Decision> {
    if entry.is_directory {
        if config.is_stale(entry.age_seconds) && entry.is_empty()? {
            return Ok(Decision::PruneDirectory);
        }
        return Ok(Decision::Keep);
    }

    if config.is_stale(entry.age_seconds)
        || config.is_large_and_aging(entry.size_bytes, entry.age_seconds)
    {
        Ok(Decision::Delete)
    } else {
        Ok(Decision::Keep)
    }
}

/// Counters accumulated over one or more trash roots
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SweepResult {
    pub total_count: u64,
    pub deleted_count: u64,
    pub total_bytes: u64,
    pub deleted_bytes: u64,
    pub pruned_dirs: u64,
    pub errors: Vec<String>,
}

impl SweepResult {
    pub fn remaining_count(&self) -> u64 {
        self.total_count.saturating_sub(self.deleted_count)
    }

    pub fn remaining_bytes(&self) -> u64 {
        self.total_bytes.saturating_sub(self.deleted_bytes)
    }

    pub fn is_empty(&self) -> bool {
        self.deleted_count == 0 && self.pruned_dirs == 0
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn merge(&mut self, other: SweepResult) {
        self.total_count += other.total_count;
        self.deleted_count += other.deleted_count;
        self.total_bytes += other.total_bytes;
        self.deleted_bytes += other.deleted_bytes;
        self.pruned_dirs += other.pruned_dirs;
        self.errors.extend(other.errors);
    }

    /// The summary lines; the size is omitted when it is zero and the error
    /// count only appears when something was skipped.
    pub fn display_status(&self) -> String {
        let mut status = vec![
            summary_line(self.deleted_count, "files processed", self.deleted_bytes),
            summary_line(self.remaining_count(), "files remaining", self.remaining_bytes()),
        ];

        if self.has_errors() {
            status.push(format!("Errors encountered: {}", self.errors.len()));
        }

        status.join("\n")
    }

    fn record_error(&mut self, observer: &mut dyn SweepObserver, err: &SweepError) {
        let severity = match err {
            SweepError::DeleteFailed { .. } => Severity::Error,
            _ => Severity::Warning,
        };
        let message = err.to_string();
        observer.diagnostic(severity, &message);
        self.errors.push(message);
    }
}

impl AddAssign for SweepResult {
    fn add_assign(&mut self, other: SweepResult) {
        self.merge(other);
    }
}

fn summary_line(count: u64, label: &str, bytes: u64) -> String {
    if bytes == 0 {
        format!("{} {}", count, label)
    } else {
        format!("{} {} = {}", count, label, format_size(bytes))
    }
}

/// Walks trash roots and removes (or, in a dry run, counts) eligible entries.
#[derive(Debug, Clone)]
pub struct Sweeper {
    config: ThresholdConfig,
    reference_time: Option<SystemTime>,
}

impl Sweeper {
    pub fn new(config: ThresholdConfig) -> Self {
        Self {
            config,
            reference_time: None,
        }
    }

    /// Measure ages against a fixed instant instead of the wall clock.
    pub fn with_reference_time(mut self, now: SystemTime) -> Self {
        self.reference_time = Some(now);
        self
    }

    fn now(&self) -> SystemTime {
        self.reference_time.unwrap_or_else(SystemTime::now)
    }

    /// Check that a root exists, is a directory and is writable.
    pub fn check_root(&self, root: &Path) -> Result<()> {
        let metadata = fs::metadata(root).map_err(|err| SweepError::from_io(root, err))?;
        if !metadata.is_dir() {
            return Err(SweepError::NotFound {
                path: root.to_path_buf(),
            });
        }
        if !platform::is_writable(root) {
            return Err(SweepError::AccessDenied {
                path: root.to_path_buf(),
            });
        }
        Ok(())
    }

    /// Sweep every root in order, skipping duplicates and roots that fail
    /// their preconditions, and aggregate the counters.
    pub fn sweep_all<I, P>(&self, roots: I, observer: &mut dyn SweepObserver) -> SweepResult
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let mut seen = HashSet::new();
        let mut total = SweepResult::default();

        for root in roots {
            let root: PathBuf = root.into();
            if !seen.insert(root.clone()) {
                observer.diagnostic(
                    Severity::Info,
                    &format!("Skipping duplicate root: {}", root.display()),
                );
                continue;
            }

            if let Err(err) = self.check_root(&root) {
                total.record_error(observer, &err);
                continue;
            }

            observer.exploring(&root);
            total += self.sweep(&root, observer);
        }

        total
    }

    /// Walk one root depth-first, children before their parent directory.
    ///
    /// The root itself is never classified. Symlinks are skipped without
    /// being measured or followed.
    pub fn sweep(&self, root: &Path, observer: &mut dyn SweepObserver) -> SweepResult {
        info!("Sweeping trash root: {}", root.display());
        let mut result = SweepResult::default();

        let walker = WalkDir::new(root)
            .min_depth(1)
            .follow_links(false)
            .contents_first(true);

        for item in walker {
            let dent = match item {
                Ok(dent) => dent,
                Err(err) => {
                    let path = err.path().unwrap_or(root).to_path_buf();
                    let message = err.to_string();
                    let err = match err.into_io_error() {
                        Some(io_err) => SweepError::from_io(path, io_err),
                        None => SweepError::Metadata {
                            path,
                            source: io::Error::other(message),
                        },
                    };
                    result.record_error(observer, &err);
                    continue;
                }
            };

            if dent.path_is_symlink() {
                debug!("Skipping symlink: {}", dent.path().display());
                continue;
            }

            match Entry::from_path(dent.path(), self.now()) {
                Ok(entry) if entry.is_symlink => {
                    debug!("Skipping symlink: {}", entry.path.display());
                }
                Ok(entry) => self.visit(&entry, &mut result, observer),
                Err(err) => result.record_error(observer, &err),
            }
        }

        debug!(
            "Swept {}: {} of {} entries eligible, {} bytes",
            root.display(),
            result.deleted_count,
            result.total_count,
            result.deleted_bytes
        );
        result
    }

    fn visit(&self, entry: &Entry, result: &mut SweepResult, observer: &mut dyn SweepObserver) {
        result.total_count += 1;
        result.total_bytes += entry.size_bytes;

        match classify(&self.config, entry) {
            Ok(Decision::Keep) => {}
            Ok(Decision::PruneDirectory) => {
                if self.remove(entry, result, observer) {
                    result.pruned_dirs += 1;
                }
            }
            Ok(Decision::Delete) => {
                if self.remove(entry, result, observer) {
                    result.deleted_count += 1;
                    result.deleted_bytes += entry.size_bytes;
                }
            }
            Err(err) => result.record_error(observer, &err),
        }
    }

    /// Report and, in destroy mode, remove an eligible entry. Returns whether
    /// the entry counts as deleted.
    fn remove(
        &self,
        entry: &Entry,
        result: &mut SweepResult,
        observer: &mut dyn SweepObserver,
    ) -> bool {
        if self.config.verbose {
            observer.deletion(entry, self.config.destroy);
        }

        if !self.config.destroy {
            debug!("[DRY RUN] Would delete: {}", entry.path.display());
            return true;
        }

        // Directories reach here only when empty, so a plain remove_dir suffices.
        let removed = if entry.is_directory {
            fs::remove_dir(&entry.path)
        } else {
            fs::remove_file(&entry.path)
        };

        match removed {
            Ok(()) => {
                debug!("Deleted: {}", entry.path.display());
                true
            }
            Err(source) => {
                let err = SweepError::DeleteFailed {
                    path: entry.path.clone(),
                    source,
                };
                result.record_error(observer, &err);
                false
            }
        }
    }
}
