//! Reporting seam between the sweeper and whoever runs it.

use crate::entry::Entry;
use std::path::Path;
use tracing::{error, info, warn};

pub const DRY_RUN_NOTE: &str = concat!(
    "Note: dry_run option was enabled. No files were harmed in the making of this text.\n",
    "To actually delete run with the flag: --destroy"
);

/// Severity attached to a diagnostic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// Receives progress, decisions and diagnostics from a sweep.
///
/// All methods have empty defaults so an observer only implements what it needs.
pub trait SweepObserver {
    /// A trash root passed its preconditions and is about to be walked.
    fn exploring(&mut self, _root: &Path) {}

    /// An entry was found eligible; called only when verbose output is on.
    fn deletion(&mut self, _entry: &Entry, _destroy: bool) {}

    fn diagnostic(&mut self, _severity: Severity, _message: &str) {}
}

/// Prints the report to stdout and routes diagnostics through `tracing`.
#[derive(Debug, Default)]
pub struct ConsoleObserver;

impl ConsoleObserver {
    pub fn new() -> Self {
        Self
    }
}

impl SweepObserver for ConsoleObserver {
    fn exploring(&mut self, root: &Path) {
        println!("\n\nExploring: {}", root.display());
    }

    fn deletion(&mut self, entry: &Entry, destroy: bool) {
        println!("\n{}", decision_line(entry, destroy));
        if let Some(detail) = detail_line(entry) {
            println!("{}", detail);
        }
    }

    fn diagnostic(&mut self, severity: Severity, message: &str) {
        match severity {
            Severity::Info => info!("{}", message),
            Severity::Warning => warn!("{}", message),
            Severity::Error => error!("{}", message),
        }
    }
}

/// "Deleting: <path>" or "Not Deleting: <path>" depending on the run mode.
pub fn decision_line(entry: &Entry, destroy: bool) -> String {
    let tag = if destroy { "Deleting:" } else { "Not Deleting:" };
    format!("{} {}", tag, entry.path.display())
}

/// Size and age for non-directory entries.
pub fn detail_line(entry: &Entry) -> Option<String> {
    if entry.is_directory {
        return None;
    }
    Some(format!(
        "{} and {} days old",
        format_size(entry.size_bytes),
        entry.age_days()
    ))
}

/// Human-readable size using 1000-based units.
pub fn format_size(bytes: u64) -> String {
    humansize::format_size(bytes, humansize::DECIMAL)
}
