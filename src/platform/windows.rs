use crate::error::{Result, SweepError};
use crate::report::SweepObserver;
use std::fs;
use std::path::{Path, PathBuf};

/// Trash discovery (not supported on Windows)
///
/// The Recycle Bin does not follow the freedesktop Trash layout, so there are
/// no roots to discover. Explicit `--root` directories still work.
pub fn discover_trash_roots(_observer: &mut dyn SweepObserver) -> Result<Vec<PathBuf>> {
    Err(SweepError::NotSupported(
        "trash folder discovery is only available on Unix-like systems".to_string(),
    ))
}

pub fn is_writable(path: &Path) -> bool {
    fs::metadata(path)
        .map(|m| !m.permissions().readonly())
        .unwrap_or(false)
}
