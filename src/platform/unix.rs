//! Trash folder discovery from the account and mount tables.

use crate::error::Result;
use crate::report::{Severity, SweepObserver};
use std::ffi::CString;
use std::fs;
use std::os::unix::ffi::OsStrExt;
use std::path::{Path, PathBuf};
use tracing::debug;

const USER_TRASH: &str = ".local/share/Trash/files";
const LOCAL_TRASH: &str = "Trash/files";
const MOUNT_TRASH_PREFIX: &str = ".Trash-";
const SKIPPED_MOUNTS: &[&str] = &["/sys", "/proc"];

/// Locates per-user and per-mount trash folders.
#[derive(Debug, Clone)]
pub struct TrashLocator {
    mount_tables: Vec<PathBuf>,
    passwd: PathBuf,
    include_current_user: bool,
}

impl Default for TrashLocator {
    fn default() -> Self {
        Self {
            mount_tables: vec![PathBuf::from("/etc/mtab"), PathBuf::from("/proc/mounts")],
            passwd: PathBuf::from("/etc/passwd"),
            include_current_user: true,
        }
    }
}

impl TrashLocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read mount points from `path` only, with no fallback table.
    pub fn with_mount_table(mut self, path: impl Into<PathBuf>) -> Self {
        self.mount_tables = vec![path.into()];
        self
    }

    pub fn with_passwd(mut self, path: impl Into<PathBuf>) -> Self {
        self.passwd = path.into();
        self
    }

    /// Do not append the invoking user's trash folder.
    pub fn without_current_user(mut self) -> Self {
        self.include_current_user = false;
        self
    }

    /// User trash folders first, then mount trash folders.
    pub fn locate(&self, observer: &mut dyn SweepObserver) -> Vec<PathBuf> {
        let mut roots = self.user_trash_dirs(observer);
        roots.extend(self.mount_trash_dirs(observer));
        roots
    }

    pub fn user_trash_dirs(&self, observer: &mut dyn SweepObserver) -> Vec<PathBuf> {
        let mut dirs = match fs::read_to_string(&self.passwd) {
            Ok(contents) => parse_passwd_homes(&contents)
                .into_iter()
                .map(|home| home.join(USER_TRASH))
                .collect(),
            Err(err) => {
                observer.diagnostic(
                    Severity::Warning,
                    &format!("Could not read {}: {}", self.passwd.display(), err),
                );
                Vec::new()
            }
        };

        if self.include_current_user {
            if let Some(data_dir) = dirs::data_local_dir() {
                let own = data_dir.join(LOCAL_TRASH);
                if !dirs.contains(&own) {
                    dirs.push(own);
                }
            }
        }
        dirs
    }

    pub fn mount_trash_dirs(&self, observer: &mut dyn SweepObserver) -> Vec<PathBuf> {
        let Some(contents) = self.read_mount_table(observer) else {
            return Vec::new();
        };

        let mut found = Vec::new();
        for mount in parse_mount_points(&contents) {
            if SKIPPED_MOUNTS.iter().any(|skip| mount.starts_with(skip)) {
                continue;
            }
            let entries = match fs::read_dir(&mount) {
                Ok(entries) => entries,
                Err(err) => {
                    observer.diagnostic(
                        Severity::Warning,
                        &format!("Could not access {}: {}", mount.display(), err),
                    );
                    continue;
                }
            };
            for entry in entries.flatten() {
                if entry.file_name().as_bytes().starts_with(MOUNT_TRASH_PREFIX.as_bytes()) {
                    found.push(entry.path());
                }
            }
        }
        found
    }

    fn read_mount_table(&self, observer: &mut dyn SweepObserver) -> Option<String> {
        for table in &self.mount_tables {
            match fs::read_to_string(table) {
                Ok(contents) => return Some(contents),
                Err(err) => debug!("Could not read {}: {}", table.display(), err),
            }
        }
        observer.diagnostic(
            Severity::Warning,
            "No readable mount table, skipping mount trash folders",
        );
        None
    }
}

/// Discover trash roots with the default system tables.
pub fn discover_trash_roots(observer: &mut dyn SweepObserver) -> Result<Vec<PathBuf>> {
    Ok(TrashLocator::new().locate(observer))
}

/// Home directories of root and regular accounts (uid 0, or 1000..65534).
pub fn parse_passwd_homes(contents: &str) -> Vec<PathBuf> {
    contents
        .lines()
        .filter_map(|line| {
            let fields: Vec<&str> = line.trim().split(':').collect();
            if fields.len() < 7 {
                return None;
            }
            let uid: u32 = fields[2].parse().ok()?;
            if uid == 0 || (1000..65534).contains(&uid) {
                Some(PathBuf::from(fields[5]))
            } else {
                None
            }
        })
        .collect()
}

/// Mount points (second column) of an fstab-format table.
pub fn parse_mount_points(contents: &str) -> Vec<PathBuf> {
    contents
        .lines()
        .filter_map(|line| line.split_whitespace().nth(1))
        .map(|field| PathBuf::from(unescape_mount_field(field)))
        .collect()
}

// Mount tables encode space, tab, newline and backslash as \ooo octal escapes.
fn unescape_mount_field(field: &str) -> String {
    let bytes = field.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'\\' && i + 3 < bytes.len() {
            let digits = &bytes[i + 1..i + 4];
            if digits.iter().all(|d| (b'0'..=b'7').contains(d)) {
                let value = digits.iter().fold(0u16, |acc, d| acc * 8 + u16::from(d - b'0'));
                if let Ok(value) = u8::try_from(value) {
                    out.push(value);
                    i += 4;
                    continue;
                }
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

/// Whether the current process may write into `path`, per access(2).
pub fn is_writable(path: &Path) -> bool {
    let Ok(c_path) = CString::new(path.as_os_str().as_bytes()) else {
        return false;
    };
    unsafe { libc::access(c_path.as_ptr(), libc::W_OK) == 0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_passwd_homes_filters_system_accounts() {
        let passwd = "\
root:x:0:0:root:/root:/bin/bash
daemon:x:1:1:daemon:/usr/sbin:/usr/sbin/nologin
alice:x:1000:1000:Alice,,,:/home/alice:/bin/bash
nobody:x:65534:65534:nobody:/nonexistent:/usr/sbin/nologin
broken line
bob:x:1001:1001::/home/bob:/bin/zsh
";
        assert_eq!(
            parse_passwd_homes(passwd),
            vec![
                PathBuf::from("/root"),
                PathBuf::from("/home/alice"),
                PathBuf::from("/home/bob"),
            ]
        );
    }

    #[test]
    fn test_parse_mount_points_unescapes() {
        let mtab = "\
/dev/sda1 / ext4 rw,relatime 0 0
sysfs /sys sysfs rw 0 0
/dev/sdb1 /media/usb\\040drive vfat rw 0 0
";
        assert_eq!(
            parse_mount_points(mtab),
            vec![
                PathBuf::from("/"),
                PathBuf::from("/sys"),
                PathBuf::from("/media/usb drive"),
            ]
        );
    }

    #[test]
    fn test_unescape_leaves_plain_backslash() {
        assert_eq!(unescape_mount_field("a\\b"), "a\\b");
        assert_eq!(unescape_mount_field("tail\\04"), "tail\\04");
    }
}
