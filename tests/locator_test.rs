#![cfg(unix)]

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use trash_sweep::platform::TrashLocator;
use trash_sweep::{Severity, SweepObserver};

#[derive(Default)]
struct Diagnostics(Vec<(Severity, String)>);

impl SweepObserver for Diagnostics {
    fn diagnostic(&mut self, severity: Severity, message: &str) {
        self.0.push((severity, message.to_string()));
    }
}

#[test]
fn test_locate_orders_user_then_mount_trash() {
    let temp_dir = TempDir::new().unwrap();
    let base = temp_dir.path();

    let mount = base.join("mnt");
    fs::create_dir_all(mount.join(".Trash-1000")).unwrap();
    fs::create_dir_all(mount.join(".Trash-0")).unwrap();
    fs::create_dir_all(mount.join("Trash")).unwrap();
    fs::write(mount.join("notes.txt"), b"keep").unwrap();

    let unreadable = base.join("gone");

    let mtab = base.join("mtab");
    fs::write(
        &mtab,
        format!(
            "/dev/sdb1 {} ext4 rw 0 0\nsysfs /sys sysfs rw 0 0\n/dev/sdc1 {} ext4 rw 0 0\n",
            mount.display(),
            unreadable.display()
        ),
    )
    .unwrap();

    let passwd = base.join("passwd");
    fs::write(
        &passwd,
        "root:x:0:0:root:/root:/bin/bash\n\
         daemon:x:1:1:daemon:/usr/sbin:/usr/sbin/nologin\n\
         alice:x:1000:1000::/home/alice:/bin/bash\n",
    )
    .unwrap();

    let locator = TrashLocator::new()
        .with_mount_table(&mtab)
        .with_passwd(&passwd)
        .without_current_user();
    let mut diagnostics = Diagnostics::default();
    let roots = locator.locate(&mut diagnostics);

    assert_eq!(roots.len(), 4);
    assert_eq!(roots[0], PathBuf::from("/root/.local/share/Trash/files"));
    assert_eq!(roots[1], PathBuf::from("/home/alice/.local/share/Trash/files"));

    let mut mount_roots = roots[2..].to_vec();
    mount_roots.sort();
    assert_eq!(
        mount_roots,
        vec![mount.join(".Trash-0"), mount.join(".Trash-1000")]
    );

    assert_eq!(diagnostics.0.len(), 1);
    assert_eq!(diagnostics.0[0].0, Severity::Warning);
    assert!(diagnostics.0[0].1.contains("Could not access"));
}

#[test]
fn test_missing_tables_yield_no_roots() {
    let temp_dir = TempDir::new().unwrap();
    let locator = TrashLocator::new()
        .with_mount_table(temp_dir.path().join("no-mtab"))
        .with_passwd(temp_dir.path().join("no-passwd"))
        .without_current_user();

    let mut diagnostics = Diagnostics::default();
    assert!(locator.locate(&mut diagnostics).is_empty());
    assert_eq!(diagnostics.0.len(), 2);
}

#[cfg(target_os = "linux")]
#[test]
fn test_current_user_trash_follows_data_dir() {
    // Only this test may touch XDG_DATA_HOME.
    let temp_dir = TempDir::new().unwrap();
    let Some(home) = dirs::home_dir() else {
        return;
    };
    let passwd = temp_dir.path().join("passwd");
    fs::write(
        &passwd,
        format!("me:x:1000:1000::{}:/bin/sh\n", home.display()),
    )
    .unwrap();
    let locator = TrashLocator::new().with_passwd(&passwd);
    let home_trash = home.join(".local/share/Trash/files");

    // Default data dir is ~/.local/share: already listed, not doubled.
    std::env::remove_var("XDG_DATA_HOME");
    let mut diagnostics = Diagnostics::default();
    assert_eq!(locator.user_trash_dirs(&mut diagnostics), vec![home_trash.clone()]);

    let xdg = temp_dir.path().join("xdg");
    std::env::set_var("XDG_DATA_HOME", &xdg);
    let dirs = locator.user_trash_dirs(&mut diagnostics);
    std::env::remove_var("XDG_DATA_HOME");

    assert_eq!(dirs, vec![home_trash, xdg.join("Trash/files")]);
    assert!(diagnostics.0.is_empty());
}
