//! One-time relocation of the legacy data directory into the current layout.
//!
//! Runs under host control, exactly once, before any backend is constructed.
//! The legacy tree is first mirrored to a backup location; only with the
//! backup in place is it copied to the current location and then removed,
//! best-effort. Either copy failing aborts startup: the system must never
//! run against a half-migrated or unbacked-up dataset.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// Fixed subdirectory names joined under the application data root.
const LEGACY_DIR: &str = "data";
const BACKUP_DIR: &str = "migration-backup";
const CURRENT_DIR: &str = "database";

/// The on-disk layout under a configurable application data root.
///
/// The root itself is supplied by the host; backend-specific subdivision
/// below [`DataLayout::current_dir`] belongs to the backends.
#[derive(Debug, Clone)]
pub struct DataLayout {
    root: PathBuf,
}

impl DataLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Historical data location, superseded by [`DataLayout::current_dir`].
    pub fn legacy_dir(&self) -> PathBuf {
        self.root.join(LEGACY_DIR)
    }

    /// Mirror of the legacy tree taken before migration.
    pub fn backup_dir(&self) -> PathBuf {
        self.root.join(BACKUP_DIR)
    }

    /// Current data location.
    pub fn current_dir(&self) -> PathBuf {
        self.root.join(CURRENT_DIR)
    }
}

/// Startup-aborting migration failures.
///
/// The failing phase is carried explicitly because remediation differs: a
/// backup failure is retryable in place, a relocation failure leaves a
/// backup behind and needs operator attention.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    #[error("failed to back up legacy data before migration: {source}")]
    Backup {
        #[source]
        source: io::Error,
    },
    #[error("failed to copy legacy data to its new location: {source}")]
    Relocate {
        #[source]
        source: io::Error,
    },
}

/// What the migration step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationOutcome {
    /// No legacy directory was present; nothing to do.
    Clean,
    /// Legacy data was backed up and relocated. `legacy_removed` is false
    /// when the old tree could not be deleted; the relocated copy is
    /// authoritative either way.
    Migrated { legacy_removed: bool },
}

/// Move a legacy data tree into the current layout, taking a backup first.
///
/// An error from either copy phase means the dataset is not safe to run
/// against and the host must abort startup. In particular, a backup failure
/// is returned before anything is written to the current location.
pub fn migrate_legacy_data(layout: &DataLayout) -> Result<MigrationOutcome, MigrationError> {
    let legacy = layout.legacy_dir();
    if !legacy.is_dir() {
        return Ok(MigrationOutcome::Clean);
    }

    let backup = layout.backup_dir();
    if let Err(source) = copy_dir_recursive(&legacy, &backup) {
        error!(
            from = %legacy.display(),
            to = %backup.display(),
            "failed to back up legacy data before migration"
        );
        return Err(MigrationError::Backup { source });
    }

    let current = layout.current_dir();
    if let Err(source) = copy_dir_recursive(&legacy, &current) {
        error!(
            from = %legacy.display(),
            to = %current.display(),
            "failed to copy legacy data to its new location"
        );
        return Err(MigrationError::Relocate { source });
    }

    // The relocated copy is authoritative from here on; removing the old
    // tree is best-effort.
    let legacy_removed = match fs::remove_dir_all(&legacy) {
        Ok(()) => true,
        Err(err) => {
            warn!(
                path = %legacy.display(),
                error = %err,
                "could not remove legacy data directory"
            );
            false
        }
    };

    info!(
        from = %legacy.display(),
        to = %current.display(),
        "legacy data migrated"
    );
    Ok(MigrationOutcome::Migrated { legacy_removed })
}

fn copy_dir_recursive(from: &Path, to: &Path) -> io::Result<()> {
    fs::create_dir_all(to)?;
    for entry in fs::read_dir(from)? {
        let entry = entry?;
        let target = to.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_dir_recursive(&entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_legacy_tree(layout: &DataLayout) {
        let legacy = layout.legacy_dir();
        fs::create_dir_all(legacy.join("towns")).unwrap();
        fs::write(legacy.join("a.txt"), "alpha").unwrap();
        fs::write(legacy.join("b.txt"), "beta").unwrap();
        fs::write(legacy.join("towns").join("riverwatch.txt"), "town").unwrap();
    }

    #[test]
    fn no_legacy_directory_is_a_noop() {
        let tmp = tempfile::tempdir().unwrap();
        let layout = DataLayout::new(tmp.path());

        let outcome = migrate_legacy_data(&layout).unwrap();
        assert_eq!(outcome, MigrationOutcome::Clean);
        assert!(!layout.backup_dir().exists());
        assert!(!layout.current_dir().exists());
    }

    #[test]
    fn legacy_tree_is_backed_up_relocated_and_removed() {
        let tmp = tempfile::tempdir().unwrap();
        let layout = DataLayout::new(tmp.path());
        write_legacy_tree(&layout);

        let outcome = migrate_legacy_data(&layout).unwrap();
        assert_eq!(
            outcome,
            MigrationOutcome::Migrated {
                legacy_removed: true
            }
        );

        for root in [layout.backup_dir(), layout.current_dir()] {
            assert_eq!(fs::read_to_string(root.join("a.txt")).unwrap(), "alpha");
            assert_eq!(fs::read_to_string(root.join("b.txt")).unwrap(), "beta");
            assert_eq!(
                fs::read_to_string(root.join("towns").join("riverwatch.txt")).unwrap(),
                "town"
            );
        }
        assert!(!layout.legacy_dir().exists());
    }

    #[test]
    fn backup_failure_aborts_before_touching_current_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let layout = DataLayout::new(tmp.path());
        write_legacy_tree(&layout);

        // A plain file where the backup directory should go makes the
        // backup copy fail.
        fs::write(layout.backup_dir(), "in the way").unwrap();

        let err = migrate_legacy_data(&layout).unwrap_err();
        assert!(matches!(err, MigrationError::Backup { .. }));
        assert!(!layout.current_dir().exists());
        assert!(layout.legacy_dir().is_dir());
    }

    #[test]
    fn relocation_failure_aborts_after_backup() {
        let tmp = tempfile::tempdir().unwrap();
        let layout = DataLayout::new(tmp.path());
        write_legacy_tree(&layout);

        fs::write(layout.current_dir(), "in the way").unwrap();

        let err = migrate_legacy_data(&layout).unwrap_err();
        assert!(matches!(err, MigrationError::Relocate { .. }));
        // The backup completed and the legacy tree is untouched.
        assert!(layout.backup_dir().join("a.txt").exists());
        assert!(layout.legacy_dir().is_dir());
    }

    // Deletion failure is forced by stripping write permission from the
    // legacy tree, which root bypasses; a sacrificial directory is probed
    // first and the test bows out when the denial has no effect.
    #[cfg(unix)]
    #[test]
    fn deletion_failure_still_reports_migrated() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = tempfile::tempdir().unwrap();

        let probe = tmp.path().join("probe");
        fs::create_dir(&probe).unwrap();
        fs::write(probe.join("f"), "x").unwrap();
        fs::set_permissions(&probe, fs::Permissions::from_mode(0o555)).unwrap();
        let denied = fs::remove_file(probe.join("f")).is_err();
        fs::set_permissions(&probe, fs::Permissions::from_mode(0o755)).unwrap();
        if !denied {
            return;
        }

        let layout = DataLayout::new(tmp.path());
        write_legacy_tree(&layout);
        let legacy = layout.legacy_dir();
        fs::set_permissions(legacy.join("towns"), fs::Permissions::from_mode(0o555)).unwrap();
        fs::set_permissions(&legacy, fs::Permissions::from_mode(0o555)).unwrap();

        let outcome = migrate_legacy_data(&layout).unwrap();

        fs::set_permissions(&legacy, fs::Permissions::from_mode(0o755)).unwrap();
        fs::set_permissions(legacy.join("towns"), fs::Permissions::from_mode(0o755)).unwrap();

        assert_eq!(
            outcome,
            MigrationOutcome::Migrated {
                legacy_removed: false
            }
        );
        // The old tree survives and both copies are complete.
        assert!(legacy.is_dir());
        assert!(legacy.join("a.txt").exists());
        for root in [layout.backup_dir(), layout.current_dir()] {
            assert_eq!(fs::read_to_string(root.join("a.txt")).unwrap(), "alpha");
            assert_eq!(
                fs::read_to_string(root.join("towns").join("riverwatch.txt")).unwrap(),
                "town"
            );
        }
    }

    #[test]
    fn repeat_run_after_migration_is_a_noop() {
        let tmp = tempfile::tempdir().unwrap();
        let layout = DataLayout::new(tmp.path());
        write_legacy_tree(&layout);

        migrate_legacy_data(&layout).unwrap();
        let outcome = migrate_legacy_data(&layout).unwrap();
        assert_eq!(outcome, MigrationOutcome::Clean);
    }
}
