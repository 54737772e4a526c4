//! Backup directory lock

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::error::{VaultError, VaultResult};

/// Lock file created in the backup directory while a backup or restore runs
pub const LOCK_FILE_NAME: &str = ".passwall-backup.lock";

/// Held for the duration of one backup or restore
///
/// The lock file is created exclusively and removed on drop. A process that
/// dies while holding it leaves the file behind; the error names it so it
/// can be removed by hand.
#[derive(Debug)]
pub struct BackupLock {
    path: PathBuf,
}

impl BackupLock {
    /// Take the lock for `backup_dir`, creating the directory if needed
    pub fn acquire(backup_dir: &Path) -> VaultResult<Self> {
        fs::create_dir_all(backup_dir).map_err(|e| {
            VaultError::Io(format!("Failed to create backup directory: {}", e))
        })?;

        let path = backup_dir.join(LOCK_FILE_NAME);
        let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                return Err(VaultError::Locked(format!(
                    "{} exists; another backup or restore is running (remove the file if not)",
                    path.display()
                )))
            }
            Err(e) => {
                return Err(VaultError::Io(format!(
                    "Failed to create lock file {}: {}",
                    path.display(),
                    e
                )))
            }
        };

        // Owner pid, for whoever finds a stale lock
        if let Err(e) = writeln!(file, "{}", std::process::id()) {
            tracing::warn!("Failed to write pid to lock file {}: {}", path.display(), e);
        }

        Ok(Self { path })
    }
}

impl Drop for BackupLock {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.path) {
            tracing::warn!("Failed to remove lock file {}: {}", self.path.display(), e);
        }
    }
}
