//! Backup manager for PassWall
//!
//! Writes the credential collection as one encrypted snapshot file.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use uuid::Uuid;
use zeroize::Zeroizing;

use crate::audit::{AuditEntry, Operation};
use crate::crypto::EncryptionProvider;
use crate::error::{VaultError, VaultResult};
use crate::models::{BackupDescriptor, CredentialDto, EntityKind};
use crate::storage::file_io::write_bytes_atomic;
use crate::storage::{Collection, Storage};

use super::lock::{BackupLock, LOCK_FILE_NAME};

/// Extension of snapshot files
pub const BACKUP_EXTENSION: &str = "bak";

/// Creates snapshots of the credential collection
pub struct BackupManager<'a> {
    storage: &'a Storage,
    provider: &'a dyn EncryptionProvider,
    backup_dir: PathBuf,
}

impl<'a> BackupManager<'a> {
    /// Create a new BackupManager writing to the configured backup directory
    pub fn new(storage: &'a Storage, provider: &'a dyn EncryptionProvider) -> Self {
        Self {
            backup_dir: storage.paths().backup_dir(),
            storage,
            provider,
        }
    }

    /// Get backup directory path
    pub fn backup_dir(&self) -> &Path {
        &self.backup_dir
    }

    /// Snapshot every credential
    ///
    /// The snapshot is written to a temp file and renamed into place, so a
    /// failure never leaves a truncated file under the final name.
    pub fn create_backup(&self) -> VaultResult<BackupDescriptor> {
        let _lock = BackupLock::acquire(&self.backup_dir)?;

        let credentials = self.storage.logins().find_all()?;
        let transfer: Vec<CredentialDto> = credentials
            .iter()
            .map(|c| c.to_dto(self.provider))
            .collect::<VaultResult<_>>()?;

        let payload = Zeroizing::new(serde_json::to_vec(&transfer).map_err(|e| {
            VaultError::Json(format!("Failed to serialize backup: {}", e))
        })?);
        let container = self.provider.encrypt(&payload)?;
        let body = serde_json::to_vec(&container)
            .map_err(|e| VaultError::Json(format!("Failed to serialize backup: {}", e)))?;

        let name = backup_file_name(Utc::now());
        let path = self.backup_dir.join(&name);
        write_bytes_atomic(&path, &body)?;

        let created_at = modified_time(&path)?;

        let entry = AuditEntry::new(Operation::Backup, EntityKind::Logins, transfer.len())
            .with_detail(name.clone());
        if let Err(e) = self.storage.audit(&entry) {
            tracing::warn!("Failed to write audit entry: {}", e);
        }
        tracing::info!("Backed up {} credentials to {}", transfer.len(), name);

        Ok(BackupDescriptor::new(name, created_at))
    }

    /// List all available backups
    pub fn list_backups(&self) -> VaultResult<Vec<BackupDescriptor>> {
        list_backups(&self.backup_dir)
    }
}

/// Snapshot file name for a creation time
///
/// Milliseconds plus six random hex digits keep names unique when backups
/// run back to back.
pub fn backup_file_name(now: DateTime<Utc>) -> String {
    let token = Uuid::new_v4().simple().to_string();
    format!(
        "passwall-{}-{:03}-{}.{}",
        now.format("%Y%m%d-%H%M%S"),
        now.timestamp_subsec_millis(),
        &token[..6],
        BACKUP_EXTENSION
    )
}

/// Every snapshot file in `backup_dir`, newest first
///
/// In-progress temp files and the lock file are skipped. A missing
/// directory has no backups.
pub fn list_backups(backup_dir: &Path) -> VaultResult<Vec<BackupDescriptor>> {
    if !backup_dir.exists() {
        return Ok(Vec::new());
    }

    let mut backups = Vec::new();

    for entry in fs::read_dir(backup_dir)
        .map_err(|e| VaultError::Io(format!("Failed to read backup directory: {}", e)))?
    {
        let entry = entry
            .map_err(|e| VaultError::Io(format!("Failed to read directory entry: {}", e)))?;

        let name = entry.file_name().to_string_lossy().into_owned();
        if name == LOCK_FILE_NAME || name.ends_with(".tmp") {
            continue;
        }

        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        match modified_time(&path) {
            Ok(created_at) => backups.push(BackupDescriptor::new(name, created_at)),
            Err(e) => tracing::warn!("Skipping {}: {}", path.display(), e),
        }
    }

    backups.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.name.cmp(&a.name))
    });

    Ok(backups)
}

fn modified_time(path: &Path) -> VaultResult<DateTime<Utc>> {
    let modified = fs::metadata(path)
        .and_then(|m| m.modified())
        .map_err(|e| VaultError::Io(format!("Failed to stat {}: {}", path.display(), e)))?;
    Ok(DateTime::<Utc>::from(modified))
}
