//! Backup restoration for PassWall
//!
//! Reads a snapshot back into the store. Restored records are added next to
//! the existing ones; nothing already stored is removed or overwritten.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Deserialize;
use zeroize::Zeroizing;

use crate::audit::{AuditEntry, Operation};
use crate::crypto::EncryptionProvider;
use crate::error::{VaultError, VaultResult};
use crate::models::{Credential, CredentialDto, EntityKind};
use crate::storage::{Collection, Storage};

use super::lock::BackupLock;
use super::manager::BACKUP_EXTENSION;

/// Body of a restore request: `{"name": "<backup>"}`
#[derive(Debug, Clone, Deserialize)]
pub struct RestoreRequest {
    pub name: String,
}

impl RestoreRequest {
    /// Parse a JSON request body
    pub fn from_json(body: &str) -> VaultResult<Self> {
        serde_json::from_str(body)
            .map_err(|_| VaultError::InvalidRequest("Invalid json provided".into()))
    }
}

/// Resolve a requested backup name to a file name in the backup directory
///
/// A name without an extension gets `.bak`. Anything that could point
/// outside the backup directory is reported as not found.
pub fn normalize_backup_name(requested: &str) -> VaultResult<String> {
    if requested.is_empty()
        || requested == "."
        || requested == ".."
        || requested.contains(|c: char| c == '/' || c == '\\')
    {
        return Err(VaultError::backup_not_found(requested));
    }

    if Path::new(requested).extension().is_none() {
        Ok(format!("{}.{}", requested, BACKUP_EXTENSION))
    } else {
        Ok(requested.to_string())
    }
}

/// Handles restoring from backups
pub struct RestoreManager<'a> {
    storage: &'a Storage,
    provider: &'a dyn EncryptionProvider,
    backup_dir: PathBuf,
}

impl<'a> RestoreManager<'a> {
    /// Create a new RestoreManager reading from the configured backup directory
    pub fn new(storage: &'a Storage, provider: &'a dyn EncryptionProvider) -> Self {
        Self {
            backup_dir: storage.paths().backup_dir(),
            storage,
            provider,
        }
    }

    /// Restore credentials from the named backup
    ///
    /// Only snapshots taken under the active passphrase can be read. Every
    /// record is decrypted and re-encrypted before any is stored; a failure
    /// stores nothing.
    pub fn restore(&self, requested: &str) -> VaultResult<RestoreResult> {
        let name = normalize_backup_name(requested)?;
        let _lock = BackupLock::acquire(&self.backup_dir)?;

        let transfer = self.read_backup(&name)?;
        let records = transfer
            .iter()
            .map(|dto| Credential::from_dto(dto, self.provider))
            .collect::<VaultResult<Vec<_>>>()?;

        let restored = self.storage.logins().save_all(records)?.len();

        let entry =
            AuditEntry::new(Operation::Restore, EntityKind::Logins, restored).with_detail(name.clone());
        if let Err(e) = self.storage.audit(&entry) {
            tracing::warn!("Failed to write audit entry: {}", e);
        }
        tracing::info!("Restored {} credentials from {}", restored, name);

        Ok(RestoreResult {
            backup_name: name,
            restored,
        })
    }

    /// Decrypt and parse a backup without touching the store
    pub fn validate_backup(&self, requested: &str) -> VaultResult<ValidationResult> {
        let name = normalize_backup_name(requested)?;
        let path = self.backup_dir.join(&name);
        let transfer = self.read_backup(&name)?;

        let metadata = fs::metadata(&path)
            .map_err(|e| VaultError::Io(format!("Failed to stat {}: {}", path.display(), e)))?;
        let created_at = metadata
            .modified()
            .map(DateTime::<Utc>::from)
            .map_err(|e| VaultError::Io(format!("Failed to stat {}: {}", path.display(), e)))?;

        Ok(ValidationResult {
            backup_name: name,
            created_at,
            size_bytes: metadata.len(),
            records: transfer.len(),
        })
    }

    fn read_backup(&self, name: &str) -> VaultResult<Vec<CredentialDto>> {
        let path = self.backup_dir.join(name);
        if !path.is_file() || fs::File::open(&path).is_err() {
            return Err(VaultError::backup_not_found(name));
        }
        tracing::debug!("Reading backup {}", path.display());

        let plaintext = Zeroizing::new(self.provider.decrypt_file(&path)?);
        serde_json::from_slice(&plaintext)
            .map_err(|e| VaultError::MalformedBackup(format!("{}: {}", name, e)))
    }
}

/// Result of a restore operation
#[derive(Debug, Clone)]
pub struct RestoreResult {
    /// File the credentials came from
    pub backup_name: String,
    /// Number of credentials stored
    pub restored: usize,
}

impl RestoreResult {
    pub fn summary(&self) -> String {
        format!(
            "Restored {} credential{} from {}",
            self.restored,
            if self.restored == 1 { "" } else { "s" },
            self.backup_name
        )
    }
}

/// Result of validating a backup
#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub backup_name: String,
    /// File modification time
    pub created_at: DateTime<Utc>,
    pub size_bytes: u64,
    /// Credentials in the snapshot
    pub records: usize,
}

impl ValidationResult {
    pub fn summary(&self) -> String {
        format!(
            "{}: {} credentials, readable with the current passphrase",
            self.backup_name, self.records
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backup::manager::BackupManager;
    use crate::config::paths::VaultPaths;
    use crate::crypto::provider::testing::test_cipher;
    use crate::crypto::PassphraseCipher;
    use tempfile::TempDir;

    fn create_test_env() -> (TempDir, Storage, PassphraseCipher) {
        let temp_dir = TempDir::new().unwrap();
        let paths = VaultPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage, test_cipher("restore-pass"))
    }

    /// A second, empty vault sharing `storage`'s backup directory
    fn sibling_storage(storage: &Storage) -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = VaultPaths::with_base_dir(temp_dir.path().to_path_buf())
            .with_overrides(Some(storage.paths().backup_dir()), None);
        let sibling = Storage::new(paths).unwrap();
        sibling.load_all().unwrap();
        (temp_dir, sibling)
    }

    fn seed(storage: &Storage, cipher: &PassphraseCipher) {
        for (url, user, pass) in [
            ("https://a.example", "alice", "pw-a"),
            ("https://b.example", "bob", "pw,\"b\""),
        ] {
            storage
                .logins()
                .save(Credential::encrypted(url, user, pass, cipher).unwrap())
                .unwrap();
        }
    }

    fn write_backup(storage: &Storage, name: &str, contents: &[u8]) {
        fs::write(storage.paths().backup_dir().join(name), contents).unwrap();
    }

    #[test]
    fn test_round_trip_into_empty_vault() {
        let (_temp, storage, cipher) = create_test_env();
        seed(&storage, &cipher);
        let backup = BackupManager::new(&storage, &cipher).create_backup().unwrap();

        let (_temp2, target) = sibling_storage(&storage);
        let result = RestoreManager::new(&target, &cipher)
            .restore(&backup.name)
            .unwrap();
        assert_eq!(result.restored, 2);

        let original: Vec<_> = storage
            .logins()
            .find_all()
            .unwrap()
            .iter()
            .map(|c| c.to_dto(&cipher).unwrap())
            .collect();
        let restored: Vec<_> = target
            .logins()
            .find_all()
            .unwrap()
            .iter()
            .map(|c| c.to_dto(&cipher).unwrap())
            .collect();
        assert_eq!(original, restored);
    }

    #[test]
    fn test_restore_adds_alongside_existing() {
        let (_temp, storage, cipher) = create_test_env();
        seed(&storage, &cipher);
        let backup = BackupManager::new(&storage, &cipher).create_backup().unwrap();

        RestoreManager::new(&storage, &cipher)
            .restore(&backup.name)
            .unwrap();

        assert_eq!(storage.logins().count().unwrap(), 4);
    }

    #[test]
    fn test_wrong_passphrase_stores_nothing() {
        let (_temp, storage, cipher) = create_test_env();
        seed(&storage, &cipher);
        let backup = BackupManager::new(&storage, &cipher).create_backup().unwrap();

        let (_temp2, target) = sibling_storage(&storage);
        let other = test_cipher("not-the-same");
        let err = RestoreManager::new(&target, &other)
            .restore(&backup.name)
            .unwrap_err();

        assert!(err.is_decryption());
        assert_eq!(target.logins().count().unwrap(), 0);
    }

    #[test]
    fn test_name_without_extension_gets_bak() {
        let (_temp, storage, cipher) = create_test_env();
        seed(&storage, &cipher);
        let backup = BackupManager::new(&storage, &cipher).create_backup().unwrap();
        let stem = backup.name.trim_end_matches(".bak");

        let result = RestoreManager::new(&storage, &cipher).restore(stem).unwrap();
        assert_eq!(result.backup_name, backup.name);
    }

    #[test]
    fn test_normalize_backup_name() {
        assert_eq!(normalize_backup_name("passwall-1").unwrap(), "passwall-1.bak");
        assert_eq!(normalize_backup_name("passwall-1.bak").unwrap(), "passwall-1.bak");
        assert_eq!(normalize_backup_name("old.backup").unwrap(), "old.backup");

        for bad in ["", "..", "../passwall-1.bak", "sub/passwall-1", "a\\b"] {
            assert!(normalize_backup_name(bad).unwrap_err().is_not_found());
        }
    }

    #[test]
    fn test_missing_backup_not_found() {
        let (_temp, storage, cipher) = create_test_env();

        let err = RestoreManager::new(&storage, &cipher)
            .restore("passwall-19700101-000000-000-000000")
            .unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(err.status_code(), 404);
        assert!(err.to_string().contains("passwall-19700101-000000-000-000000.bak"));
    }

    #[test]
    fn test_garbage_file_is_decryption_error() {
        let (_temp, storage, cipher) = create_test_env();
        write_backup(&storage, "junk.bak", b"not a container");

        let err = RestoreManager::new(&storage, &cipher)
            .restore("junk")
            .unwrap_err();
        assert!(err.is_decryption());
    }

    #[test]
    fn test_non_array_payload_is_malformed() {
        let (_temp, storage, cipher) = create_test_env();
        let container = cipher.encrypt(br#"{"url":"a"}"#).unwrap();
        write_backup(
            &storage,
            "odd.bak",
            serde_json::to_string(&container).unwrap().as_bytes(),
        );

        let err = RestoreManager::new(&storage, &cipher)
            .restore("odd.bak")
            .unwrap_err();
        assert!(matches!(err, VaultError::MalformedBackup(_)));
        assert_eq!(storage.logins().count().unwrap(), 0);
    }

    #[test]
    fn test_validate_backup() {
        let (_temp, storage, cipher) = create_test_env();
        seed(&storage, &cipher);
        let backup = BackupManager::new(&storage, &cipher).create_backup().unwrap();

        let validation = RestoreManager::new(&storage, &cipher)
            .validate_backup(&backup.name)
            .unwrap();

        assert_eq!(validation.records, 2);
        assert!(validation.size_bytes > 0);
        assert!(validation.summary().contains("2 credentials"));
        assert_eq!(storage.logins().count().unwrap(), 2);
    }

    #[test]
    fn test_restore_request_parsing() {
        assert_eq!(
            RestoreRequest::from_json(r#"{"name":"passwall-1"}"#).unwrap().name,
            "passwall-1"
        );

        let err = RestoreRequest::from_json("{name:").unwrap_err();
        assert!(matches!(err, VaultError::InvalidRequest(_)));
        assert_eq!(err.status_code(), 422);
    }

    #[test]
    fn test_restore_result_summary() {
        let result = RestoreResult {
            backup_name: "passwall-1.bak".into(),
            restored: 1,
        };
        assert_eq!(result.summary(), "Restored 1 credential from passwall-1.bak");
    }
}
