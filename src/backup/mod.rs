//! Encrypted backup and restore of the credential collection
//!
//! # Architecture
//!
//! - `BackupManager`: decrypts every stored credential, serializes the set
//!   and writes it re-encrypted as one snapshot file; lists snapshots.
//! - `RestoreManager`: decrypts a snapshot and stores its credentials again,
//!   each password encrypted under the active passphrase.
//! - `BackupLock`: lock file serializing backup and restore within one
//!   backup directory.
//!
//! # Backup Format
//!
//! A snapshot is an [`EncryptedData`](crate::crypto::EncryptedData)
//! container serialized as JSON (`version`, `nonce`, `ciphertext`). The
//! plaintext is a JSON array of `{url, username, password}` objects.
//! Snapshots are named `passwall-YYYYMMDD-HHMMSS-mmm-xxxxxx.bak` (UTC).
//!
//! # Example
//!
//! ```rust,ignore
//! use passwall::backup::{BackupManager, RestoreManager};
//!
//! let backup = BackupManager::new(&storage, &cipher).create_backup()?;
//!
//! // Later, with the same passphrase
//! let result = RestoreManager::new(&storage, &cipher).restore(&backup.name)?;
//! println!("{}", result.summary());
//! ```

mod lock;
mod manager;
mod restore;

pub use lock::{BackupLock, LOCK_FILE_NAME};
pub use manager::{backup_file_name, list_backups, BackupManager, BACKUP_EXTENSION};
pub use restore::{
    normalize_backup_name, RestoreManager, RestoreRequest, RestoreResult, ValidationResult,
};
