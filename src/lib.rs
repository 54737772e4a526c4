//! PassWall vault - encrypted backup/restore and CSV import/export
//!
//! This library moves a vault's login credentials across three boundaries:
//! encrypted snapshot files, plaintext CSV interchange, and the live record
//! store. Secrets are never written to disk unencrypted, except as the CSV a
//! user explicitly exports.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Path resolution and persisted settings
//! - `error`: Error types and their response mapping
//! - `crypto`: AES-256-GCM with an Argon2id passphrase key, behind `EncryptionProvider`
//! - `models`: Credentials and the other secret record types
//! - `storage`: JSON record store and additive migrations
//! - `interchange`: CSV codec
//! - `upload`: Validation and staging of uploaded files
//! - `services`: CSV import and export
//! - `backup`: Encrypted snapshots and restore
//! - `audit`: Audit log of vault operations
//! - `response`: The uniform response envelope
//! - `cli`, `display`: Command handlers and terminal output
//!
//! # Example
//!
//! ```rust,ignore
//! use passwall::config::{paths::VaultPaths, settings::Settings};
//! use passwall::crypto::PassphraseCipher;
//! use passwall::storage::Storage;
//! use passwall::backup::BackupManager;
//!
//! let paths = VaultPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let cipher = PassphraseCipher::unlock("passphrase", &settings.encryption)?;
//! let storage = Storage::new(settings.apply_to(paths))?;
//! storage.logins().load()?;
//! let backup = BackupManager::new(&storage, &cipher).create_backup()?;
//! ```

pub mod audit;
pub mod backup;
pub mod cli;
pub mod config;
pub mod crypto;
pub mod display;
pub mod error;
pub mod interchange;
pub mod models;
pub mod response;
pub mod services;
pub mod storage;
pub mod upload;

pub use error::{VaultError, VaultResult};
pub use response::Response;
