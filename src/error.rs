//! Custom error types for PassWall
//!
//! This module defines the error hierarchy for the vault using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// Why an uploaded file was refused at intake
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UploadRejection {
    /// Request body or file content larger than the configured limit
    #[error("payload too large: {actual} bytes exceeds limit of {limit} bytes")]
    PayloadTooLarge { limit: u64, actual: u64 },

    /// Uploaded filename does not carry the `.csv` extension
    #[error("{extension} unsupported filetype")]
    UnsupportedFileType { extension: String },

    /// No `file` part in the form
    #[error("no file provided in form field 'file'")]
    MissingFile,
}

/// The main error type for PassWall operations
#[derive(Error, Debug)]
pub enum VaultError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Upload refused (size or type)
    #[error("Upload rejected: {0}")]
    UploadRejected(UploadRejection),

    /// Encryption errors
    #[error("Encryption error: {0}")]
    Encryption(String),

    /// Wrong passphrase or corrupted ciphertext
    #[error("Decryption failed: {0}")]
    Decryption(String),

    /// A CSV row that does not have the expected shape
    #[error("Malformed record at row {row}: {reason}")]
    MalformedRecord { row: u64, reason: String },

    /// Decrypted backup payload is not a credential array
    #[error("Malformed backup: {0}")]
    MalformedBackup(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Validation errors for data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Request body could not be understood
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Another backup or restore holds the backup directory
    #[error("Backup directory is locked: {0}")]
    Locked(String),
}

impl VaultError {
    /// Create a "not found" error for backups
    pub fn backup_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Backup",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a decryption error
    pub fn is_decryption(&self) -> bool {
        matches!(self, Self::Decryption(_))
    }

    /// HTTP-equivalent status code for the response envelope
    pub fn status_code(&self) -> u16 {
        match self {
            Self::NotFound { .. } => 404,
            Self::UploadRejected(UploadRejection::PayloadTooLarge { .. }) => 413,
            Self::UploadRejected(UploadRejection::UnsupportedFileType { .. }) => 415,
            Self::UploadRejected(UploadRejection::MissingFile) => 400,
            Self::InvalidRequest(_) | Self::Validation(_) => 422,
            Self::Locked(_) => 409,
            _ => 500,
        }
    }

    /// Short status label for the response envelope
    pub fn status_label(&self) -> &'static str {
        match self.status_code() {
            400 => "Bad Request",
            404 => "Not Found",
            409 => "Conflict",
            413 => "Payload Too Large",
            415 => "Unsupported Media Type",
            422 => "Unprocessable Entity",
            _ => "Error",
        }
    }
}

impl From<UploadRejection> for VaultError {
    fn from(rejection: UploadRejection) -> Self {
        Self::UploadRejected(rejection)
    }
}

impl From<std::io::Error> for VaultError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for VaultError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for PassWall operations
pub type VaultResult<T> = Result<T, VaultError>;
