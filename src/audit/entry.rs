//! Audit entry data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::EntityKind;

/// Vault operations that are audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Credentials imported from CSV
    Import,
    /// Credentials exported to CSV
    Export,
    /// Encrypted snapshot written
    Backup,
    /// Snapshot read back into the store
    Restore,
    /// Stored records brought up to the current schema
    Migrate,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Import => write!(f, "IMPORT"),
            Operation::Export => write!(f, "EXPORT"),
            Operation::Backup => write!(f, "BACKUP"),
            Operation::Restore => write!(f, "RESTORE"),
            Operation::Migrate => write!(f, "MIGRATE"),
        }
    }
}

/// A single audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the operation occurred (UTC)
    pub timestamp: DateTime<Utc>,

    /// Type of operation performed
    pub operation: Operation,

    /// Collection affected
    pub collection: EntityKind,

    /// Number of records touched
    pub count: usize,

    /// Extra context such as a backup name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl AuditEntry {
    pub fn new(operation: Operation, collection: EntityKind, count: usize) -> Self {
        Self {
            timestamp: Utc::now(),
            operation,
            collection,
            count,
            detail: None,
        }
    }

    /// Attach context to the entry
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Format the entry for human-readable output
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} {} ({} records)",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.collection,
            self.count
        );

        if let Some(detail) = &self.detail {
            output.push_str(&format!(" {}", detail));
        }

        output
    }
}
