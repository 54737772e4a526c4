//! Audit logging for vault operations
//!
//! Every bulk operation on the vault (import, export, backup, restore,
//! migration) is recorded in an append-only JSONL log next to the data
//! directory. Entries describe what happened and how many records it
//! touched; they never carry secret values.
//!
//! # Example
//!
//! ```rust,ignore
//! use passwall::audit::{AuditEntry, AuditLogger, Operation};
//! use passwall::models::EntityKind;
//!
//! let logger = AuditLogger::new(audit_log_path);
//! logger.log(&AuditEntry::new(Operation::Import, EntityKind::Logins, 12))?;
//! ```

mod entry;
mod logger;

pub use entry::{AuditEntry, Operation};
pub use logger::AuditLogger;
