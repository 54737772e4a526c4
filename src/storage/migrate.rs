//! Additive schema migration
//!
//! Brings every stored record up to the current schema by adding fields it
//! lacks, filled with the schema's default values. Existing values and
//! unknown fields are never touched.

use std::path::Path;

use serde_json::Value;

use crate::audit::{AuditEntry, Operation};
use crate::error::VaultError;
use crate::models::{EntityKind, Record};

use super::file_io::{read_json_required, write_json_atomic};
use super::Storage;

/// What one collection's migration did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationOutcome {
    pub kind: EntityKind,
    /// Records in the collection file
    pub records: usize,
    /// Total fields added across all records
    pub fields_added: usize,
}

/// A collection that can migrate its own file
pub trait Migrate {
    fn kind(&self) -> EntityKind;
    fn migrate(&self) -> Result<MigrationOutcome, VaultError>;
}

/// Add fields missing from the records in `path`
pub fn add_missing_fields<T: Record>(path: &Path) -> Result<MigrationOutcome, VaultError> {
    let mut outcome = MigrationOutcome {
        kind: T::KIND,
        records: 0,
        fields_added: 0,
    };

    if !path.exists() {
        return Ok(outcome);
    }

    let template = match serde_json::to_value(T::default())? {
        Value::Object(map) => map,
        _ => {
            return Err(VaultError::Storage(format!(
                "{} schema is not an object",
                T::KIND
            )))
        }
    };

    let mut document: Value = read_json_required(path)?;
    let records = document.as_array_mut().ok_or_else(|| {
        VaultError::Storage(format!("{} is not a JSON array", path.display()))
    })?;

    for (index, record) in records.iter_mut().enumerate() {
        let fields = record.as_object_mut().ok_or_else(|| {
            VaultError::Storage(format!(
                "{} record {} is not an object",
                path.display(),
                index
            ))
        })?;

        for (key, default) in &template {
            // Identity is never invented
            if key == "id" {
                continue;
            }
            if !fields.contains_key(key) {
                fields.insert(key.clone(), default.clone());
                outcome.fields_added += 1;
            }
        }
    }
    outcome.records = records.len();

    if outcome.fields_added > 0 {
        write_json_atomic(path, &document)?;
    }

    Ok(outcome)
}

/// Result of migrating every collection
#[derive(Debug, Default)]
pub struct MigrationReport {
    pub succeeded: Vec<MigrationOutcome>,
    pub failed: Vec<(EntityKind, String)>,
}

impl MigrationReport {
    pub fn all_succeeded(&self) -> bool {
        self.failed.is_empty()
    }

    /// Total fields added across all collections
    pub fn fields_added(&self) -> usize {
        self.succeeded.iter().map(|o| o.fields_added).sum()
    }
}

/// Migrate each collection independently
///
/// A failing collection is logged and recorded; the remaining collections
/// are still migrated.
pub fn run_migrations(storage: &Storage) -> MigrationReport {
    let mut report = MigrationReport::default();

    for collection in storage.migratables() {
        let kind = collection.kind();
        match collection.migrate() {
            Ok(outcome) => {
                tracing::debug!(
                    "Migrated {}: {} records, {} fields added",
                    kind,
                    outcome.records,
                    outcome.fields_added
                );
                if outcome.fields_added > 0 {
                    let entry = AuditEntry::new(Operation::Migrate, kind, outcome.records)
                        .with_detail(format!("{} fields added", outcome.fields_added));
                    if let Err(e) = storage.audit(&entry) {
                        tracing::warn!("Failed to write audit entry: {}", e);
                    }
                }
                report.succeeded.push(outcome);
            }
            Err(e) => {
                tracing::error!("Migration of {} failed: {}", kind, e);
                report.failed.push((kind, e.to_string()));
            }
        }
    }

    report
}
