//! CSV import service
//!
//! Decodes credential rows, fills empty fields from caller-supplied
//! defaults, encrypts every password and stores the whole batch at once.

use std::io::Read;

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::audit::{AuditEntry, Operation};
use crate::crypto::EncryptionProvider;
use crate::error::VaultResult;
use crate::interchange::csv;
use crate::models::{Credential, CredentialDto, CredentialId, EntityKind};
use crate::storage::{Collection, Storage};

/// Values substituted for empty CSV fields
#[derive(Clone, Default, Zeroize, ZeroizeOnDrop)]
pub struct ImportDefaults {
    pub url: String,
    pub username: String,
    pub password: String,
}

impl ImportDefaults {
    pub fn new(
        url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            username: username.into(),
            password: password.into(),
        }
    }

    fn fill(&self, row: &mut CredentialDto) {
        if row.url.is_empty() {
            row.url = self.url.clone();
        }
        if row.username.is_empty() {
            row.username = self.username.clone();
        }
        if row.password.is_empty() {
            row.password = self.password.clone();
        }
    }
}

impl std::fmt::Debug for ImportDefaults {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImportDefaults")
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Result of an import operation
#[derive(Debug, Clone, Default)]
pub struct ImportResult {
    /// Number of credentials stored
    pub imported: usize,
    /// Ids of the stored credentials, in row order
    pub ids: Vec<CredentialId>,
}

/// Service for importing credentials from CSV
pub struct ImportService<'a> {
    storage: &'a Storage,
    provider: &'a dyn EncryptionProvider,
}

impl<'a> ImportService<'a> {
    /// Create a new import service
    pub fn new(storage: &'a Storage, provider: &'a dyn EncryptionProvider) -> Self {
        Self { storage, provider }
    }

    /// Import every row of `source`
    ///
    /// Rows are decoded and encrypted before anything is stored, so a bad
    /// row or an encryption failure leaves the store untouched.
    pub fn import<R: Read>(&self, defaults: &ImportDefaults, source: R) -> VaultResult<ImportResult> {
        let rows = csv::decode(source)?;

        let mut records = Vec::with_capacity(rows.len());
        for mut row in rows {
            defaults.fill(&mut row);
            records.push(Credential::from_dto(&row, self.provider)?);
        }

        let ids: Vec<CredentialId> = self
            .storage
            .logins()
            .save_all(records)?
            .into_iter()
            .map(CredentialId::from)
            .collect();

        let entry = AuditEntry::new(Operation::Import, EntityKind::Logins, ids.len());
        if let Err(e) = self.storage.audit(&entry) {
            tracing::warn!("Failed to write audit entry: {}", e);
        }
        tracing::info!("Imported {} credentials", ids.len());

        Ok(ImportResult {
            imported: ids.len(),
            ids,
        })
    }
}
