//! Storage layer for PassWall
//!
//! The record store: one JSON collection per entity type with atomic writes,
//! lock-guarded in-memory state and additive migration.

pub mod collection;
pub mod file_io;
pub mod migrate;

pub use collection::{Collection, JsonCollection};
pub use file_io::{read_json, write_bytes_atomic, write_json_atomic};
pub use migrate::{run_migrations, Migrate, MigrationOutcome, MigrationReport};

use crate::audit::{AuditEntry, AuditLogger};
use crate::config::paths::VaultPaths;
use crate::error::VaultError;
use crate::models::{BankAccount, Credential, CreditCard, Note, Record, Token};

/// Main storage coordinator that provides access to all collections
pub struct Storage {
    paths: VaultPaths,
    logins: JsonCollection<Credential>,
    credit_cards: JsonCollection<CreditCard>,
    bank_accounts: JsonCollection<BankAccount>,
    notes: JsonCollection<Note>,
    tokens: JsonCollection<Token>,
    audit: AuditLogger,
}

fn collection_for<T: Record>(paths: &VaultPaths) -> JsonCollection<T> {
    JsonCollection::new(paths.collection_file(T::KIND.file_name()))
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: VaultPaths) -> Result<Self, VaultError> {
        paths.ensure_directories()?;

        Ok(Self {
            logins: collection_for(&paths),
            credit_cards: collection_for(&paths),
            bank_accounts: collection_for(&paths),
            notes: collection_for(&paths),
            tokens: collection_for(&paths),
            audit: AuditLogger::new(paths.audit_log()),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &VaultPaths {
        &self.paths
    }

    pub fn logins(&self) -> &JsonCollection<Credential> {
        &self.logins
    }

    pub fn credit_cards(&self) -> &JsonCollection<CreditCard> {
        &self.credit_cards
    }

    pub fn bank_accounts(&self) -> &JsonCollection<BankAccount> {
        &self.bank_accounts
    }

    pub fn notes(&self) -> &JsonCollection<Note> {
        &self.notes
    }

    pub fn tokens(&self) -> &JsonCollection<Token> {
        &self.tokens
    }

    /// Every collection, in migration order
    pub fn migratables(&self) -> [&dyn Migrate; 5] {
        [
            &self.logins,
            &self.credit_cards,
            &self.bank_accounts,
            &self.notes,
            &self.tokens,
        ]
    }

    /// Load all collections from disk
    pub fn load_all(&self) -> Result<(), VaultError> {
        self.logins.load()?;
        self.credit_cards.load()?;
        self.bank_accounts.load()?;
        self.notes.load()?;
        self.tokens.load()?;
        Ok(())
    }

    /// Append a vault operation to the audit log
    pub fn audit(&self, entry: &AuditEntry) -> Result<(), VaultError> {
        self.audit.log(entry)
    }

    /// The audit logger
    pub fn audit_log(&self) -> &AuditLogger {
        &self.audit
    }
}
