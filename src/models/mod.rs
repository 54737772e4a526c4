//! Core data models for PassWall
//!
//! Login credentials and the adjacent secret types held by the record store,
//! plus the backup snapshot descriptor.

pub mod backup;
pub mod credential;
pub mod ids;
pub mod kind;
pub mod secrets;

pub use backup::BackupDescriptor;
pub use credential::{Credential, CredentialDto};
pub use ids::{BankAccountId, CredentialId, CreditCardId, NoteId, TokenId};
pub use kind::EntityKind;
pub use secrets::{BankAccount, CreditCard, Note, Token};

use serde::{de::DeserializeOwned, Serialize};
use uuid::Uuid;

/// A record the store can persist in one of its collections
///
/// `Default` doubles as the current schema: migration fills fields missing
/// from stored records with the values of a default instance.
pub trait Record: Clone + Default + Serialize + DeserializeOwned + Send + Sync {
    /// Collection this record type lives in
    const KIND: EntityKind;

    /// Store key
    fn record_id(&self) -> Uuid;
}
