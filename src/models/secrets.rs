//! Adjacent secret entity types
//!
//! Cards, bank accounts, notes and tokens share the store with login
//! credentials. Their secret fields hold ciphertext in the same compact form
//! as [`super::Credential::password`]; this crate only migrates them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ids::{BankAccountId, CreditCardId, NoteId, TokenId};
use super::kind::EntityKind;
use super::Record;

/// A payment card
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreditCard {
    pub id: CreditCardId,
    #[serde(default)]
    pub card_name: String,
    #[serde(default)]
    pub cardholder_name: String,
    #[serde(default)]
    pub card_type: String,
    /// Encrypted
    #[serde(default)]
    pub number: String,
    /// Encrypted
    #[serde(default)]
    pub verification_number: String,
    #[serde(default)]
    pub expiry_date: String,
    #[serde(default)]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: DateTime<Utc>,
}

impl Record for CreditCard {
    const KIND: EntityKind = EntityKind::CreditCards;

    fn record_id(&self) -> Uuid {
        *self.id.as_uuid()
    }
}

/// A bank account with online-banking password
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BankAccount {
    pub id: BankAccountId,
    #[serde(default)]
    pub bank_name: String,
    #[serde(default)]
    pub bank_code: String,
    #[serde(default)]
    pub account_name: String,
    #[serde(default)]
    pub account_number: String,
    #[serde(default)]
    pub iban: String,
    #[serde(default)]
    pub currency: String,
    /// Encrypted
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: DateTime<Utc>,
}

impl Record for BankAccount {
    const KIND: EntityKind = EntityKind::BankAccounts;

    fn record_id(&self) -> Uuid {
        *self.id.as_uuid()
    }
}

/// A secure note
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    #[serde(default)]
    pub title: String,
    /// Encrypted
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: DateTime<Utc>,
}

impl Record for Note {
    const KIND: EntityKind = EntityKind::Notes;

    fn record_id(&self) -> Uuid {
        *self.id.as_uuid()
    }
}

/// A session token issued to a user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub id: TokenId,
    #[serde(default)]
    pub user_id: u64,
    #[serde(default)]
    pub uuid: String,
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub expiry_time: DateTime<Utc>,
}

impl Record for Token {
    const KIND: EntityKind = EntityKind::Tokens;

    fn record_id(&self) -> Uuid {
        *self.id.as_uuid()
    }
}
