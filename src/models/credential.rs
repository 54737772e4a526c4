//! Login credential model
//!
//! A stored [`Credential`] always carries its password encrypted. The
//! plaintext shape, [`CredentialDto`], only lives in memory, inside an
//! encrypted backup, or in a CSV row.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::ids::CredentialId;
use super::kind::EntityKind;
use super::Record;
use crate::crypto::EncryptionProvider;
use crate::error::VaultResult;

/// A login credential as persisted by the store
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Credential {
    /// Unique identifier
    pub id: CredentialId,

    /// Site or service URL
    #[serde(default)]
    pub url: String,

    /// Account name at that site
    #[serde(default)]
    pub username: String,

    /// Encrypted password (compact base64 of nonce and ciphertext)
    #[serde(default)]
    pub password: String,

    /// When the credential was created
    #[serde(default)]
    pub created_at: DateTime<Utc>,

    /// When the credential was last modified
    #[serde(default)]
    pub updated_at: DateTime<Utc>,
}

impl Credential {
    /// Build a credential, encrypting `password` with the active provider
    pub fn encrypted(
        url: impl Into<String>,
        username: impl Into<String>,
        password: &str,
        provider: &dyn EncryptionProvider,
    ) -> VaultResult<Self> {
        let now = Utc::now();
        Ok(Self {
            id: CredentialId::new(),
            url: url.into(),
            username: username.into(),
            password: provider.encrypt_secret(password)?,
            created_at: now,
            updated_at: now,
        })
    }

    /// Build a credential from its plaintext transfer form
    pub fn from_dto(dto: &CredentialDto, provider: &dyn EncryptionProvider) -> VaultResult<Self> {
        Self::encrypted(dto.url.clone(), dto.username.clone(), &dto.password, provider)
    }

    /// Decrypt into the plaintext transfer form
    pub fn to_dto(&self, provider: &dyn EncryptionProvider) -> VaultResult<CredentialDto> {
        Ok(CredentialDto {
            url: self.url.clone(),
            username: self.username.clone(),
            password: provider.decrypt_secret(&self.password)?,
        })
    }
}

impl Record for Credential {
    const KIND: EntityKind = EntityKind::Logins;

    fn record_id(&self) -> Uuid {
        *self.id.as_uuid()
    }
}

/// Plaintext transfer shape used in backups and CSV rows
///
/// Wiped from memory on drop.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct CredentialDto {
    pub url: String,
    pub username: String,
    pub password: String,
}

impl CredentialDto {
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
}

impl fmt::Debug for CredentialDto {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialDto")
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}
