//! Encryption provider
//!
//! The capability every engine receives explicitly: it carries the key
//! derived from the active passphrase, so no operation reaches for global
//! configuration to find key material.

use std::fs;
use std::path::Path;

use crate::config::settings::EncryptionSettings;
use crate::error::{VaultError, VaultResult};

use super::encryption::{decrypt, encrypt, EncryptedData};
use super::key_derivation::{derive_key, DerivedKey, KeyDerivationParams};

const VERIFY_MARKER: &str = "passwall_verify";

/// Symmetric encryption keyed by the active passphrase
pub trait EncryptionProvider {
    /// Encrypt raw bytes
    fn encrypt(&self, plaintext: &[u8]) -> VaultResult<EncryptedData>;

    /// Decrypt and authenticate
    fn decrypt(&self, encrypted: &EncryptedData) -> VaultResult<Vec<u8>>;

    /// Encrypt a secret field, returning the compact base64 form stored in records
    fn encrypt_secret(&self, plaintext: &str) -> VaultResult<String> {
        self.encrypt(plaintext.as_bytes())?.to_compact()
    }

    /// Reverse of [`EncryptionProvider::encrypt_secret`]
    fn decrypt_secret(&self, compact: &str) -> VaultResult<String> {
        let encrypted = EncryptedData::from_compact(compact)?;
        let plaintext = self.decrypt(&encrypted)?;
        String::from_utf8(plaintext)
            .map_err(|e| VaultError::Decryption(format!("Invalid UTF-8 in secret: {}", e)))
    }

    /// Read an encrypted container file and return its plaintext
    fn decrypt_file(&self, path: &Path) -> VaultResult<Vec<u8>> {
        let contents = fs::read_to_string(path).map_err(|e| {
            VaultError::Io(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let container: EncryptedData = serde_json::from_str(&contents).map_err(|e| {
            VaultError::Decryption(format!(
                "{} is not an encrypted container: {}",
                path.display(),
                e
            ))
        })?;
        self.decrypt(&container)
    }
}

/// AES-256-GCM provider with an Argon2id key derived from a passphrase
pub struct PassphraseCipher {
    key: DerivedKey,
}

impl PassphraseCipher {
    /// Derive the key for `passphrase` with the given parameters
    pub fn new(passphrase: &str, params: &KeyDerivationParams) -> VaultResult<Self> {
        Ok(Self {
            key: derive_key(passphrase, params)?,
        })
    }

    /// Create fresh encryption settings for a new passphrase
    pub fn setup(
        passphrase: &str,
        params: KeyDerivationParams,
    ) -> VaultResult<(Self, EncryptionSettings)> {
        let cipher = Self::new(passphrase, &params)?;
        let verification = cipher.encrypt_secret(VERIFY_MARKER)?;
        let settings = EncryptionSettings {
            key_params: Some(params),
            verification: Some(verification),
        };
        Ok((cipher, settings))
    }

    /// Derive the key and check it against the stored verification blob
    pub fn unlock(passphrase: &str, settings: &EncryptionSettings) -> VaultResult<Self> {
        let params = settings.key_params.as_ref().ok_or_else(|| {
            VaultError::Config("No passphrase configured; run 'passwall init' first".into())
        })?;
        let cipher = Self::new(passphrase, params)?;

        if let Some(verification) = &settings.verification {
            match cipher.decrypt_secret(verification) {
                Ok(marker) if marker == VERIFY_MARKER => {}
                _ => return Err(VaultError::Decryption("incorrect passphrase".into())),
            }
        }

        Ok(cipher)
    }
}

impl EncryptionProvider for PassphraseCipher {
    fn encrypt(&self, plaintext: &[u8]) -> VaultResult<EncryptedData> {
        encrypt(plaintext, &self.key)
    }

    fn decrypt(&self, encrypted: &EncryptedData) -> VaultResult<Vec<u8>> {
        decrypt(encrypted, &self.key)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Cheap Argon2 parameters with a fixed salt so equal passphrases
    /// produce equal keys across ciphers
    pub fn test_params() -> KeyDerivationParams {
        KeyDerivationParams::with_values("c29tZXNhbHR2YWx1ZQ".into(), 8, 1, 1)
    }

    pub fn test_cipher(passphrase: &str) -> PassphraseCipher {
        PassphraseCipher::new(passphrase, &test_params()).unwrap()
    }
}
