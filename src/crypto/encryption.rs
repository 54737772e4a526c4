//! AES-256-GCM encryption/decryption
//!
//! Provides authenticated encryption for secrets at rest using AES-256-GCM.
//! Each encryption operation generates a unique nonce.

use aes_gcm::aead::rand_core::RngCore;
use aes_gcm::{
    aead::{Aead, KeyInit, OsRng},
    Aes256Gcm, Nonce,
};
use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};

use crate::error::{VaultError, VaultResult};

use super::DerivedKey;

/// Size of the AES-GCM nonce in bytes (96 bits)
const NONCE_SIZE: usize = 12;

/// Encrypted data with associated metadata
///
/// This is also the on-disk backup container, serialized as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedData {
    /// The nonce used for this encryption (base64 encoded)
    pub nonce: String,
    /// The encrypted ciphertext with authentication tag (base64 encoded)
    pub ciphertext: String,
    /// Version for future algorithm upgrades
    #[serde(default = "default_version")]
    pub version: u8,
}

fn default_version() -> u8 {
    1
}

impl EncryptedData {
    fn new(nonce: &[u8], ciphertext: &[u8]) -> Self {
        Self {
            nonce: STANDARD.encode(nonce),
            ciphertext: STANDARD.encode(ciphertext),
            version: 1,
        }
    }

    fn decode_nonce(&self) -> VaultResult<Vec<u8>> {
        STANDARD
            .decode(&self.nonce)
            .map_err(|e| VaultError::Decryption(format!("Invalid nonce encoding: {}", e)))
    }

    fn decode_ciphertext(&self) -> VaultResult<Vec<u8>> {
        STANDARD
            .decode(&self.ciphertext)
            .map_err(|e| VaultError::Decryption(format!("Invalid ciphertext encoding: {}", e)))
    }

    /// Single base64 string `nonce || ciphertext`, the form stored in
    /// a record's secret fields
    pub fn to_compact(&self) -> VaultResult<String> {
        let mut raw = self.decode_nonce()?;
        raw.extend(self.decode_ciphertext()?);
        Ok(STANDARD.encode(raw))
    }

    /// Parse the compact form produced by [`EncryptedData::to_compact`]
    pub fn from_compact(compact: &str) -> VaultResult<Self> {
        let raw = STANDARD
            .decode(compact)
            .map_err(|e| VaultError::Decryption(format!("Invalid secret encoding: {}", e)))?;
        if raw.len() < NONCE_SIZE {
            return Err(VaultError::Decryption(format!(
                "Secret too short: {} bytes",
                raw.len()
            )));
        }
        let (nonce, ciphertext) = raw.split_at(NONCE_SIZE);
        Ok(Self::new(nonce, ciphertext))
    }
}

/// Encrypt plaintext data using AES-256-GCM
pub fn encrypt(plaintext: &[u8], key: &DerivedKey) -> VaultResult<EncryptedData> {
    let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| VaultError::Encryption(format!("Failed to create cipher: {}", e)))?;

    let mut nonce_bytes = [0u8; NONCE_SIZE];
    OsRng.fill_bytes(&mut nonce_bytes);
    let nonce = Nonce::from_slice(&nonce_bytes);

    let ciphertext = cipher
        .encrypt(nonce, plaintext)
        .map_err(|e| VaultError::Encryption(format!("Encryption failed: {}", e)))?;

    Ok(EncryptedData::new(&nonce_bytes, &ciphertext))
}

/// Decrypt ciphertext using AES-256-GCM
pub fn decrypt(encrypted: &EncryptedData, key: &DerivedKey) -> VaultResult<Vec<u8>> {
    if encrypted.version != 1 {
        return Err(VaultError::Decryption(format!(
            "Unsupported encryption version: {}",
            encrypted.version
        )));
    }

    let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| VaultError::Encryption(format!("Failed to create cipher: {}", e)))?;

    let nonce_bytes = encrypted.decode_nonce()?;
    if nonce_bytes.len() != NONCE_SIZE {
        return Err(VaultError::Decryption(format!(
            "Invalid nonce size: expected {}, got {}",
            NONCE_SIZE,
            nonce_bytes.len()
        )));
    }
    let nonce = Nonce::from_slice(&nonce_bytes);

    let ciphertext = encrypted.decode_ciphertext()?;

    cipher.decrypt(nonce, ciphertext.as_ref()).map_err(|_| {
        VaultError::Decryption("invalid passphrase or corrupted data".to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::key_derivation::{derive_key, generate_salt, KeyDerivationParams};

    fn key_for(passphrase: &str) -> DerivedKey {
        let params = KeyDerivationParams::with_values(generate_salt(), 8, 1, 1);
        derive_key(passphrase, &params).unwrap()
    }

    #[test]
    fn test_encrypt_decrypt() {
        let key = key_for("test_passphrase");
        let plaintext = b"Hello, World!";

        let encrypted = encrypt(plaintext, &key).unwrap();
        let decrypted = decrypt(&encrypted, &key).unwrap();

        assert_eq!(plaintext, decrypted.as_slice());
    }

    #[test]
    fn test_different_nonces() {
        let key = key_for("test_passphrase");

        let encrypted1 = encrypt(b"same", &key).unwrap();
        let encrypted2 = encrypt(b"same", &key).unwrap();

        assert_ne!(encrypted1.nonce, encrypted2.nonce);
        assert_ne!(encrypted1.ciphertext, encrypted2.ciphertext);
    }

    #[test]
    fn test_wrong_key_fails() {
        let encrypted = encrypt(b"Hello, World!", &key_for("one")).unwrap();

        let result = decrypt(&encrypted, &key_for("two"));
        assert!(matches!(result, Err(VaultError::Decryption(_))));
    }

    #[test]
    fn test_tampered_ciphertext_fails() {
        let key = key_for("test_passphrase");
        let mut encrypted = encrypt(b"Hello, World!", &key).unwrap();

        let mut ciphertext = STANDARD.decode(&encrypted.ciphertext).unwrap();
        ciphertext[0] ^= 0xFF;
        encrypted.ciphertext = STANDARD.encode(&ciphertext);

        assert!(decrypt(&encrypted, &key).is_err());
    }

    #[test]
    fn test_compact_form() {
        let key = key_for("test_passphrase");
        let encrypted = encrypt(b"s3cret", &key).unwrap();

        let compact = encrypted.to_compact().unwrap();
        let parsed = EncryptedData::from_compact(&compact).unwrap();

        assert_eq!(parsed, encrypted);
        assert_eq!(decrypt(&parsed, &key).unwrap(), b"s3cret");
    }

    #[test]
    fn test_compact_rejects_short_input() {
        let short = STANDARD.encode([1u8, 2, 3]);
        assert!(matches!(
            EncryptedData::from_compact(&short),
            Err(VaultError::Decryption(_))
        ));
    }

    #[test]
    fn test_empty_plaintext() {
        let key = key_for("test_passphrase");

        let encrypted = encrypt(b"", &key).unwrap();
        assert!(decrypt(&encrypted, &key).unwrap().is_empty());
    }
}
