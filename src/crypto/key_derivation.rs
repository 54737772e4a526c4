//! Argon2id key for the vault passphrase

use argon2::password_hash::{rand_core::OsRng, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{VaultError, VaultResult};

/// AES-256 key length
const KEY_LEN: usize = 32;

const DEFAULT_MEMORY_KIB: u32 = 64 * 1024;
const DEFAULT_TIME_COST: u32 = 3;
const DEFAULT_PARALLELISM: u32 = 4;

/// Salt and Argon2id costs, persisted in the vault settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyDerivationParams {
    /// Unpadded base64 salt, generated once at `passwall init`
    pub salt: String,
    /// Memory cost in KiB
    pub memory_cost: u32,
    pub time_cost: u32,
    pub parallelism: u32,
}

impl KeyDerivationParams {
    /// Default costs with a fresh salt
    pub fn new() -> Self {
        Self::with_values(
            generate_salt(),
            DEFAULT_MEMORY_KIB,
            DEFAULT_TIME_COST,
            DEFAULT_PARALLELISM,
        )
    }

    pub fn with_values(salt: String, memory_cost: u32, time_cost: u32, parallelism: u32) -> Self {
        Self {
            salt,
            memory_cost,
            time_cost,
            parallelism,
        }
    }

    fn hasher(&self) -> VaultResult<Argon2<'static>> {
        let params = Params::new(
            self.memory_cost,
            self.time_cost,
            self.parallelism,
            Some(KEY_LEN),
        )
        .map_err(|e| VaultError::Encryption(format!("Invalid Argon2 parameters: {}", e)))?;

        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }

    fn salt_bytes(&self) -> VaultResult<Vec<u8>> {
        let salt = SaltString::from_b64(&self.salt)
            .map_err(|e| VaultError::Encryption(format!("Invalid salt: {}", e)))?;

        let mut buf = [0u8; 64];
        let bytes = salt
            .as_salt()
            .decode_b64(&mut buf)
            .map_err(|e| VaultError::Encryption(format!("Invalid salt: {}", e)))?;
        Ok(bytes.to_vec())
    }
}

impl Default for KeyDerivationParams {
    fn default() -> Self {
        Self::new()
    }
}

/// Generate a fresh random salt string
pub fn generate_salt() -> String {
    SaltString::generate(&mut OsRng).to_string()
}

/// A derived 256-bit key, wiped from memory on drop
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey {
    key: [u8; KEY_LEN],
}

impl DerivedKey {
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.key
    }
}

/// Derive the vault key from a passphrase
pub fn derive_key(passphrase: &str, params: &KeyDerivationParams) -> VaultResult<DerivedKey> {
    let salt = params.salt_bytes()?;
    let mut derived = DerivedKey { key: [0u8; KEY_LEN] };

    params
        .hasher()?
        .hash_password_into(passphrase.as_bytes(), &salt, &mut derived.key)
        .map_err(|e| VaultError::Encryption(format!("Key derivation failed: {}", e)))?;

    Ok(derived)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cheap_params() -> KeyDerivationParams {
        KeyDerivationParams::with_values(generate_salt(), 8, 1, 1)
    }

    #[test]
    fn test_key_is_deterministic_per_salt() {
        let params = cheap_params();
        let key1 = derive_key("vault passphrase", &params).unwrap();
        let key2 = derive_key("vault passphrase", &params).unwrap();
        assert_eq!(key1.as_bytes(), key2.as_bytes());

        let other = derive_key("vault passphrase", &cheap_params()).unwrap();
        assert_ne!(key1.as_bytes(), other.as_bytes());
    }

    #[test]
    fn test_passphrase_changes_key() {
        let params = cheap_params();
        let key1 = derive_key("passphrase1", &params).unwrap();
        let key2 = derive_key("passphrase2", &params).unwrap();
        assert_ne!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_new_uses_default_costs() {
        let params = KeyDerivationParams::new();
        assert_eq!(params.memory_cost, 64 * 1024);
        assert!(!params.salt.is_empty());
        assert_ne!(params.salt, KeyDerivationParams::new().salt);
    }

    #[test]
    fn test_invalid_salt_rejected() {
        let params = KeyDerivationParams::with_values("!!".into(), 8, 1, 1);
        assert!(matches!(
            derive_key("x", &params),
            Err(VaultError::Encryption(_))
        ));
    }

    #[test]
    fn test_invalid_costs_rejected() {
        let params = KeyDerivationParams::with_values(generate_salt(), 8, 0, 1);
        assert!(matches!(
            derive_key("x", &params),
            Err(VaultError::Encryption(_))
        ));
    }
}
