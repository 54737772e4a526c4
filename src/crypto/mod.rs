//! Cryptographic functions for PassWall
//!
//! Provides AES-256-GCM encryption with Argon2id key derivation, exposed to
//! the rest of the crate through the [`EncryptionProvider`] trait.

pub mod encryption;
pub mod key_derivation;
pub mod provider;
pub mod secure_memory;

pub use encryption::{decrypt, encrypt, EncryptedData};
pub use key_derivation::{derive_key, DerivedKey, KeyDerivationParams};
pub use provider::{EncryptionProvider, PassphraseCipher};
pub use secure_memory::SecureString;
