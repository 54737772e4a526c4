//! Passphrase input
//!
//! Read from `PASSWALL_PASSPHRASE` when set, otherwise prompted for with
//! hidden input.

use crate::config::settings::Settings;
use crate::crypto::{PassphraseCipher, SecureString};
use crate::error::{VaultError, VaultResult};

/// Environment variable holding the vault passphrase
pub const PASSPHRASE_ENV: &str = "PASSWALL_PASSPHRASE";

const MIN_PASSPHRASE_LEN: usize = 8;

/// Unlock the vault with the configured passphrase
pub fn unlock(settings: &Settings) -> VaultResult<PassphraseCipher> {
    if !settings.has_passphrase() {
        return Err(VaultError::Config(
            "Vault is not initialized; run 'passwall init' first".into(),
        ));
    }

    let passphrase = read_passphrase("Vault passphrase: ")?;
    PassphraseCipher::unlock(&passphrase, &settings.encryption)
}

/// Ask for a new passphrase, confirming it when typed interactively
pub fn new_passphrase() -> VaultResult<SecureString> {
    if let Some(passphrase) = from_env() {
        check_length(&passphrase)?;
        return Ok(passphrase);
    }

    loop {
        let first = prompt("Enter new passphrase: ")?;
        if let Err(e) = check_length(&first) {
            println!("{}. Please try again.", e);
            continue;
        }

        let second = prompt("Confirm passphrase: ")?;
        if *first != *second {
            println!("Passphrases do not match. Please try again.");
            continue;
        }

        return Ok(first);
    }
}

fn read_passphrase(message: &str) -> VaultResult<SecureString> {
    match from_env() {
        Some(passphrase) => Ok(passphrase),
        None => prompt(message),
    }
}

fn from_env() -> Option<SecureString> {
    std::env::var(PASSPHRASE_ENV).ok().map(SecureString::from)
}

/// Prompt for a passphrase (hidden input)
fn prompt(message: &str) -> VaultResult<SecureString> {
    rpassword::prompt_password(message)
        .map(SecureString::from)
        .map_err(|e| VaultError::Config(format!("Failed to read passphrase: {}", e)))
}

fn check_length(passphrase: &SecureString) -> VaultResult<()> {
    if passphrase.len() < MIN_PASSPHRASE_LEN {
        return Err(VaultError::Validation(format!(
            "Passphrase must be at least {} characters",
            MIN_PASSPHRASE_LEN
        )));
    }
    Ok(())
}
