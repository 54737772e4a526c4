//! `passwall init`

use crate::config::{paths::VaultPaths, settings::Settings};
use crate::crypto::{KeyDerivationParams, PassphraseCipher};
use crate::error::VaultResult;

use super::passphrase::new_passphrase;
use super::Outcome;

/// Set up the passphrase and directories of a new vault
///
/// An already initialized vault is left alone.
pub fn handle_init(paths: &VaultPaths, settings: &mut Settings) -> VaultResult<Outcome> {
    if settings.has_passphrase() {
        return Ok(Outcome::success(format!(
            "Vault already initialized at {}",
            paths.base_dir().display()
        )));
    }

    let passphrase = new_passphrase()?;
    let (_cipher, encryption) = PassphraseCipher::setup(&passphrase, KeyDerivationParams::new())?;

    settings.encryption = encryption;
    settings.save(paths)?;
    paths.ensure_directories()?;

    tracing::info!("Initialized vault at {}", paths.base_dir().display());

    Ok(Outcome::success(format!(
        "Vault initialized at {}",
        paths.base_dir().display()
    )))
}
