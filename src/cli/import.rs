//! `passwall import`

use std::path::PathBuf;

use clap::Args;

use crate::config::settings::Settings;
use crate::error::VaultResult;
use crate::services::{ImportDefaults, ImportService};
use crate::storage::Storage;
use crate::upload::{UploadIntake, UploadRequest};

use super::passphrase::unlock;
use super::Outcome;

/// Arguments of `passwall import`
#[derive(Args, Debug)]
pub struct ImportArgs {
    /// CSV file with URL,Username,Password columns
    pub file: PathBuf,

    /// URL used for rows with an empty URL
    #[arg(long)]
    pub url: Option<String>,

    /// Username used for rows with an empty username
    #[arg(long)]
    pub username: Option<String>,

    /// Password used for rows with an empty password
    #[arg(long)]
    pub password: Option<String>,
}

impl ImportArgs {
    fn into_request(self) -> VaultResult<UploadRequest> {
        let mut request = UploadRequest::from_path(&self.file)?;
        for (name, value) in [
            ("url", self.url),
            ("username", self.username),
            ("password", self.password),
        ] {
            if let Some(value) = value {
                request = request.with_field(name, value);
            }
        }
        Ok(request)
    }
}

/// Stage the file, import it, then remove the staged copy
pub fn handle_import(storage: &Storage, settings: &Settings, args: ImportArgs) -> VaultResult<Outcome> {
    let cipher = unlock(settings)?;

    let mut request = args.into_request()?;
    let intake = UploadIntake::new(storage.paths().upload_dir(), settings.max_upload_bytes);
    let mut artifact = intake.accept(&mut request)?;

    let defaults = ImportDefaults::new(
        request.field("url").unwrap_or_default(),
        request.field("username").unwrap_or_default(),
        request.field("password").unwrap_or_default(),
    );

    // On error the artifact is dropped, which deletes it
    let result = ImportService::new(storage, &cipher).import(&defaults, &mut artifact)?;
    artifact.close()?;

    Ok(Outcome::success(format!(
        "Import finished successfully! {} credential{} imported.",
        result.imported,
        if result.imported == 1 { "" } else { "s" }
    )))
}
