//! `passwall export`

use std::io;
use std::path::PathBuf;

use crate::config::settings::Settings;
use crate::error::{VaultError, VaultResult};
use crate::services::{ExportService, EXPORT_FILE_NAME};
use crate::storage::{write_bytes_atomic, Storage};

use super::passphrase::unlock;
use super::Outcome;

/// Export credentials as CSV to `output`, or to stdout
///
/// A directory as `output` receives `PassWall.csv`. CSV on stdout leaves no
/// room for a JSON response, so `json` requires `output`.
pub fn handle_export(
    storage: &Storage,
    settings: &Settings,
    output: Option<PathBuf>,
    json: bool,
) -> VaultResult<Outcome> {
    if json && output.is_none() {
        return Err(VaultError::InvalidRequest(
            "--json needs --output; CSV written to stdout has no JSON response".into(),
        ));
    }

    let cipher = unlock(settings)?;
    let service = ExportService::new(storage, &cipher);

    match output {
        Some(path) => {
            let path = if path.is_dir() {
                path.join(EXPORT_FILE_NAME)
            } else {
                path
            };

            let mut buffer = Vec::new();
            let count = service.export_to(&mut buffer)?;
            write_bytes_atomic(&path, &buffer)?;

            Ok(Outcome::success(format!(
                "Exported {} credentials to {}",
                count,
                path.display()
            )))
        }
        None => {
            service.export_to(io::stdout().lock())?;
            Ok(Outcome::Printed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::VaultPaths;
    use tempfile::TempDir;

    #[test]
    fn test_json_to_stdout_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::new(VaultPaths::with_base_dir(temp_dir.path().to_path_buf())).unwrap();

        let err = handle_export(&storage, &Settings::default(), None, true).unwrap_err();
        assert!(matches!(err, VaultError::InvalidRequest(_)));
        assert_eq!(err.status_code(), 422);
    }
}
