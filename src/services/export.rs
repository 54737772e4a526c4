//! CSV export service

use std::io::Write;

use crate::audit::{AuditEntry, Operation};
use crate::crypto::EncryptionProvider;
use crate::error::{VaultError, VaultResult};
use crate::interchange::csv;
use crate::models::{CredentialDto, EntityKind};
use crate::storage::{Collection, Storage};

/// Suggested attachment name for exported CSV
pub const EXPORT_FILE_NAME: &str = "PassWall.csv";

/// Service for exporting credentials to CSV
pub struct ExportService<'a> {
    storage: &'a Storage,
    provider: &'a dyn EncryptionProvider,
}

impl<'a> ExportService<'a> {
    /// Create a new export service
    pub fn new(storage: &'a Storage, provider: &'a dyn EncryptionProvider) -> Self {
        Self { storage, provider }
    }

    /// Export every credential as CSV bytes
    pub fn export(&self) -> VaultResult<Vec<u8>> {
        let mut buffer = Vec::new();
        self.export_to(&mut buffer)?;
        Ok(buffer)
    }

    /// Export every credential as CSV into `writer`, returning the row count
    ///
    /// All passwords are decrypted before the first byte is written; one
    /// undecryptable record aborts the export with nothing written.
    pub fn export_to<W: Write>(&self, writer: W) -> VaultResult<usize> {
        let rows = self.decrypt_all()?;
        csv::encode_to(writer, &rows)?;

        let entry = AuditEntry::new(Operation::Export, EntityKind::Logins, rows.len());
        if let Err(e) = self.storage.audit(&entry) {
            tracing::warn!("Failed to write audit entry: {}", e);
        }
        tracing::info!("Exported {} credentials", rows.len());

        Ok(rows.len())
    }

    fn decrypt_all(&self) -> VaultResult<Vec<CredentialDto>> {
        self.storage
            .logins()
            .find_all()?
            .iter()
            .map(|credential| {
                credential.to_dto(self.provider).map_err(|e| match e {
                    VaultError::Decryption(msg) => {
                        VaultError::Decryption(format!("credential {}: {}", credential.id, msg))
                    }
                    other => other,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::VaultPaths;
    use crate::crypto::provider::testing::test_cipher;
    use crate::models::Credential;
    use crate::services::{ImportDefaults, ImportService};
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = VaultPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_export_empty_store() {
        let (_temp, storage) = create_test_storage();
        let cipher = test_cipher("pw");

        let bytes = ExportService::new(&storage, &cipher).export().unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), "URL,Username,Password\n");
    }

    #[test]
    fn test_export_in_store_order() {
        let (_temp, storage) = create_test_storage();
        let cipher = test_cipher("pw");

        for (url, user, pass) in [("https://z.example", "zed", "1"), ("https://a.example", "amy", "2")] {
            storage
                .logins()
                .save(Credential::encrypted(url, user, pass, &cipher).unwrap())
                .unwrap();
        }

        let csv_text = String::from_utf8(ExportService::new(&storage, &cipher).export().unwrap()).unwrap();
        assert_eq!(
            csv_text,
            "URL,Username,Password\nhttps://z.example,zed,1\nhttps://a.example,amy,2\n"
        );
    }

    #[test]
    fn test_import_then_export_round_trip() {
        let (_temp, storage) = create_test_storage();
        let cipher = test_cipher("pw");
        let original = "URL,Username,Password\n\"https://x.example/?q=a,b\",\"o\"\"brien\",\"multi\nline\"\n";

        ImportService::new(&storage, &cipher)
            .import(&ImportDefaults::default(), original.as_bytes())
            .unwrap();
        let exported = ExportService::new(&storage, &cipher).export().unwrap();

        assert_eq!(String::from_utf8(exported).unwrap(), original);
    }

    #[test]
    fn test_undecryptable_record_aborts() {
        let (_temp, storage) = create_test_storage();
        let cipher = test_cipher("pw");

        storage
            .logins()
            .save(Credential::encrypted("a", "b", "c", &cipher).unwrap())
            .unwrap();
        let foreign = Credential::encrypted("d", "e", "f", &test_cipher("other")).unwrap();
        let foreign_id = foreign.id;
        storage.logins().save(foreign).unwrap();

        let mut out = Vec::new();
        let err = ExportService::new(&storage, &cipher)
            .export_to(&mut out)
            .unwrap_err();

        assert!(err.is_decryption());
        assert!(err.to_string().contains(&foreign_id.to_string()));
        assert!(out.is_empty());
    }
}
