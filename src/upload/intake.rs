//! Size and type checks, then staging to a temporary file

use std::fs;
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::{UploadRejection, VaultError, VaultResult};

use super::request::{UploadRequest, FILE_FIELD};

/// File name prefix of staged uploads
pub const IMPORT_FILE_PREFIX: &str = "passwall-import-";

const ACCEPTED_EXTENSION: &str = "csv";

/// Accepts uploads into a staging directory
#[derive(Debug, Clone)]
pub struct UploadIntake {
    upload_dir: PathBuf,
    max_bytes: u64,
}

impl UploadIntake {
    pub fn new(upload_dir: PathBuf, max_bytes: u64) -> Self {
        Self {
            upload_dir,
            max_bytes,
        }
    }

    /// Validate the upload and stage its `file` part
    ///
    /// Text fields stay on the request for the caller. The returned artifact
    /// is positioned at its start.
    pub fn accept(&self, request: &mut UploadRequest) -> VaultResult<UploadedArtifact> {
        if let Some(declared) = request.content_length {
            if declared > self.max_bytes {
                return Err(self.too_large(declared));
            }
        }

        let part = request
            .take_file(FILE_FIELD)
            .ok_or(UploadRejection::MissingFile)?;

        let extension = Path::new(&part.filename)
            .extension()
            .map(|e| e.to_string_lossy().into_owned());
        if extension.as_deref() != Some(ACCEPTED_EXTENSION) {
            return Err(UploadRejection::UnsupportedFileType {
                extension: extension.map(|e| format!(".{}", e)).unwrap_or_default(),
            }
            .into());
        }

        fs::create_dir_all(&self.upload_dir).map_err(|e| {
            VaultError::Io(format!(
                "Failed to create upload directory {}: {}",
                self.upload_dir.display(),
                e
            ))
        })?;

        let mut file = tempfile::Builder::new()
            .prefix(IMPORT_FILE_PREFIX)
            .suffix(".csv")
            .tempfile_in(&self.upload_dir)
            .map_err(|e| VaultError::Io(format!("Failed to create upload file: {}", e)))?;

        // One byte past the limit is enough to know it was exceeded
        let mut limited = part.reader.take(self.max_bytes + 1);
        let size = io::copy(&mut limited, &mut file)
            .map_err(|e| VaultError::Io(format!("Failed to store upload: {}", e)))?;
        if size > self.max_bytes {
            return Err(self.too_large(size));
        }

        file.flush()
            .map_err(|e| VaultError::Io(format!("Failed to store upload: {}", e)))?;
        file.seek(SeekFrom::Start(0))
            .map_err(|e| VaultError::Io(format!("Failed to rewind upload: {}", e)))?;

        tracing::debug!("Staged upload {} ({} bytes)", file.path().display(), size);

        Ok(UploadedArtifact { file, size })
    }

    fn too_large(&self, actual: u64) -> VaultError {
        UploadRejection::PayloadTooLarge {
            limit: self.max_bytes,
            actual,
        }
        .into()
    }
}

/// A staged upload
///
/// The backing file is deleted when the artifact is dropped; [`close`]
/// deletes it eagerly and reports failures.
///
/// [`close`]: UploadedArtifact::close
#[derive(Debug)]
pub struct UploadedArtifact {
    file: NamedTempFile,
    size: u64,
}

impl UploadedArtifact {
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Bytes staged
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Delete the staged file
    pub fn close(self) -> VaultResult<()> {
        let path = self.file.path().to_path_buf();
        self.file.close().map_err(|e| {
            VaultError::Io(format!("Failed to remove upload {}: {}", path.display(), e))
        })
    }
}

impl Read for UploadedArtifact {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.file.read(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::DEFAULT_MAX_UPLOAD_BYTES;
    use std::io::Cursor;
    use tempfile::TempDir;

    const GOOD_CSV: &str = "URL,Username,Password\nhttps://a.example,alice,pw\n";

    fn create_test_intake() -> (TempDir, UploadIntake) {
        let temp_dir = TempDir::new().unwrap();
        let intake = UploadIntake::new(temp_dir.path().join("uploads"), DEFAULT_MAX_UPLOAD_BYTES);
        (temp_dir, intake)
    }

    fn staged_files(intake: &UploadIntake) -> usize {
        fs::read_dir(&intake.upload_dir)
            .map(|entries| entries.count())
            .unwrap_or(0)
    }

    #[test]
    fn test_accepts_csv() {
        let (_temp, intake) = create_test_intake();
        let mut request = UploadRequest::new()
            .with_content_length(GOOD_CSV.len() as u64)
            .with_file(FILE_FIELD, "logins.csv", Cursor::new(GOOD_CSV.as_bytes().to_vec()));

        let mut artifact = intake.accept(&mut request).unwrap();

        let name = artifact.path().file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with(IMPORT_FILE_PREFIX));
        assert!(name.ends_with(".csv"));
        assert_eq!(artifact.size(), GOOD_CSV.len() as u64);

        let mut contents = String::new();
        artifact.read_to_string(&mut contents).unwrap();
        assert_eq!(contents, GOOD_CSV);
    }

    #[test]
    fn test_rejects_other_extension() {
        let (_temp, intake) = create_test_intake();
        let mut request =
            UploadRequest::new().with_file(FILE_FIELD, "x.txt", Cursor::new(b"a".to_vec()));

        let err = intake.accept(&mut request).unwrap_err();
        assert_eq!(err.status_code(), 415);
        assert_eq!(err.to_string(), "Upload rejected: .txt unsupported filetype");
        assert_eq!(staged_files(&intake), 0);
    }

    #[test]
    fn test_rejects_missing_extension_and_uppercase() {
        let (_temp, intake) = create_test_intake();

        for name in ["logins", "logins.CSV"] {
            let mut request =
                UploadRequest::new().with_file(FILE_FIELD, name, Cursor::new(b"a".to_vec()));
            assert_eq!(intake.accept(&mut request).unwrap_err().status_code(), 415);
        }
    }

    #[test]
    fn test_rejects_declared_oversize_before_reading() {
        let (_temp, intake) = create_test_intake();
        let mut request = UploadRequest::new()
            .with_content_length(11 << 20)
            .with_file(FILE_FIELD, "big.csv", Cursor::new(Vec::new()));

        let err = intake.accept(&mut request).unwrap_err();
        assert!(matches!(
            err,
            VaultError::UploadRejected(UploadRejection::PayloadTooLarge { actual, .. })
                if actual == 11 << 20
        ));
        assert_eq!(staged_files(&intake), 0);
    }

    #[test]
    fn test_rejects_undeclared_oversize_and_cleans_up() {
        let (_temp, intake) = create_test_intake();
        let body = io::repeat(b'a').take(11 << 20);
        let mut request = UploadRequest::new().with_file(FILE_FIELD, "big.csv", body);

        let err = intake.accept(&mut request).unwrap_err();
        assert_eq!(err.status_code(), 413);
        assert_eq!(staged_files(&intake), 0);
    }

    #[test]
    fn test_exactly_at_limit_accepted() {
        let temp_dir = TempDir::new().unwrap();
        let intake = UploadIntake::new(temp_dir.path().to_path_buf(), 16);
        let mut request =
            UploadRequest::new().with_file(FILE_FIELD, "a.csv", Cursor::new(vec![b'x'; 16]));

        assert_eq!(intake.accept(&mut request).unwrap().size(), 16);
    }

    #[test]
    fn test_missing_file_part() {
        let (_temp, intake) = create_test_intake();
        let mut request = UploadRequest::new().with_field("url", "x");

        let err = intake.accept(&mut request).unwrap_err();
        assert!(matches!(
            err,
            VaultError::UploadRejected(UploadRejection::MissingFile)
        ));
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_artifact_deleted_on_drop() {
        let (_temp, intake) = create_test_intake();
        let mut request =
            UploadRequest::new().with_file(FILE_FIELD, "a.csv", Cursor::new(GOOD_CSV.as_bytes().to_vec()));

        let artifact = intake.accept(&mut request).unwrap();
        let path = artifact.path().to_path_buf();
        assert!(path.exists());

        drop(artifact);
        assert!(!path.exists());
    }

    #[test]
    fn test_close_removes_file() {
        let (_temp, intake) = create_test_intake();
        let mut request =
            UploadRequest::new().with_file(FILE_FIELD, "a.csv", Cursor::new(GOOD_CSV.as_bytes().to_vec()));

        let artifact = intake.accept(&mut request).unwrap();
        let path = artifact.path().to_path_buf();
        artifact.close().unwrap();
        assert!(!path.exists());
    }
}
