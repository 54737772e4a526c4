//! Multipart form model

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{VaultError, VaultResult};

/// Form field carrying the uploaded file
pub const FILE_FIELD: &str = "file";

/// A file part of a multipart form
pub struct FilePart {
    /// Form field name
    pub field: String,
    /// Client-supplied file name
    pub filename: String,
    /// Content stream
    pub reader: Box<dyn Read + Send>,
}

impl std::fmt::Debug for FilePart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilePart")
            .field("field", &self.field)
            .field("filename", &self.filename)
            .finish_non_exhaustive()
    }
}

/// An upload as received: declared body length, text fields and file parts
#[derive(Debug, Default)]
pub struct UploadRequest {
    /// Declared total body length, when the client sent one
    pub content_length: Option<u64>,
    fields: Vec<(String, String)>,
    files: Vec<FilePart>,
}

impl UploadRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_content_length(mut self, length: u64) -> Self {
        self.content_length = Some(length);
        self
    }

    /// Add a text field
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    /// Add a file part
    pub fn with_file(
        mut self,
        field: impl Into<String>,
        filename: impl Into<String>,
        reader: impl Read + Send + 'static,
    ) -> Self {
        self.files.push(FilePart {
            field: field.into(),
            filename: filename.into(),
            reader: Box::new(reader),
        });
        self
    }

    /// Build a request uploading a local file as the `file` part
    ///
    /// The file's size is the declared body length.
    pub fn from_path(path: &Path) -> VaultResult<Self> {
        let file = File::open(path)
            .map_err(|e| VaultError::Io(format!("Failed to open {}: {}", path.display(), e)))?;
        let length = file
            .metadata()
            .map_err(|e| VaultError::Io(format!("Failed to stat {}: {}", path.display(), e)))?
            .len();
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(Self::new()
            .with_content_length(length)
            .with_file(FILE_FIELD, filename, file))
    }

    /// Value of a text field; the first one wins when repeated
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Remove and return the file part for `field`
    pub fn take_file(&mut self, field: &str) -> Option<FilePart> {
        let index = self.files.iter().position(|p| p.field == field)?;
        Some(self.files.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::TempDir;

    #[test]
    fn test_fields() {
        let request = UploadRequest::new()
            .with_field("url", "https://default.example")
            .with_field("url", "ignored");

        assert_eq!(request.field("url"), Some("https://default.example"));
        assert_eq!(request.field("username"), None);
    }

    #[test]
    fn test_take_file() {
        let mut request =
            UploadRequest::new().with_file(FILE_FIELD, "a.csv", Cursor::new(b"x".to_vec()));

        assert_eq!(request.take_file(FILE_FIELD).unwrap().filename, "a.csv");
        assert!(request.take_file(FILE_FIELD).is_none());
    }

    #[test]
    fn test_from_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("logins.csv");
        std::fs::write(&path, "URL,Username,Password\n").unwrap();

        let mut request = UploadRequest::from_path(&path).unwrap();
        assert_eq!(request.content_length, Some(22));
        assert_eq!(request.take_file(FILE_FIELD).unwrap().filename, "logins.csv");
    }

    #[test]
    fn test_from_missing_path() {
        let temp_dir = TempDir::new().unwrap();
        assert!(UploadRequest::from_path(&temp_dir.path().join("nope.csv")).is_err());
    }
}
