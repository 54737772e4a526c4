//! Path management for PassWall
//!
//! Provides platform-aware path resolution for configuration, data, backups
//! and staged uploads.
//!
//! ## Path Resolution Order
//!
//! 1. `PASSWALL_DATA_DIR` environment variable (if set)
//! 2. The platform configuration directory for `passwall` (via `directories`)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::VaultError;

/// Manages all paths used by PassWall
#[derive(Debug, Clone)]
pub struct VaultPaths {
    /// Base directory for all PassWall data
    base_dir: PathBuf,
    /// Backup directory override from settings
    backup_override: Option<PathBuf>,
    /// Upload staging directory override from settings
    upload_override: Option<PathBuf>,
}

impl VaultPaths {
    /// Create a new VaultPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home/config directory can be determined.
    pub fn new() -> Result<Self, VaultError> {
        let base_dir = if let Ok(custom) = std::env::var("PASSWALL_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self::with_base_dir(base_dir))
    }

    /// Create VaultPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self {
            base_dir,
            backup_override: None,
            upload_override: None,
        }
    }

    /// Apply directory overrides from settings
    pub fn with_overrides(
        mut self,
        backup_dir: Option<PathBuf>,
        upload_dir: Option<PathBuf>,
    ) -> Self {
        self.backup_override = backup_dir;
        self.upload_override = upload_dir;
        self
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory holding one JSON file per collection
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the backup directory
    pub fn backup_dir(&self) -> PathBuf {
        self.backup_override
            .clone()
            .unwrap_or_else(|| self.base_dir.join("backups"))
    }

    /// Directory where uploaded CSV files are staged before import
    pub fn upload_dir(&self) -> PathBuf {
        self.upload_override
            .clone()
            .unwrap_or_else(|| self.base_dir.join("uploads"))
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Path to a collection file inside the data directory
    pub fn collection_file(&self, file_name: &str) -> PathBuf {
        self.data_dir().join(file_name)
    }

    /// Ensure all required directories exist
    pub fn ensure_directories(&self) -> Result<(), VaultError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| VaultError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| VaultError::Io(format!("Failed to create data directory: {}", e)))?;

        std::fs::create_dir_all(self.backup_dir())
            .map_err(|e| VaultError::Io(format!("Failed to create backup directory: {}", e)))?;

        std::fs::create_dir_all(self.upload_dir())
            .map_err(|e| VaultError::Io(format!("Failed to create upload directory: {}", e)))?;

        Ok(())
    }
}

fn resolve_default_path() -> Result<PathBuf, VaultError> {
    ProjectDirs::from("io", "passwall", "passwall")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| VaultError::Config("Could not determine a home directory".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = VaultPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.data_dir(), temp_dir.path().join("data"));
        assert_eq!(paths.backup_dir(), temp_dir.path().join("backups"));
        assert_eq!(paths.upload_dir(), temp_dir.path().join("uploads"));
    }

    #[test]
    fn test_overrides() {
        let temp_dir = TempDir::new().unwrap();
        let elsewhere = temp_dir.path().join("elsewhere");
        let paths = VaultPaths::with_base_dir(temp_dir.path().to_path_buf())
            .with_overrides(Some(elsewhere.clone()), None);

        assert_eq!(paths.backup_dir(), elsewhere);
        assert_eq!(paths.upload_dir(), temp_dir.path().join("uploads"));
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = VaultPaths::with_base_dir(temp_dir.path().to_path_buf());

        paths.ensure_directories().unwrap();

        assert!(paths.data_dir().exists());
        assert!(paths.backup_dir().exists());
        assert!(paths.upload_dir().exists());
    }

    #[test]
    fn test_file_paths() {
        let temp_dir = TempDir::new().unwrap();
        let paths = VaultPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
        assert_eq!(
            paths.collection_file("logins.json"),
            temp_dir.path().join("data").join("logins.json")
        );
    }
}
