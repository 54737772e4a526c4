//! Backup snapshot metadata

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A snapshot file in the backup directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupDescriptor {
    /// File name inside the backup directory
    pub name: String,
    /// File modification time
    pub created_at: DateTime<Utc>,
}

impl BackupDescriptor {
    pub fn new(name: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_shape() {
        let created_at = DateTime::parse_from_rfc3339("2025-03-01T10:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let descriptor = BackupDescriptor::new("passwall-20250301-100000.bak", created_at);

        let json = serde_json::to_value(&descriptor).unwrap();
        assert_eq!(json["name"], "passwall-20250301-100000.bak");
        assert_eq!(json["createdAt"], "2025-03-01T10:00:00Z");
    }
}
