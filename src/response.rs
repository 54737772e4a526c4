//! Uniform response envelope
//!
//! Every command ends in one of these: `{"code", "status", "message"}`.

use serde::{Deserialize, Serialize};

use crate::error::{VaultError, VaultResult};

/// Outcome of one vault operation as reported to the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    /// HTTP-style status code
    pub code: u16,
    /// Short status label
    pub status: String,
    pub message: String,
}

impl Response {
    /// A 200 "Success" response
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            code: 200,
            status: "Success".to_string(),
            message: message.into(),
        }
    }

    /// Map an error to its response
    pub fn from_error(error: &VaultError) -> Self {
        Self {
            code: error.status_code(),
            status: error.status_label().to_string(),
            message: error.to_string(),
        }
    }

    /// Serialize as compact JSON
    pub fn to_json(&self) -> VaultResult<String> {
        serde_json::to_string(self)
            .map_err(|e| VaultError::Json(format!("Failed to serialize response: {}", e)))
    }
}

impl From<&VaultError> for Response {
    fn from(error: &VaultError) -> Self {
        Self::from_error(error)
    }
}
