//! Strongly-typed ID wrappers for all entity types
//!
//! Using newtype wrappers prevents accidentally mixing up IDs from different
//! collections at compile time.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Macro to generate ID newtype wrappers
macro_rules! define_id {
    ($name:ident, $display_prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Create a new random ID
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Get the underlying UUID
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $display_prefix, &self.0.to_string()[..8])
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }
    };
}

define_id!(CredentialId, "login-");
define_id!(CreditCardId, "card-");
define_id!(BankAccountId, "bank-");
define_id!(NoteId, "note-");
define_id!(TokenId, "tok-");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_ids() {
        assert_ne!(CredentialId::new(), CredentialId::new());
    }

    #[test]
    fn test_display_prefix() {
        let id = CredentialId::new();
        let shown = id.to_string();
        assert!(shown.starts_with("login-"));
        assert_eq!(shown.len(), "login-".len() + 8);
    }

    #[test]
    fn test_from_store_key() {
        let id = NoteId::new();
        assert_eq!(NoteId::from(*id.as_uuid()), id);
    }

    #[test]
    fn test_serde_transparent() {
        let id = TokenId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id.as_uuid()));
    }
}
