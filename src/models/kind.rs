//! Entity collections held by the record store

use serde::{Deserialize, Serialize};
use std::fmt;

/// The secret-bearing entity types, one store collection each
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Logins,
    CreditCards,
    BankAccounts,
    Notes,
    Tokens,
}

impl EntityKind {
    /// Every collection, in migration order
    pub fn all() -> [EntityKind; 5] {
        [
            EntityKind::Logins,
            EntityKind::CreditCards,
            EntityKind::BankAccounts,
            EntityKind::Notes,
            EntityKind::Tokens,
        ]
    }

    /// File name of the collection inside the data directory
    pub fn file_name(&self) -> &'static str {
        match self {
            EntityKind::Logins => "logins.json",
            EntityKind::CreditCards => "credit_cards.json",
            EntityKind::BankAccounts => "bank_accounts.json",
            EntityKind::Notes => "notes.json",
            EntityKind::Tokens => "tokens.json",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Logins => write!(f, "logins"),
            EntityKind::CreditCards => write!(f, "credit cards"),
            EntityKind::BankAccounts => write!(f, "bank accounts"),
            EntityKind::Notes => write!(f, "notes"),
            EntityKind::Tokens => write!(f, "tokens"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_names_unique() {
        let mut names: Vec<_> = EntityKind::all().iter().map(|k| k.file_name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 5);
    }

    #[test]
    fn test_serde_snake_case() {
        let json = serde_json::to_string(&EntityKind::CreditCards).unwrap();
        assert_eq!(json, "\"credit_cards\"");
    }
}
