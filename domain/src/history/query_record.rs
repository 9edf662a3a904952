//! Query record value object

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// One normalized historical user query (Value Object)
///
/// A record is always trimmed and starts with an uppercase character.
/// The only way to build one is through [`QueryRecord::normalize`], so two
/// records compare equal exactly when their normalized text matches.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct QueryRecord(String);

impl QueryRecord {
    /// Normalize raw user input into a record.
    ///
    /// Trims surrounding whitespace and uppercases the first character.
    /// Returns [`DomainError::EmptyQuery`] if nothing is left after trimming.
    pub fn normalize(raw: &str) -> Result<Self, DomainError> {
        let trimmed = raw.trim();
        let mut chars = trimmed.chars();
        let Some(first) = chars.next() else {
            return Err(DomainError::EmptyQuery);
        };

        let mut text = String::with_capacity(trimmed.len());
        text.extend(first.to_uppercase());
        text.push_str(chars.as_str());
        Ok(Self(text))
    }

    /// Get the record text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume and return the inner text
    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for QueryRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for QueryRecord {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::normalize(&value)
    }
}

impl From<QueryRecord> for String {
    fn from(record: QueryRecord) -> Self {
        record.0
    }
}

impl AsRef<str> for QueryRecord {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for QueryRecord {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for QueryRecord {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_trims_and_capitalizes() {
        let record = QueryRecord::normalize(" hello world ").unwrap();
        assert_eq!(record.as_str(), "Hello world");
    }

    #[test]
    fn test_normalize_keeps_rest_of_text() {
        let record = QueryRecord::normalize("what is RUST?").unwrap();
        assert_eq!(record, "What is RUST?");
    }

    #[test]
    fn test_normalize_non_ascii_first_char() {
        let record = QueryRecord::normalize("ärger").unwrap();
        assert_eq!(record, "Ärger");
    }

    #[test]
    fn test_normalize_non_alphabetic_first_char() {
        let record = QueryRecord::normalize("2+2=").unwrap();
        assert_eq!(record, "2+2=");
    }

    #[test]
    fn test_normalize_rejects_blank() {
        assert_eq!(QueryRecord::normalize(""), Err(DomainError::EmptyQuery));
        assert_eq!(QueryRecord::normalize("  \t\n"), Err(DomainError::EmptyQuery));
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = QueryRecord::normalize("  rust lifetimes").unwrap();
        let twice = QueryRecord::normalize(once.as_str()).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_deserialize_normalizes() {
        let record: QueryRecord = serde_json::from_str("\" borrow checker \"").unwrap();
        assert_eq!(record, "Borrow checker");
    }

    #[test]
    fn test_deserialize_rejects_blank() {
        assert!(serde_json::from_str::<QueryRecord>("\"   \"").is_err());
    }
}
