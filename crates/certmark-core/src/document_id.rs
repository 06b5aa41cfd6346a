//! # Registry Document Identifiers
//!
//! The registry maps an identity digest to a hex document identifier.
//! A well-known all-zero value is the **sentinel**: it means "no
//! certificate was ever issued for this digest" and must never be used
//! to fetch a document.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Character length of the sentinel identifier (a bytes32 in hex).
const SENTINEL_LEN: usize = 64;

/// A hex document identifier resolved from the registry.
///
/// Validates at construction: non-empty, ASCII hex only. The string is
/// kept exactly as the registry returned it — it doubles as the store
/// fetch path and the watermark text, and the store may be
/// case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    /// Construct a validated identifier from a hex string.
    pub fn new(raw: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(ValidationError::EmptyDocumentId);
        }
        if let Some((position, found)) =
            raw.char_indices().find(|(_, c)| !c.is_ascii_hexdigit())
        {
            return Err(ValidationError::InvalidHexCharacter { found, position });
        }
        Ok(Self(raw))
    }

    /// The sentinel identifier: 64 zero hex characters, "no record".
    pub fn sentinel() -> Self {
        Self("0".repeat(SENTINEL_LEN))
    }

    /// True when this identifier is the all-zero sentinel.
    pub fn is_sentinel(&self) -> bool {
        self.0.len() == SENTINEL_LEN && self.0.bytes().all(|b| b == b'0')
    }

    /// The hex identifier, verbatim as the registry returned it.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for DocumentId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for DocumentId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_is_64_zeros() {
        let s = DocumentId::sentinel();
        assert_eq!(s.as_str(), "0".repeat(64));
        assert!(s.is_sentinel());
    }

    #[test]
    fn non_sentinel_identifier() {
        let id = DocumentId::new("abc123").unwrap();
        assert!(!id.is_sentinel());
        assert_eq!(id.as_str(), "abc123");
    }

    #[test]
    fn short_all_zero_string_is_not_the_sentinel() {
        let id = DocumentId::new("0000").unwrap();
        assert!(!id.is_sentinel());
    }

    #[test]
    fn identifier_casing_is_preserved() {
        let id = DocumentId::new("ABC123").unwrap();
        assert_eq!(id.as_str(), "ABC123");
        assert_ne!(id, DocumentId::new("abc123").unwrap());
    }

    #[test]
    fn empty_identifier_is_rejected() {
        assert_eq!(
            DocumentId::new("").unwrap_err(),
            ValidationError::EmptyDocumentId
        );
    }

    #[test]
    fn non_hex_identifier_is_rejected() {
        let err = DocumentId::new("abcg").unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidHexCharacter {
                found: 'g',
                position: 3
            }
        );
    }

    #[test]
    fn deserialize_routes_through_validation() {
        let ok: DocumentId = serde_json::from_str("\"abc123\"").unwrap();
        assert_eq!(ok.as_str(), "abc123");
        let bad: Result<DocumentId, _> = serde_json::from_str("\"not-hex\"");
        assert!(bad.is_err());
    }
}
