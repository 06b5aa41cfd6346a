//! # Identity Newtype
//!
//! The raw string a user submits to prove possession of a registered
//! email. The type deliberately applies **no normalization** — no
//! trimming, no case folding, no Unicode normalization. The on-chain
//! registry was populated by hashing exactly the string the issuer
//! registered, so any transformation here would produce silent false
//! negatives for digests that are in fact present.
//!
//! Callers that want a normalized identity must normalize before
//! constructing one.

use serde::{Deserialize, Serialize};

/// A raw, unnormalized identity string (typically an email address).
///
/// Empty identities are representable — the flow controller treats an
/// empty submission as a no-op rather than rejecting it at construction,
/// matching the submit guard in the verification flow.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity(String);

impl Identity {
    /// Wrap a raw identity string, unmodified.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The raw string, exactly as supplied.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the identity is the empty string.
    ///
    /// The flow controller uses this as its submit guard: an empty
    /// submission performs no registry lookup.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for Identity {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for Identity {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl std::fmt::Display for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
