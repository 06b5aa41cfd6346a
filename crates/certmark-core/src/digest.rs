//! # SHA-256 Identity Digests
//!
//! Computes the registry key for an [`Identity`]. This is the only
//! sanctioned digest path in the workspace: every component that needs
//! "the hash of the identity" goes through [`Digest::of_identity`], so
//! the preimage scheme cannot drift between call sites.
//!
//! ## Preimage Scheme
//!
//! The digest is SHA-256 over the raw UTF-8 bytes of the identity string,
//! with no trimming, case folding, or other normalization. The registry
//! was populated off-chain with exactly this scheme; any mismatch in
//! encoding or casing would make a registered digest unfindable without
//! any error being reported.

use serde::{Deserialize, Serialize, Serializer};
use sha2::{Digest as _, Sha256};

use crate::error::ValidationError;
use crate::identity::Identity;

/// Number of bytes in a digest.
pub const DIGEST_LEN: usize = 32;

/// A SHA-256 digest of an identity string.
///
/// Renders as 64 lowercase hex characters with no prefix, the form the
/// registry's `checkHash` call expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Digest([u8; DIGEST_LEN]);

impl Digest {
    /// Hash an identity into its registry key.
    ///
    /// Pure and deterministic: the same identity always yields the same
    /// digest, and no I/O or global state is involved. The raw string is
    /// hashed as-is — see the module docs for why no normalization is
    /// applied.
    pub fn of_identity(identity: &Identity) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(identity.as_str().as_bytes());
        Self(hasher.finalize().into())
    }

    /// Construct a digest from raw bytes.
    pub fn from_bytes(bytes: [u8; DIGEST_LEN]) -> Self {
        Self(bytes)
    }

    /// Parse a digest from 64 hex characters (either case accepted).
    pub fn from_hex(hex: &str) -> Result<Self, ValidationError> {
        if hex.len() != DIGEST_LEN * 2 {
            return Err(ValidationError::InvalidHexLength {
                expected: DIGEST_LEN * 2,
                actual: hex.len(),
            });
        }
        let mut bytes = [0u8; DIGEST_LEN];
        for (i, chunk) in hex.as_bytes().chunks_exact(2).enumerate() {
            let hi = hex_nibble(chunk[0]).ok_or(ValidationError::InvalidHexCharacter {
                found: chunk[0] as char,
                position: i * 2,
            })?;
            let lo = hex_nibble(chunk[1]).ok_or(ValidationError::InvalidHexCharacter {
                found: chunk[1] as char,
                position: i * 2 + 1,
            })?;
            bytes[i] = (hi << 4) | lo;
        }
        Ok(Self(bytes))
    }

    /// Render as 64 lowercase hex characters, no prefix.
    pub fn to_hex(&self) -> String {
        const ALPHABET: &[u8; 16] = b"0123456789abcdef";
        let mut out = String::with_capacity(DIGEST_LEN * 2);
        for byte in self.0 {
            out.push(ALPHABET[(byte >> 4) as usize] as char);
            out.push(ALPHABET[(byte & 0x0f) as usize] as char);
        }
        out
    }

    /// The raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }
}

fn hex_nibble(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl std::fmt::Display for Digest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl std::str::FromStr for Digest {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Serialize for Digest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Digest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::from_hex(&raw).map_err(serde::de::Error::custom)
    }
}
