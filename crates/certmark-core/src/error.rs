//! # Validation Errors
//!
//! Construction-time errors for the domain newtypes. Uses `thiserror`
//! for structured variants with diagnostic context.

use thiserror::Error;

/// Errors raised when constructing a domain primitive from untrusted input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A hex string had the wrong length.
    #[error("invalid hex length: expected {expected} characters, got {actual}")]
    InvalidHexLength {
        /// Required character count.
        expected: usize,
        /// Observed character count.
        actual: usize,
    },

    /// A string contained a non-hex character.
    #[error("invalid hex character {found:?} at position {position}")]
    InvalidHexCharacter {
        /// The offending character.
        found: char,
        /// Byte offset of the offending character.
        position: usize,
    },

    /// A document identifier was empty.
    #[error("document identifier must not be empty")]
    EmptyDocumentId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_length_display_names_both_lengths() {
        let err = ValidationError::InvalidHexLength {
            expected: 64,
            actual: 10,
        };
        let msg = format!("{err}");
        assert!(msg.contains("64"));
        assert!(msg.contains("10"));
    }

    #[test]
    fn hex_character_display_names_offender() {
        let err = ValidationError::InvalidHexCharacter {
            found: 'z',
            position: 3,
        };
        let msg = format!("{err}");
        assert!(msg.contains('z'));
        assert!(msg.contains('3'));
    }
}
