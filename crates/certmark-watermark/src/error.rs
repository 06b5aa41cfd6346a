//! Watermark engine error types.

use thiserror::Error;

/// Errors from parsing, stamping, or serializing a document.
#[derive(Debug, Error)]
pub enum WatermarkError {
    /// The input bytes are not a parseable PDF.
    #[error("failed to parse document: {0}")]
    Parse(String),

    /// A page's structure could not be traversed or amended.
    #[error("malformed page structure: {0}")]
    Page(String),

    /// The stamped document could not be serialized.
    #[error("failed to serialize watermarked document: {0}")]
    Serialize(String),
}
