//! Document store error types.

use thiserror::Error;

/// Errors from certificate document retrieval.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The configured base URL could not be parsed or joined.
    #[error("invalid document store URL: {reason}")]
    InvalidUrl {
        /// What was wrong with the URL.
        reason: String,
    },

    /// HTTP transport error (connection refused, timeout, ...).
    #[error("transport error fetching {endpoint}: {source}")]
    Transport {
        /// The document URL that was requested.
        endpoint: String,
        /// Underlying reqwest error.
        source: reqwest::Error,
    },

    /// The store answered with a non-success status.
    #[error("document store returned {status} for {endpoint}")]
    Status {
        /// The document URL that was requested.
        endpoint: String,
        /// HTTP status code.
        status: u16,
    },

    /// The store answered 200 with an empty body.
    #[error("document store returned an empty document for {endpoint}")]
    EmptyBody {
        /// The document URL that was requested.
        endpoint: String,
    },
}
