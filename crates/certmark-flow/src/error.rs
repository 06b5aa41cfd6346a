//! Flow failure types.
//!
//! One variant per pipeline stage, so "the registry call failed" is
//! never conflated with "no certificate registered" — the latter is the
//! `NotFound` state, not an error at all. `DeploymentNotFound` never
//! appears here: it is fatal at session bootstrap and the controller is
//! never constructed without a working registry session.

use certmark_docstore::FetchError;
use certmark_registry::RegistryError;
use certmark_watermark::WatermarkError;
use thiserror::Error;

/// A failure that moved the flow into its `Error` state.
#[derive(Debug, Error)]
pub enum FlowError {
    /// The registry lookup failed (transport, RPC error, bad payload).
    #[error("registry lookup failed: {0}")]
    RegistryCallFailed(#[from] RegistryError),

    /// The document store fetch failed (non-200, transport, empty body).
    #[error("document fetch failed: {0}")]
    DocumentFetchFailed(#[from] FetchError),

    /// The retrieved bytes could not be watermarked.
    #[error("watermarking failed: {0}")]
    WatermarkFailed(#[from] WatermarkError),
}
