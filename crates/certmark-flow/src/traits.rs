//! # Seam Traits
//!
//! The flow controller talks to its collaborators through these traits.
//! Production wires the real clients; tests wire in-memory doubles. The
//! async traits return named `impl Future + Send` so controller futures
//! stay spawnable.

use std::future::Future;

use certmark_core::{Digest, DocumentId};
use certmark_docstore::{DocumentStore, FetchError};
use certmark_registry::{RegistryClient, RegistryError};
use certmark_watermark::WatermarkError;

/// Read-only registry lookup: digest → document identifier or sentinel.
pub trait Registry {
    /// Resolve the registered identifier for a digest. Absence is the
    /// sentinel identifier, not an error.
    fn lookup(
        &self,
        digest: &Digest,
    ) -> impl Future<Output = Result<DocumentId, RegistryError>> + Send;
}

impl Registry for RegistryClient {
    fn lookup(
        &self,
        digest: &Digest,
    ) -> impl Future<Output = Result<DocumentId, RegistryError>> + Send {
        RegistryClient::lookup(self, digest)
    }
}

/// Retrieval of raw document bytes for a resolved identifier.
pub trait DocumentSource {
    /// Fetch the raw PDF for a non-sentinel identifier.
    fn fetch(
        &self,
        id: &DocumentId,
    ) -> impl Future<Output = Result<Vec<u8>, FetchError>> + Send;
}

impl DocumentSource for DocumentStore {
    fn fetch(
        &self,
        id: &DocumentId,
    ) -> impl Future<Output = Result<Vec<u8>, FetchError>> + Send {
        DocumentStore::fetch(self, id)
    }
}

/// Synchronous watermark overlay: bytes + text → fresh bytes.
pub trait Stamper {
    /// Overlay `text` on every page of `input`, producing a new buffer.
    fn stamp(&self, input: &[u8], text: &str) -> Result<Vec<u8>, WatermarkError>;
}

/// The production stamper, backed by the watermark engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfStamper;

impl Stamper for PdfStamper {
    fn stamp(&self, input: &[u8], text: &str) -> Result<Vec<u8>, WatermarkError> {
        certmark_watermark::stamp(input, text)
    }
}
