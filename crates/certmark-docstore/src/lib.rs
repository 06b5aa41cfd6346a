//! # certmark-docstore — Document Store Client
//!
//! Retrieves raw certificate PDFs from the external document store.
//! The store is addressed by registry document identifier: one
//! `GET {base_url}/{identifier}.pdf` per fetch, no retries.
//!
//! Fetch failures are their own error family ([`FetchError`]), distinct
//! from "no certificate registered" — by the time a fetch happens the
//! registry has already resolved a non-sentinel identifier, so a 404
//! here means the store and the registry disagree, not that the user is
//! unregistered.

pub mod error;
pub mod store;

pub use error::FetchError;
pub use store::{DocumentStore, DocumentStoreConfig};
