//! # certmark-core — Domain Primitives
//!
//! Newtypes and pure functions shared by every certmark crate. Nothing in
//! this crate performs I/O: the registry client, document store, and
//! watermark engine all build on these types but live in their own crates.
//!
//! ## Types
//!
//! - [`Identity`]: the raw user-supplied string being verified. Carried
//!   unmodified — see [`Digest::of_identity`] for why.
//! - [`Digest`]: SHA-256 of an identity, rendered as 64 lowercase hex
//!   characters. The registry is keyed by these.
//! - [`DocumentId`]: hex identifier the registry maps a digest to; the
//!   all-zero value is the sentinel meaning "no certificate issued".

pub mod digest;
pub mod document_id;
pub mod error;
pub mod identity;

pub use digest::Digest;
pub use document_id::DocumentId;
pub use error::ValidationError;
pub use identity::Identity;
