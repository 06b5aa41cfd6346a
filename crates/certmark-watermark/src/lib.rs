//! # certmark-watermark — PDF Watermark Engine
//!
//! Overlays a visible text marker on every page of a certificate PDF.
//! The marker is the registry document identifier, drawn in the page's
//! own coordinate space at a fixed anchor, Helvetica 12, red at 50%
//! opacity.
//!
//! ## Contract
//!
//! [`stamp`] never mutates its input: it parses the bytes into a private
//! document, stamps every page, and serializes a fresh buffer. The call
//! is all-or-nothing — a malformed document or an unstampable page fails
//! the whole call and no partial output escapes. Given identical inputs
//! the output is identical; cost is linear in page count.
//!
//! ## Idempotency
//!
//! A page that already carries this engine's graphics state for the
//! same text is skipped, so re-stamping an already-watermarked document
//! does not accumulate duplicate overlays. The graphics-state resource
//! name encodes a digest of the overlay text, so stamping with a
//! different text still takes effect. Watermarks applied by other tools
//! are stamped over.

pub mod engine;
pub mod error;

pub use engine::{stamp, FONT_SIZE, LEFT_MARGIN, OPACITY, TEXT_WIDTH};
pub use error::WatermarkError;
