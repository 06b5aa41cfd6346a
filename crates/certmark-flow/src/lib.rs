//! # certmark-flow — Verification Flow Controller
//!
//! Orchestrates the verification pipeline as an explicit finite state
//! machine: identity → digest → registry lookup → (if registered) fetch
//! → stamp → rendered bytes. The presentation boundary drives it with
//! `submit` and `reset` and reads back a [`FlowSnapshot`].
//!
//! ## Design
//!
//! - The transition table is a pure function over discrete
//!   [`FlowEvent`]s ([`FlowState::apply`]); the controller never mutates
//!   state except through it.
//! - External systems sit behind seam traits ([`Registry`],
//!   [`DocumentSource`], [`Stamper`]) so the pipeline is testable with
//!   in-memory doubles and wired to the real clients in production.
//! - Every submission carries a generation number. Completions arriving
//!   for a superseded generation (a newer submit, or a reset) are
//!   discarded, so an overlapping submission can never publish a stale
//!   result into the exposed snapshot.

pub mod controller;
pub mod error;
pub mod state;
pub mod traits;

pub use controller::{FlowController, FlowSnapshot};
pub use error::FlowError;
pub use state::{FlowEvent, FlowState};
pub use traits::{DocumentSource, PdfStamper, Registry, Stamper};
