//! # certmark-cli — Subcommand Handlers
//!
//! The presentation boundary of the verification pipeline. Each
//! subcommand module exposes an args struct and a `run_*` handler
//! returning a process exit code; `main.rs` parses and dispatches.

pub mod digest;
pub mod stamp;
pub mod verify;
