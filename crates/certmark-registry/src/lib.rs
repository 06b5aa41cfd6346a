//! # certmark-registry — On-Chain Registry Client
//!
//! Read-only access to the certificate registry contract. The registry
//! maps identity digests to document identifiers; this crate resolves
//! which contract to talk to and performs `checkHash` lookups against it
//! over Ethereum-style JSON-RPC.
//!
//! ## Session Model
//!
//! Exactly one [`RegistryClient`] is constructed per process, via
//! [`RegistryClient::connect`]: the active network id is resolved with
//! `net_version`, the contract address is looked up in a static
//! [`DeploymentManifest`], and construction fails fast with
//! [`RegistryError::DeploymentNotFound`] when the manifest has no entry
//! for that network. There is no implicit reconnect.
//!
//! ## Lookup Semantics
//!
//! [`RegistryClient::lookup`] is a non-state-mutating `eth_call`:
//! idempotent, fee-less, and safe to invoke concurrently. An absent
//! digest is a *successful* lookup returning the sentinel identifier;
//! transport faults, JSON-RPC error objects, and malformed responses are
//! distinct [`RegistryError`] values and are never collapsed into
//! "absent".

pub mod abi;
pub mod client;
pub mod error;
pub mod manifest;

pub use client::{RegistryClient, RegistryConfig};
pub use error::RegistryError;
pub use manifest::{Deployment, DeploymentManifest};
