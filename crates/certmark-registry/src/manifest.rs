//! # Deployment Manifest
//!
//! Static map from network id to the registry contract deployed on that
//! network. The shape follows the build artifact the registry's
//! deployment tooling emits (`networks` keyed by the decimal network id
//! string), so an artifact file can be pointed at directly.
//!
//! A default manifest for the local development chain is embedded in the
//! crate; production deployments load their own file.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::RegistryError;

/// Manifest embedded for the local development chain (network 5777).
const EMBEDDED_MANIFEST: &str = include_str!("../deployments.json");

/// One deployed instance of the registry contract.
#[derive(Debug, Clone, Deserialize)]
pub struct Deployment {
    /// Contract address, `0x`-prefixed, 40 hex characters.
    pub address: String,
}

/// Static manifest of registry deployments, keyed by network id.
#[derive(Debug, Clone, Deserialize)]
pub struct DeploymentManifest {
    /// Network id (decimal string, as `net_version` reports) → deployment.
    pub networks: BTreeMap<String, Deployment>,
}

impl DeploymentManifest {
    /// Parse a manifest from its JSON form.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// The manifest embedded in the crate (local development chain).
    pub fn embedded() -> Result<Self, serde_json::Error> {
        Self::from_json(EMBEDDED_MANIFEST)
    }

    /// Find the deployment for the given network id.
    ///
    /// A missing entry is [`RegistryError::DeploymentNotFound`] — the
    /// fatal bootstrap condition, propagated rather than swallowed.
    pub fn deployment_for(&self, network_id: &str) -> Result<&Deployment, RegistryError> {
        self.networks
            .get(network_id)
            .ok_or_else(|| RegistryError::DeploymentNotFound {
                network_id: network_id.to_string(),
            })
    }
}

/// Validate an Ethereum contract address: `0x` + 40 hex characters.
pub(crate) fn is_valid_eth_address(address: &str) -> bool {
    address.len() == 42
        && address.starts_with("0x")
        && address[2..].bytes().all(|b| b.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_manifest_parses_and_covers_dev_chain() {
        let manifest = DeploymentManifest::embedded().unwrap();
        let deployment = manifest.deployment_for("5777").unwrap();
        assert!(is_valid_eth_address(&deployment.address));
    }

    #[test]
    fn unknown_network_is_deployment_not_found() {
        let manifest = DeploymentManifest::embedded().unwrap();
        let err = manifest.deployment_for("1").unwrap_err();
        assert!(matches!(
            err,
            RegistryError::DeploymentNotFound { network_id } if network_id == "1"
        ));
    }

    #[test]
    fn manifest_parses_artifact_shape() {
        let manifest = DeploymentManifest::from_json(
            r#"{"networks":{"1337":{"address":"0x00000000000000000000000000000000000000aa"}}}"#,
        )
        .unwrap();
        assert_eq!(
            manifest.deployment_for("1337").unwrap().address,
            "0x00000000000000000000000000000000000000aa"
        );
    }

    #[test]
    fn address_validation() {
        assert!(is_valid_eth_address(
            "0x8CdaF0CD259887258Bc13a92C0a6dA92698644C0"
        ));
        assert!(!is_valid_eth_address("8CdaF0CD259887258Bc13a92C0a6dA92"));
        assert!(!is_valid_eth_address("0x123"));
        assert!(!is_valid_eth_address(
            "0xZZdaF0CD259887258Bc13a92C0a6dA92698644C0"
        ));
    }
}
