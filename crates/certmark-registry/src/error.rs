//! Registry client error types.

use thiserror::Error;

/// Errors from registry manifest resolution and `checkHash` lookups.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The static manifest has no contract deployment for the active
    /// network. Fatal at startup; never recovered.
    #[error("no registry deployment found for network {network_id}")]
    DeploymentNotFound {
        /// The network id reported by `net_version`.
        network_id: String,
    },

    /// A deployment entry carries a malformed contract address.
    #[error("invalid contract address in manifest: {address}")]
    InvalidAddress {
        /// The offending address string.
        address: String,
    },

    /// The JSON-RPC call failed: transport error, non-success HTTP
    /// status, or an error object in the RPC response. Kept distinct
    /// from the sentinel ("digest absent") result by construction.
    #[error("registry call failed: {reason}")]
    CallFailed {
        /// Human-readable failure description.
        reason: String,
    },

    /// The node answered, but the payload could not be decoded as the
    /// ABI-encoded string `checkHash` returns.
    #[error("malformed registry response: {reason}")]
    InvalidResponse {
        /// What failed to decode.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deployment_not_found_names_network() {
        let err = RegistryError::DeploymentNotFound {
            network_id: "5777".into(),
        };
        assert!(format!("{err}").contains("5777"));
    }

    #[test]
    fn call_failed_and_invalid_response_are_distinct() {
        let call = RegistryError::CallFailed {
            reason: "timeout".into(),
        };
        let resp = RegistryError::InvalidResponse {
            reason: "short payload".into(),
        };
        assert!(format!("{call}").contains("registry call failed"));
        assert!(format!("{resp}").contains("malformed registry response"));
    }
}
