//! # Registry JSON-RPC Client
//!
//! One session per process: [`RegistryClient::connect`] resolves the
//! active network with `net_version`, finds the contract in the
//! [`DeploymentManifest`](crate::DeploymentManifest), and keeps a single
//! timeout-configured `reqwest::Client` for the lifetime of the process.
//! Lookups are plain `eth_call`s: read-only, fee-less, reentrant.

use certmark_core::{Digest, DocumentId};

use crate::abi;
use crate::error::RegistryError;
use crate::manifest::{is_valid_eth_address, DeploymentManifest};

/// Configuration for the registry session.
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// JSON-RPC endpoint URL of the registry node.
    pub rpc_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl RegistryConfig {
    /// Create a configuration with the default 30 second timeout.
    pub fn new(rpc_url: impl Into<String>) -> Self {
        Self {
            rpc_url: rpc_url.into(),
            timeout_secs: 30,
        }
    }

    /// Override the request timeout.
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

/// Read-only client bound to one registry contract deployment.
#[derive(Debug)]
pub struct RegistryClient {
    client: reqwest::Client,
    rpc_url: String,
    contract_address: String,
    network_id: String,
}

impl RegistryClient {
    /// Establish the process-wide registry session.
    ///
    /// Resolves the active network id via `net_version` and looks up the
    /// deployment entry in `manifest`. A missing entry is fatal:
    /// [`RegistryError::DeploymentNotFound`] propagates to the caller
    /// and the process has no registry to talk to. No reconnect logic
    /// exists; callers construct exactly one client at startup.
    pub async fn connect(
        config: RegistryConfig,
        manifest: &DeploymentManifest,
    ) -> Result<Self, RegistryError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| RegistryError::CallFailed {
                reason: format!("failed to build HTTP client: {e}"),
            })?;

        let result = rpc_call(&client, &config.rpc_url, "net_version", serde_json::json!([]))
            .await?;
        let network_id = result
            .as_str()
            .ok_or_else(|| RegistryError::InvalidResponse {
                reason: "net_version returned a non-string result".to_string(),
            })?
            .to_string();

        let deployment = manifest.deployment_for(&network_id)?;
        if !is_valid_eth_address(&deployment.address) {
            return Err(RegistryError::InvalidAddress {
                address: deployment.address.clone(),
            });
        }

        tracing::info!(
            network_id = %network_id,
            contract = %deployment.address,
            "registry session established"
        );

        Ok(Self {
            client,
            rpc_url: config.rpc_url,
            contract_address: deployment.address.clone(),
            network_id,
        })
    }

    /// The network id this session resolved at startup.
    pub fn network_id(&self) -> &str {
        &self.network_id
    }

    /// The contract address this session is bound to.
    pub fn contract_address(&self) -> &str {
        &self.contract_address
    }

    /// Look up the document identifier registered for `digest`.
    ///
    /// Read-only `eth_call` of `checkHash(string)`. An unregistered
    /// digest resolves to the sentinel identifier — that is a successful
    /// lookup, not an error. Transport faults, RPC error objects, and
    /// undecodable payloads are [`RegistryError`]s, kept distinct from
    /// the sentinel so the caller can tell "absent" from "unknown".
    pub async fn lookup(&self, digest: &Digest) -> Result<DocumentId, RegistryError> {
        let call = serde_json::json!({
            "to": self.contract_address,
            "data": abi::encode_check_hash_call(&digest.to_hex()),
        });

        let result = rpc_call(
            &self.client,
            &self.rpc_url,
            "eth_call",
            serde_json::json!([call, "latest"]),
        )
        .await?;

        let payload = result
            .as_str()
            .ok_or_else(|| RegistryError::InvalidResponse {
                reason: "eth_call returned a non-string result".to_string(),
            })?;

        let identifier = abi::decode_string_return(payload)?;
        let document_id =
            DocumentId::new(identifier).map_err(|e| RegistryError::InvalidResponse {
                reason: format!("registry returned a malformed identifier: {e}"),
            })?;

        tracing::debug!(
            digest = %digest,
            sentinel = document_id.is_sentinel(),
            "registry lookup resolved"
        );
        Ok(document_id)
    }
}

/// Send a JSON-RPC request and return the `result` field.
async fn rpc_call(
    client: &reqwest::Client,
    rpc_url: &str,
    method: &str,
    params: serde_json::Value,
) -> Result<serde_json::Value, RegistryError> {
    let body = serde_json::json!({
        "jsonrpc": "2.0",
        "method": method,
        "params": params,
        "id": 1,
    });

    let resp = client
        .post(rpc_url)
        .json(&body)
        .send()
        .await
        .map_err(|e| {
            if e.is_timeout() {
                RegistryError::CallFailed {
                    reason: format!("{method}: request timed out"),
                }
            } else {
                RegistryError::CallFailed {
                    reason: format!("{method}: {e}"),
                }
            }
        })?;

    if !resp.status().is_success() {
        return Err(RegistryError::CallFailed {
            reason: format!("{method}: HTTP {}", resp.status()),
        });
    }

    let json: serde_json::Value = resp.json().await.map_err(|e| RegistryError::CallFailed {
        reason: format!("{method}: invalid JSON response: {e}"),
    })?;

    if let Some(error) = json.get("error") {
        let msg = error
            .get("message")
            .and_then(|m| m.as_str())
            .unwrap_or("unknown RPC error");
        return Err(RegistryError::CallFailed {
            reason: format!("{method}: {msg}"),
        });
    }

    json.get("result")
        .cloned()
        .ok_or_else(|| RegistryError::CallFailed {
            reason: format!("{method}: JSON-RPC response missing 'result' field"),
        })
}
