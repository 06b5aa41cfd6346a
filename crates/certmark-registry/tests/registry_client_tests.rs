//! # Registry Client Integration Tests
//!
//! Runs the real [`RegistryClient`] against a wiremock JSON-RPC server
//! to verify session bootstrap, `checkHash` request construction,
//! response decoding, and the distinction between "digest absent"
//! (sentinel result) and "lookup failed" (transport/RPC errors).

use certmark_core::{Digest, Identity};
use certmark_registry::{DeploymentManifest, RegistryClient, RegistryConfig, RegistryError};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CONTRACT: &str = "0x8CdaF0CD259887258Bc13a92C0a6dA92698644C0";

fn manifest_for(network_id: &str) -> DeploymentManifest {
    DeploymentManifest::from_json(&format!(
        r#"{{"networks":{{"{network_id}":{{"address":"{CONTRACT}"}}}}}}"#
    ))
    .expect("manifest json")
}

/// ABI-encode a string result the way a node would answer `eth_call`.
fn abi_string_result(s: &str) -> String {
    let payload_words = s.len().div_ceil(32) * 32;
    let mut hex = String::from("0x");
    hex.push_str(&format!("{:064x}", 32));
    hex.push_str(&format!("{:064x}", s.len()));
    for byte in s.as_bytes() {
        hex.push_str(&format!("{byte:02x}"));
    }
    for _ in s.len()..payload_words {
        hex.push_str("00");
    }
    hex
}

fn rpc_result(value: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "jsonrpc": "2.0",
        "id": 1,
        "result": value,
    }))
}

async fn mount_net_version(server: &MockServer, network_id: &str) {
    Mock::given(method("POST"))
        .and(path("/"))
        .and(body_partial_json(serde_json::json!({"method": "net_version"})))
        .respond_with(rpc_result(network_id))
        .mount(server)
        .await;
}

async fn connect(server: &MockServer, network_id: &str) -> RegistryClient {
    RegistryClient::connect(RegistryConfig::new(server.uri()), &manifest_for(network_id))
        .await
        .expect("connect")
}

#[tokio::test]
async fn connect_resolves_network_and_deployment() {
    let server = MockServer::start().await;
    mount_net_version(&server, "5777").await;

    let client = connect(&server, "5777").await;
    assert_eq!(client.network_id(), "5777");
    assert_eq!(client.contract_address(), CONTRACT);
}

#[tokio::test]
async fn connect_fails_fast_when_deployment_missing() {
    let server = MockServer::start().await;
    mount_net_version(&server, "1").await;

    // Manifest only covers 5777; the node reports network 1.
    let err = RegistryClient::connect(RegistryConfig::new(server.uri()), &manifest_for("5777"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        RegistryError::DeploymentNotFound { network_id } if network_id == "1"
    ));
}

#[tokio::test]
async fn lookup_decodes_registered_identifier() {
    let server = MockServer::start().await;
    mount_net_version(&server, "5777").await;
    Mock::given(method("POST"))
        .and(path("/"))
        .and(body_partial_json(serde_json::json!({"method": "eth_call"})))
        .respond_with(rpc_result(&abi_string_result("abc123")))
        .expect(1)
        .mount(&server)
        .await;

    let client = connect(&server, "5777").await;
    let digest = Digest::of_identity(&Identity::new("bob@example.com"));
    let id = client.lookup(&digest).await.expect("lookup");
    assert_eq!(id.as_str(), "abc123");
    assert!(!id.is_sentinel());
}

#[tokio::test]
async fn lookup_sends_check_hash_calldata_to_contract() {
    let server = MockServer::start().await;
    mount_net_version(&server, "5777").await;

    let digest = Digest::of_identity(&Identity::new("bob@example.com"));
    Mock::given(method("POST"))
        .and(body_partial_json(serde_json::json!({
            "method": "eth_call",
            "params": [{
                "to": CONTRACT,
                "data": certmark_registry::abi::encode_check_hash_call(&digest.to_hex()),
            }, "latest"],
        })))
        .respond_with(rpc_result(&abi_string_result(&"0".repeat(64))))
        .expect(1)
        .mount(&server)
        .await;

    let client = connect(&server, "5777").await;
    client.lookup(&digest).await.expect("lookup");
}

#[tokio::test]
async fn unregistered_digest_resolves_to_sentinel() {
    let server = MockServer::start().await;
    mount_net_version(&server, "5777").await;
    Mock::given(method("POST"))
        .and(body_partial_json(serde_json::json!({"method": "eth_call"})))
        .respond_with(rpc_result(&abi_string_result(&"0".repeat(64))))
        .mount(&server)
        .await;

    let client = connect(&server, "5777").await;
    let digest = Digest::of_identity(&Identity::new("alice@example.com"));
    let id = client.lookup(&digest).await.expect("lookup");
    assert!(id.is_sentinel());
    assert_eq!(id.as_str(), "0".repeat(64));
}

#[tokio::test]
async fn rpc_error_object_is_call_failed_not_absent() {
    let server = MockServer::start().await;
    mount_net_version(&server, "5777").await;
    Mock::given(method("POST"))
        .and(body_partial_json(serde_json::json!({"method": "eth_call"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "jsonrpc": "2.0",
            "id": 1,
            "error": {"code": -32000, "message": "execution reverted"},
        })))
        .mount(&server)
        .await;

    let client = connect(&server, "5777").await;
    let digest = Digest::of_identity(&Identity::new("alice@example.com"));
    let err = client.lookup(&digest).await.unwrap_err();
    assert!(matches!(
        err,
        RegistryError::CallFailed { reason } if reason.contains("execution reverted")
    ));
}

#[tokio::test]
async fn http_failure_is_call_failed() {
    let server = MockServer::start().await;
    mount_net_version(&server, "5777").await;
    Mock::given(method("POST"))
        .and(body_partial_json(serde_json::json!({"method": "eth_call"})))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = connect(&server, "5777").await;
    let digest = Digest::of_identity(&Identity::new("alice@example.com"));
    let err = client.lookup(&digest).await.unwrap_err();
    assert!(matches!(err, RegistryError::CallFailed { .. }));
}

#[tokio::test]
async fn garbage_payload_is_invalid_response() {
    let server = MockServer::start().await;
    mount_net_version(&server, "5777").await;
    Mock::given(method("POST"))
        .and(body_partial_json(serde_json::json!({"method": "eth_call"})))
        .respond_with(rpc_result("0x1234"))
        .mount(&server)
        .await;

    let client = connect(&server, "5777").await;
    let digest = Digest::of_identity(&Identity::new("alice@example.com"));
    let err = client.lookup(&digest).await.unwrap_err();
    assert!(matches!(err, RegistryError::InvalidResponse { .. }));
}

#[tokio::test]
async fn lookup_is_repeatable_for_the_same_digest() {
    let server = MockServer::start().await;
    mount_net_version(&server, "5777").await;
    Mock::given(method("POST"))
        .and(body_partial_json(serde_json::json!({"method": "eth_call"})))
        .respond_with(rpc_result(&abi_string_result("abc123")))
        .expect(2)
        .mount(&server)
        .await;

    let client = connect(&server, "5777").await;
    let digest = Digest::of_identity(&Identity::new("bob@example.com"));
    let first = client.lookup(&digest).await.expect("first lookup");
    let second = client.lookup(&digest).await.expect("second lookup");
    assert_eq!(first, second);
}
