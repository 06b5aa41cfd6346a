//! `certmark verify` — the full verification pipeline.
//!
//! Bootstraps the registry session (failing fast when the manifest has
//! no deployment for the active network), drives one submission through
//! the flow controller, and writes the watermarked certificate on
//! success.

use std::path::PathBuf;

use anyhow::Context;
use certmark_core::Identity;
use certmark_docstore::{DocumentStore, DocumentStoreConfig};
use certmark_flow::{FlowController, FlowState, PdfStamper};
use certmark_registry::{DeploymentManifest, RegistryClient, RegistryConfig};
use clap::Args;

/// Arguments for `certmark verify`.
#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Identity (email) to verify. Hashed raw, with no normalization.
    #[arg(long)]
    pub identity: String,

    /// JSON-RPC endpoint of the registry node.
    #[arg(long, default_value = "http://127.0.0.1:7545")]
    pub rpc_url: String,

    /// Base URL of the certificate document store.
    #[arg(long, default_value = "http://localhost:8080")]
    pub docstore_url: String,

    /// Deployment manifest file (build-artifact `networks` shape).
    /// Defaults to the embedded local-development manifest.
    #[arg(long)]
    pub manifest: Option<PathBuf>,

    /// Where to write the watermarked certificate on success.
    #[arg(long, default_value = "certificate.pdf")]
    pub output: PathBuf,
}

fn load_manifest(path: Option<&PathBuf>) -> anyhow::Result<DeploymentManifest> {
    match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading manifest {}", path.display()))?;
            DeploymentManifest::from_json(&json)
                .with_context(|| format!("parsing manifest {}", path.display()))
        }
        None => DeploymentManifest::embedded().context("parsing embedded manifest"),
    }
}

/// Run `certmark verify`.
pub async fn run_verify(args: &VerifyArgs) -> anyhow::Result<u8> {
    let manifest = load_manifest(args.manifest.as_ref())?;

    // Session bootstrap. A missing deployment entry propagates out of
    // here and aborts the process — there is no registry to talk to.
    let registry = RegistryClient::connect(RegistryConfig::new(&args.rpc_url), &manifest)
        .await
        .context("establishing registry session")?;
    let store = DocumentStore::new(DocumentStoreConfig::new(&args.docstore_url))
        .context("building document store client")?;

    let controller = FlowController::new(registry, store, PdfStamper);
    let snapshot = controller
        .submit(&Identity::new(args.identity.as_str()))
        .await;

    let digest_hex = snapshot
        .digest
        .map(|d| d.to_hex())
        .unwrap_or_default();

    match snapshot.state {
        FlowState::Rendered => {
            let rendered = snapshot
                .rendered
                .context("rendered state without rendered bytes")?;
            std::fs::write(&args.output, &rendered)
                .with_context(|| format!("writing {}", args.output.display()))?;
            println!("certificate found for digest {digest_hex}");
            println!(
                "watermarked certificate written to {} ({} bytes)",
                args.output.display(),
                rendered.len()
            );
            Ok(0)
        }
        FlowState::NotFound => {
            println!("no certificate registered for digest {digest_hex}");
            Ok(2)
        }
        FlowState::Error => {
            let message = snapshot
                .error
                .unwrap_or_else(|| "verification failed".to_string());
            anyhow::bail!(message)
        }
        other => anyhow::bail!("verification ended in unexpected state: {other}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_manifest_loads_when_no_path_given() {
        assert!(load_manifest(None).is_ok());
    }

    #[test]
    fn manifest_file_loads_and_parse_errors_are_contextual() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("deployments.json");
        std::fs::write(
            &good,
            r#"{"networks":{"1337":{"address":"0x00000000000000000000000000000000000000aa"}}}"#,
        )
        .unwrap();
        assert!(load_manifest(Some(&good)).is_ok());

        let bad = dir.path().join("broken.json");
        std::fs::write(&bad, "{").unwrap();
        let err = load_manifest(Some(&bad)).unwrap_err();
        assert!(format!("{err:#}").contains("broken.json"));
    }
}
