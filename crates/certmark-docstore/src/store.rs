//! # Document Store HTTP Client
//!
//! One config-constructed client per process, in the same shape as the
//! registry session: timeout set at build time, base URL validated once,
//! and a single request per fetch with no retry policy.

use certmark_core::DocumentId;
use url::Url;

use crate::error::FetchError;

/// Configuration for the document store client.
#[derive(Debug, Clone)]
pub struct DocumentStoreConfig {
    /// Base URL the store serves documents under.
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl DocumentStoreConfig {
    /// Create a configuration with the default 30 second timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: 30,
        }
    }

    /// Override the request timeout.
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

/// Client for the external certificate document store.
#[derive(Debug)]
pub struct DocumentStore {
    client: reqwest::Client,
    base_url: Url,
}

impl DocumentStore {
    /// Build a store client, validating the base URL up front.
    pub fn new(config: DocumentStoreConfig) -> Result<Self, FetchError> {
        // Trailing slash so Url::join appends rather than replaces.
        let normalized = if config.base_url.ends_with('/') {
            config.base_url.clone()
        } else {
            format!("{}/", config.base_url)
        };
        let base_url = Url::parse(&normalized).map_err(|e| FetchError::InvalidUrl {
            reason: format!("{}: {e}", config.base_url),
        })?;

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| FetchError::InvalidUrl {
                reason: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self { client, base_url })
    }

    /// Fetch the raw PDF bytes for a resolved document identifier.
    ///
    /// One `GET {base_url}/{identifier}.pdf`. Success requires HTTP 200
    /// and a non-empty body; anything else is a [`FetchError`]. No
    /// retries. Callers only invoke this for non-sentinel identifiers —
    /// the registry has already vouched that a document should exist.
    pub async fn fetch(&self, id: &DocumentId) -> Result<Vec<u8>, FetchError> {
        let endpoint = self
            .base_url
            .join(&format!("{id}.pdf"))
            .map_err(|e| FetchError::InvalidUrl {
                reason: format!("{id}.pdf: {e}"),
            })?;
        let endpoint_str = endpoint.to_string();

        tracing::debug!(endpoint = %endpoint_str, "fetching certificate document");

        let resp = self
            .client
            .get(endpoint)
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                endpoint: endpoint_str.clone(),
                source,
            })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                endpoint: endpoint_str,
                status: status.as_u16(),
            });
        }

        let bytes = resp
            .bytes()
            .await
            .map_err(|source| FetchError::Transport {
                endpoint: endpoint_str.clone(),
                source,
            })?;
        if bytes.is_empty() {
            return Err(FetchError::EmptyBody {
                endpoint: endpoint_str,
            });
        }

        tracing::debug!(
            endpoint = %endpoint_str,
            size = bytes.len(),
            "certificate document retrieved"
        );
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_base_url_is_rejected_at_construction() {
        let err = DocumentStore::new(DocumentStoreConfig::new("not a url")).unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl { .. }));
    }

    #[test]
    fn base_url_with_and_without_trailing_slash_accepted() {
        assert!(DocumentStore::new(DocumentStoreConfig::new("http://localhost:8080")).is_ok());
        assert!(DocumentStore::new(DocumentStoreConfig::new("http://localhost:8080/")).is_ok());
    }
}
