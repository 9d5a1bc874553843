//! Backend adapter layer
//!
//! Each downstream inference service gets one adapter translating a plain
//! message into that service's HTTP request/response shape. Adapters
//! implement the [`InferenceBackend`] trait and share the one-shot POST
//! plumbing in this module; only header and payload construction differ
//! per backend.

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

pub mod digitalocean;
pub mod gradient;
pub mod lmstudio;

pub use digitalocean::DoBackend;
pub use gradient::GradientBackend;
pub use lmstudio::LmStudioBackend;

/// Fixed timeout for every outbound backend call
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Normalized result of a backend call
#[derive(Debug, Clone, Serialize)]
pub struct BackendOutput {
    /// Verbatim decoded JSON body from the backend
    pub raw: Value,
    /// Best-effort extracted reply text, where the backend shape allows it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Trait all backend adapters implement
#[async_trait]
pub trait InferenceBackend: Send + Sync {
    /// Identifier matching the router's route name (e.g. "lmstudio")
    fn backend_name(&self) -> &str;

    /// Perform a single inference call. `metadata` is forwarded only by
    /// backends that support it; others ignore it.
    async fn infer(&self, message: &str, metadata: Option<&Value>) -> Result<BackendOutput>;
}

/// Build the shared HTTP client with the fixed per-call timeout
pub(crate) fn http_client() -> Client {
    Client::builder()
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()
        .expect("Failed to build HTTP client")
}

/// One-shot JSON POST: send, enforce 2xx, decode the body.
///
/// Non-success statuses become errors carrying the status and response
/// text; network failures and malformed bodies propagate with context.
pub(crate) async fn post_json(
    client: &Client,
    url: &str,
    headers: &[(&str, String)],
    payload: &Value,
    backend: &str,
) -> Result<Value> {
    debug!("POST {} ({} backend)", url, backend);

    let mut request = client.post(url);
    for (name, value) in headers {
        request = request.header(*name, value.as_str());
    }

    let response = request
        .json(payload)
        .send()
        .await
        .with_context(|| format!("Failed to send request to {} backend", backend))?;

    let status = response.status();
    if !status.is_success() {
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(anyhow!(
            "{} request failed with status {}: {}",
            backend,
            status,
            error_text
        ));
    }

    response
        .json()
        .await
        .with_context(|| format!("Failed to parse {} response as JSON", backend))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_output_serializes_text_only_when_present() {
        let with_text = BackendOutput {
            raw: serde_json::json!({"ok": true}),
            text: Some("hello".to_string()),
        };
        let json = serde_json::to_string(&with_text).unwrap();
        assert!(json.contains("\"raw\""));
        assert!(json.contains("\"text\":\"hello\""));

        let without_text = BackendOutput {
            raw: serde_json::json!({"ok": true}),
            text: None,
        };
        let json = serde_json::to_string(&without_text).unwrap();
        assert!(!json.contains("\"text\""));
    }
}
