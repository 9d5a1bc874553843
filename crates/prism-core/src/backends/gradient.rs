//! Gradient adapter — hosted inference endpoint with configurable auth

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};

use super::{BackendOutput, InferenceBackend, http_client, post_json};
use crate::config::{AuthScheme, mask_secret};

/// Adapter for the gradient inference endpoint. The auth header is
/// configuration-driven: bearer token by default, `X-API-Key` as the
/// alternative. Caller metadata is merged into the payload when present.
pub struct GradientBackend {
    client: Client,
    endpoint_url: String,
    api_key: String,
    auth_scheme: AuthScheme,
}

impl std::fmt::Debug for GradientBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GradientBackend")
            .field("endpoint_url", &self.endpoint_url)
            .field("api_key", &mask_secret(&self.api_key))
            .field("auth_scheme", &self.auth_scheme)
            .finish()
    }
}

impl GradientBackend {
    pub fn new(endpoint_url: String, api_key: String, auth_scheme: AuthScheme) -> Self {
        Self {
            client: http_client(),
            endpoint_url,
            api_key,
            auth_scheme,
        }
    }

    /// Header name/value pair for the configured auth scheme
    fn auth_header(scheme: AuthScheme, api_key: &str) -> (&'static str, String) {
        match scheme {
            AuthScheme::XApiKey => ("X-API-Key", api_key.to_string()),
            AuthScheme::AuthorizationBearer => ("Authorization", format!("Bearer {}", api_key)),
        }
    }

    /// `{"input": message}` plus the caller's metadata when supplied
    fn request_payload(message: &str, metadata: Option<&Value>) -> Value {
        let mut payload = json!({"input": message});
        if let Some(meta) = metadata {
            payload["metadata"] = meta.clone();
        }
        payload
    }
}

#[async_trait]
impl InferenceBackend for GradientBackend {
    fn backend_name(&self) -> &str {
        "gradient"
    }

    async fn infer(&self, message: &str, metadata: Option<&Value>) -> Result<BackendOutput> {
        let headers = [Self::auth_header(self.auth_scheme, &self.api_key)];
        let payload = Self::request_payload(message, metadata);

        let raw = post_json(
            &self.client,
            &self.endpoint_url,
            &headers,
            &payload,
            self.backend_name(),
        )
        .await?;

        Ok(BackendOutput { raw, text: None })
    }
}
