//! DigitalOcean adapter — fixed bearer-auth fallback endpoint

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};

use super::{BackendOutput, InferenceBackend, http_client, post_json};
use crate::config::mask_secret;

/// Adapter for the DigitalOcean inference fallback. Always sends
/// `Authorization: Bearer <key>`.
pub struct DoBackend {
    client: Client,
    endpoint_url: String,
    api_key: String,
}

impl std::fmt::Debug for DoBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DoBackend")
            .field("endpoint_url", &self.endpoint_url)
            .field("api_key", &mask_secret(&self.api_key))
            .finish()
    }
}

impl DoBackend {
    pub fn new(endpoint_url: String, api_key: String) -> Self {
        Self {
            client: http_client(),
            endpoint_url,
            api_key,
        }
    }
}

#[async_trait]
impl InferenceBackend for DoBackend {
    fn backend_name(&self) -> &str {
        "do"
    }

    async fn infer(&self, message: &str, _metadata: Option<&Value>) -> Result<BackendOutput> {
        let headers = [("Authorization", format!("Bearer {}", self.api_key))];
        let payload = json!({"input": message});

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
