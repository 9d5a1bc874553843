//! LM Studio adapter — local OpenAI-compatible chat completions

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};

use super::{BackendOutput, InferenceBackend, http_client, post_json};

/// Adapter for a local LM Studio (or any OpenAI-compatible) server.
/// No auth header; the reply text is lifted from the first choice.
#[derive(Debug)]
pub struct LmStudioBackend {
    client: Client,
    base_url: String,
    model: String,
}

impl LmStudioBackend {
    pub fn new(base_url: String, model: String) -> Self {
        Self {
            client: http_client(),
            base_url,
            model,
        }
    }

    /// Chat-completions request body: single user message, fixed low
    /// temperature, streaming disabled.
    fn chat_payload(model: &str, message: &str) -> Value {
        json!({
            "model": model,
            "messages": [
                {"role": "user", "content": message}
            ],
            "temperature": 0.2,
            "stream": false,
        })
    }

    /// Pull the reply text out of a chat-completions body, defaulting to
    /// an empty string when the structure is missing.
    fn extract_reply_text(raw: &Value) -> String {
        raw.get("choices")
            .and_then(|choices| choices.get(0))
            .and_then(|choice| choice.get("message"))
            .and_then(|message| message.get("content"))
            .and_then(|content| content.as_str())
            .unwrap_or_default()
            .to_string()
    }
}

#[async_trait]
impl InferenceBackend for LmStudioBackend {
    fn backend_name(&self) -> &str {
        "lmstudio"
    }

    async fn infer(&self, message: &str, _metadata: Option<&Value>) -> Result<BackendOutput> {
        let url = format!("{}/chat/completions", self.base_url);
        let payload = Self::chat_payload(&self.model, message);

        let raw = post_json(&self.client, &url, &[], &payload, self.backend_name()).await?;
        let text = Self::extract_reply_text(&raw);

        Ok(BackendOutput {
            raw,
            text: Some(text),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_payload_shape() {
        let payload = LmStudioBackend::chat_payload("small-llm", "hello");
        assert_eq!(payload["model"], "small-llm");
        assert_eq!(payload["messages"][0]["role"], "user");
        assert_eq!(payload["messages"][0]["content"], "hello");
        assert_eq!(payload["temperature"], 0.2);
        assert_eq!(payload["stream"], false);
    }

    #[test]
    fn test_extract_reply_text() {
        let raw = json!({
            "choices": [
                {"message": {"role": "assistant", "content": "Hi there!"}}
            ]
        });
        assert_eq!(LmStudioBackend::extract_reply_text(&raw), "Hi there!");
    }

    #[test]
    fn test_extract_reply_text_missing_structure() {
        assert_eq!(LmStudioBackend::extract_reply_text(&json!({})), "");
        assert_eq!(
            LmStudioBackend::extract_reply_text(&json!({"choices": []})),
            ""
        );
        assert_eq!(
            LmStudioBackend::extract_reply_text(&json!({"choices": [{"message": {}}]})),
            ""
        );
    }
}
