//! Gateway wire types — the `/route` body shapes and the A2A envelope

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use prism_core::BackendOutput;

/// Body of `POST /route`
#[derive(Debug, Clone, Deserialize)]
pub struct RouteRequest {
    /// User message to route
    pub message: String,
    /// Optional explicit route: "lmstudio" | "gradient" | "do"
    #[serde(default)]
    pub route_hint: Option<String>,
    /// Optional free-form metadata, forwarded to the gradient backend only
    #[serde(default)]
    pub metadata: Option<Value>,
}

/// Response of `POST /route`
#[derive(Debug, Clone, Serialize)]
pub struct RouteResponse {
    pub route: String,
    pub output: BackendOutput,
}

/// JSON-RPC-like envelope accepted by `POST /a2a`
#[derive(Debug, Clone, Deserialize)]
pub struct A2aRequest {
    pub id: String,
    #[serde(default = "default_jsonrpc")]
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: Value,
}

fn default_jsonrpc() -> String {
    "2.0".to_string()
}

/// A2A method names the gateway accepts
pub mod methods {
    pub const SEND_MESSAGE: &str = "messages.send_message";
    pub const SEND_STREAMING_MESSAGE: &str = "messages.sendStreamingMessage";
}

/// First `kind == "text"` part of an A2A message object, if any
pub fn first_text_part(message: &Value) -> Option<String> {
    message
        .get("parts")?
        .as_array()?
        .iter()
        .find_map(|part| {
            if part.get("kind").and_then(Value::as_str) == Some("text") {
                part.get("text").and_then(Value::as_str).map(str::to_string)
            } else {
                None
            }
        })
}

/// Success envelope for an answered A2A message: a single completed task
/// with one agent-role history entry carrying the reply.
pub fn completed_task_envelope(request_id: &str, reply: &str) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": request_id,
        "result": {
            "task": {
                "id": "task-1",
                "status": {"state": "completed"},
                "artifacts": [],
                "history": [
                    {
                        "role": "agent",
                        "parts": [
                            {"kind": "text", "text": reply}
                        ],
                    }
                ],
            }
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_request_deserialize_minimal() {
        let req: RouteRequest = serde_json::from_str(r#"{"message":"hi"}"#).unwrap();
        assert_eq!(req.message, "hi");
        assert!(req.route_hint.is_none());
        assert!(req.metadata.is_none());
    }

    #[test]
    fn test_route_request_deserialize_full() {
        let req: RouteRequest = serde_json::from_str(
            r#"{"message":"hi","route_hint":"do","metadata":{"tenant":"acme"}}"#,
        )
        .unwrap();
        assert_eq!(req.route_hint.as_deref(), Some("do"));
        assert_eq!(req.metadata.unwrap()["tenant"], "acme");
    }

    #[test]
    fn test_a2a_request_defaults_jsonrpc() {
        let req: A2aRequest = serde_json::from_str(
            r#"{"id":"1","method":"messages.send_message","params":{}}"#,
        )
        .unwrap();
        assert_eq!(req.jsonrpc, "2.0");
    }

    #[test]
    fn test_first_text_part_picks_first_text_kind() {
        let message = json!({
            "parts": [
                {"kind": "file", "uri": "file:///x"},
                {"kind": "text", "text": "hello"},
                {"kind": "text", "text": "second"},
            ]
        });
        assert_eq!(first_text_part(&message).as_deref(), Some("hello"));
    }

    #[test]
    fn test_first_text_part_none_when_absent() {
        assert!(first_text_part(&json!({})).is_none());
        assert!(first_text_part(&json!({"parts": []})).is_none());
        let no_text = json!({"parts": [{"kind": "file", "uri": "file:///x"}]});
        assert!(first_text_part(&no_text).is_none());
        // kind == "text" but no text field
        let missing_field = json!({"parts": [{"kind": "text"}]});
        assert!(first_text_part(&missing_field).is_none());
    }

    #[test]
    fn test_first_text_part_skips_text_kind_without_field() {
        let message = json!({
            "parts": [
                {"kind": "text"},
                {"kind": "text", "text": "usable"},
            ]
        });
        assert_eq!(first_text_part(&message).as_deref(), Some("usable"));
    }

    #[test]
    fn test_completed_task_envelope_shape() {
        let envelope = completed_task_envelope("req-9", "All done");
        assert_eq!(envelope["jsonrpc"], "2.0");
        assert_eq!(envelope["id"], "req-9");
        let task = &envelope["result"]["task"];
        assert_eq!(task["id"], "task-1");
        assert_eq!(task["status"]["state"], "completed");
        assert_eq!(task["artifacts"], json!([]));
        assert_eq!(task["history"][0]["role"], "agent");
        assert_eq!(task["history"][0]["parts"][0]["kind"], "text");
        assert_eq!(task["history"][0]["parts"][0]["text"], "All done");
    }
}
