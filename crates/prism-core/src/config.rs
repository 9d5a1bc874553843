//! Gateway configuration — environment-derived, constructed once at startup
//!
//! All knobs come from environment variables with sensible defaults. The
//! resolved [`GatewayConfig`] is built a single time and injected into the
//! router and adapters; nothing reads the environment ad hoc afterwards.

use tracing::warn;

/// Default listen port for the gateway
pub const DEFAULT_PORT: u16 = 8080;

/// Resolved gateway configuration
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub lmstudio: LmStudioConfig,
    pub gradient: GradientConfig,
    pub digitalocean: DoConfig,
    /// Lowercased keywords that steer a message to the gradient backend
    pub route_keywords: Vec<String>,
    pub port: u16,
}

/// LM Studio (OpenAI-compatible, local) backend settings
#[derive(Debug, Clone)]
pub struct LmStudioConfig {
    /// Endpoint root, e.g. `http://localhost:1234/v1`
    pub base_url: String,
    /// Model name as exposed by LM Studio
    pub model: String,
}

/// Gradient backend settings
#[derive(Clone)]
pub struct GradientConfig {
    pub endpoint_url: String,
    pub api_key: String,
    pub auth_scheme: AuthScheme,
}

/// DigitalOcean fallback backend settings
#[derive(Clone)]
pub struct DoConfig {
    pub endpoint_url: String,
    pub api_key: String,
}

/// How the gradient adapter presents its API key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthScheme {
    /// `Authorization: Bearer <key>` (default)
    AuthorizationBearer,
    /// `X-API-Key: <key>`
    XApiKey,
}

impl AuthScheme {
    /// Parse a scheme string, case-insensitively. Unrecognized values fall
    /// back to bearer rather than erroring.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "x_api_key" => Self::XApiKey,
            _ => Self::AuthorizationBearer,
        }
    }
}

impl GatewayConfig {
    /// Build the configuration from process environment variables.
    pub fn from_env() -> Self {
        Self {
            lmstudio: LmStudioConfig {
                base_url: env_or("LMSTUDIO_BASE_URL", "http://localhost:1234/v1"),
                model: env_or("LMSTUDIO_MODEL", "lmstudio-community/small-llm"),
            },
            gradient: GradientConfig {
                endpoint_url: env_or("GRADIENT_ENDPOINT_URL", ""),
                api_key: env_or("GRADIENT_API_KEY", ""),
                auth_scheme: AuthScheme::parse(&env_or(
                    "GRADIENT_AUTH_SCHEME",
                    "authorization_bearer",
                )),
            },
            digitalocean: DoConfig {
                endpoint_url: env_or("DO_INFERENCE_URL", ""),
                api_key: env_or("DO_INFERENCE_API_KEY", ""),
            },
            route_keywords: parse_keywords(&env_or(
                "ROUTE_KEYWORDS",
                "ai,model,ml,gpt,router,gradient",
            )),
            port: parse_port(&env_or("PRISM_PORT", "")),
        }
    }
}

impl GradientConfig {
    /// Whether both the endpoint and the key are present
    pub fn is_configured(&self) -> bool {
        !self.endpoint_url.is_empty() && !self.api_key.is_empty()
    }
}

impl DoConfig {
    /// Whether both the endpoint and the key are present
    pub fn is_configured(&self) -> bool {
        !self.endpoint_url.is_empty() && !self.api_key.is_empty()
    }
}

impl std::fmt::Debug for GradientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GradientConfig")
            .field("endpoint_url", &self.endpoint_url)
            .field("api_key", &mask_secret(&self.api_key))
            .field("auth_scheme", &self.auth_scheme)
            .finish()
    }
}

impl std::fmt::Debug for DoConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DoConfig")
            .field("endpoint_url", &self.endpoint_url)
            .field("api_key", &mask_secret(&self.api_key))
            .finish()
    }
}

/// Comma-separated keyword list → trimmed, lowercased entries
pub fn parse_keywords(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|kw| kw.trim().to_lowercase())
        .filter(|kw| !kw.is_empty())
        .collect()
}

/// Mask a secret for display: keep the first 4 chars, hide the rest.
/// Counts chars, not bytes, so multibyte keys never split mid-character.
pub fn mask_secret(secret: &str) -> String {
    if secret.is_empty() {
        return "(unset)".to_string();
    }
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 4 {
        "****".to_string()
    } else {
        let prefix: String = chars[..4].iter().collect();
        format!("{}****", prefix)
    }
}

/// Listen port from `PRISM_PORT`; unset uses the default, unparseable
/// values warn and fall back rather than failing startup.
fn parse_port(raw: &str) -> u16 {
    if raw.is_empty() {
        return DEFAULT_PORT;
    }
    raw.parse().unwrap_or_else(|_| {
        warn!("Ignoring invalid PRISM_PORT '{}', using {}", raw, DEFAULT_PORT);
        DEFAULT_PORT
    })
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name)
        .unwrap_or_else(|_| default.to_string())
        .trim()
        .to_string()
}
