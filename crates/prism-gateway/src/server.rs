//! Gateway HTTP server — Axum router and handlers
//!
//! Every endpoint is a stateless request/response transform; the only
//! suspension point per request is the outbound backend call.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::extract::{Json, State};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use serde_json::Value;
use tower_http::cors::CorsLayer;
use tracing::{debug, info};

use prism_core::backends::{
    BackendOutput, DoBackend, GradientBackend, InferenceBackend, LmStudioBackend,
};
use prism_core::config::GatewayConfig;
use prism_core::router::{Route, decide_route};

use crate::error::ApiError;
use crate::protocol::{self, A2aRequest, RouteRequest, RouteResponse, methods};

/// Shared state for all handlers: the resolved config plus one adapter per
/// configured backend. Gradient and DigitalOcean are optional; requests
/// routed to an absent backend fail with a config error.
pub struct GatewayState {
    pub config: GatewayConfig,
    pub lmstudio: LmStudioBackend,
    pub gradient: Option<GradientBackend>,
    pub digitalocean: Option<DoBackend>,
}

impl GatewayState {
    /// Construct adapters from the resolved configuration
    pub fn from_config(config: GatewayConfig) -> Self {
        let lmstudio = LmStudioBackend::new(
            config.lmstudio.base_url.clone(),
            config.lmstudio.model.clone(),
        );

        let gradient = config.gradient.is_configured().then(|| {
            GradientBackend::new(
                config.gradient.endpoint_url.clone(),
                config.gradient.api_key.clone(),
                config.gradient.auth_scheme,
            )
        });

        let digitalocean = config.digitalocean.is_configured().then(|| {
            DoBackend::new(
                config.digitalocean.endpoint_url.clone(),
                config.digitalocean.api_key.clone(),
            )
        });

        Self {
            config,
            lmstudio,
            gradient,
            digitalocean,
        }
    }

    /// Forward a message to the adapter for `route`
    async fn dispatch(
        &self,
        route: Route,
        message: &str,
        metadata: Option<&Value>,
    ) -> Result<BackendOutput, ApiError> {
        let backend: &dyn InferenceBackend = match route {
            Route::Lmstudio => &self.lmstudio,
            Route::Gradient => self
                .gradient
                .as_ref()
                .ok_or(ApiError::MissingConfig("Gradient"))?,
            Route::Do => self
                .digitalocean
                .as_ref()
                .ok_or(ApiError::MissingConfig("DigitalOcean"))?,
        };

        backend
            .infer(message, metadata)
            .await
            .map_err(|e| ApiError::backend_call(backend.backend_name(), e))
    }
}

/// The gateway server
pub struct GatewayServer {
    state: Arc<GatewayState>,
    bind: SocketAddr,
}

impl GatewayServer {
    /// Create a server from a resolved configuration
    pub fn new(bind: SocketAddr, config: GatewayConfig) -> Self {
        Self {
            state: Arc::new(GatewayState::from_config(config)),
            bind,
        }
    }

    /// Build the Axum router
    pub fn router(&self) -> Router {
        router(self.state.clone())
    }

    /// Start the server (blocks until shutdown)
    pub async fn run(self) -> anyhow::Result<()> {
        let router = self.router();
        let listener = tokio::net::TcpListener::bind(self.bind).await?;
        info!("Gateway listening on {}", self.bind);

        axum::serve(listener, router).await?;

        Ok(())
    }
}

/// Build the gateway router around an existing state (used by tests)
pub fn router(state: Arc<GatewayState>) -> Router {
    Router::new()
        .route("/healthz", get(healthz_handler))
        .route("/route", post(route_handler))
        .route("/a2a", post(a2a_handler))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// ── Handlers ──

async fn healthz_handler() -> impl IntoResponse {
    Json(serde_json::json!({"status": "ok"}))
}

async fn route_handler(
    State(state): State<Arc<GatewayState>>,
    Json(req): Json<RouteRequest>,
) -> Result<Json<RouteResponse>, ApiError> {
    let route = decide_route(
        &req.message,
        req.route_hint.as_deref(),
        &state.config.route_keywords,
    );
    debug!("Routing message to {}", route);

    let output = state
        .dispatch(route, &req.message, req.metadata.as_ref())
        .await?;

    Ok(Json(RouteResponse {
        route: route.to_string(),
        output,
    }))
}

async fn a2a_handler(
    State(state): State<Arc<GatewayState>>,
    Json(req): Json<A2aRequest>,
) -> Result<Json<Value>, ApiError> {
    if req.method != methods::SEND_MESSAGE && req.method != methods::SEND_STREAMING_MESSAGE {
        return Err(ApiError::MethodNotFound);
    }

    let message = req
        .params
        .get("message")
        .ok_or_else(|| ApiError::BadRequest("Missing message in params".to_string()))?;

    let user_text = match protocol::first_text_part(message) {
        Some(text) if !text.is_empty() => text,
        _ => return Err(ApiError::BadRequest("No text part found".to_string())),
    };

    // Protocol-compatibility shim: A2A traffic is always answered by the
    // local lmstudio backend, bypassing the general router.
    let output = state
        .lmstudio
        .infer(&user_text, None)
        .await
        .map_err(|e| ApiError::backend_call(state.lmstudio.backend_name(), e))?;

    let reply = output.text.unwrap_or_default();
    Ok(Json(protocol::completed_task_envelope(&req.id, &reply)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_core::config::{AuthScheme, DoConfig, GradientConfig, LmStudioConfig};

    fn bare_config() -> GatewayConfig {
        GatewayConfig {
            lmstudio: LmStudioConfig {
                base_url: "http://localhost:1234/v1".to_string(),
                model: "small-llm".to_string(),
            },
            gradient: GradientConfig {
                endpoint_url: String::new(),
                api_key: String::new(),
                auth_scheme: AuthScheme::AuthorizationBearer,
            },
            digitalocean: DoConfig {
                endpoint_url: String::new(),
                api_key: String::new(),
            },
            route_keywords: prism_core::config::parse_keywords("ai,gpt"),
            port: 8080,
        }
    }

    #[test]
    fn test_from_config_skips_unconfigured_backends() {
        let state = GatewayState::from_config(bare_config());
        assert!(state.gradient.is_none());
        assert!(state.digitalocean.is_none());
    }

    #[test]
    fn test_from_config_builds_configured_backends() {
        let mut config = bare_config();
        config.gradient.endpoint_url = "https://api.gradient.example/infer".to_string();
        config.gradient.api_key = "k".to_string();
        config.digitalocean.endpoint_url = "https://inference.do.example/run".to_string();
        config.digitalocean.api_key = "k".to_string();

        let state = GatewayState::from_config(config);
        assert!(state.gradient.is_some());
        assert!(state.digitalocean.is_some());
    }

    #[tokio::test]
    async fn test_dispatch_missing_gradient_config() {
        let state = GatewayState::from_config(bare_config());
        let err = state.dispatch(Route::Gradient, "hi", None).await.unwrap_err();
        assert!(matches!(err, ApiError::MissingConfig("Gradient")));
    }

    #[tokio::test]
    async fn test_dispatch_missing_do_config() {
        let state = GatewayState::from_config(bare_config());
        let err = state.dispatch(Route::Do, "hi", None).await.unwrap_err();
        assert!(matches!(err, ApiError::MissingConfig("DigitalOcean")));
    }
}
