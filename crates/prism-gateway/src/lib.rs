//! prism-gateway — HTTP entrypoint for the prism routing gateway
//!
//! Exposes a health check, the generic `/route` endpoint, and the `/a2a`
//! protocol-compatibility endpoint, all stateless request/response
//! transforms over the adapters in `prism-core`.

pub mod error;
pub mod protocol;
pub mod server;

pub use error::ApiError;
pub use server::{GatewayServer, GatewayState};
