//! prism-core — routing logic and backend adapters for the prism gateway
//!
//! The gateway's moving parts live here: an environment-derived
//! [`GatewayConfig`], the pure [`decide_route`] function, and one adapter
//! per inference backend behind the [`InferenceBackend`] trait.

pub mod backends;
pub mod config;
pub mod router;

pub use backends::{BackendOutput, InferenceBackend};
pub use config::{AuthScheme, GatewayConfig};
pub use router::{Route, decide_route};
