//! Middleware
//!
//! Tower middleware for request processing.

pub mod auth;
pub mod cors;
pub mod metrics;
pub mod security;

pub use auth::{auth_middleware, AuthUser};
pub use cors::create_cors_layer;
pub use metrics::track_metrics;
pub use security::{
    create_security_headers_layer, create_security_headers_layer_no_hsts, SecurityHeadersConfig,
    SecurityHeadersLayer,
};
