//! HTTP surface of the identity provider.

pub mod error;
pub mod handlers;

use crate::service::TokenService;
use axum::Router;
use axum::routing::{get, post};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Issuance and introspection core.
    pub service: Arc<TokenService>,
}

impl AppState {
    pub fn new(service: TokenService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

/// Builds the router with all routes and shared state.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/token", post(handlers::token_handler))
        .route("/introspect", post(handlers::introspect_handler))
        .route("/health", get(handlers::health_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
