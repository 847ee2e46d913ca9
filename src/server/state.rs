//! Application state shared across all request handlers.
//!
//! The `AppState` struct holds the shared resources every handler needs. It
//! is initialized once during startup and then cloned (cheaply — every field
//! is a pool, an `Arc`, or a handle around one) for each request through
//! Axum's state extraction.

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::server::{
    config::Config,
    service::{auth::otp::OtpService, shipping::token::TokenCache},
};

/// Application state containing shared resources and dependencies.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool for accessing persistent storage.
    pub db: DatabaseConnection,

    /// HTTP client for external API requests (shipping provider, email and
    /// SMS senders). Configured with no redirects to prevent SSRF issues.
    pub http_client: reqwest::Client,

    /// Environment-derived configuration.
    pub config: Arc<Config>,

    /// In-memory one-time login codes, per destination.
    pub otp_service: OtpService,

    /// Shipping-provider credential cache guarded by a cross-process lease.
    pub token_cache: TokenCache,
}

impl AppState {
    /// Creates the application state from initialized dependencies.
    ///
    /// Called once during server startup; the resulting state is handed to
    /// the Axum router for use in request handlers.
    pub fn new(db: DatabaseConnection, http_client: reqwest::Client, config: Config) -> Self {
        let config = Arc::new(config);
        let token_cache = TokenCache::new(db.clone(), http_client.clone(), config.clone());

        Self {
            db,
            http_client,
            config,
            otp_service: OtpService::new(),
            token_cache,
        }
    }
}
