//! Shipping credential cache.
//!
//! All workers share one provider token. Reads are cheap row lookups; a
//! refresh is guarded twice — a process-local mutex dedupes concurrent
//! tasks inside one worker, and a lease on the `credential_lock` row keeps
//! other workers from hammering the provider's login endpoint at the same
//! time. The lease is owner-stamped and TTL-bounded: a crashed holder's
//! lease expires on its own, and release only ever removes the caller's own
//! lease.

use chrono::{Duration, Utc};
use rand::Rng;
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::server::{config::Config, data::credential::CredentialRepository, error::AppError};

const TOKEN_NAME: &str = "shipping:token";
const LOCK_NAME: &str = "shipping:refresh_lock";

/// Lease length; comfortably longer than one provider login round-trip.
const LOCK_TTL_SECONDS: i64 = 15;

/// Refresh slightly before the provider-reported expiry.
const EXPIRY_SAFETY_BUFFER_SECONDS: i64 = 2 * 60;

/// Fallback when the provider omits `expires_in`.
const DEFAULT_EXPIRES_IN_SECONDS: i64 = 7 * 24 * 3600;

/// Attempts to obtain the lease before refreshing without one.
const LOCK_RETRY_ATTEMPTS: u32 = 5;

#[derive(Deserialize)]
struct LoginResponse {
    token: Option<String>,
    expires_in: Option<i64>,
}

/// Process-wide handle to the shared shipping credential.
#[derive(Clone)]
pub struct TokenCache {
    db: DatabaseConnection,
    http: reqwest::Client,
    config: Arc<Config>,
    /// Identity stamped onto acquired leases; unique per worker process.
    owner: String,
    /// In-process dedup: concurrent tasks in this worker queue up behind
    /// one refresh instead of each hitting the provider.
    refresh_guard: Arc<Mutex<()>>,
}

impl TokenCache {
    pub fn new(db: DatabaseConnection, http: reqwest::Client, config: Arc<Config>) -> Self {
        let owner = format!("worker-{:08x}", rand::rng().random::<u32>());

        Self {
            db,
            http,
            config,
            owner,
            refresh_guard: Arc::new(Mutex::new(())),
        }
    }

    /// Returns a token valid at call time, refreshing it if necessary.
    pub async fn get_valid(&self) -> Result<String, AppError> {
        if let Some(token) = self.read_fresh().await? {
            return Ok(token);
        }

        self.refresh().await
    }

    /// Unconditionally refreshes, e.g. after the provider rejected the
    /// cached token as unauthorized.
    pub async fn force_refresh(&self) -> Result<String, AppError> {
        self.refresh().await
    }

    async fn read_fresh(&self) -> Result<Option<String>, AppError> {
        let repo = CredentialRepository::new(&self.db);

        Ok(repo
            .get(TOKEN_NAME)
            .await?
            .filter(|credential| credential.expires_at > Utc::now())
            .map(|credential| credential.token))
    }

    async fn refresh(&self) -> Result<String, AppError> {
        let _guard = self.refresh_guard.lock().await;

        // Whoever held the guard before us may already have refreshed.
        if let Some(token) = self.read_fresh().await? {
            return Ok(token);
        }

        let repo = CredentialRepository::new(&self.db);

        let mut acquired = false;
        for _ in 0..LOCK_RETRY_ATTEMPTS {
            if repo
                .try_acquire_lock(LOCK_NAME, &self.owner, Duration::seconds(LOCK_TTL_SECONDS))
                .await?
            {
                acquired = true;
                break;
            }

            // Another worker is refreshing: back off with jitter, then see
            // whether its result landed.
            let jitter_ms = rand::rng().random_range(200..700);
            tokio::time::sleep(std::time::Duration::from_millis(jitter_ms)).await;

            if let Some(token) = self.read_fresh().await? {
                return Ok(token);
            }
        }

        if !acquired {
            // The holder is stuck but its lease hasn't expired yet.
            tracing::warn!("Refreshing shipping credential without lease");
        }

        let result = self.fetch_and_store(&repo).await;

        if acquired {
            if let Err(err) = repo.release_lock(LOCK_NAME, &self.owner).await {
                tracing::warn!("Failed to release credential lease: {}", err);
            }
        }

        result
    }

    async fn fetch_and_store(
        &self,
        repo: &CredentialRepository<'_, DatabaseConnection>,
    ) -> Result<String, AppError> {
        let response = self
            .http
            .post(format!("{}/auth/login", self.config.shipping_api_base))
            .json(&serde_json::json!({
                "email": self.config.shipping_email,
                "password": self.config.shipping_password,
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::Internal(format!(
                "Shipping provider auth failed: {}",
                response.status()
            )));
        }

        let body: LoginResponse = response.json().await?;

        let token = body.token.ok_or_else(|| {
            AppError::Internal("No token returned from shipping provider".to_string())
        })?;
        let expires_in = body.expires_in.unwrap_or(DEFAULT_EXPIRES_IN_SECONDS);
        let expires_at = Utc::now() + Duration::seconds(expires_in - EXPIRY_SAFETY_BUFFER_SECONDS);

        repo.put(TOKEN_NAME, &token, expires_at).await?;

        Ok(token)
    }
}
