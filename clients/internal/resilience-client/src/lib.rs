// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Resilience Metrics API Client Library
//!
//! Typed access to the headless resilience endpoints. The low-level client
//! is generated by Progenitor from
//! `openapi-specs/generated/resilience-api.json`; [`ResilienceClient`]
//! wraps it with the library defaults (base URL, timeout, user agent).
//!
//! ## Usage
//!
//! ```ignore
//! use resilience_client::ResilienceClient;
//!
//! let client = ResilienceClient::with_defaults()?;
//! let metrics = client.metrics().await?;
//! println!("open circuits: {}", metrics.open_count);
//!
//! // Access the generated client for anything not wrapped here
//! let history = client.inner().metrics_resilience_history_get().limit(10u32).send().await?;
//! ```

use std::time::Duration;

// Include the Progenitor-generated client code
include!(concat!(env!("OUT_DIR"), "/client.rs"));

/// Base URL used when none is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:5050";

/// Per-request timeout applied to the HTTP transport
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

const USER_AGENT: &str = concat!("resilience-client/", env!("CARGO_PKG_VERSION"));

/// Errors produced by [`ResilienceClient`]
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("failed to build HTTP transport: {0}")]
    Transport(#[from] reqwest::Error),

    #[error(transparent)]
    Api(#[from] Error<types::Error>),
}

/// Validate a base URL and strip any trailing slash
///
/// Only absolute `http` and `https` URLs are accepted.
pub fn normalize_base_url(base_url: &str) -> Result<String, ClientError> {
    let parsed = url::Url::parse(base_url).map_err(|e| ClientError::InvalidBaseUrl {
        url: base_url.to_string(),
        reason: e.to_string(),
    })?;

    match parsed.scheme() {
        "http" | "https" => {}
        other => {
            return Err(ClientError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: format!("unsupported scheme '{}'", other),
            });
        }
    }

    Ok(base_url.trim_end_matches('/').to_string())
}

/// Configured connection to the resilience metrics service
///
/// Owns the HTTP transport. Dropping the client releases its connection
/// pool.
#[derive(Debug, Clone)]
pub struct ResilienceClient {
    inner: Client,
}

impl ResilienceClient {
    /// Create a client for the given base URL (e.g., "http://localhost:5050")
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let base_url = normalize_base_url(base_url)?;

        // reqwest is built without a bundled provider; ignore the error
        // when another caller installed one first.
        let _ = rustls::crypto::ring::default_provider().install_default();

        let http_client = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .connect_timeout(DEFAULT_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()?;

        tracing::debug!(base_url = %base_url, "created resilience client");

        Ok(Self {
            inner: Client::new_with_client(&base_url, http_client),
        })
    }

    /// Create a client for [`DEFAULT_BASE_URL`]
    pub fn with_defaults() -> Result<Self, ClientError> {
        Self::new(DEFAULT_BASE_URL)
    }

    /// Access the underlying Progenitor client
    pub fn inner(&self) -> &Client {
        &self.inner
    }

    /// Base URL this client talks to
    pub fn base_url(&self) -> &str {
        self.inner.baseurl()
    }

    // ========================================================================
    // Metrics
    // ========================================================================

    /// Get the current circuit breaker metrics
    pub async fn metrics(&self) -> Result<types::CircuitMetricsSnapshot, ClientError> {
        let response = self.inner.metrics_resilience_get().send().await?;
        Ok(response.into_inner())
    }

    /// Get sampled metrics history
    ///
    /// # Arguments
    /// * `minutes` - Look-back window (server default 60)
    /// * `limit` - Maximum number of samples (server default 300)
    pub async fn history(
        &self,
        minutes: Option<u32>,
        limit: Option<u32>,
    ) -> Result<Vec<types::ResilienceMetricsSample>, ClientError> {
        let mut request = self.inner.metrics_resilience_history_get();
        if let Some(minutes) = minutes {
            request = request.minutes(minutes);
        }
        if let Some(limit) = limit {
            request = request.limit(limit);
        }
        let response = request.send().await?;
        Ok(response.into_inner())
    }

    /// Reset circuit breaker counters and history
    pub async fn reset(&self) -> Result<types::ResetResponse, ClientError> {
        let response = self.inner.metrics_resilience_reset_put().send().await?;
        Ok(response.into_inner())
    }

    // ========================================================================
    // Alerts
    // ========================================================================

    /// List alert rules and up to `limit` recent events
    pub async fn alerts(&self, limit: Option<u32>) -> Result<types::AlertsResponse, ClientError> {
        let mut request = self.inner.alerts_get();
        if let Some(limit) = limit {
            request = request.limit(limit);
        }
        let response = request.send().await?;
        Ok(response.into_inner())
    }

    /// Create a threshold alert rule
    pub async fn create_alert_rule(
        &self,
        body: types::AlertRuleCreate,
    ) -> Result<types::AlertRule, ClientError> {
        let response = self.inner.alerts_thresholds_post().body(body).send().await?;
        Ok(response.into_inner())
    }
}
