// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

// Copyright 2026 Edgecast Cloud LLC.

//! Resilience metrics API
//!
//! Describes the headless resilience endpoints: circuit breaker counters,
//! their sampled history, counter reset, and threshold alerting. The
//! OpenAPI document in `openapi-specs/generated/resilience-api.json` is
//! produced from this trait by `openapi-manager`, and the
//! `resilience-client` crate is generated from that document.

use chrono::{DateTime, Utc};
use dropshot::{
    HttpError, HttpResponseCreated, HttpResponseOk, Query, RequestContext, TypedBody,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Version of the API published in the OpenAPI document
pub const API_VERSION: semver::Version = semver::Version::new(1, 0, 0);

/// Title of the API published in the OpenAPI document
pub const API_TITLE: &str = "Resilience Metrics API";

/// Default window for history queries, in minutes
pub const DEFAULT_HISTORY_MINUTES: u32 = 60;

/// Default maximum number of history samples returned
pub const DEFAULT_HISTORY_LIMIT: u32 = 300;

/// Default maximum number of alert events returned
pub const DEFAULT_ALERTS_LIMIT: u32 = 50;

/// Default evaluation window for alert rules, in minutes
pub const DEFAULT_ALERT_WINDOW_MINUTES: u32 = 60;

// ============================================================================
// Metrics Types
// ============================================================================

/// Point-in-time circuit breaker counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CircuitMetricsSnapshot {
    /// Number of circuits currently open
    pub open_count: u32,
    /// Number of circuits currently half-open
    pub half_open_count: u32,
    /// Number of circuits currently closed
    pub closed_count: u32,
    /// Retry attempts recorded since the last reset
    pub retry_attempts: u32,
}

/// A timestamped metrics snapshot from the history ring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResilienceMetricsSample {
    pub timestamp: DateTime<Utc>,
    pub metrics: CircuitMetricsSnapshot,
}

/// Query parameters for the history endpoint
#[derive(Debug, Deserialize, JsonSchema)]
pub struct HistoryQuery {
    /// Window to look back over, in minutes (defaults to 60)
    #[serde(default)]
    pub minutes: Option<u32>,
    /// Maximum number of samples (defaults to 300)
    #[serde(default)]
    pub limit: Option<u32>,
}

/// Acknowledgement returned by the reset endpoint
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResetResponse {
    pub ok: bool,
    pub reset_at: DateTime<Utc>,
}

// ============================================================================
// Alert Types
// ============================================================================

/// Severity attached to an alert rule and the events it raises
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    #[default]
    Warning,
    Critical,
}

impl AlertSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertSeverity::Warning => "warning",
            AlertSeverity::Critical => "critical",
        }
    }
}

impl std::fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request body for creating a threshold alert rule
///
/// At least one of `openThreshold` or `retryThreshold` must be positive.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AlertRuleCreate {
    /// Display name for the rule
    #[serde(default)]
    pub name: Option<String>,
    /// Fire when open circuits grow by more than this within the window
    pub open_threshold: u32,
    /// Fire when retry attempts grow by more than this within the window
    pub retry_threshold: u32,
    /// Evaluation window in minutes (defaults to 60)
    #[serde(default)]
    pub window_minutes: Option<u32>,
    #[serde(default)]
    pub severity: Option<AlertSeverity>,
}

impl AlertRuleCreate {
    /// Whether the request sets at least one positive threshold
    pub fn has_threshold(&self) -> bool {
        self.open_threshold > 0 || self.retry_threshold > 0
    }
}

/// A stored threshold alert rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AlertRule {
    pub id: String,
    pub name: String,
    pub open_threshold: u32,
    pub retry_threshold: u32,
    pub window_minutes: u32,
    pub severity: AlertSeverity,
    pub enabled: bool,
}

/// An alert raised by a rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AlertEvent {
    pub id: String,
    pub rule_id: String,
    pub message: String,
    pub severity: AlertSeverity,
    pub triggered_at: DateTime<Utc>,
    /// Change in open circuits over the rule window
    pub open_delta: i32,
    /// Change in retry attempts over the rule window
    pub retry_delta: i32,
}

/// Rules and recent events
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct AlertsResponse {
    pub rules: Vec<AlertRule>,
    pub events: Vec<AlertEvent>,
}

/// Query parameters for the alerts listing
#[derive(Debug, Deserialize, JsonSchema)]
pub struct AlertsQuery {
    /// Maximum number of events (defaults to 50)
    #[serde(default)]
    pub limit: Option<u32>,
}

// ============================================================================
// API Trait
// ============================================================================

/// Resilience Metrics API
#[dropshot::api_description]
pub trait ResilienceApi {
    /// Context type for request handlers
    type Context: Send + Sync + 'static;

    /// Get the current circuit breaker metrics
    #[endpoint {
        method = GET,
        path = "/metrics/resilience",
        tags = ["metrics"],
    }]
    async fn metrics_resilience_get(
        rqctx: RequestContext<Self::Context>,
    ) -> Result<HttpResponseOk<CircuitMetricsSnapshot>, HttpError>;

    /// Get sampled metrics history
    ///
    /// Returns samples in chronological order.
    #[endpoint {
        method = GET,
        path = "/metrics/resilience/history",
        tags = ["metrics"],
    }]
    async fn metrics_resilience_history_get(
        rqctx: RequestContext<Self::Context>,
        query: Query<HistoryQuery>,
    ) -> Result<HttpResponseOk<Vec<ResilienceMetricsSample>>, HttpError>;

    /// Reset circuit breaker counters and history
    #[endpoint {
        method = PUT,
        path = "/metrics/resilience/reset",
        tags = ["metrics"],
    }]
    async fn metrics_resilience_reset_put(
        rqctx: RequestContext<Self::Context>,
    ) -> Result<HttpResponseOk<ResetResponse>, HttpError>;

    /// List alert rules and recent alert events
    #[endpoint {
        method = GET,
        path = "/alerts",
        tags = ["alerts"],
    }]
    async fn alerts_get(
        rqctx: RequestContext<Self::Context>,
        query: Query<AlertsQuery>,
    ) -> Result<HttpResponseOk<AlertsResponse>, HttpError>;

    /// Create a threshold alert rule
    #[endpoint {
        method = POST,
        path = "/alerts/thresholds",
        tags = ["alerts"],
    }]
    async fn alerts_thresholds_post(
        rqctx: RequestContext<Self::Context>,
        body: TypedBody<AlertRuleCreate>,
    ) -> Result<HttpResponseCreated<AlertRule>, HttpError>;
}
