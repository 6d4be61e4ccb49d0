// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

// Copyright 2026 Edgecast Cloud LLC.

//! Stub resilience metrics server for testing
//!
//! This crate provides a Dropshot-based HTTP server that implements the
//! resilience API trait with fixture data. It can be used for:
//!
//! - Integration testing of resilience-client without a live service
//! - End-to-end testing of the `resilience` CLI and `resilience-sample`
//! - Local development and demos
//!
//! The server loads `metrics.json`, `history.json` and `alerts.json` from a
//! fixtures directory at startup and keeps them in memory. Reset and rule
//! creation mutate that in-memory copy only.

use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use dropshot::{
    ConfigDropshot, ConfigLogging, ConfigLoggingLevel, HttpError, HttpResponseCreated,
    HttpResponseOk, HttpServer, HttpServerStarter, Query, RequestContext, TypedBody,
};
use resilience_api::{
    AlertRule, AlertRuleCreate, AlertsQuery, AlertsResponse, CircuitMetricsSnapshot,
    DEFAULT_ALERT_WINDOW_MINUTES, DEFAULT_ALERTS_LIMIT, DEFAULT_HISTORY_LIMIT,
    DEFAULT_HISTORY_MINUTES, HistoryQuery, ResetResponse, ResilienceMetricsSample,
};
use serde::de::DeserializeOwned;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

// ============================================================================
// Server Context
// ============================================================================

#[derive(Debug, Clone)]
struct StubState {
    metrics: CircuitMetricsSnapshot,
    /// Sorted oldest first
    history: Vec<ResilienceMetricsSample>,
    alerts: AlertsResponse,
}

/// Context for the stub server containing all fixture data
#[derive(Debug)]
pub struct StubContext {
    state: Mutex<StubState>,
}

impl StubContext {
    /// Create a stub context from in-memory data
    pub fn new(
        metrics: CircuitMetricsSnapshot,
        mut history: Vec<ResilienceMetricsSample>,
        alerts: AlertsResponse,
    ) -> Self {
        history.sort_by_key(|s| s.timestamp);
        Self {
            state: Mutex::new(StubState {
                metrics,
                history,
                alerts,
            }),
        }
    }

    /// Create a stub context by loading fixture data from JSON files
    ///
    /// Expects `metrics.json`; `history.json` and `alerts.json` are
    /// optional and default to empty.
    pub fn from_fixtures(fixtures_dir: &Path) -> Result<Self> {
        let metrics: CircuitMetricsSnapshot = load_json(&fixtures_dir.join("metrics.json"))?;

        let history_path = fixtures_dir.join("history.json");
        let history: Vec<ResilienceMetricsSample> = if history_path.exists() {
            load_json(&history_path)?
        } else {
            Vec::new()
        };

        let alerts_path = fixtures_dir.join("alerts.json");
        let alerts: AlertsResponse = if alerts_path.exists() {
            load_json(&alerts_path)?
        } else {
            AlertsResponse::default()
        };

        tracing::info!(
            "Loaded {} history samples and {} alert rules from {}",
            history.len(),
            alerts.rules.len(),
            fixtures_dir.display()
        );

        Ok(Self::new(metrics, history, alerts))
    }

    /// Current snapshot, as the metrics endpoint would return it
    pub fn snapshot(&self) -> Result<CircuitMetricsSnapshot, HttpError> {
        Ok(self.lock()?.metrics)
    }

    fn lock(&self) -> Result<MutexGuard<'_, StubState>, HttpError> {
        self.state
            .lock()
            .map_err(|_| HttpError::for_internal_error("stub state lock poisoned".to_string()))
    }
}

fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let json_str = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&json_str).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Directory holding the bundled fixture files
pub fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

// ============================================================================
// API Implementation
// ============================================================================

/// Marker type for the stub resilience API implementation
pub enum StubResilienceApi {}

impl resilience_api::ResilienceApi for StubResilienceApi {
    type Context = Arc<StubContext>;

    async fn metrics_resilience_get(
        rqctx: RequestContext<Self::Context>,
    ) -> Result<HttpResponseOk<CircuitMetricsSnapshot>, HttpError> {
        let snapshot = rqctx.context().snapshot()?;
        Ok(HttpResponseOk(snapshot))
    }

    async fn metrics_resilience_history_get(
        rqctx: RequestContext<Self::Context>,
        query: Query<HistoryQuery>,
    ) -> Result<HttpResponseOk<Vec<ResilienceMetricsSample>>, HttpError> {
        let query = query.into_inner();
        let minutes = positive_or(query.minutes, DEFAULT_HISTORY_MINUTES);
        let limit = positive_or(query.limit, DEFAULT_HISTORY_LIMIT);

        let state = rqctx.context().lock()?;
        Ok(HttpResponseOk(select_history(&state.history, minutes, limit)))
    }

    async fn metrics_resilience_reset_put(
        rqctx: RequestContext<Self::Context>,
    ) -> Result<HttpResponseOk<ResetResponse>, HttpError> {
        let mut state = rqctx.context().lock()?;
        state.metrics = CircuitMetricsSnapshot::default();
        state.history.clear();

        let reset_at = Utc::now();
        tracing::info!("Metrics reset at {}", reset_at.to_rfc3339());

        Ok(HttpResponseOk(ResetResponse { ok: true, reset_at }))
    }

    async fn alerts_get(
        rqctx: RequestContext<Self::Context>,
        query: Query<AlertsQuery>,
    ) -> Result<HttpResponseOk<AlertsResponse>, HttpError> {
        let limit = positive_or(query.into_inner().limit, DEFAULT_ALERTS_LIMIT) as usize;
        let state = rqctx.context().lock()?;

        // Newest first
        let mut events = state.alerts.events.clone();
        events.sort_by(|a, b| b.triggered_at.cmp(&a.triggered_at));
        events.truncate(limit);

        Ok(HttpResponseOk(AlertsResponse {
            rules: state.alerts.rules.clone(),
            events,
        }))
    }

    async fn alerts_thresholds_post(
        rqctx: RequestContext<Self::Context>,
        body: TypedBody<AlertRuleCreate>,
    ) -> Result<HttpResponseCreated<AlertRule>, HttpError> {
        let body = body.into_inner();
        if !body.has_threshold() {
            return Err(HttpError::for_bad_request(
                Some("threshold_required".to_string()),
                "openThreshold or retryThreshold must be positive".to_string(),
            ));
        }

        let mut state = rqctx.context().lock()?;
        let name = body
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| format!("rule-{}", state.alerts.rules.len() + 1));

        let rule = AlertRule {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            open_threshold: body.open_threshold,
            retry_threshold: body.retry_threshold,
            window_minutes: positive_or(body.window_minutes, DEFAULT_ALERT_WINDOW_MINUTES),
            severity: body.severity.unwrap_or_default(),
            enabled: true,
        };
        state.alerts.rules.push(rule.clone());

        tracing::info!("Created alert rule {} ({})", rule.name, rule.id);
        Ok(HttpResponseCreated(rule))
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

fn positive_or(value: Option<u32>, default: u32) -> u32 {
    value.filter(|v| *v > 0).unwrap_or(default)
}

/// Samples within `minutes` of the newest sample, capped to the newest `limit`
///
/// The window is anchored at the newest fixture sample rather than the
/// wall clock so fixture data stays visible.
fn select_history(
    history: &[ResilienceMetricsSample],
    minutes: u32,
    limit: u32,
) -> Vec<ResilienceMetricsSample> {
    let Some(newest) = history.last() else {
        return Vec::new();
    };
    let cutoff = newest.timestamp - Duration::minutes(i64::from(minutes));

    let in_window: Vec<_> = history
        .iter()
        .filter(|s| s.timestamp >= cutoff)
        .cloned()
        .collect();
    let skip = in_window.len().saturating_sub(limit as usize);
    in_window.into_iter().skip(skip).collect()
}

/// Create the Dropshot API description for the stub server
pub fn api_description() -> Result<dropshot::ApiDescription<Arc<StubContext>>, String> {
    resilience_api::resilience_api_mod::api_description::<StubResilienceApi>()
        .map_err(|e| e.to_string())
}

/// Start the stub server on `bind_address` (use port 0 for an ephemeral port)
pub fn start_server(
    context: Arc<StubContext>,
    bind_address: SocketAddr,
    level: ConfigLoggingLevel,
) -> Result<HttpServer<Arc<StubContext>>> {
    let config = ConfigDropshot {
        bind_address,
        default_request_body_max_bytes: 1024 * 1024,
        default_handler_task_mode: dropshot::HandlerTaskMode::Detached,
        ..Default::default()
    };

    let log = ConfigLogging::StderrTerminal { level }
        .to_logger("resilience-stub-server")
        .map_err(|e| anyhow::anyhow!("Failed to create logger: {}", e))?;

    let api = api_description().map_err(|e| anyhow::anyhow!(e))?;
    let server = HttpServerStarter::new(&config, api, context, &log)
        .map_err(|e| anyhow::anyhow!("Failed to create server: {}", e))?
        .start();

    Ok(server)
}

// ============================================================================
// Tests
// ============================================================================
