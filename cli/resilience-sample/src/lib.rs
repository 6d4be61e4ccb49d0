// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Resilience metrics sample
//!
//! Opens a client, binds the default API surface to it, calls
//! `metrics_resilience_get` once and prints the result. The client is
//! consumed through [`MetricsClient`] so the call sequence can be driven by
//! a fake in tests.

use async_trait::async_trait;
use resilience_client::{ClientError, ResilienceClient, types};
use serde::Serialize;
use std::io::Write;

/// Capability the sample needs from an API client
#[async_trait]
pub trait MetricsClient: Send + Sync {
    /// Value returned by the metrics call
    type Metrics: Serialize + Send;
    /// Failure reported by the client library
    type Error: std::error::Error + Send + Sync + 'static;

    /// Perform the remote "get resilience metrics" call
    async fn metrics_resilience_get(&self) -> Result<Self::Metrics, Self::Error>;

    /// Release the connection context
    ///
    /// Invoked exactly once by [`ClientScope`] when the scope ends.
    fn close(&mut self) {}
}

#[async_trait]
impl MetricsClient for ResilienceClient {
    type Metrics = types::CircuitMetricsSnapshot;
    type Error = ClientError;

    async fn metrics_resilience_get(&self) -> Result<Self::Metrics, Self::Error> {
        self.metrics().await
    }

    fn close(&mut self) {
        tracing::debug!(base_url = %self.base_url(), "releasing resilience client");
    }
}

/// Owns a client for the duration of one operation and closes it on drop
pub struct ClientScope<C: MetricsClient> {
    client: C,
}

impl<C: MetricsClient> ClientScope<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// API surface bound to the scoped client
    pub fn api(&self) -> DefaultApi<'_, C> {
        DefaultApi::new(&self.client)
    }
}

impl<C: MetricsClient> Drop for ClientScope<C> {
    fn drop(&mut self) {
        self.client.close();
    }
}

/// Default API surface; borrows the client it was created from
pub struct DefaultApi<'a, C: MetricsClient> {
    client: &'a C,
}

impl<'a, C: MetricsClient> DefaultApi<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }

    pub async fn metrics_resilience_get(&self) -> Result<C::Metrics, C::Error> {
        self.client.metrics_resilience_get().await
    }
}

/// Failure of a sample run
#[derive(Debug, thiserror::Error)]
pub enum RunError<E: std::error::Error + 'static> {
    /// The remote call failed; the client's error is passed through as is
    #[error(transparent)]
    Remote(E),

    #[error("failed to render metrics: {0}")]
    Render(#[source] serde_json::Error),

    #[error("failed to write metrics: {0}")]
    Output(#[source] std::io::Error),
}

/// Human-readable rendering of a response value
///
/// Values that serialize to a JSON string are returned verbatim, anything
/// else as pretty-printed JSON.
pub fn render<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    match serde_json::to_value(value)? {
        serde_json::Value::String(s) => Ok(s),
        other => serde_json::to_string_pretty(&other),
    }
}

/// Fetch the metrics once through `client` and write them to `out`
///
/// Nothing is written when the remote call fails.
pub async fn run<C, W>(client: C, out: &mut W) -> Result<(), RunError<C::Error>>
where
    C: MetricsClient,
    W: Write + ?Sized,
{
    let scope = ClientScope::new(client);
    let api = scope.api();

    let metrics = api
        .metrics_resilience_get()
        .await
        .map_err(RunError::Remote)?;

    let rendered = render(&metrics).map_err(RunError::Render)?;
    writeln!(out, "{}", rendered).map_err(RunError::Output)?;
    Ok(())
}
