// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

// Copyright 2026 Edgecast Cloud LLC.

//! Standalone stub resilience server for testing and development
//!
//! Run with:
//! ```bash
//! cargo run -p resilience-stub-server
//! ```
//!
//! Then run the sample against it (it targets http://localhost:5050):
//! ```bash
//! cargo run -p resilience-sample
//! ```

use anyhow::Result;
use dropshot::ConfigLoggingLevel;
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;

use resilience_stub_server::{StubContext, fixtures_dir, start_server};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(
            "resilience_stub_server=info,dropshot=info",
        ))
        .init();

    let context = Arc::new(StubContext::from_fixtures(&fixtures_dir())?);

    let bind_address = SocketAddr::from((Ipv4Addr::LOCALHOST, 5050));
    let server = start_server(context, bind_address, ConfigLoggingLevel::Info)?;

    tracing::info!("Stub resilience server listening on http://{}", server.local_addr());
    tracing::info!("Available endpoints:");
    tracing::info!("  GET  /metrics/resilience");
    tracing::info!("  GET  /metrics/resilience/history?minutes=..&limit=..");
    tracing::info!("  PUT  /metrics/resilience/reset");
    tracing::info!("  GET  /alerts?limit=..");
    tracing::info!("  POST /alerts/thresholds");

    server
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))
}
