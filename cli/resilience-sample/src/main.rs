// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Fetch the resilience metrics from the default endpoint and print them

use anyhow::Result;
use resilience_client::ResilienceClient;

#[tokio::main]
async fn main() -> Result<()> {
    // Diagnostics go to stderr; stdout carries only the metrics
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::new("warn"))
        .init();

    let client = ResilienceClient::with_defaults()?;
    resilience_sample::run(client, &mut std::io::stdout()).await?;
    Ok(())
}
