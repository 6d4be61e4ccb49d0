// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Current metrics snapshot

use anyhow::Result;
use resilience_client::{ResilienceClient, types::CircuitMetricsSnapshot};

use super::describe_error;
use crate::output::json;

pub async fn run(client: &ResilienceClient, use_json: bool) -> Result<()> {
    let metrics = client
        .metrics()
        .await
        .map_err(|e| describe_error(e, client.base_url(), "fetch metrics"))?;

    if use_json {
        json::print_json(&metrics)?;
    } else {
        print!("{}", format_snapshot(&metrics));
    }

    Ok(())
}

/// One `name: value` line per counter
pub fn format_snapshot(metrics: &CircuitMetricsSnapshot) -> String {
    format!(
        "openCount: {}\nhalfOpenCount: {}\nclosedCount: {}\nretryAttempts: {}\n",
        metrics.open_count, metrics.half_open_count, metrics.closed_count, metrics.retry_attempts
    )
}
