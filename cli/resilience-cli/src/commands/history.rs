// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Metrics history

use anyhow::Result;
use clap::Args;
use resilience_client::ResilienceClient;

use super::describe_error;
use crate::output::{format_timestamp, json, table};

#[derive(Args, Clone, Debug)]
pub struct HistoryArgs {
    /// Look-back window in minutes (server default 60)
    #[arg(long)]
    pub minutes: Option<u32>,
    /// Maximum number of samples (server default 300)
    #[arg(long)]
    pub limit: Option<u32>,
}

pub async fn run(args: HistoryArgs, client: &ResilienceClient, use_json: bool) -> Result<()> {
    let history = client
        .history(args.minutes, args.limit)
        .await
        .map_err(|e| describe_error(e, client.base_url(), "fetch metrics history"))?;

    if use_json {
        json::print_json(&history)?;
        return Ok(());
    }

    if history.is_empty() {
        println!("No history samples.");
        return Ok(());
    }

    let mut tbl = table::counter_table(&["TIMESTAMP", "OPEN", "HALF-OPEN", "CLOSED", "RETRIES"], 1);
    for sample in &history {
        tbl.add_row(vec![
            format_timestamp(&sample.timestamp),
            sample.metrics.open_count.to_string(),
            sample.metrics.half_open_count.to_string(),
            sample.metrics.closed_count.to_string(),
            sample.metrics.retry_attempts.to_string(),
        ]);
    }
    table::print_table(tbl);

    Ok(())
}
