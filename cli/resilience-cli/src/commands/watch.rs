// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Poll the metrics snapshot on an interval

use std::time::Duration;

use anyhow::Result;
use chrono::{DateTime, SecondsFormat, Utc};
use clap::Args;
use resilience_client::ResilienceClient;
use resilience_client::types::CircuitMetricsSnapshot;
use serde::Serialize;

use super::describe_error;
use crate::output::{format_timestamp, json};

pub const CSV_HEADER: &str = "capturedAt,openCount,halfOpenCount,closedCount,retryAttempts";

#[derive(Args, Clone, Debug)]
pub struct WatchArgs {
    /// Poll interval in milliseconds
    #[arg(long, default_value_t = 2000, value_parser = clap::value_parser!(u64).range(100..))]
    pub interval_ms: u64,
    /// Stop after this many polls (runs until interrupted when omitted)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub count: Option<u64>,
    /// Emit CSV rows instead of text lines (takes precedence over --json)
    #[arg(long)]
    pub csv: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CapturedSnapshot<'a> {
    captured_at: DateTime<Utc>,
    #[serde(flatten)]
    metrics: &'a CircuitMetricsSnapshot,
}

pub async fn run(args: WatchArgs, client: &ResilienceClient, use_json: bool) -> Result<()> {
    let mut ticker = tokio::time::interval(Duration::from_millis(args.interval_ms));
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    if args.csv {
        println!("{}", CSV_HEADER);
    }

    let mut polls = 0u64;
    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            _ = tokio::signal::ctrl_c() => {
                tracing::debug!("watch interrupted after {} polls", polls);
                return Ok(());
            }
        }

        let metrics = client
            .metrics()
            .await
            .map_err(|e| describe_error(e, client.base_url(), "fetch metrics"))?;
        let captured_at = Utc::now();

        if args.csv {
            println!("{}", csv_row(&captured_at, &metrics));
        } else if use_json {
            json::print_json_line(&CapturedSnapshot {
                captured_at,
                metrics: &metrics,
            })?;
        } else {
            println!(
                "{} open={} halfOpen={} closed={} retries={}",
                format_timestamp(&captured_at),
                metrics.open_count,
                metrics.half_open_count,
                metrics.closed_count,
                metrics.retry_attempts
            );
        }

        polls += 1;
        if args.count.is_some_and(|count| polls >= count) {
            return Ok(());
        }
    }
}

fn csv_row(captured_at: &DateTime<Utc>, metrics: &CircuitMetricsSnapshot) -> String {
    format!(
        "{},{},{},{},{}",
        captured_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        metrics.open_count,
        metrics.half_open_count,
        metrics.closed_count,
        metrics.retry_attempts
    )
}
