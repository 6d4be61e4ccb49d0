// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Reset counters

use anyhow::Result;
use resilience_client::ResilienceClient;

use super::describe_error;
use crate::output::{format_timestamp, json};

pub async fn run(client: &ResilienceClient, use_json: bool) -> Result<()> {
    let response = client
        .reset()
        .await
        .map_err(|e| describe_error(e, client.base_url(), "reset metrics"))?;

    if !response.ok {
        anyhow::bail!("Service refused to reset metrics");
    }

    if use_json {
        json::print_json(&response)?;
    } else {
        println!("Metrics reset at {}", format_timestamp(&response.reset_at));
    }

    Ok(())
}
