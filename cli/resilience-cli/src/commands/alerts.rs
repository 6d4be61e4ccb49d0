// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Alert rules and events

use anyhow::Result;
use clap::{Args, Subcommand, ValueEnum};
use resilience_client::ResilienceClient;
use resilience_client::types::{AlertEvent, AlertRule, AlertRuleCreate, AlertSeverity};

use super::describe_error;
use crate::output::{format_timestamp, json};

#[derive(Args, Clone, Debug)]
pub struct AlertsArgs {
    /// Maximum number of recent events (server default 50)
    #[arg(long)]
    pub limit: Option<u32>,
}

#[derive(Subcommand, Clone, Debug)]
pub enum AlertRuleCommand {
    /// Create a threshold alert rule
    Create(CreateRuleArgs),
}

#[derive(Args, Clone, Debug)]
pub struct CreateRuleArgs {
    /// Rule name (the service picks one when omitted)
    #[arg(long)]
    pub name: Option<String>,
    /// Open-circuit growth that triggers the alert (0 disables)
    #[arg(long, default_value_t = 0)]
    pub open_threshold: u32,
    /// Retry-attempt growth that triggers the alert (0 disables)
    #[arg(long, default_value_t = 0)]
    pub retry_threshold: u32,
    /// Evaluation window in minutes (service default 60)
    #[arg(long)]
    pub window_minutes: Option<u32>,
    #[arg(long, value_enum)]
    pub severity: Option<SeverityArg>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum SeverityArg {
    Warning,
    Critical,
}

impl From<SeverityArg> for AlertSeverity {
    fn from(value: SeverityArg) -> Self {
        match value {
            SeverityArg::Warning => AlertSeverity::Warning,
            SeverityArg::Critical => AlertSeverity::Critical,
        }
    }
}

impl CreateRuleArgs {
    /// Build the request body, rejecting rules without any threshold
    pub fn to_request(&self) -> Result<AlertRuleCreate> {
        if self.open_threshold == 0 && self.retry_threshold == 0 {
            anyhow::bail!("At least one of --open-threshold or --retry-threshold must be positive");
        }
        Ok(AlertRuleCreate {
            name: self.name.clone(),
            open_threshold: self.open_threshold,
            retry_threshold: self.retry_threshold,
            window_minutes: self.window_minutes,
            severity: self.severity.map(AlertSeverity::from),
        })
    }
}

impl AlertRuleCommand {
    pub async fn run(self, client: &ResilienceClient, use_json: bool) -> Result<()> {
        match self {
            AlertRuleCommand::Create(args) => create(args, client, use_json).await,
        }
    }
}

pub async fn list(args: AlertsArgs, client: &ResilienceClient, use_json: bool) -> Result<()> {
    let alerts = client
        .alerts(args.limit)
        .await
        .map_err(|e| describe_error(e, client.base_url(), "fetch alerts"))?;

    if use_json {
        json::print_json(&alerts)?;
        return Ok(());
    }

    println!("Alert rules:");
    for rule in &alerts.rules {
        println!("- {}", format_rule(rule));
    }
    println!();
    println!("Recent alerts:");
    for event in &alerts.events {
        println!("- {}", format_event(event));
    }

    Ok(())
}

async fn create(args: CreateRuleArgs, client: &ResilienceClient, use_json: bool) -> Result<()> {
    let request = args.to_request()?;
    let rule = client
        .create_alert_rule(request)
        .await
        .map_err(|e| describe_error(e, client.base_url(), "create alert rule"))?;

    if use_json {
        json::print_json(&rule)?;
    } else {
        println!("Created alert rule {} ({})", rule.name, rule.id);
    }

    Ok(())
}

fn format_rule(rule: &AlertRule) -> String {
    format!(
        "{} (open>{}, retry>{}, window={}m, severity={}, enabled={})",
        rule.name,
        rule.open_threshold,
        rule.retry_threshold,
        rule.window_minutes,
        rule.severity,
        rule.enabled
    )
}

fn format_event(event: &AlertEvent) -> String {
    format!(
        "{} [{}] {}",
        format_timestamp(&event.triggered_at),
        event.severity,
        event.message
    )
}
