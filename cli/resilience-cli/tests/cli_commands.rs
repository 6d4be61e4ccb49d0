// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Command tests against the in-process stub server

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod common;

use common::{resilience_cmd, run_resilience, start_stub};
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::Value;

#[test]
fn test_metrics_text() {
    let url = start_stub();
    let (stdout, _, success) = run_resilience(&url, &["metrics"]);
    assert!(success);
    assert_eq!(
        stdout,
        "openCount: 2\nhalfOpenCount: 1\nclosedCount: 9\nretryAttempts: 17\n"
    );
}

#[test]
fn test_metrics_json() {
    let url = start_stub();
    let (stdout, _, success) = run_resilience(&url, &["--json", "metrics"]);
    assert!(success);
    let value: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(value["openCount"], 2);
    assert_eq!(value["retryAttempts"], 17);
}

#[test]
fn test_url_from_environment() {
    let url = start_stub();
    resilience_cmd()
        .env("RESILIENCE_URL", &url)
        .arg("metrics")
        .assert()
        .success()
        .stdout(predicate::str::contains("openCount: 2"));
}

#[test]
fn test_history_table() {
    let url = start_stub();
    let (stdout, _, success) = run_resilience(&url, &["history", "--limit", "2"]);
    assert!(success);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].contains("TIMESTAMP"));
    assert!(lines[1].contains("2026-03-02T09:30:00Z"));
    assert!(lines[2].contains("2026-03-02T09:45:00Z"));
}

#[test]
fn test_history_json() {
    let url = start_stub();
    let (stdout, _, success) = run_resilience(&url, &["-j", "history"]);
    assert!(success);
    let samples: Vec<Value> = serde_json::from_str(&stdout).unwrap();
    assert_eq!(samples.len(), 4);
}

#[test]
fn test_alerts_text() {
    let url = start_stub();
    let (stdout, _, success) = run_resilience(&url, &["alerts"]);
    assert!(success);
    assert!(stdout.starts_with("Alert rules:\n"));
    assert!(stdout.contains("- open-circuits (open>"));
    assert!(stdout.contains("severity=critical"));
    assert!(stdout.contains("Recent alerts:\n- 2026-03-02T09:45:00Z [warning]"));
}

#[test]
fn test_alerts_limit() {
    let url = start_stub();
    let (stdout, _, success) = run_resilience(&url, &["--json", "alerts", "--limit", "1"]);
    assert!(success);
    let value: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(value["events"].as_array().unwrap().len(), 1);
    assert_eq!(value["rules"].as_array().unwrap().len(), 2);
}

#[test]
fn test_alert_rule_create_requires_threshold() {
    let url = start_stub();
    let (stdout, stderr, success) = run_resilience(&url, &["alert-rule", "create"]);
    assert!(!success);
    assert!(stdout.is_empty());
    assert!(stderr.contains("must be positive"));
}

#[test]
fn test_alert_rule_create() {
    let url = start_stub();
    let (stdout, _, success) = run_resilience(
        &url,
        &[
            "alert-rule",
            "create",
            "--name",
            "half-open-spike",
            "--open-threshold",
            "3",
            "--severity",
            "critical",
        ],
    );
    assert!(success);
    assert!(stdout.starts_with("Created alert rule half-open-spike ("));

    let (stdout, _, _) = run_resilience(&url, &["alerts"]);
    assert!(stdout.contains("- half-open-spike (open>3, retry>0, window=60m, severity=critical"));
}

#[test]
fn test_reset_clears_metrics() {
    let url = start_stub();
    let (stdout, _, success) = run_resilience(&url, &["reset"]);
    assert!(success);
    assert!(stdout.starts_with("Metrics reset at "));

    let (stdout, _, _) = run_resilience(&url, &["metrics"]);
    assert_eq!(
        stdout,
        "openCount: 0\nhalfOpenCount: 0\nclosedCount: 0\nretryAttempts: 0\n"
    );

    let (stdout, _, _) = run_resilience(&url, &["history"]);
    assert_eq!(stdout, "No history samples.\n");
}

#[test]
fn test_watch_csv() {
    let url = start_stub();
    let (stdout, _, success) = run_resilience(
        &url,
        &["watch", "--csv", "--count", "2", "--interval-ms", "100"],
    );
    assert!(success);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(
        lines[0],
        "capturedAt,openCount,halfOpenCount,closedCount,retryAttempts"
    );
    assert!(lines[1].ends_with(",2,1,9,17"));
    assert!(lines[2].ends_with(",2,1,9,17"));
}

#[test]
fn test_watch_json_lines() {
    let url = start_stub();
    let (stdout, _, success) = run_resilience(
        &url,
        &["--json", "watch", "--count", "1", "--interval-ms", "100"],
    );
    assert!(success);
    let value: Value = serde_json::from_str(stdout.trim()).unwrap();
    assert!(value["capturedAt"].is_string());
    assert_eq!(value["closedCount"], 9);
}

#[test]
fn test_connection_failure() {
    resilience_cmd()
        .args(["--url", "http://127.0.0.1:1", "metrics"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains(
            "Failed to connect to resilience service at http://127.0.0.1:1",
        ));
}
