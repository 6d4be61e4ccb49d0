// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Basic CLI tests - help, version, argument validation

mod common;

use common::resilience_cmd;
use predicates::prelude::*;
use test_case::test_case;

#[test]
fn test_resilience_version() {
    resilience_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("resilience"));
}

#[test_case("-h" ; "short")]
#[test_case("--help" ; "long")]
#[test_case("help" ; "subcommand")]
fn test_resilience_help(flag: &str) {
    resilience_cmd()
        .arg(flag)
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("metrics"))
        .stdout(predicate::str::contains("watch"));
}

#[test]
fn test_alert_rule_help() {
    resilience_cmd()
        .args(["alert-rule", "create", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--open-threshold"))
        .stdout(predicate::str::contains("--severity"));
}

#[test]
fn test_no_subcommand_fails() {
    resilience_cmd().assert().failure();
}

#[test]
fn test_watch_interval_lower_bound() {
    resilience_cmd()
        .args(["watch", "--interval-ms", "10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--interval-ms"));
}

#[test]
fn test_invalid_severity_rejected() {
    resilience_cmd()
        .args(["alert-rule", "create", "--open-threshold", "1", "--severity", "fatal"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_completion_bash() {
    resilience_cmd()
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("resilience"));
}

#[test]
fn test_invalid_url_reported() {
    resilience_cmd()
        .args(["--url", "not a url", "metrics"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid base URL"));
}
