// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

// Allow expect/unwrap in tests - they provide clear panic messages on failure
// Allow deprecated - cargo_bin is standard for CLI testing
#![allow(clippy::expect_used, clippy::unwrap_used, deprecated)]

//! End-to-end tests for the sample against the stub server.

use std::net::{SocketAddr, TcpListener};
use std::sync::Arc;

use assert_cmd::Command;
use dropshot::{ConfigLoggingLevel, HttpServer};
use predicates::prelude::*;
use resilience_client::{ClientError, ResilienceClient};
use resilience_sample::{RunError, run};
use resilience_stub_server::{StubContext, fixtures_dir, start_server};
use serial_test::serial;

fn start_stub(bind_address: SocketAddr) -> anyhow::Result<String> {
    let context = Arc::new(StubContext::from_fixtures(&fixtures_dir())?);
    let server = start_server(context, bind_address, ConfigLoggingLevel::Warn)?;
    let url = format!("http://{}", server.local_addr());
    std::mem::forget(server);
    Ok(url)
}

#[tokio::test]
async fn test_run_prints_stub_metrics() {
    let url = start_stub("127.0.0.1:0".parse().unwrap()).expect("start stub");
    let client = ResilienceClient::new(&url).unwrap();
    let mut out = Vec::new();

    run(client, &mut out).await.expect("sample run");

    let stdout = String::from_utf8(out).unwrap();
    assert!(stdout.contains("\"openCount\": 2"));
    assert!(stdout.contains("\"halfOpenCount\": 1"));
    assert!(stdout.contains("\"closedCount\": 9"));
    assert!(stdout.contains("\"retryAttempts\": 17"));
}

#[tokio::test]
async fn test_run_twice_gives_same_shape() {
    let url = start_stub("127.0.0.1:0".parse().unwrap()).expect("start stub");

    let mut outputs = Vec::new();
    for _ in 0..2 {
        let mut out = Vec::new();
        run(ResilienceClient::new(&url).unwrap(), &mut out)
            .await
            .expect("sample run");
        outputs.push(String::from_utf8(out).unwrap());
    }

    let keys = |s: &str| -> Vec<String> {
        let value: serde_json::Value = serde_json::from_str(s).unwrap();
        value.as_object().unwrap().keys().cloned().collect()
    };
    assert_eq!(keys(&outputs[0]), keys(&outputs[1]));
}

#[tokio::test]
async fn test_run_connection_failure_prints_nothing() {
    let client = ResilienceClient::new("http://127.0.0.1:1").unwrap();
    let mut out = Vec::new();

    let err = run(client, &mut out).await.unwrap_err();

    assert!(matches!(err, RunError::Remote(ClientError::Api(_))));
    assert!(out.is_empty());
}

// The binary has no configuration surface and always targets
// http://localhost:5050. The tests below need that port to themselves, run
// one at a time, and stop their stub before returning.

const DEFAULT_ENDPOINT: &str = "127.0.0.1:5050";

fn start_default_endpoint_stub() -> HttpServer<Arc<StubContext>> {
    let context = Arc::new(StubContext::from_fixtures(&fixtures_dir()).expect("fixtures"));
    start_server(
        context,
        DEFAULT_ENDPOINT.parse().unwrap(),
        ConfigLoggingLevel::Warn,
    )
    .expect("port 5050 must be free for the sample binary tests")
}

fn sample_cmd() -> Command {
    Command::cargo_bin("resilience-sample").expect("Failed to find resilience-sample binary")
}

#[tokio::test(flavor = "multi_thread")]
#[serial]
async fn test_binary_prints_metrics_from_default_endpoint() {
    let server = start_default_endpoint_stub();

    sample_cmd()
        .assert()
        .success()
        .stdout(predicate::str::contains("\"openCount\": 2"))
        .stdout(predicate::str::contains("\"retryAttempts\": 17"));

    server.close().await.expect("stop stub");
}

#[tokio::test(flavor = "multi_thread")]
#[serial]
async fn test_binary_ignores_arguments() {
    let server = start_default_endpoint_stub();

    // No flag parsing: --help still fetches and prints the metrics
    sample_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:").not())
        .stdout(predicate::str::contains("\"closedCount\": 9"));

    server.close().await.expect("stop stub");
}

#[test]
#[serial]
fn test_binary_fails_without_service() {
    // Nothing may be listening on the default endpoint
    drop(TcpListener::bind(DEFAULT_ENDPOINT).expect("port 5050 must be free"));

    sample_cmd()
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Error:"));
}
