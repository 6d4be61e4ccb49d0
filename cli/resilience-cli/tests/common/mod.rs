// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Test helpers for resilience-cli integration tests

// Allow unused code - not every test file uses every helper
// Allow deprecated - cargo_bin is standard for CLI testing
#![allow(dead_code, deprecated)]
#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::sync::Arc;
use std::sync::mpsc;

use assert_cmd::Command;
use dropshot::ConfigLoggingLevel;
use resilience_stub_server::{StubContext, fixtures_dir, start_server};

/// Get a Command for running the resilience CLI binary
pub fn resilience_cmd() -> Command {
    let mut cmd = Command::cargo_bin("resilience").expect("Failed to find resilience binary");
    cmd.env_remove("RESILIENCE_URL");
    cmd
}

/// Start a fixture-backed stub server on an ephemeral port
///
/// The server runs on its own thread and runtime for the rest of the test
/// process; the returned string is its base URL.
pub fn start_stub() -> String {
    let (tx, rx) = mpsc::channel();

    std::thread::spawn(move || {
        let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
        runtime.block_on(async move {
            let context =
                Arc::new(StubContext::from_fixtures(&fixtures_dir()).expect("load fixtures"));
            let server = start_server(
                context,
                "127.0.0.1:0".parse().unwrap(),
                ConfigLoggingLevel::Warn,
            )
            .expect("start stub server");
            tx.send(format!("http://{}", server.local_addr()))
                .expect("send stub URL");
            let _ = server.await;
        });
    });

    rx.recv().expect("stub server failed to start")
}

/// Run the CLI against `url` and return (stdout, stderr, success)
pub fn run_resilience(url: &str, args: &[&str]) -> (String, String, bool) {
    let output = resilience_cmd()
        .arg("--url")
        .arg(url)
        .args(args)
        .output()
        .expect("Failed to execute resilience");

    (
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
        output.status.success(),
    )
}
