// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! CLI commands

pub mod alerts;
pub mod history;
pub mod metrics;
pub mod reset;
pub mod watch;

pub use alerts::AlertRuleCommand;

use resilience_client::{ClientError, Error};

/// Turn a client error into a message fit for the terminal
pub fn describe_error(err: ClientError, base_url: &str, action: &str) -> anyhow::Error {
    match err {
        ClientError::Api(Error::CommunicationError(_)) => anyhow::anyhow!(
            "Failed to connect to resilience service at {}\n\nPlease check the URL and your network connection.",
            base_url
        ),
        ClientError::Api(Error::ErrorResponse(resp)) => {
            let code = resp
                .error_code
                .as_deref()
                .map(|c| format!(" [{}]", c))
                .unwrap_or_default();
            anyhow::anyhow!(
                "Failed to {}: {}{} (HTTP {})",
                action,
                resp.message,
                code,
                resp.status().as_u16()
            )
        }
        other => anyhow::anyhow!("Failed to {}: {}", action, other),
    }
}
