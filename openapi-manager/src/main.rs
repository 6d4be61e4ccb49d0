// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

// Copyright 2026 Edgecast Cloud LLC.

//! Keeps `openapi-specs/generated/` in sync with the API traits
//!
//! `cargo openapi generate` rewrites the documents; `cargo openapi check`
//! fails when a committed document is stale.

use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use clap::Parser;
use dropshot_api_manager::{Environment, ManagedApiConfig, ManagedApis};
use dropshot_api_manager_types::{ManagedApiMetadata, Versions};
use std::process::ExitCode;

fn environment() -> Result<Environment> {
    let workspace_root = Utf8PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .context("openapi-manager has no parent directory")?
        .to_path_buf();

    let env = Environment::new(
        "cargo openapi".to_string(),
        workspace_root,
        "openapi-specs/generated",
    )?;
    Ok(env)
}

fn all_apis() -> Result<ManagedApis> {
    let apis = vec![ManagedApiConfig {
        ident: "resilience-api",
        versions: Versions::Lockstep {
            version: resilience_api::API_VERSION,
        },
        title: resilience_api::API_TITLE,
        metadata: ManagedApiMetadata {
            description: Some("Headless resilience metrics and alerting API"),
            ..ManagedApiMetadata::default()
        },
        api_description: resilience_api::resilience_api_mod::stub_api_description,
    }];
    let managed_apis = ManagedApis::new(apis)?;
    Ok(managed_apis)
}

fn main() -> Result<ExitCode> {
    let app = dropshot_api_manager::App::parse();
    let env = environment()?;
    let apis = all_apis()?;

    Ok(app.exec(&env, &apis))
}
