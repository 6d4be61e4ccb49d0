// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Resilience CLI - inspect and manage circuit breaker metrics

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use resilience_client::ResilienceClient;

mod commands;
mod output;

use commands::AlertRuleCommand;
use commands::alerts::AlertsArgs;
use commands::history::HistoryArgs;
use commands::watch::WatchArgs;

#[derive(Parser)]
#[command(
    name = "resilience",
    version,
    about = "Resilience metrics CLI",
    long_about = "Command-line interface for the headless resilience metrics API"
)]
struct Cli {
    /// Resilience service base URL
    #[arg(
        short = 'U',
        long,
        global = true,
        env = "RESILIENCE_URL",
        default_value = resilience_client::DEFAULT_BASE_URL
    )]
    url: String,

    /// Output as JSON
    #[arg(short, long, global = true)]
    json: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the current circuit breaker counters
    Metrics,

    /// Show sampled metrics history
    History(HistoryArgs),

    /// Reset counters and history
    Reset,

    /// List alert rules and recent alert events
    Alerts(AlertsArgs),

    /// Manage alert rules
    AlertRule {
        #[command(subcommand)]
        command: AlertRuleCommand,
    },

    /// Poll metrics on an interval
    Watch(WatchArgs),

    /// Generate shell completion scripts
    Completion {
        /// Target shell
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

impl Cli {
    fn build_client(&self) -> Result<ResilienceClient> {
        Ok(ResilienceClient::new(&self.url)?)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter("resilience=debug,resilience_client=debug")
            .init();
    }

    match &cli.command {
        Commands::Completion { shell } => {
            clap_complete::generate(
                *shell,
                &mut Cli::command(),
                "resilience",
                &mut std::io::stdout(),
            );
            Ok(())
        }
        Commands::Metrics => {
            let client = cli.build_client()?;
            commands::metrics::run(&client, cli.json).await
        }
        Commands::History(args) => {
            let client = cli.build_client()?;
            commands::history::run(args.clone(), &client, cli.json).await
        }
        Commands::Reset => {
            let client = cli.build_client()?;
            commands::reset::run(&client, cli.json).await
        }
        Commands::Alerts(args) => {
            let client = cli.build_client()?;
            commands::alerts::list(args.clone(), &client, cli.json).await
        }
        Commands::AlertRule { command } => {
            let client = cli.build_client()?;
            command.clone().run(&client, cli.json).await
        }
        Commands::Watch(args) => {
            let client = cli.build_client()?;
            commands::watch::run(args.clone(), &client, cli.json).await
        }
    }
}
