use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use weather_core::{AppContext, Config, WeatherQuery};

use crate::logging;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-server", version, about = "Periodic weather fetcher with a read API")]
pub struct Cli {
    /// Path to the TOML config file. Defaults to the platform config directory.
    #[arg(long, short, global = true, env = "CONFIG_PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Run the scheduler and the HTTP server (default).
    Serve,

    /// Run a single fetch for the configured city and print the stored reading.
    Fetch,

    /// Print the latest stored reading for a city.
    Show {
        /// City name, matched exactly.
        city: String,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config = Config::load(self.config.as_deref())?;
        logging::init(&config.logging)?;

        let ctx = AppContext::from_config(config)?;

        match self.command.unwrap_or(Command::Serve) {
            Command::Serve => serve(ctx).await?,
            Command::Fetch => {
                let reading = ctx.job().tick().await?;
                println!("{}", serde_json::to_string_pretty(&reading)?);
            }
            Command::Show { city } => {
                let weather = ctx
                    .service()
                    .get(&city)
                    .await
                    .with_context(|| format!("No weather available for '{city}'"))?;
                println!("{}", serde_json::to_string_pretty(&weather)?);
            }
        }

        Ok(())
    }
}

async fn serve(ctx: AppContext) -> anyhow::Result<()> {
    let shutdown = CancellationToken::new();

    let on_signal = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => tracing::info!("received Ctrl-C, shutting down"),
            Err(e) => tracing::error!(error = %e, "failed to listen for Ctrl-C, shutting down"),
        }
        on_signal.cancel();
    });

    ctx.run(shutdown).await
}
