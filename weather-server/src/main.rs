//! Binary crate for the `weather-server` service.
//!
//! Subcommands:
//! - `serve`: run the periodic fetcher and the `GET /{city}` API until Ctrl-C (default)
//! - `fetch`: run one fetch for the configured city and print the stored reading
//! - `show <city>`: print the latest stored reading for a city

use clap::Parser;

mod cli;
mod logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cmd = cli::Cli::parse();
    cmd.run().await
}
