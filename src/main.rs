mod api;
mod auth;
mod board;
mod cli;
mod config;
mod error;
mod models;
mod present;
mod query;
mod views;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use log::info;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    info!("Starting pipeboard - pipeline and supply-chain dashboard");
    cli.execute().await?;

    Ok(())
}
