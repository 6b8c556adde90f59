//! Binary: `audio-bot run` (default) and `audio-bot healthcheck`.

use anyhow::Result;
use audio_bot::{healthcheck, run_bot, BotConfig, Cli, Commands};
use clap::Parser;
use std::process::ExitCode;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command.unwrap_or_default() {
        Commands::Run { token } => {
            let config = BotConfig::load(token)?;
            run_bot(config).await?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Healthcheck { timeout_secs } => {
            Ok(healthcheck(Duration::from_secs(timeout_secs)).await)
        }
    }
}
