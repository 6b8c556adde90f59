//! CLI parser.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "audio-bot")]
#[command(about = "Telegram bot that fetches audio from links", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Run the bot (config from env; token can override BOT_TOKEN). Default when no subcommand is given.
    Run {
        #[arg(short, long)]
        token: Option<String>,
    },
    /// Call the Bot API getMe once; exit 0 when healthy, 1 otherwise. Needs only BOT_TOKEN.
    Healthcheck {
        #[arg(long, default_value = "10")]
        timeout_secs: u64,
    },
}

impl Default for Commands {
    fn default() -> Self {
        Commands::Run { token: None }
    }
}
