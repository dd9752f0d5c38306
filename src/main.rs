//! Mvsbot - A Discord bot for MultiVersus player statistics.
//!
//! This is the main entry point for the bot, which exposes slash commands to
//! fetch player information from the MultiVersus stats API.
//!
//! # Overview
//!
//! Once connected to the Discord gateway, the bot opens a session with the
//! stats API in the background and publishes its slash command set, retrying
//! the registration a bounded number of times. Command handlers check an
//! explicit readiness state before touching the API, so the bot stays up and
//! answers users even when the stats service is down.
//!
//! # Bot Commands
//!
//! - `/player_info <username>` - Look up a player and reply with a summary
//! - `/sync` - Re-publish the slash command set (administrators only)
//! - `/init_api` - Re-open the stats API session (administrators only)
//!
//! # Configuration
//!
//! Create a `config.yaml` file with your settings:
//!
//! ```yaml
//! discord:
//!   token: "discord-bot-token"
//!   sync:
//!     max_attempts: 3
//!     delay_seconds: 5
//!
//! mvs:
//!   url: "https://stats.example.com"
//!   api_key: "stats-api-key"
//! ```
//!
//! # Environment Variable Overrides
//!
//! Override any configuration value using environment variables with the
//! `MVSBOT_` prefix, so the bot can run without a file at all:
//!
//! ```bash
//! export MVSBOT_DISCORD__TOKEN="discord-bot-token"
//! export MVSBOT_MVS__URL="https://stats.example.com"
//! export MVSBOT_MVS__API_KEY="stats-api-key"
//! ```
//!
//! # Usage
//!
//! ```bash
//! mvsbot --config config.yaml
//! ```
//!
//! # Architecture
//!
//! - [`bot`] - Gateway connection, startup sequencing and ordered shutdown
//! - [`commands`] - Slash command handlers and reply formatting
//! - [`config`] - YAML configuration loading with environment variable support
//! - [`mvs`] - Stats API client and data structures
//! - [`retry`] - Bounded retry loop for command synchronization
//! - [`state`] - Shared application state and API readiness gate
//!
//! # Environment Variables
//!
//! - `RUST_LOG` - Controls logging level (default: `info`)
//!   - Set to `debug` for verbose output
//!   - Set to `warn` or `error` for minimal logging

use clap::Parser;
use env_logger::Env;
use log::{error, info};

use crate::{bot::Bot, config::Config};

mod bot;
mod commands;
mod config;
mod mvs;
mod retry;
mod state;

/// Command-line arguments for the bot.
///
/// All configuration lives in the YAML file and the environment (see
/// [`config::Config`]); the only argument is the optional file path.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the YAML configuration file.
    ///
    /// Optional: with `MVSBOT_` environment variables covering every
    /// required value the bot runs without a file.
    #[arg(short, long)]
    config: Option<String>,
}

/// Main entry point for the bot.
///
/// Initializes logging (`info` level unless `RUST_LOG` overrides it), parses
/// the command line, loads the configuration and starts the bot.
///
/// # Error Handling
///
/// Configuration and gateway connection failures are logged and terminate
/// the process; they are the only fatal errors. Everything after startup
/// (stats API failures, command sync exhaustion, per-command errors) is
/// recovered and logged while the bot keeps running.
#[tokio::main]
async fn main() {
    // Put logger at info level by default
    let env = Env::default().filter_or("RUST_LOG", "info");
    env_logger::init_from_env(env);

    info!("Starting mvsbot {}...", env!("CARGO_PKG_VERSION"));

    // Parse command line arguments
    let args = Args::parse();

    // Load configuration from YAML file and environment
    let mut config: Config = match Config::load(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return;
        }
    };

    // Normalize stats API URL by removing trailing slash if present
    if config.mvs.url.ends_with('/') {
        config.mvs.url.pop();
    }

    // Launch bot
    let bot = match Bot::new(config).await {
        Ok(b) => b,
        Err(e) => {
            error!("Failed to initialize bot: {}", e);
            return;
        }
    };

    if let Err(e) = bot.start().await {
        error!("Gateway connection failed: {}", e);
    }
}
