//! Configuration file structures for the bot.
//!
//! Configuration is loaded with figment from an optional YAML file merged
//! with environment variables, so secrets can stay out of the file entirely.
//!
//! # Configuration File Format
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
//! Any value can be overridden with a `MVSBOT_` prefixed variable, nested
//! keys separated by `__`:
//!
//! ```bash
//! export MVSBOT_DISCORD__TOKEN="discord-bot-token"
//! export MVSBOT_MVS__URL="https://stats.example.com"
//! export MVSBOT_MVS__API_KEY="stats-api-key"
//! ```

use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};
use serde::Deserialize;

/// Default attempt ceiling for command synchronization.
const DEFAULT_SYNC_MAX_ATTEMPTS: u32 = 3;

/// Default delay in seconds between two synchronization attempts.
const DEFAULT_SYNC_DELAY_SECONDS: u64 = 5;

/// Root configuration structure for the bot.
///
/// The configuration is divided into two sections:
/// - [`Discord`] - Discord bot account and command sync settings
/// - [`Mvs`] - MultiVersus stats server connection settings
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Discord configuration
    pub discord: Discord,
    /// Stats server configuration
    pub mvs: Mvs,
}

/// Discord account configuration.
///
/// ```yaml
/// discord:
///   token: "discord-bot-token"
///   sync:
///     max_attempts: 3
///     delay_seconds: 5
/// ```
#[derive(Debug, Deserialize)]
pub struct Discord {
    /// Bot authentication token.
    ///
    /// Issued in the Discord developer portal. Required to establish the
    /// gateway connection at startup.
    pub token: String,

    /// Command synchronization retry settings.
    #[serde(default)]
    pub sync: SyncConfig,
}

/// Retry settings for publishing the slash command set to Discord.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Maximum number of registration attempts before giving up
    pub max_attempts: u32,
    /// Fixed delay in seconds between two attempts
    pub delay_seconds: u64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        SyncConfig {
            max_attempts: DEFAULT_SYNC_MAX_ATTEMPTS,
            delay_seconds: DEFAULT_SYNC_DELAY_SECONDS,
        }
    }
}

/// MultiVersus stats server configuration.
///
/// ```yaml
/// mvs:
///   url: "https://stats.example.com"
///   api_key: "stats-api-key"
/// ```
#[derive(Debug, Deserialize)]
pub struct Mvs {
    /// Base URL of the stats server.
    ///
    /// Should include the protocol (http/https) but not trailing slashes.
    pub url: String,

    /// API key used to open sessions with the stats server.
    pub api_key: String,
}

impl Config {
    /// Loads the configuration from an optional YAML file merged with
    /// `MVSBOT_` prefixed environment variables.
    ///
    /// Environment variables take precedence over the file, so deployments
    /// can keep secrets out of the file entirely and run without any file at
    /// all.
    ///
    /// # Arguments
    ///
    /// * `path` - Optional path to the YAML configuration file.
    ///
    /// # Errors
    ///
    /// Returns a [`figment::Error`] if the file cannot be parsed or a
    /// required value is missing from both sources.
    pub fn load(path: Option<&str>) -> Result<Config, figment::Error> {
        let mut figment = Figment::new();
        if let Some(path) = path {
            figment = figment.merge(Yaml::file(path));
        }
        figment.merge(Env::prefixed("MVSBOT_").split("__")).extract()
    }
}
