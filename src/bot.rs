//! Bot lifecycle: gateway connection, startup sequencing and shutdown.
//!
//! This module wires the poise framework, the serenity gateway client and the
//! shared [`AppState`] together.
//!
//! # Startup Sequencing
//!
//! When the gateway connection is established, poise runs the framework setup
//! once. The setup spawns a background task that first opens the stats API
//! session and then publishes the slash command set with the configured retry
//! policy:
//!
//! ```text
//! gateway ready --> spawn background task
//! background task: initialize_api() --> ApiReady | ApiUnavailable
//!                  sync_commands()  --> Succeeded | Exhausted
//! ```
//!
//! The task is fire-and-forget: the gateway does not wait for it, so command
//! handlers can run before initialization completes. Handlers therefore
//! consult the explicit readiness state instead of assuming a live session.
//! Both steps recover from failure; neither can take the process down.
//!
//! # Shutdown
//!
//! On SIGINT the teardown is ordered: the stats API session is closed first,
//! then the gateway shards are released.

use std::sync::Arc;

use log::{error, info};
use poise::serenity_prelude as serenity;

use crate::commands;
use crate::commands::Data;
use crate::config::Config;
use crate::mvs::MvsRequester;
use crate::retry::{RetryPolicy, SyncOutcome, sync_with_retry};
use crate::state::AppState;

/// Main bot structure owning the gateway client and the shared state.
///
/// # Examples
///
/// ```no_run
/// # use mvsbot::bot::Bot;
/// # use mvsbot::config::Config;
/// # async fn run() -> Result<(), anyhow::Error> {
/// let config = Config::load(Some("config.yaml"))?;
/// let bot = Bot::new(config).await?;
/// bot.start().await?; // Runs until the process is terminated
/// # Ok(())
/// # }
/// ```
pub struct Bot {
    /// Serenity gateway client with the poise framework attached
    client: serenity::Client,
    /// Shared application state, also handed to command handlers
    state: Data,
}

impl Bot {
    /// Creates a new Bot instance from the loaded configuration.
    ///
    /// Builds the stats API requester, the shared state, the poise framework
    /// with all slash commands, and the serenity client.
    ///
    /// # Arguments
    ///
    /// * `config` - Configuration containing the Discord token, the stats API
    ///   credentials and the command sync retry settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the serenity client cannot be built, for example
    /// with a malformed token. This is a startup failure and is fatal.
    pub async fn new(config: Config) -> Result<Self, anyhow::Error> {
        let requester = MvsRequester::new(&config.mvs.url, &config.mvs.api_key);
        let sync_policy = RetryPolicy::new(
            config.discord.sync.max_attempts,
            config.discord.sync.delay_seconds,
        );
        let state: Data = Arc::new(AppState::new(requester, sync_policy));

        let setup_state = Arc::clone(&state);
        let framework = poise::Framework::builder()
            .options(poise::FrameworkOptions {
                commands: vec![
                    commands::player_info(),
                    commands::sync(),
                    commands::init_api(),
                ],
                on_error: |err| {
                    Box::pin(async move {
                        if let Err(e) = poise::builtins::on_error(err).await {
                            error!("error while handling command error: {}", e);
                        }
                    })
                },
                ..Default::default()
            })
            .setup(move |ctx, ready, framework| {
                Box::pin(async move {
                    info!("logged in as {} ({})", ready.user.name, ready.user.id);

                    let commands = poise::builtins::create_application_commands(
                        &framework.options().commands,
                    );
                    spawn_startup_task(ctx.http.clone(), Arc::clone(&setup_state), commands);

                    Ok(Arc::clone(&setup_state))
                })
            })
            .build();

        let client = serenity::ClientBuilder::new(
            &config.discord.token,
            serenity::GatewayIntents::non_privileged(),
        )
        .framework(framework)
        .await?;

        Ok(Bot { client, state })
    }

    /// Starts the bot and blocks until the process is terminated.
    ///
    /// Installs a SIGINT handler for the ordered teardown, then starts the
    /// gateway connection.
    ///
    /// # Errors
    ///
    /// Returns an error if the gateway connection cannot be established,
    /// typically on an invalid token. This is the only fatal failure once
    /// startup has begun.
    pub async fn start(mut self) -> Result<(), anyhow::Error> {
        let shard_manager = self.client.shard_manager.clone();
        let state = Arc::clone(&self.state);

        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!("failed to listen for shutdown signal: {}", e);
                return;
            }
            info!("shutting down");
            // Close the api session before releasing the gateway
            state.shutdown().await;
            shard_manager.shutdown_all().await;
        });

        self.client.start().await?;
        Ok(())
    }
}

/// Spawns the background initialization task.
///
/// Runs the two startup steps sequentially: open the stats API session, then
/// publish the slash command set with retries. Returns immediately; the
/// spawned task recovers from every failure by logging it.
fn spawn_startup_task(
    http: Arc<serenity::Http>,
    state: Data,
    commands: Vec<serenity::CreateCommand>,
) {
    tokio::spawn(async move {
        state.initialize_api().await;
        sync_commands(&http, commands, state.sync_policy()).await;
        info!("bot is ready");
    });
}

/// Publishes the global slash command set, retrying per the given policy.
///
/// Shared by the startup task and the `/sync` admin command.
///
/// # Arguments
///
/// * `http` - Discord HTTP client used for the registration call.
/// * `commands` - The command set to publish.
/// * `policy` - Attempt ceiling and inter-attempt delay.
pub async fn sync_commands(
    http: &serenity::Http,
    commands: Vec<serenity::CreateCommand>,
    policy: &RetryPolicy,
) -> SyncOutcome {
    sync_with_retry(policy, || {
        let commands = commands.clone();
        async move {
            serenity::Command::set_global_commands(http, commands)
                .await
                .map(|_| ())
        }
    })
    .await
}
