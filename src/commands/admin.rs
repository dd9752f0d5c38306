//! Administrator-gated maintenance commands.
//!
//! Both commands re-run a startup step on demand: `/sync` re-publishes the
//! slash command set and `/init_api` re-opens the stats API session. They
//! exist so an operator can recover from an exhausted sync retry loop or an
//! unavailable API without restarting the process.

use crate::bot::sync_commands;
use crate::commands::responses::{format_init_outcome, format_sync_outcome};
use crate::commands::{Context, Error};

/// Manually sync bot commands
///
/// Re-publishes the global slash command set with the configured retry
/// policy and reports the outcome.
#[poise::command(slash_command, default_member_permissions = "ADMINISTRATOR")]
pub async fn sync(ctx: Context<'_>) -> Result<(), Error> {
    ctx.defer().await?;

    let commands =
        poise::builtins::create_application_commands(&ctx.framework().options().commands);
    let outcome = sync_commands(
        &ctx.serenity_context().http,
        commands,
        ctx.data().sync_policy(),
    )
    .await;

    ctx.say(format_sync_outcome(&outcome)).await?;
    Ok(())
}

/// Manually re-initialize the stats API session
///
/// Closes the current API session, opens a new one and reports the resulting
/// readiness. A failure leaves the bot running with the API marked
/// unavailable.
#[poise::command(slash_command, default_member_permissions = "ADMINISTRATOR")]
pub async fn init_api(ctx: Context<'_>) -> Result<(), Error> {
    ctx.defer().await?;

    let readiness = ctx.data().initialize_api().await;

    ctx.say(format_init_outcome(readiness)).await?;
    Ok(())
}
