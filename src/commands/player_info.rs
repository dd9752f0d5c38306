//! Player lookup command handler.

use crate::commands::responses::{format_api_unavailable, format_lookup_error, format_player_info};
use crate::commands::{Context, Error};
use crate::state::Lookup;

/// Get player information
///
/// Looks the player up on the stats API and replies with a one-line summary.
/// The interaction is deferred first because the lookup goes through the
/// external API. When no API session is available the lookup is skipped and
/// the user gets an "API not available" reply instead.
#[poise::command(slash_command)]
pub async fn player_info(
    ctx: Context<'_>,
    #[description = "Username of the player to look up"] username: String,
) -> Result<(), Error> {
    ctx.defer().await?;

    let reply = match ctx.data().lookup_player(&username).await {
        Lookup::Unavailable => format_api_unavailable(),
        Lookup::Found(profile) => format_player_info(&username, &profile),
        Lookup::Failed(error) => format_lookup_error(&error),
    };

    ctx.say(reply).await?;
    Ok(())
}
