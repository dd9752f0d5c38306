//! Slash command handlers and shared framework types.
//!
//! Commands are routed by poise; each handler defers the interaction, asks
//! the shared [`AppState`](crate::state::AppState) for a result and replies
//! with a formatted text message built by [`responses`]. Failures inside a
//! handler never escape past poise's error boundary.
//!
//! # Available Commands
//!
//! | Command | Arguments | Access | Description |
//! |---------|-----------|--------|-------------|
//! | `/player_info` | `username` | everyone | Look up a player on the stats API |
//! | `/sync` | None | administrators | Re-publish the slash command set |
//! | `/init_api` | None | administrators | Re-open the stats API session |

use std::sync::Arc;

use crate::mvs::MvsRequester;
use crate::state::AppState;

mod admin;
mod player_info;
pub mod responses;

pub use crate::commands::admin::{init_api, sync};
pub use crate::commands::player_info::player_info;

/// User data handed to every command handler by poise.
pub type Data = Arc<AppState<MvsRequester>>;

/// Error type for command handlers.
pub type Error = anyhow::Error;

/// Command context type.
pub type Context<'a> = poise::Context<'a, Data, Error>;
