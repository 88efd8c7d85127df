//! Ready event handler for bot initialization.
//!
//! This module handles the `ready` event which is fired when the bot successfully
//! connects to Discord's gateway. The handler logs the connection, sets the bot's
//! activity and registers the global slash commands.

use dioxus_logger::tracing;
use serenity::all::{ActivityData, Command, Context, Ready};

use crate::bot::command;

/// Handles the ready event when the bot connects to Discord.
///
/// Commands are re-registered on every connection; Discord replaces the previous set,
/// so renamed or removed commands disappear without manual cleanup.
///
/// # Arguments
/// - `ctx` - Discord context for setting activity status and registering commands
/// - `ready` - Ready event data containing bot user information
pub async fn handle_ready(ctx: Context, ready: Ready) {
    tracing::info!("{} is connected to Discord", ready.user.name);

    ctx.set_activity(Some(ActivityData::watching("Smiley Services")));

    match Command::set_global_commands(&ctx.http, command::definitions()).await {
        Ok(commands) => tracing::info!("Registered {} slash commands", commands.len()),
        Err(e) => tracing::error!("Failed to register slash commands: {}", e),
    }
}
