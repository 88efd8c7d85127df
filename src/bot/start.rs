use dioxus_logger::tracing;
use serenity::all::{Client, GatewayIntents};

use crate::bot::handler::Handler;
use crate::config::Config;
use crate::error::AppError;
use crate::state::AppState;

/// Builds the Discord bot client.
///
/// The client is returned unstarted so the caller decides which task drives it.
///
/// # Arguments
/// - `config` - Application configuration holding the bot token
/// - `state` - Shared services handed to the event handler
///
/// # Returns
/// - `Ok(Client)` - Client ready to be started
/// - `Err(AppError)` - Client could not be built
pub async fn init_bot(config: &Config, state: AppState) -> Result<Client, AppError> {
    // GUILD_MEMBERS is a privileged intent - must be enabled in Discord Developer Portal
    let intents =
        GatewayIntents::GUILDS | GatewayIntents::GUILD_MESSAGES | GatewayIntents::GUILD_MEMBERS;

    let client = Client::builder(&config.discord_bot_token, intents)
        .event_handler(Handler::new(state))
        .await?;

    Ok(client)
}

/// Runs the Discord bot until its connection ends.
///
/// Should be called from within a `tokio::spawn` task since it blocks until the bot
/// shuts down.
///
/// # Returns
/// - `Ok(())` - The bot stopped cleanly
/// - `Err(AppError)` - Connection to Discord failed
pub async fn start_bot(mut client: Client) -> Result<(), AppError> {
    tracing::info!("Starting Discord bot...");

    client.start().await?;

    Ok(())
}
