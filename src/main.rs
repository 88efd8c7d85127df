mod bot;
mod config;
mod error;
mod model;
mod scheduler;
mod service;
mod state;
mod util;

use dioxus_logger::tracing::{self, Level};
use serenity::http::Http;
use std::sync::Arc;

use crate::{
    config::Config,
    error::AppError,
    scheduler::giveaway_timer::CronResolutionTimer,
    service::giveaway::{
        notifier::DiscordGiveawayNotifier, registry::GiveawayRegistry, GiveawayService,
    },
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    dioxus_logger::init(Level::INFO).map_err(|e| AppError::InternalError(e.to_string()))?;

    let config = Config::from_env()?;

    // Giveaway announcements go through their own REST client so the service exists
    // before the gateway client that owns the event handler
    let discord_http = Arc::new(Http::new(&config.discord_bot_token));

    let timer = Arc::new(CronResolutionTimer::start().await?);
    let notifier = Arc::new(DiscordGiveawayNotifier::new(
        discord_http,
        config.log_channel_id,
    ));
    let giveaways = GiveawayService::new(GiveawayRegistry::new(), timer.clone(), notifier);

    let state = AppState::new(&config, giveaways.clone());
    let bot_client = bot::start::init_bot(&config, state).await?;

    let bot_task = tokio::spawn(async move {
        if let Err(e) = bot::start::start_bot(bot_client).await {
            tracing::error!("Discord bot error: {}", e);
        }
    });

    tokio::select! {
        _ = bot_task => tracing::warn!("Discord bot stopped"),
        result = tokio::signal::ctrl_c() => match result {
            Ok(()) => tracing::info!("Received shutdown signal"),
            Err(e) => tracing::error!("Failed to listen for shutdown signal: {}", e),
        },
    }

    giveaways.shutdown().await;
    timer.shutdown().await?;

    tracing::info!("Shut down");

    Ok(())
}
