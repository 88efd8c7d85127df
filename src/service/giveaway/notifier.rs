//! Delivery of giveaway announcements.
//!
//! The giveaway service only talks to the [`GiveawayNotifier`] trait. Delivery errors
//! are returned to the service, which logs and swallows them so a Discord outage can
//! never leave a giveaway stuck or resolved twice.

use dioxus_logger::tracing;
use serenity::{
    all::{ChannelId, CreateMessage, EditMessage, MessageId},
    async_trait,
    http::Http,
};
use std::sync::Arc;

use crate::{
    error::AppError,
    model::giveaway::{Giveaway, GiveawayResolution},
};

use super::builder;

/// Sink for giveaway announcements.
#[async_trait]
pub trait GiveawayNotifier: Send + Sync {
    /// Posts the announcement of a new giveaway.
    ///
    /// # Returns
    /// - `Ok(u64)` - ID of the announcement message
    /// - `Err(AppError)` - Announcement could not be delivered
    async fn announce_created(&self, giveaway: &Giveaway) -> Result<u64, AppError>;

    /// Announces the outcome of a resolved giveaway.
    async fn announce_resolution(&self, resolution: &GiveawayResolution)
        -> Result<(), AppError>;

    /// Removes the announcement of a giveaway that never got a resolution trigger.
    async fn withdraw(&self, channel_id: u64, message_id: u64) -> Result<(), AppError>;

    /// Posts a notice to the audit log surface, if there is one.
    async fn audit(&self, message: &str) -> Result<(), AppError>;
}

/// Notifier posting to Discord channels through the bot's HTTP client.
pub struct DiscordGiveawayNotifier {
    /// Discord HTTP client for sending and editing messages
    http: Arc<Http>,
    /// Channel receiving audit notices
    log_channel_id: Option<u64>,
}

impl DiscordGiveawayNotifier {
    /// Creates a new DiscordGiveawayNotifier instance.
    ///
    /// # Arguments
    /// - `http` - Arc-wrapped Discord HTTP client for API requests
    /// - `log_channel_id` - Channel for audit notices, `None` disables them
    pub fn new(http: Arc<Http>, log_channel_id: Option<u64>) -> Self {
        Self {
            http,
            log_channel_id,
        }
    }
}

#[async_trait]
impl GiveawayNotifier for DiscordGiveawayNotifier {
    async fn announce_created(&self, giveaway: &Giveaway) -> Result<u64, AppError> {
        let embed = builder::build_announcement_embed(giveaway)?;
        let message = CreateMessage::new()
            .embed(embed)
            .components(builder::build_announcement_buttons(giveaway.id));

        let posted = ChannelId::new(giveaway.channel_id)
            .send_message(&self.http, message)
            .await?;

        tracing::info!(
            "Posted giveaway {} announcement to channel {}",
            giveaway.id,
            giveaway.channel_id
        );

        Ok(posted.id.get())
    }

    async fn announce_resolution(
        &self,
        resolution: &GiveawayResolution,
    ) -> Result<(), AppError> {
        let channel_id = ChannelId::new(resolution.channel_id);
        let mut message = CreateMessage::new().content(builder::resolution_message(resolution));

        if let Some(announcement_id) = resolution.announcement_id {
            let announcement_id = MessageId::new(announcement_id);
            let edit = EditMessage::new()
                .embed(builder::build_resolved_embed(resolution))
                .components(vec![]);

            // The winners message still goes out if the announcement was deleted
            if let Err(e) = channel_id
                .edit_message(&self.http, announcement_id, edit)
                .await
            {
                tracing::warn!(
                    "Failed to edit announcement of giveaway {}: {}",
                    resolution.id,
                    e
                );
            } else {
                message = message.reference_message((channel_id, announcement_id));
            }
        }

        channel_id.send_message(&self.http, message).await?;

        Ok(())
    }

    async fn withdraw(&self, channel_id: u64, message_id: u64) -> Result<(), AppError> {
        ChannelId::new(channel_id)
            .delete_message(&self.http, MessageId::new(message_id))
            .await?;

        Ok(())
    }

    async fn audit(&self, message: &str) -> Result<(), AppError> {
        let Some(log_channel_id) = self.log_channel_id else {
            return Ok(());
        };

        ChannelId::new(log_channel_id)
            .send_message(&self.http, CreateMessage::new().content(message))
            .await?;

        Ok(())
    }
}
