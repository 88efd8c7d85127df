//! Posting to the staff log channel.

use dioxus_logger::tracing;
use serenity::{
    all::{ChannelId, CreateMessage},
    http::Http,
};

/// Posts a notice to the log channel.
///
/// Does nothing when no log channel is configured. Delivery failures are logged and
/// never reach the interaction that caused the notice.
pub async fn post(http: &Http, log_channel_id: Option<u64>, content: impl Into<String>) {
    let Some(log_channel_id) = log_channel_id else {
        return;
    };

    if let Err(e) = ChannelId::new(log_channel_id)
        .send_message(http, CreateMessage::new().content(content))
        .await
    {
        tracing::warn!("Failed to post to log channel {}: {}", log_channel_id, e);
    }
}
