//! Giveaway embed and component builders.
//!
//! Shared by the Discord notifier when announcing and resolving giveaways, and by the
//! bot layer when it needs to recognize giveaway buttons.

use serenity::all::{
    ButtonStyle, CreateActionRow, CreateButton, CreateEmbed, CreateEmbedFooter, Timestamp,
};

use crate::{
    error::{internal::InternalError, AppError},
    model::giveaway::{Giveaway, GiveawayId, GiveawayOutcome, GiveawayResolution},
};

/// Custom ID action of the Join button.
pub const JOIN_ACTION: &str = "giveaway_join";
/// Custom ID action of the End button.
pub const END_ACTION: &str = "giveaway_end";

const OPEN_COLOR: u32 = 0xF1C40F;
const RESOLVED_COLOR: u32 = 0x57F287;
const EMPTY_COLOR: u32 = 0x99AAB5;

/// Custom ID of the Join button for a giveaway.
pub fn join_custom_id(id: GiveawayId) -> String {
    format!("{}:{}", JOIN_ACTION, id)
}

/// Custom ID of the End button for a giveaway.
pub fn end_custom_id(id: GiveawayId) -> String {
    format!("{}:{}", END_ACTION, id)
}

/// Formats user IDs as a comma separated list of mentions.
pub fn mention_list(user_ids: &[u64]) -> String {
    user_ids
        .iter()
        .map(|id| format!("<@{}>", id))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Builds the announcement embed posted when a giveaway starts.
///
/// # Arguments
/// - `giveaway` - The newly created giveaway
///
/// # Returns
/// - `Ok(CreateEmbed)` - Embed with prize, host, winner count and end time
/// - `Err(AppError::InternalErr)` - End time cannot be expressed as a Discord timestamp
pub fn build_announcement_embed(giveaway: &Giveaway) -> Result<CreateEmbed, AppError> {
    let ends_at = giveaway.ends_at.timestamp();
    let timestamp = Timestamp::from_unix_timestamp(ends_at).map_err(|e| {
        InternalError::InvalidDiscordTimestamp {
            timestamp: ends_at,
            reason: e.to_string(),
        }
    })?;

    Ok(CreateEmbed::new()
        .title("🎉 GIVEAWAY 🎉")
        .description(format!("**{}**", giveaway.prize))
        .color(OPEN_COLOR)
        .field("Hosted by", format!("<@{}>", giveaway.host_id), true)
        .field("Winners", giveaway.winner_count.to_string(), true)
        .field("Ends", format!("<t:{}:F> - <t:{}:R>", ends_at, ends_at), false)
        .footer(CreateEmbedFooter::new(format!(
            "Giveaway #{} • Press Join to enter",
            giveaway.id
        )))
        .timestamp(timestamp))
}

/// Builds the Join/End buttons attached to the announcement.
pub fn build_announcement_buttons(id: GiveawayId) -> Vec<CreateActionRow> {
    vec![CreateActionRow::Buttons(vec![
        CreateButton::new(join_custom_id(id))
            .label("Join")
            .emoji('🎉')
            .style(ButtonStyle::Success),
        CreateButton::new(end_custom_id(id))
            .label("End now")
            .style(ButtonStyle::Danger),
    ])]
}

/// Builds the embed that replaces the announcement once the giveaway resolved.
pub fn build_resolved_embed(resolution: &GiveawayResolution) -> CreateEmbed {
    let (winners, color) = match &resolution.outcome {
        GiveawayOutcome::Winners(winners) => (mention_list(winners), RESOLVED_COLOR),
        GiveawayOutcome::NoEntries => ("No valid entries".to_string(), EMPTY_COLOR),
    };

    CreateEmbed::new()
        .title("🎉 GIVEAWAY ENDED 🎉")
        .description(format!("**{}**", resolution.prize))
        .color(color)
        .field("Hosted by", format!("<@{}>", resolution.host_id), true)
        .field("Entries", resolution.entry_count.to_string(), true)
        .field("Winners", winners, false)
        .footer(CreateEmbedFooter::new(format!("Giveaway #{}", resolution.id)))
}

/// Text of the message announcing the winners.
pub fn resolution_message(resolution: &GiveawayResolution) -> String {
    match &resolution.outcome {
        GiveawayOutcome::Winners(winners) => format!(
            "🎉 Congratulations {}! You won **{}**! Hosted by <@{}>.",
            mention_list(winners),
            resolution.prize,
            resolution.host_id
        ),
        GiveawayOutcome::NoEntries => format!(
            "😢 The giveaway for **{}** ended with no valid entries.",
            resolution.prize
        ),
    }
}

/// Text of the audit notice posted to the log channel.
pub fn audit_message(resolution: &GiveawayResolution) -> String {
    match &resolution.outcome {
        GiveawayOutcome::Winners(winners) => format!(
            "🎁 Giveaway #{} for **{}** (host <@{}>) ended with {} entries. Winners: {}",
            resolution.id,
            resolution.prize,
            resolution.host_id,
            resolution.entry_count,
            mention_list(winners)
        ),
        GiveawayOutcome::NoEntries => format!(
            "🎁 Giveaway #{} for **{}** (host <@{}>) ended with no entries.",
            resolution.id, resolution.prize, resolution.host_id
        ),
    }
}
