//! Support ticket channels.
//!
//! Tickets are private text channels created under a category, visible only to the
//! member who opened them and the staff role. Nothing is stored in memory; the channel
//! itself is the ticket.

use dioxus_logger::tracing;
use serenity::{
    all::{
        ButtonStyle, ChannelId, ChannelType, CreateActionRow, CreateButton, CreateChannel,
        CreateEmbed, CreateMessage, GuildChannel, GuildId, PermissionOverwrite,
        PermissionOverwriteType, Permissions, RoleId, User, UserId,
    },
    http::Http,
};

use crate::{error::AppError, model::ticket::TicketKind};

/// Custom ID of the Claim button posted in new tickets.
pub const CLAIM_ACTION: &str = "ticket_claim";
/// Custom ID of the button confirming ticket deletion.
pub const CONFIRM_DELETE_ACTION: &str = "confirm_delete";
/// Custom ID of the button cancelling ticket deletion.
pub const CANCEL_DELETE_ACTION: &str = "cancel_delete";

const PANEL_COLOR: u32 = 0x2F3136;
const MAX_CHANNEL_NAME_LEN: usize = 100;

/// Name of the ticket channel for a kind and opener.
///
/// Discord only accepts lowercase text channel names without spaces, so anything
/// outside `[a-z0-9_-]` in the username becomes a dash.
pub fn channel_name(kind: TicketKind, username: &str) -> String {
    let username: String = username
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '-'
            }
        })
        .collect();

    format!("{}-ticket-{}", kind.key(), username)
        .chars()
        .take(MAX_CHANNEL_NAME_LEN)
        .collect()
}

/// Permission overwrites hiding the channel from everyone but the opener and staff.
pub fn permission_overwrites(
    guild_id: GuildId,
    opener_id: UserId,
    staff_role_id: RoleId,
) -> Vec<PermissionOverwrite> {
    let access = Permissions::VIEW_CHANNEL | Permissions::SEND_MESSAGES;

    vec![
        PermissionOverwrite {
            allow: Permissions::empty(),
            deny: Permissions::VIEW_CHANNEL,
            kind: PermissionOverwriteType::Role(RoleId::new(guild_id.get())),
        },
        PermissionOverwrite {
            allow: access,
            deny: Permissions::empty(),
            kind: PermissionOverwriteType::Member(opener_id),
        },
        PermissionOverwrite {
            allow: access,
            deny: Permissions::empty(),
            kind: PermissionOverwriteType::Role(staff_role_id),
        },
    ]
}

/// Builds the ticket panel embed.
pub fn build_panel_embed() -> CreateEmbed {
    CreateEmbed::new()
        .title("🎫 TICKETS")
        .description("Choose your ticket type below:")
        .color(PANEL_COLOR)
}

/// Builds one button per ticket kind.
pub fn build_panel_buttons() -> Vec<CreateActionRow> {
    vec![CreateActionRow::Buttons(
        TicketKind::ALL
            .iter()
            .map(|kind| {
                CreateButton::new(kind.key())
                    .label(kind.label())
                    .style(ButtonStyle::Primary)
            })
            .collect(),
    )]
}

/// Builds the Claim button row, disabled once a staff member claimed the ticket.
pub fn build_claim_buttons(claimed: bool) -> Vec<CreateActionRow> {
    vec![CreateActionRow::Buttons(vec![CreateButton::new(CLAIM_ACTION)
        .label(if claimed { "Claimed" } else { "Claim" })
        .emoji('🙋')
        .style(ButtonStyle::Success)
        .disabled(claimed)])]
}

/// Builds the Confirm/Cancel row shown by the delete command.
pub fn build_delete_buttons() -> Vec<CreateActionRow> {
    vec![CreateActionRow::Buttons(vec![
        CreateButton::new(CONFIRM_DELETE_ACTION)
            .label("Confirm Delete")
            .style(ButtonStyle::Danger),
        CreateButton::new(CANCEL_DELETE_ACTION)
            .label("Cancel")
            .style(ButtonStyle::Secondary),
    ])]
}

/// First message posted in a new ticket.
pub fn opening_message(kind: TicketKind, opener_id: u64, staff_role_id: u64) -> String {
    format!(
        "🎫 Ticket created by <@{}> for **{}**. <@&{}> will assist you.",
        opener_id,
        kind.label(),
        staff_role_id
    )
}

/// Message announcing who claimed a ticket.
pub fn claimed_message(staff_id: u64) -> String {
    format!("🙋 This ticket has been claimed by <@{}>.", staff_id)
}

/// Finds a category channel by name.
///
/// # Returns
/// - `Ok(Some(ChannelId))` - Category exists
/// - `Ok(None)` - No category with that name
/// - `Err(AppError::DiscordErr)` - Channels could not be fetched
pub async fn find_category(
    http: &Http,
    guild_id: GuildId,
    name: &str,
) -> Result<Option<ChannelId>, AppError> {
    let channels = guild_id.channels(http).await?;

    Ok(channels
        .values()
        .find(|channel| channel.kind == ChannelType::Category && channel.name == name)
        .map(|channel| channel.id))
}

/// Creates a ticket channel and posts the opening message with its Claim button.
///
/// # Arguments
/// - `http` - Discord HTTP client
/// - `guild_id` - Guild to create the channel in
/// - `category_id` - Category the channel is placed under
/// - `kind` - Ticket kind picked on the panel
/// - `opener` - Member who pressed the panel button
/// - `staff_role_id` - Role granted access to every ticket
///
/// # Returns
/// - `Ok(GuildChannel)` - The new ticket channel
/// - `Err(AppError::DiscordErr)` - Channel creation failed
pub async fn create_ticket(
    http: &Http,
    guild_id: GuildId,
    category_id: ChannelId,
    kind: TicketKind,
    opener: &User,
    staff_role_id: RoleId,
) -> Result<GuildChannel, AppError> {
    let builder = CreateChannel::new(channel_name(kind, &opener.name))
        .kind(ChannelType::Text)
        .category(category_id)
        .permissions(permission_overwrites(guild_id, opener.id, staff_role_id));

    let channel = guild_id.create_channel(http, builder).await?;

    tracing::info!(
        "Created {} ticket {} for user {}",
        kind.key(),
        channel.id,
        opener.id
    );

    let opening = CreateMessage::new()
        .content(opening_message(kind, opener.id.get(), staff_role_id.get()))
        .components(build_claim_buttons(false));

    // The ticket is usable without the opening message
    if let Err(e) = channel.id.send_message(http, opening).await {
        tracing::warn!("Failed to post opening message in ticket {}: {}", channel.id, e);
    }

    Ok(channel)
}
