use dioxus_logger::tracing;
use serenity::all::{
    ChannelId, Context, CreateEmbed, CreateEmbedFooter, CreateMessage, Member,
};

use crate::state::AppState;

const WELCOME_COLOR: u32 = 0x5865F2;
const WELCOME_IMAGE_URL: &str = "https://media.tenor.com/mUcTW_KLwYwAAAAi/wave-roblox.gif";
const WELCOME_FOOTER: &str = "Smiley Services Bot • Precision meets creativity";

/// Builds the welcome embed for a new member.
///
/// # Arguments
/// - `display_name` - Name shown in the title
/// - `avatar_url` - Member avatar used as thumbnail
/// - `member_number` - Position of the member in the guild, if known
/// - `bot_avatar_url` - Icon of the footer
pub fn build_welcome_embed(
    display_name: &str,
    avatar_url: &str,
    member_number: Option<u64>,
    bot_avatar_url: &str,
) -> CreateEmbed {
    let position = match member_number {
        Some(number) => format!("You are member **#{}** of Smiley Services.", number),
        None => "Welcome to Smiley Services.".to_string(),
    };

    CreateEmbed::new()
        .title(format!("👋 Welcome, {}!", display_name))
        .description(format!(
            "{}\n\n🎟️ Use `ticket channel` to get started or explore the other channels.",
            position
        ))
        .color(WELCOME_COLOR)
        .thumbnail(avatar_url)
        .image(WELCOME_IMAGE_URL)
        .footer(CreateEmbedFooter::new(WELCOME_FOOTER).icon_url(bot_avatar_url))
}

/// Handles the guild_member_addition event when a member joins a guild
pub async fn handle_guild_member_addition(state: &AppState, ctx: Context, new_member: Member) {
    let Some(welcome_channel_id) = state.welcome_channel_id else {
        tracing::debug!("No welcome channel configured, skipping welcome message");
        return;
    };

    // The welcome still goes out without a member number
    let member_number = match new_member
        .guild_id
        .to_partial_guild_with_counts(&ctx.http)
        .await
    {
        Ok(guild) => guild.approximate_member_count,
        Err(e) => {
            tracing::warn!("Failed to fetch member count: {}", e);
            None
        }
    };

    let bot_avatar_url = ctx.cache.current_user().face();
    let embed = build_welcome_embed(
        new_member.display_name(),
        &new_member.face(),
        member_number,
        &bot_avatar_url,
    );

    let message = CreateMessage::new()
        .content(format!("Welcome <@{}>!", new_member.user.id))
        .embed(embed);

    if let Err(e) = ChannelId::new(welcome_channel_id)
        .send_message(&ctx.http, message)
        .await
    {
        tracing::error!(
            "Failed to welcome user {} in guild {}: {}",
            new_member.user.id,
            new_member.guild_id,
            e
        );
    } else {
        tracing::info!(
            "Welcomed user {} in guild {}",
            new_member.user.id,
            new_member.guild_id
        );
    }
}
