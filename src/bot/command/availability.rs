use serenity::all::{
    CommandInteraction, CommandOptionType, Context, CreateCommand, CreateCommandOption,
};

use crate::{
    bot::{log, permission},
    error::AppError,
    state::AppState,
};

use super::{guild_member, public, string_option};

pub fn register() -> CreateCommand {
    CreateCommand::new("availability")
        .description("Share your availability with the team")
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::String,
                "status",
                "e.g. Available, Busy, Away",
            )
            .required(true),
        )
        .add_option(
            CreateCommandOption::new(CommandOptionType::String, "hours", "Your active hours")
                .required(true),
        )
}

/// Announces the caller's availability in the channel and the log channel.
pub async fn handle(
    state: &AppState,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    let (guild_id, member) = guild_member(command.guild_id, command.member.as_deref())?;
    permission::require_staff(&ctx.http, guild_id, member, &state.staff_role_name).await?;

    let options = command.data.options();
    let status = string_option(&options, "status")?;
    let hours = string_option(&options, "hours")?;

    command
        .create_response(
            &ctx.http,
            public(format!(
                "📋 <@{}> updated availability:\nStatus: **{}**\nActive Hours: **{}**",
                command.user.id, status, hours
            )),
        )
        .await?;

    log::post(
        &ctx.http,
        state.log_channel_id,
        format!(
            "📢 <@{}> is now **{}** and active during **{}**",
            command.user.id, status, hours
        ),
    )
    .await;

    Ok(())
}
