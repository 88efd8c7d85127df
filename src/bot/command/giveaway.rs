use serenity::all::{
    CommandInteraction, CommandOptionType, ComponentInteraction, Context, CreateCommand,
    CreateCommandOption, GuildId, Member,
};

use crate::{
    bot::permission,
    error::AppError,
    model::giveaway::{
        CreateGiveawayParams, Giveaway, GiveawayId, JoinOutcome, Requester, MAX_WINNERS,
        MIN_WINNERS,
    },
    state::AppState,
};

use super::{
    deferred_ephemeral, edited, ephemeral, guild_member, integer_option, string_option,
    subcommand,
};

pub fn register() -> CreateCommand {
    CreateCommand::new("giveaway")
        .description("Run giveaways")
        .add_option(
            CreateCommandOption::new(CommandOptionType::SubCommand, "start", "Start a giveaway")
                .add_sub_option(
                    CreateCommandOption::new(
                        CommandOptionType::String,
                        "prize",
                        "What the winners receive",
                    )
                    .required(true),
                )
                .add_sub_option(
                    CreateCommandOption::new(
                        CommandOptionType::String,
                        "duration",
                        "How long it runs, e.g. 30s, 10m, 2h, 1d",
                    )
                    .required(true),
                )
                .add_sub_option(
                    CreateCommandOption::new(
                        CommandOptionType::Integer,
                        "winners",
                        "Number of winners",
                    )
                    .required(true)
                    .min_int_value(MIN_WINNERS as u64)
                    .max_int_value(MAX_WINNERS as u64),
                ),
        )
        .add_option(
            CreateCommandOption::new(CommandOptionType::SubCommand, "end", "End a giveaway now")
                .add_sub_option(
                    CreateCommandOption::new(CommandOptionType::Integer, "id", "Giveaway number")
                        .required(true)
                        .min_int_value(1),
                ),
        )
}

pub async fn handle(
    state: &AppState,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    let (guild_id, member) = guild_member(command.guild_id, command.member.as_deref())?;
    let options = command.data.options();

    // Both subcommands post to Discord before answering
    command.create_response(&ctx.http, deferred_ephemeral()).await?;

    let content = match subcommand(&options) {
        Some(("start", options)) => {
            permission::require_staff(&ctx.http, guild_id, member, &state.staff_role_name)
                .await?;

            let giveaway = state
                .giveaways
                .create(CreateGiveawayParams {
                    prize: string_option(options, "prize")?.to_string(),
                    duration: string_option(options, "duration")?.to_string(),
                    winner_count: integer_option(options, "winners")?,
                    host_id: command.user.id.get(),
                    channel_id: command.channel_id.get(),
                })
                .await?;

            start_reply(&giveaway)
        }
        Some(("end", options)) => {
            let id = integer_option(options, "id")?;
            let id = u64::try_from(id)
                .map_err(|_| AppError::BadRequest(format!("Invalid giveaway number {}.", id)))?;

            end(state, ctx, guild_id, member, GiveawayId(id)).await?
        }
        _ => return Err(AppError::BadRequest("Unknown giveaway subcommand.".to_string())),
    };

    command.edit_response(&ctx.http, edited(content)).await?;

    Ok(())
}

pub async fn handle_join(
    state: &AppState,
    ctx: &Context,
    component: &ComponentInteraction,
    id: GiveawayId,
) -> Result<(), AppError> {
    let outcome = state.giveaways.join(id, component.user.id.get()).await?;

    component
        .create_response(&ctx.http, ephemeral(join_reply(&outcome)))
        .await?;

    Ok(())
}

pub async fn handle_end_button(
    state: &AppState,
    ctx: &Context,
    component: &ComponentInteraction,
    id: GiveawayId,
) -> Result<(), AppError> {
    let (guild_id, member) = guild_member(component.guild_id, component.member.as_ref())?;
    component.create_response(&ctx.http, deferred_ephemeral()).await?;

    let content = end(state, ctx, guild_id, member, id).await?;
    component.edit_response(&ctx.http, edited(content)).await?;

    Ok(())
}

/// Ends a giveaway on behalf of a member; staff may end any giveaway.
async fn end(
    state: &AppState,
    ctx: &Context,
    guild_id: GuildId,
    member: &Member,
    id: GiveawayId,
) -> Result<String, AppError> {
    let requester = Requester {
        user_id: member.user.id.get(),
        elevated: permission::is_staff(&ctx.http, guild_id, member, &state.staff_role_name)
            .await?,
    };

    let resolution = state.giveaways.end_early(id, requester).await?;

    Ok(format!(
        "✅ Giveaway #{} for **{}** ended with {} winner(s).",
        resolution.id,
        resolution.prize,
        resolution.winners().len()
    ))
}

fn start_reply(giveaway: &Giveaway) -> String {
    let mut content = format!(
        "🎉 Giveaway #{} for **{}** started, it ends <t:{}:R>.",
        giveaway.id,
        giveaway.prize,
        giveaway.ends_at.timestamp()
    );

    if giveaway.announcement_id.is_none() {
        content.push_str(
            "\n⚠️ The announcement could not be posted in this channel, \
             so members cannot press Join.",
        );
    }

    content
}

fn join_reply(outcome: &JoinOutcome) -> String {
    if outcome.newly_added {
        format!(
            "🎉 You entered the giveaway! ({} entries)",
            outcome.entry_count
        )
    } else {
        format!(
            "✅ You are already entered. ({} entries)",
            outcome.entry_count
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::giveaway::GiveawayState;

    /// Tests the reply to a repeated join.
    ///
    /// Expected: Different wording, same entry count
    #[test]
    fn join_reply_distinguishes_repeat_entries() {
        let first = join_reply(&JoinOutcome {
            newly_added: true,
            entry_count: 3,
        });
        let repeat = join_reply(&JoinOutcome {
            newly_added: false,
            entry_count: 3,
        });

        assert!(first.starts_with("🎉"));
        assert!(repeat.contains("already entered"));
        assert!(repeat.contains("3 entries"));
    }

    fn started_giveaway(announcement_id: Option<u64>) -> Giveaway {
        let created_at = chrono::Utc::now();

        Giveaway {
            id: GiveawayId(4),
            prize: "Gift Card".to_string(),
            host_id: 1,
            winner_count: 1,
            entries: Default::default(),
            created_at,
            ends_at: created_at + chrono::Duration::hours(1),
            state: GiveawayState::Open,
            completion_handle: None,
            channel_id: 10,
            announcement_id,
        }
    }

    /// Tests the start confirmation for an announced giveaway.
    ///
    /// Expected: Giveaway number and prize, no warning
    #[test]
    fn start_reply_for_announced_giveaway() {
        let content = start_reply(&started_giveaway(Some(1000)));

        assert!(content.contains("#4"));
        assert!(content.contains("**Gift Card**"));
        assert!(!content.contains("⚠️"));
    }

    /// Tests the start confirmation when the announcement failed.
    ///
    /// Expected: Host warned that the announcement is missing
    #[test]
    fn start_reply_warns_about_missing_announcement() {
        let content = start_reply(&started_giveaway(None));

        assert!(content.contains("#4"));
        assert!(content.contains("⚠️ The announcement could not be posted"));
    }

    /// Tests the winner bounds advertised to Discord.
    ///
    /// Expected: Option limited to 1-10
    #[test]
    fn winners_option_is_bounded() {
        let command = serde_json::to_value(register()).unwrap();
        let start = &command["options"][0];
        let winners = &start["options"][2];

        assert_eq!(start["name"], "start");
        assert_eq!(winners["name"], "winners");
        assert_eq!(winners["min_value"], 1);
        assert_eq!(winners["max_value"], 10);
    }
}
