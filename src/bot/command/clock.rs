//! Staff clock-in/out commands.
//!
//! `/clockin` asks for today's tasks in a modal and opens the session once it is
//! submitted. `/task` appends to the log and `/clockout` closes the session with a
//! summary of the time worked.

use chrono::{Duration, Utc};
use serenity::all::{
    ActionRow, ActionRowComponent, CommandInteraction, CommandOptionType, Context,
    CreateActionRow, CreateCommand, CreateCommandOption, CreateEmbed, CreateEmbedFooter,
    CreateInputText, CreateInteractionResponse, CreateInteractionResponseMessage, CreateModal,
    InputTextStyle, ModalInteraction, User,
};

use crate::{
    bot::{log, permission},
    error::{clock::ClockError, AppError},
    model::clock::TaskLogEntry,
    state::AppState,
};

use super::{ephemeral, guild_member, string_option};

/// Custom ID of the clock-in modal.
pub const CLOCKIN_MODAL: &str = "clockin_modal";
const TASKS_INPUT: &str = "tasks";

const CLOCKIN_COLOR: u32 = 0x57F287;
const CLOCKOUT_COLOR: u32 = 0xED4245;
const FOOTER: &str = "Smiley Services Bot";
const EMBED_FIELD_LIMIT: usize = 1024;

pub fn register_clockin() -> CreateCommand {
    CreateCommand::new("clockin").description("Clock in and share today's tasks")
}

pub fn register_clockout() -> CreateCommand {
    CreateCommand::new("clockout").description("Clock out of your current session")
}

pub fn register_task() -> CreateCommand {
    CreateCommand::new("task")
        .description("Log a task to your current session")
        .add_option(
            CreateCommandOption::new(CommandOptionType::String, "text", "What you worked on")
                .required(true),
        )
}

/// Shows the clock-in modal.
pub async fn handle_clockin(
    state: &AppState,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    let (guild_id, member) = guild_member(command.guild_id, command.member.as_deref())?;
    permission::require_staff(&ctx.http, guild_id, member, &state.staff_role_name).await?;

    // Checked again on submit, this only spares filling in the modal for nothing
    if state.clock.session(command.user.id.get()).await.is_some() {
        return Err(ClockError::AlreadyClockedIn.into());
    }

    let tasks = CreateInputText::new(
        InputTextStyle::Paragraph,
        "Tasks / Jobs for today",
        TASKS_INPUT,
    )
    .placeholder("Enter what you'll be working on...")
    .required(true);

    let modal = CreateModal::new(CLOCKIN_MODAL, "🕒 Clock In - Smiley Services")
        .components(vec![CreateActionRow::InputText(tasks)]);

    command
        .create_response(&ctx.http, CreateInteractionResponse::Modal(modal))
        .await?;

    Ok(())
}

/// Opens the clock session from the submitted modal.
pub async fn handle_clockin_submit(
    state: &AppState,
    ctx: &Context,
    modal: &ModalInteraction,
) -> Result<(), AppError> {
    let tasks = input_value(&modal.data.components, TASKS_INPUT).unwrap_or_default();
    let session = state
        .clock
        .clock_in(modal.user.id.get(), &tasks, Utc::now())
        .await?;

    let clocked_in_at = session.clocked_in_at.timestamp();
    let embed = user_embed(&modal.user, CLOCKIN_COLOR)
        .title(format!("✅ {} Clocked In", modal.user.name))
        .description(format!(
            "🕒 <t:{}:F>\n\n📋 **Tasks / Jobs:**\n{}",
            clocked_in_at,
            tasks.trim()
        ));

    modal
        .create_response(
            &ctx.http,
            CreateInteractionResponse::Message(
                CreateInteractionResponseMessage::new()
                    .embed(embed)
                    .ephemeral(true),
            ),
        )
        .await?;

    log::post(
        &ctx.http,
        state.log_channel_id,
        format!(
            "✅ <@{}> clocked in.\n🕒 <t:{}:F>\n📋 Tasks:\n{}",
            modal.user.id,
            clocked_in_at,
            tasks.trim()
        ),
    )
    .await;

    Ok(())
}

/// Appends an entry to the caller's task log.
pub async fn handle_task(
    state: &AppState,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    let (guild_id, member) = guild_member(command.guild_id, command.member.as_deref())?;
    permission::require_staff(&ctx.http, guild_id, member, &state.staff_role_name).await?;

    let options = command.data.options();
    let text = string_option(&options, "text")?;

    let entry = state
        .clock
        .log_task(command.user.id.get(), text, Utc::now())
        .await?;

    command
        .create_response(
            &ctx.http,
            ephemeral(format!("📝 Logged: {}", entry.description)),
        )
        .await?;

    log::post(
        &ctx.http,
        state.log_channel_id,
        format!("📝 <@{}> logged: {}", command.user.id, entry.description),
    )
    .await;

    Ok(())
}

/// Closes the caller's session and shows what was worked on.
pub async fn handle_clockout(
    state: &AppState,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    let (guild_id, member) = guild_member(command.guild_id, command.member.as_deref())?;
    permission::require_staff(&ctx.http, guild_id, member, &state.staff_role_name).await?;

    let summary = state
        .clock
        .clock_out(command.user.id.get(), Utc::now())
        .await?;
    let clocked_out_at = summary.clocked_out_at.timestamp();
    let worked = format_worked(summary.worked());

    let embed = user_embed(&command.user, CLOCKOUT_COLOR)
        .title(format!("🔚 {} Clocked Out", command.user.name))
        .description(format!(
            "🕒 <t:{}:F>\n⏱️ Worked **{}**",
            clocked_out_at, worked
        ))
        .field("📋 Task log", format_task_log(&summary.session.tasks), false);

    command
        .create_response(
            &ctx.http,
            CreateInteractionResponse::Message(
                CreateInteractionResponseMessage::new()
                    .embed(embed)
                    .ephemeral(true),
            ),
        )
        .await?;

    log::post(
        &ctx.http,
        state.log_channel_id,
        format!(
            "🚪 <@{}> clocked out at <t:{}:F> after **{}**",
            command.user.id, clocked_out_at, worked
        ),
    )
    .await;

    Ok(())
}

fn user_embed(user: &User, color: u32) -> CreateEmbed {
    CreateEmbed::new()
        .color(color)
        .thumbnail(user.face())
        .footer(CreateEmbedFooter::new(FOOTER))
}

/// Value typed into a modal text input.
fn input_value(rows: &[ActionRow], custom_id: &str) -> Option<String> {
    rows.iter()
        .flat_map(|row| row.components.iter())
        .find_map(|component| match component {
            ActionRowComponent::InputText(input) if input.custom_id == custom_id => {
                input.value.clone()
            }
            _ => None,
        })
}

/// Formats a worked duration as hours and minutes.
pub fn format_worked(worked: Duration) -> String {
    let seconds = worked.num_seconds().max(0);
    let (hours, minutes) = (seconds / 3600, seconds % 3600 / 60);

    match (hours, minutes) {
        (0, 0) => format!("{}s", seconds),
        (0, minutes) => format!("{}m", minutes),
        (hours, minutes) => format!("{}h {}m", hours, minutes),
    }
}

/// Formats the task log for an embed field, keeping the newest entries that fit.
pub fn format_task_log(tasks: &[TaskLogEntry]) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut length = 0;

    for task in tasks.iter().rev() {
        let line = format!("<t:{}:t> {}", task.logged_at.timestamp(), task.description);
        // +1 for the joining newline
        if length + line.chars().count() + 1 > EMBED_FIELD_LIMIT {
            break;
        }
        length += line.chars().count() + 1;
        lines.push(line);
    }

    if lines.is_empty() {
        return "No tasks logged".to_string();
    }

    lines.reverse();
    lines.join("\n")
}
