//! Slash command definitions and interaction handlers.
//!
//! Each feature module declares its slash commands and answers the interactions they
//! produce. This module registers every command, routes commands, buttons and modal
//! submissions to the right feature, and holds the small helpers they share.
//!
//! Handlers return `Result<(), AppError>`; errors are turned into ephemeral replies by
//! [`crate::bot::handler::interaction`].

pub mod availability;
pub mod budget;
pub mod clock;
pub mod giveaway;
pub mod ticket;

use dioxus_logger::tracing;
use serenity::all::{
    CommandInteraction, ComponentInteraction, Context, CreateCommand,
    CreateInteractionResponse, CreateInteractionResponseMessage, EditInteractionResponse,
    GuildId, Member, ModalInteraction, ResolvedOption, ResolvedValue,
};

use crate::{
    error::AppError,
    model::{giveaway::GiveawayId, ticket::TicketKind},
    service::{giveaway::builder as giveaway_builder, ticket as ticket_service},
    state::AppState,
    util::parse::{parse_u64_from_str, split_custom_id},
};

/// Every slash command the bot registers.
pub fn definitions() -> Vec<CreateCommand> {
    vec![
        giveaway::register(),
        ticket::register_ticket(),
        ticket::register_delete(),
        availability::register(),
        clock::register_clockin(),
        clock::register_clockout(),
        clock::register_task(),
        budget::register(),
    ]
}

/// Routes a slash command to its handler.
pub async fn dispatch_command(
    state: &AppState,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    match command.data.name.as_str() {
        "giveaway" => giveaway::handle(state, ctx, command).await,
        "ticket" => ticket::handle_ticket(state, ctx, command).await,
        "delete" => ticket::handle_delete(state, ctx, command).await,
        "availability" => availability::handle(state, ctx, command).await,
        "clockin" => clock::handle_clockin(state, ctx, command).await,
        "clockout" => clock::handle_clockout(state, ctx, command).await,
        "task" => clock::handle_task(state, ctx, command).await,
        "budget" => budget::handle(state, ctx, command).await,
        name => {
            tracing::warn!("Received unknown command /{}", name);
            Err(AppError::NotFound(format!("Unknown command /{}", name)))
        }
    }
}

/// Routes a button press to its handler.
///
/// Buttons without a known custom ID are ignored; they belong to messages posted by
/// an older version of the bot.
pub async fn dispatch_component(
    state: &AppState,
    ctx: &Context,
    component: &ComponentInteraction,
) -> Result<(), AppError> {
    let custom_id = component.data.custom_id.as_str();

    if let Some(kind) = TicketKind::from_key(custom_id) {
        return ticket::handle_open(state, ctx, component, kind).await;
    }

    match custom_id {
        ticket_service::CLAIM_ACTION => ticket::handle_claim(state, ctx, component).await,
        ticket_service::CONFIRM_DELETE_ACTION => {
            ticket::handle_confirm_delete(state, ctx, component).await
        }
        ticket_service::CANCEL_DELETE_ACTION => ticket::handle_cancel_delete(ctx, component).await,
        _ => match split_custom_id(custom_id) {
            Some((giveaway_builder::JOIN_ACTION, id)) => {
                giveaway::handle_join(state, ctx, component, parse_giveaway_id(id)?).await
            }
            Some((giveaway_builder::END_ACTION, id)) => {
                giveaway::handle_end_button(state, ctx, component, parse_giveaway_id(id)?).await
            }
            _ => {
                tracing::debug!("Ignoring button with unknown custom ID {}", custom_id);
                Ok(())
            }
        },
    }
}

/// Routes a modal submission to its handler.
pub async fn dispatch_modal(
    state: &AppState,
    ctx: &Context,
    modal: &ModalInteraction,
) -> Result<(), AppError> {
    match modal.data.custom_id.as_str() {
        clock::CLOCKIN_MODAL => clock::handle_clockin_submit(state, ctx, modal).await,
        custom_id => {
            tracing::debug!("Ignoring modal with unknown custom ID {}", custom_id);
            Ok(())
        }
    }
}

/// Ephemeral text reply.
pub fn ephemeral(content: impl Into<String>) -> CreateInteractionResponse {
    CreateInteractionResponse::Message(
        CreateInteractionResponseMessage::new()
            .content(content)
            .ephemeral(true),
    )
}

/// Ephemeral "thinking" acknowledgement for handlers that talk to Discord before
/// answering; the answer is sent later with [`edited`].
pub fn deferred_ephemeral() -> CreateInteractionResponse {
    CreateInteractionResponse::Defer(CreateInteractionResponseMessage::new().ephemeral(true))
}

/// Final text of a deferred reply.
pub fn edited(content: impl Into<String>) -> EditInteractionResponse {
    EditInteractionResponse::new().content(content)
}

/// Text reply visible to the whole channel.
pub fn public(content: impl Into<String>) -> CreateInteractionResponse {
    CreateInteractionResponse::Message(CreateInteractionResponseMessage::new().content(content))
}

/// Guild and member of an interaction, rejecting direct messages.
pub fn guild_member(
    guild_id: Option<GuildId>,
    member: Option<&Member>,
) -> Result<(GuildId, &Member), AppError> {
    guild_id
        .zip(member)
        .ok_or_else(|| AppError::BadRequest("This command can only be used in a server.".to_string()))
}

/// Options of the first subcommand, with its name.
pub fn subcommand<'a, 'b>(
    options: &'b [ResolvedOption<'a>],
) -> Option<(&'a str, &'b [ResolvedOption<'a>])> {
    options.iter().find_map(|option| match &option.value {
        ResolvedValue::SubCommand(sub_options) => Some((option.name, sub_options.as_slice())),
        _ => None,
    })
}

/// Value of a required string option.
pub fn string_option<'a>(options: &[ResolvedOption<'a>], name: &str) -> Result<&'a str, AppError> {
    options
        .iter()
        .find(|option| option.name == name)
        .and_then(|option| match option.value {
            ResolvedValue::String(value) => Some(value),
            _ => None,
        })
        .ok_or_else(|| missing_option(name))
}

/// Value of a required integer option.
pub fn integer_option(options: &[ResolvedOption<'_>], name: &str) -> Result<i64, AppError> {
    options
        .iter()
        .find(|option| option.name == name)
        .and_then(|option| match option.value {
            ResolvedValue::Integer(value) => Some(value),
            _ => None,
        })
        .ok_or_else(|| missing_option(name))
}

fn missing_option(name: &str) -> AppError {
    AppError::BadRequest(format!("Missing option `{}`.", name))
}

fn parse_giveaway_id(value: &str) -> Result<GiveawayId, AppError> {
    Ok(GiveawayId(parse_u64_from_str(value)?))
}
