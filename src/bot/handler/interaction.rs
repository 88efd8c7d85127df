//! Interaction event handler.
//!
//! Routes slash commands, button presses and modal submissions to the command
//! handlers. A failed handler gets an ephemeral reply with the error's user message;
//! if the interaction was already acknowledged the reply is sent as a follow-up.

use dioxus_logger::tracing;
use serenity::all::{
    CommandInteraction, ComponentInteraction, Context, CreateInteractionResponseFollowup,
    Interaction, ModalInteraction,
};

use crate::{
    bot::command::{self, ephemeral},
    error::AppError,
    state::AppState,
};

/// Handles the interaction_create event.
pub async fn handle_interaction(state: &AppState, ctx: Context, interaction: Interaction) {
    match interaction {
        Interaction::Command(command) => {
            if let Err(e) = command::dispatch_command(state, &ctx, &command).await {
                reply_command_error(&ctx, &command, e).await;
            }
        }
        Interaction::Component(component) => {
            if let Err(e) = command::dispatch_component(state, &ctx, &component).await {
                reply_component_error(&ctx, &component, e).await;
            }
        }
        Interaction::Modal(modal) => {
            if let Err(e) = command::dispatch_modal(state, &ctx, &modal).await {
                reply_modal_error(&ctx, &modal, e).await;
            }
        }
        _ => {}
    }
}

fn error_followup(content: &str) -> CreateInteractionResponseFollowup {
    CreateInteractionResponseFollowup::new()
        .content(content)
        .ephemeral(true)
}

async fn reply_command_error(ctx: &Context, command: &CommandInteraction, error: AppError) {
    tracing::debug!("/{} by {} failed: {}", command.data.name, command.user.id, error);
    let content = error.user_message();

    if command.create_response(&ctx.http, ephemeral(&content)).await.is_err() {
        if let Err(e) = command
            .create_followup(&ctx.http, error_followup(&content))
            .await
        {
            tracing::error!("Failed to report error for /{}: {}", command.data.name, e);
        }
    }
}

async fn reply_component_error(ctx: &Context, component: &ComponentInteraction, error: AppError) {
    tracing::debug!(
        "Button {} by {} failed: {}",
        component.data.custom_id,
        component.user.id,
        error
    );
    let content = error.user_message();

    if component.create_response(&ctx.http, ephemeral(&content)).await.is_err() {
        if let Err(e) = component
            .create_followup(&ctx.http, error_followup(&content))
            .await
        {
            tracing::error!(
                "Failed to report error for button {}: {}",
                component.data.custom_id,
                e
            );
        }
    }
}

async fn reply_modal_error(ctx: &Context, modal: &ModalInteraction, error: AppError) {
    tracing::debug!(
        "Modal {} by {} failed: {}",
        modal.data.custom_id,
        modal.user.id,
        error
    );
    let content = error.user_message();

    if modal.create_response(&ctx.http, ephemeral(&content)).await.is_err() {
        if let Err(e) = modal.create_followup(&ctx.http, error_followup(&content)).await {
            tracing::error!(
                "Failed to report error for modal {}: {}",
                modal.data.custom_id,
                e
            );
        }
    }
}
