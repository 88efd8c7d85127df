use dioxus_logger::tracing;
use serenity::all::{
    CommandInteraction, ComponentInteraction, Context, CreateCommand,
    CreateInteractionResponse, CreateInteractionResponseMessage, Mentionable,
};

use crate::{
    bot::{log, permission},
    error::AppError,
    model::ticket::TicketKind,
    service::ticket,
    state::AppState,
};

use super::{ephemeral, guild_member};

pub fn register_ticket() -> CreateCommand {
    CreateCommand::new("ticket").description("Post the ticket panel")
}

pub fn register_delete() -> CreateCommand {
    CreateCommand::new("delete").description("Delete this ticket")
}

/// Posts the ticket panel in the current channel.
pub async fn handle_ticket(
    state: &AppState,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    let (guild_id, member) = guild_member(command.guild_id, command.member.as_deref())?;
    permission::require_staff(&ctx.http, guild_id, member, &state.staff_role_name).await?;

    let response = CreateInteractionResponse::Message(
        CreateInteractionResponseMessage::new()
            .embed(ticket::build_panel_embed())
            .components(ticket::build_panel_buttons()),
    );
    command.create_response(&ctx.http, response).await?;

    Ok(())
}

/// Asks for confirmation before deleting the current channel.
pub async fn handle_delete(
    state: &AppState,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    let (guild_id, member) = guild_member(command.guild_id, command.member.as_deref())?;
    permission::require_staff(&ctx.http, guild_id, member, &state.staff_role_name).await?;

    let response = CreateInteractionResponse::Message(
        CreateInteractionResponseMessage::new()
            .content("Are you sure you want to delete this ticket?")
            .components(ticket::build_delete_buttons()),
    );
    command.create_response(&ctx.http, response).await?;

    Ok(())
}

/// Opens a ticket of the pressed kind for the member.
pub async fn handle_open(
    state: &AppState,
    ctx: &Context,
    component: &ComponentInteraction,
    kind: TicketKind,
) -> Result<(), AppError> {
    let (guild_id, _) = guild_member(component.guild_id, component.member.as_ref())?;

    let Some(category_id) =
        ticket::find_category(&ctx.http, guild_id, &state.ticket_category_name).await?
    else {
        return Err(AppError::NotFound(format!(
            "Ticket category \"{}\" not found.",
            state.ticket_category_name
        )));
    };

    let Some(staff_role_id) =
        permission::staff_role(&ctx.http, guild_id, &state.staff_role_name).await?
    else {
        return Err(AppError::NotFound(format!(
            "Role \"{}\" not found.",
            state.staff_role_name
        )));
    };

    let channel = ticket::create_ticket(
        &ctx.http,
        guild_id,
        category_id,
        kind,
        &component.user,
        staff_role_id,
    )
    .await?;

    component
        .create_response(
            &ctx.http,
            ephemeral(format!("✅ Ticket created: {}", channel.mention())),
        )
        .await?;

    log::post(
        &ctx.http,
        state.log_channel_id,
        format!(
            "🎫 <@{}> opened a **{}** ticket: {}",
            component.user.id,
            kind.label(),
            channel.mention()
        ),
    )
    .await;

    Ok(())
}

/// Marks a ticket as claimed by the staff member who pressed Claim.
pub async fn handle_claim(
    state: &AppState,
    ctx: &Context,
    component: &ComponentInteraction,
) -> Result<(), AppError> {
    let (guild_id, member) = guild_member(component.guild_id, component.member.as_ref())?;
    permission::require_staff(&ctx.http, guild_id, member, &state.staff_role_name).await?;

    let response = CreateInteractionResponse::UpdateMessage(
        CreateInteractionResponseMessage::new().components(ticket::build_claim_buttons(true)),
    );
    component.create_response(&ctx.http, response).await?;

    component
        .channel_id
        .say(&ctx.http, ticket::claimed_message(component.user.id.get()))
        .await?;

    tracing::info!(
        "Ticket {} claimed by {}",
        component.channel_id,
        component.user.id
    );

    Ok(())
}

/// Deletes the ticket channel the confirmation was pressed in.
pub async fn handle_confirm_delete(
    state: &AppState,
    ctx: &Context,
    component: &ComponentInteraction,
) -> Result<(), AppError> {
    let (guild_id, member) = guild_member(component.guild_id, component.member.as_ref())?;
    permission::require_staff(&ctx.http, guild_id, member, &state.staff_role_name).await?;

    // Acknowledge first, the channel holding the interaction is about to disappear
    component.defer_ephemeral(&ctx.http).await?;
    component.channel_id.delete(&ctx.http).await?;

    tracing::info!(
        "Ticket {} deleted by {}",
        component.channel_id,
        component.user.id
    );

    log::post(
        &ctx.http,
        state.log_channel_id,
        format!(
            "🗑️ <@{}> deleted ticket `{}`",
            component.user.id, component.channel_id
        ),
    )
    .await;

    Ok(())
}

pub async fn handle_cancel_delete(
    ctx: &Context,
    component: &ComponentInteraction,
) -> Result<(), AppError> {
    component
        .create_response(&ctx.http, ephemeral("❌ Ticket deletion cancelled."))
        .await?;

    Ok(())
}
