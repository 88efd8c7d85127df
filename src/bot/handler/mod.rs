use serenity::all::{Context, EventHandler, Interaction, Member, Ready};
use serenity::async_trait;

use crate::state::AppState;

pub mod interaction;
pub mod member;
pub mod ready;

/// Discord bot event handler
pub struct Handler {
    pub state: AppState,
}

impl Handler {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

#[async_trait]
impl EventHandler for Handler {
    /// Called when the bot is ready and connected to Discord
    async fn ready(&self, ctx: Context, ready: Ready) {
        ready::handle_ready(ctx, ready).await;
    }

    /// Called when a member joins a guild
    async fn guild_member_addition(&self, ctx: Context, new_member: Member) {
        member::handle_guild_member_addition(&self.state, ctx, new_member).await;
    }

    /// Called for every slash command, button press and modal submission
    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        interaction::handle_interaction(&self.state, ctx, interaction).await;
    }
}
