//! Discord bot integration.
//!
//! This module connects the bot to Discord's gateway and routes gateway events to the
//! feature services. Slash commands are registered globally once the bot is ready, and
//! every interaction (slash command, button or modal) is answered by the handlers in
//! [`command`].
//!
//! # Gateway Intents
//!
//! The bot requires the following gateway intents:
//! - `GUILDS` - Receive guild availability and interaction context
//! - `GUILD_MESSAGES` - Receive events about messages in guilds
//! - `GUILD_MEMBERS` - Receive member join events for welcome messages (privileged intent)
//!
//! Note: `GUILD_MEMBERS` is a privileged intent and must be explicitly enabled
//! in the Discord Developer Portal for the bot application.

pub mod command;
pub mod handler;
pub mod log;
pub mod permission;
pub mod start;
