//! Test factories for creating Serenity API objects.
//!
//! This module provides factory functions for creating mock Serenity structs for
//! testing purposes. The factories build objects by deserializing JSON, simulating
//! what Discord's API would return, since most Serenity models cannot be constructed
//! directly outside of the crate.
//!
//! # Available Factories
//!
//! - `role::create_test_role` - Create a Serenity Role
//! - `role::create_test_guild_roles` - Create the role map returned for a guild
//! - `member::create_test_member` - Create a Serenity Member holding roles
//! - `command::create_test_command_data` - Create slash command data with options

pub mod command;
pub mod member;
pub mod role;

// Re-export commonly used functions for convenience
pub use command::create_test_command_data;
pub use member::create_test_member;
pub use role::{create_test_guild_roles, create_test_role};
