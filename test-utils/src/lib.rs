//! Smiley Bot Test Utils
//!
//! Provides shared testing utilities for the bot's unit tests. The bot keeps all of its
//! state in memory, so the only thing tests need from outside is realistic Discord
//! objects to feed into handlers and permission checks.
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::serenity::{create_test_guild_roles, create_test_member};
//!
//! #[test]
//! fn staff_check() {
//!     let roles = create_test_guild_roles(&[(2, "Ticket RDS")]);
//!     let member = create_test_member(42, 1, "staffer", &[2]);
//!
//!     // Use in your tests...
//! }
//! ```

pub mod serenity;
