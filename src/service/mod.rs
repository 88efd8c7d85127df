//! Service layer for the bot's features.
//!
//! Services hold the in-memory state of each feature and implement its rules. The bot
//! handlers parse interactions, call into a service and render the result; services
//! never read interaction payloads themselves.

pub mod clock;
pub mod giveaway;
pub mod ledger;
pub mod ticket;
