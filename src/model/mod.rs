//! Domain models and parameter types.
//!
//! This module contains domain models used throughout the service layer, representing
//! giveaways, budget balances, clock sessions, and tickets. The bot layer converts
//! Discord interactions into these types before calling services and turns service
//! results back into messages and embeds.

pub mod clock;
pub mod giveaway;
pub mod ledger;
pub mod ticket;
