//! Application state shared by every event handler.
//!
//! This module defines the `AppState` struct which holds the services and settings the
//! bot handlers need. The state is built once during startup and owned by the event
//! handler; every field is cheap to clone and clones share the underlying data.

use crate::{
    config::Config,
    service::{clock::ClockService, giveaway::GiveawayService, ledger::BudgetLedger},
};

/// Application state containing shared services and settings.
#[derive(Clone)]
pub struct AppState {
    /// Giveaway lifecycle service.
    pub giveaways: GiveawayService,

    /// Shared USD/Robux budget.
    pub ledger: BudgetLedger,

    /// Staff clock-in sessions.
    pub clock: ClockService,

    /// Name of the role gating staff commands.
    pub staff_role_name: String,

    /// Name of the category ticket channels are created under.
    pub ticket_category_name: String,

    /// Channel receiving audit notices.
    pub log_channel_id: Option<u64>,

    /// Channel receiving welcome messages.
    pub welcome_channel_id: Option<u64>,
}

impl AppState {
    /// Creates the application state from the configuration and the giveaway service.
    ///
    /// The ledger and clock start empty.
    ///
    /// # Arguments
    /// - `config` - Application configuration
    /// - `giveaways` - Giveaway service wired to the production timer and notifier
    ///
    /// # Returns
    /// - `AppState` - Initialized application state ready for use
    pub fn new(config: &Config, giveaways: GiveawayService) -> Self {
        Self {
            giveaways,
            ledger: BudgetLedger::new(),
            clock: ClockService::new(),
            staff_role_name: config.staff_role_name.clone(),
            ticket_category_name: config.ticket_category_name.clone(),
            log_channel_id: config.log_channel_id,
            welcome_channel_id: config.welcome_channel_id,
        }
    }
}
