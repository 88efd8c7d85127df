//! Error types and requester-facing error messages.
//!
//! This module provides the application's error hierarchy. The `AppError` enum serves
//! as the top-level error type that wraps domain-specific errors. Since the bot answers
//! Discord interactions instead of HTTP requests, every error knows how to render itself
//! as the short reply shown to the user who triggered it via [`AppError::user_message`].

pub mod clock;
pub mod config;
pub mod giveaway;
pub mod internal;
pub mod ledger;

use dioxus_logger::tracing;
use thiserror::Error;

use crate::error::{
    clock::ClockError, config::ConfigError, giveaway::GiveawayError, internal::InternalError,
    ledger::LedgerError,
};

/// Generic reply used whenever the real cause should stay in the logs.
pub const GENERIC_FAILURE_MESSAGE: &str = "⚠️ Something went wrong.";

/// Top-level application error type.
///
/// Aggregates all possible error types that can occur in the bot. Most variants use
/// `#[from]` for automatic error conversion. Domain errors (giveaways, ledger, clock)
/// are caller-correctable and render their own message, while infrastructure errors
/// are logged and replaced by a generic reply.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Giveaway lifecycle error (bad input, unknown giveaway, missing permission).
    #[error(transparent)]
    GiveawayErr(#[from] GiveawayError),

    /// Budget ledger error.
    #[error(transparent)]
    LedgerErr(#[from] LedgerError),

    /// Clock-in/out session error.
    #[error(transparent)]
    ClockErr(#[from] ClockError),

    /// Internal issue indicating unexpected behavior or a possible bug.
    #[error(transparent)]
    InternalErr(#[from] InternalError),

    /// Discord API error from Serenity.
    ///
    /// Boxed due to large size.
    #[error(transparent)]
    DiscordErr(#[from] Box<serenity::Error>),

    /// Scheduler error raised while adding or removing a deferred job.
    #[error(transparent)]
    SchedulerErr(#[from] tokio_cron_scheduler::JobSchedulerError),

    /// Requester is missing the staff role for a privileged command.
    #[error("User {0} lacks the staff role")]
    MissingStaffRole(u64),

    /// Resource not found error.
    ///
    /// # Fields
    /// - Message describing what resource was not found
    #[error("{0}")]
    NotFound(String),

    /// Invalid request error.
    ///
    /// # Fields
    /// - Message describing what was invalid about the request
    #[error("{0}")]
    BadRequest(String),

    /// Internal error with custom message.
    ///
    /// The provided message is logged but a generic message is shown to the user.
    #[error("{0}")]
    InternalError(String),
}

/// Manual conversion from serenity::Error to AppError.
///
/// Boxes the error to reduce the size of the AppError enum, as serenity::Error
/// is very large and would make all AppError variants larger if not boxed.
impl From<serenity::Error> for AppError {
    fn from(err: serenity::Error) -> Self {
        AppError::DiscordErr(Box::new(err))
    }
}

impl AppError {
    /// Renders the error as the reply shown to the requester.
    ///
    /// Caller-correctable errors return their own human-readable reason. Everything
    /// else is logged at error level and replaced with [`GENERIC_FAILURE_MESSAGE`] to
    /// avoid leaking implementation details into the channel.
    ///
    /// # Returns
    /// - `String` - Message suitable for an ephemeral interaction reply
    pub fn user_message(&self) -> String {
        match self {
            Self::GiveawayErr(err) => err.user_message(),
            Self::LedgerErr(err) => format!("⚠️ {}", err),
            Self::ClockErr(err) => format!("⚠️ {}", err),
            Self::MissingStaffRole(_) => {
                "⛔ You do not have permission to use this command.".to_string()
            }
            Self::NotFound(msg) | Self::BadRequest(msg) => format!("⚠️ {}", msg),
            err => {
                tracing::error!("{}", err);
                GENERIC_FAILURE_MESSAGE.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::giveaway::GiveawayId;

    /// Tests that caller-correctable giveaway errors keep their reason.
    ///
    /// Expected: Message mentions the rejected duration token
    #[test]
    fn giveaway_errors_render_reason() {
        let err = AppError::from(GiveawayError::InvalidDuration("10x".to_string()));

        assert!(err.user_message().contains("10x"));
    }

    /// Tests that not-found giveaways are reported as no longer active.
    ///
    /// Expected: Message says the giveaway is no longer active
    #[test]
    fn missing_giveaway_reads_as_inactive() {
        let err = AppError::from(GiveawayError::GiveawayNotFound(GiveawayId(7)));

        assert!(err.user_message().contains("no longer active"));
    }

    /// Tests that infrastructure errors are hidden behind the generic reply.
    ///
    /// Expected: Generic failure message
    #[test]
    fn internal_errors_are_hidden() {
        let err = AppError::InternalError("db exploded".to_string());

        assert_eq!(err.user_message(), GENERIC_FAILURE_MESSAGE);
    }

    /// Tests the staff gate reply.
    ///
    /// Expected: Permission message
    #[test]
    fn missing_staff_role_reply() {
        let err = AppError::MissingStaffRole(1);

        assert!(err.user_message().starts_with("⛔"));
    }
}
