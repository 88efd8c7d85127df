use thiserror::Error;

use crate::model::giveaway::{GiveawayId, MAX_WINNERS, MIN_WINNERS};

/// Caller-correctable giveaway errors.
///
/// None of these are retried; each is shown to the requester as a rejection with a
/// human-readable reason.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GiveawayError {
    /// Duration token is not a positive integer followed by one of `s`, `m`, `h`, `d`.
    #[error("Invalid giveaway duration '{0}'")]
    InvalidDuration(String),

    /// Winner count outside of the accepted range.
    #[error("Invalid winner count {0}, expected 1-10")]
    InvalidWinnerCount(i64),

    /// Giveaway does not exist or is no longer accepting requests.
    #[error("Giveaway {0} not found")]
    GiveawayNotFound(GiveawayId),

    /// Requester is neither the host nor staff.
    #[error("User {requester_id} may not end giveaway {id}")]
    PermissionDenied {
        /// The giveaway the request targeted
        id: GiveawayId,
        /// The user who attempted the request
        requester_id: u64,
    },
}

impl GiveawayError {
    /// Reply shown to the requester.
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidDuration(token) => format!(
                "⚠️ `{}` is not a valid duration. Use a number followed by s, m, h or d (e.g. `10m`, `2d`).",
                token
            ),
            Self::InvalidWinnerCount(count) => format!(
                "⚠️ Winner count must be between {} and {}, got {}.",
                MIN_WINNERS, MAX_WINNERS, count
            ),
            Self::GiveawayNotFound(_) => "⚠️ This giveaway is no longer active.".to_string(),
            Self::PermissionDenied { .. } => {
                "⛔ Only the host or staff can end this giveaway.".to_string()
            }
        }
    }
}
