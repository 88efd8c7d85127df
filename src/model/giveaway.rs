//! Domain models for giveaway operations.
//!
//! Defines the giveaway record owned by the registry, its lifecycle state, and the
//! parameter/result types passed between the bot layer and the giveaway service.

use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::fmt;
use uuid::Uuid;

/// Smallest accepted number of winners.
pub const MIN_WINNERS: i64 = 1;
/// Largest accepted number of winners.
pub const MAX_WINNERS: i64 = 10;

/// Opaque giveaway identifier allocated by the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GiveawayId(pub u64);

impl fmt::Display for GiveawayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Handle of a scheduled resolution trigger, used to cancel it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(pub Uuid);

/// Lifecycle state of a giveaway.
///
/// Transitions only move forward: `Open` → `Resolving` → `Resolved`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GiveawayState {
    /// Accepting entries, timer running.
    Open,
    /// Timer fired or early end requested; winners are being computed and announced.
    Resolving,
    /// Terminal; the record is about to leave (or has left) the registry.
    Resolved,
}

/// A live giveaway.
///
/// Tracks the prize, host, winner count, entrants, timing, and the Discord message
/// the giveaway was announced in.
#[derive(Debug, Clone, PartialEq)]
pub struct Giveaway {
    /// Unique identifier for the giveaway.
    pub id: GiveawayId,
    /// Free-text prize label.
    pub prize: String,
    /// Discord ID of the user who started the giveaway.
    pub host_id: u64,
    /// Number of winners to draw, between [`MIN_WINNERS`] and [`MAX_WINNERS`].
    pub winner_count: usize,
    /// Discord IDs of the participants.
    pub entries: HashSet<u64>,
    /// Timestamp when the giveaway was created.
    pub created_at: DateTime<Utc>,
    /// Timestamp when the giveaway resolves on its own.
    pub ends_at: DateTime<Utc>,
    /// Current lifecycle state.
    pub state: GiveawayState,
    /// Pending resolution trigger, if one is scheduled.
    pub completion_handle: Option<TimerHandle>,
    /// Channel the giveaway was started in.
    pub channel_id: u64,
    /// Announcement message, once it has been posted.
    pub announcement_id: Option<u64>,
}

impl Giveaway {
    /// Whether the giveaway still accepts entries.
    pub fn is_open(&self) -> bool {
        self.state == GiveawayState::Open
    }

    /// Whether the requester may end this giveaway early.
    ///
    /// # Arguments
    /// - `requester` - The user asking to end the giveaway
    ///
    /// # Returns
    /// - `true` - Requester is the host or holds the staff role
    /// - `false` - Otherwise
    pub fn can_be_ended_by(&self, requester: &Requester) -> bool {
        requester.elevated || requester.user_id == self.host_id
    }
}

/// Parameters for starting a new giveaway.
#[derive(Debug, Clone)]
pub struct CreateGiveawayParams {
    /// Prize label shown in the announcement.
    pub prize: String,
    /// Raw duration token such as `10m` or `2d`.
    pub duration: String,
    /// Requested number of winners, validated by the service.
    pub winner_count: i64,
    /// Discord ID of the host.
    pub host_id: u64,
    /// Channel to announce the giveaway in.
    pub channel_id: u64,
}

/// User issuing a privileged giveaway request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Requester {
    /// Discord ID of the requester.
    pub user_id: u64,
    /// Whether the requester holds the staff role.
    pub elevated: bool,
}

/// Result of a join request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JoinOutcome {
    /// `false` when the participant had already entered.
    pub newly_added: bool,
    /// Number of entries after the request.
    pub entry_count: usize,
}

/// What a resolved giveaway produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GiveawayOutcome {
    /// Winners drawn without replacement from the entries.
    Winners(Vec<u64>),
    /// Nobody entered.
    NoEntries,
}

/// Summary of a resolved giveaway, handed to the notifier.
#[derive(Debug, Clone, PartialEq)]
pub struct GiveawayResolution {
    pub id: GiveawayId,
    pub prize: String,
    pub host_id: u64,
    pub channel_id: u64,
    pub announcement_id: Option<u64>,
    pub entry_count: usize,
    pub outcome: GiveawayOutcome,
}

impl GiveawayResolution {
    /// Winners of the giveaway, empty when nobody entered.
    pub fn winners(&self) -> &[u64] {
        match &self.outcome {
            GiveawayOutcome::Winners(winners) => winners,
            GiveawayOutcome::NoEntries => &[],
        }
    }
}
