//! In-memory store of live giveaways.
//!
//! The registry is the sole owner of every [`Giveaway`] record. All state transitions
//! happen under its write lock, which is what makes resolution at-most-once: the
//! `Open` → `Resolving` compare-and-set in [`GiveawayRegistry::begin_resolution`] can
//! only succeed for one caller, no matter whether the timer or an early end got there
//! first.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{
    error::giveaway::GiveawayError,
    model::giveaway::{Giveaway, GiveawayId, GiveawayState, JoinOutcome, Requester, TimerHandle},
};

/// Shared store of live giveaways keyed by ID.
///
/// Clones share the same underlying map and ID counter.
#[derive(Clone, Default)]
pub struct GiveawayRegistry {
    /// Live giveaways, including ones currently being resolved.
    giveaways: Arc<RwLock<HashMap<GiveawayId, Giveaway>>>,
    /// Last allocated giveaway ID.
    last_id: Arc<AtomicU64>,
}

impl GiveawayRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates a fresh giveaway ID.
    ///
    /// IDs start at 1 and are never reused within the process lifetime.
    pub fn allocate_id(&self) -> GiveawayId {
        GiveawayId(self.last_id.fetch_add(1, Ordering::Relaxed) + 1)
    }

    /// Stores a new giveaway record.
    pub async fn insert(&self, giveaway: Giveaway) {
        self.giveaways.write().await.insert(giveaway.id, giveaway);
    }

    /// Returns a snapshot of a giveaway.
    pub async fn get(&self, id: GiveawayId) -> Option<Giveaway> {
        self.giveaways.read().await.get(&id).cloned()
    }

    /// Number of live giveaways.
    pub async fn len(&self) -> usize {
        self.giveaways.read().await.len()
    }

    /// Whether no giveaway is live.
    pub async fn is_empty(&self) -> bool {
        self.giveaways.read().await.is_empty()
    }

    /// Removes a giveaway regardless of its state.
    pub async fn remove(&self, id: GiveawayId) -> Option<Giveaway> {
        self.giveaways.write().await.remove(&id)
    }

    /// Attaches the scheduled resolution trigger to an open giveaway.
    ///
    /// # Returns
    /// - `true` - Handle stored
    /// - `false` - Giveaway is gone or no longer open; the caller owns the handle and
    ///   should cancel it
    pub async fn set_completion_handle(&self, id: GiveawayId, handle: TimerHandle) -> bool {
        let mut giveaways = self.giveaways.write().await;

        match giveaways.get_mut(&id) {
            Some(giveaway) if giveaway.is_open() => {
                giveaway.completion_handle = Some(handle);
                true
            }
            _ => false,
        }
    }

    /// Records the announcement message of a giveaway.
    ///
    /// # Returns
    /// - `true` - Announcement stored
    /// - `false` - Giveaway no longer exists
    pub async fn set_announcement(&self, id: GiveawayId, message_id: u64) -> bool {
        let mut giveaways = self.giveaways.write().await;

        match giveaways.get_mut(&id) {
            Some(giveaway) => {
                giveaway.announcement_id = Some(message_id);
                true
            }
            None => false,
        }
    }

    /// Adds a participant to an open giveaway.
    ///
    /// Joining twice is not an error; the second request leaves the entries unchanged.
    ///
    /// # Returns
    /// - `Ok(JoinOutcome)` - Whether the participant was new and the resulting entry count
    /// - `Err(GiveawayError::GiveawayNotFound)` - Giveaway is gone or no longer open
    pub async fn join(
        &self,
        id: GiveawayId,
        participant_id: u64,
    ) -> Result<JoinOutcome, GiveawayError> {
        let mut giveaways = self.giveaways.write().await;

        let giveaway = giveaways
            .get_mut(&id)
            .filter(|giveaway| giveaway.is_open())
            .ok_or(GiveawayError::GiveawayNotFound(id))?;

        let newly_added = giveaway.entries.insert(participant_id);

        Ok(JoinOutcome {
            newly_added,
            entry_count: giveaway.entries.len(),
        })
    }

    /// Checks that a requester may end an open giveaway and detaches its trigger.
    ///
    /// The giveaway stays `Open`; the caller is expected to cancel the returned handle
    /// and resolve right away.
    ///
    /// # Returns
    /// - `Ok(Option<TimerHandle>)` - Authorized, with the pending trigger if there was one
    /// - `Err(GiveawayError::GiveawayNotFound)` - Giveaway is gone or no longer open
    /// - `Err(GiveawayError::PermissionDenied)` - Requester is neither host nor staff
    pub async fn authorize_end(
        &self,
        id: GiveawayId,
        requester: &Requester,
    ) -> Result<Option<TimerHandle>, GiveawayError> {
        let mut giveaways = self.giveaways.write().await;

        let giveaway = giveaways
            .get_mut(&id)
            .filter(|giveaway| giveaway.is_open())
            .ok_or(GiveawayError::GiveawayNotFound(id))?;

        if !giveaway.can_be_ended_by(requester) {
            return Err(GiveawayError::PermissionDenied {
                id,
                requester_id: requester.user_id,
            });
        }

        Ok(giveaway.completion_handle.take())
    }

    /// Moves an open giveaway to `Resolving`.
    ///
    /// Only the first caller for a given ID wins; everyone else gets `None`. The
    /// completion handle is detached from the record and returned in the snapshot.
    ///
    /// # Returns
    /// - `Some(Giveaway)` - Snapshot taken right after the transition
    /// - `None` - Giveaway is gone or another caller already started resolving it
    pub async fn begin_resolution(&self, id: GiveawayId) -> Option<Giveaway> {
        let mut giveaways = self.giveaways.write().await;

        let giveaway = giveaways.get_mut(&id).filter(|giveaway| giveaway.is_open())?;
        giveaway.state = GiveawayState::Resolving;

        let mut snapshot = giveaway.clone();
        snapshot.completion_handle = giveaway.completion_handle.take();

        Some(snapshot)
    }

    /// Marks a resolving giveaway as `Resolved` and removes it.
    ///
    /// # Returns
    /// - `Some(Giveaway)` - The retired record
    /// - `None` - Giveaway was not in `Resolving`
    pub async fn finish_resolution(&self, id: GiveawayId) -> Option<Giveaway> {
        let mut giveaways = self.giveaways.write().await;

        if giveaways.get(&id)?.state != GiveawayState::Resolving {
            return None;
        }

        let mut giveaway = giveaways.remove(&id)?;
        giveaway.state = GiveawayState::Resolved;

        Some(giveaway)
    }

    /// Removes every giveaway, returning them for cleanup.
    pub async fn drain(&self) -> Vec<Giveaway> {
        self.giveaways
            .write()
            .await
            .drain()
            .map(|(_, giveaway)| giveaway)
            .collect()
    }
}
