//! Giveaway lifecycle service.
//!
//! This module provides the `GiveawayService` which orchestrates the whole life of a
//! giveaway: creation, entries, early termination and resolution. It sits between the
//! bot handlers and the in-memory [`registry::GiveawayRegistry`], and delegates timing
//! to a [`ResolutionTimer`] and delivery to a [`notifier::GiveawayNotifier`].
//!
//! The module is organized by concern:
//! - `registry` - In-memory store and state transitions
//! - `builder` - Embed and component building utilities
//! - `notifier` - Announcement delivery to Discord
//!
//! # Resolution
//!
//! A giveaway can be resolved by its timer or by an early end request. Both paths go
//! through [`GiveawayService::resolve`], which first moves the record from `Open` to
//! `Resolving` under the registry lock. Whoever loses that compare-and-set returns
//! without announcing anything, so winners are announced at most once. Announcements
//! happen only after the transition, and delivery failures never keep a record alive.

pub mod builder;
pub mod notifier;
pub mod registry;

#[cfg(test)]
mod test;

use chrono::Utc;
use dioxus_logger::tracing;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use crate::{
    error::{giveaway::GiveawayError, AppError},
    model::giveaway::{
        CreateGiveawayParams, Giveaway, GiveawayId, GiveawayOutcome, GiveawayResolution,
        GiveawayState, JoinOutcome, Requester, MAX_WINNERS, MIN_WINNERS,
    },
    scheduler::giveaway_timer::{ResolutionCallback, ResolutionTimer},
    util::{duration::parse_duration_ms, select::choose_random_subset},
};

use self::{notifier::GiveawayNotifier, registry::GiveawayRegistry};

/// Service providing giveaway lifecycle operations.
///
/// Cheap to clone; clones share the registry, timer and notifier. The timer callbacks
/// hold a clone of the service so they can resolve the giveaway they were scheduled for.
#[derive(Clone)]
pub struct GiveawayService {
    /// Store of live giveaways
    registry: GiveawayRegistry,
    /// Scheduler for natural-timeout resolution
    timer: Arc<dyn ResolutionTimer>,
    /// Announcement delivery
    notifier: Arc<dyn GiveawayNotifier>,
}

impl GiveawayService {
    /// Creates a new GiveawayService instance.
    ///
    /// # Arguments
    /// - `registry` - Store of live giveaways, usually empty
    /// - `timer` - Scheduler used for natural-timeout resolution
    /// - `notifier` - Sink for announcements
    ///
    /// # Returns
    /// - `GiveawayService` - New service instance
    pub fn new(
        registry: GiveawayRegistry,
        timer: Arc<dyn ResolutionTimer>,
        notifier: Arc<dyn GiveawayNotifier>,
    ) -> Self {
        Self {
            registry,
            timer,
            notifier,
        }
    }

    /// Registry backing this service.
    pub fn registry(&self) -> &GiveawayRegistry {
        &self.registry
    }

    /// Starts a new giveaway.
    ///
    /// Validates the winner count and duration before touching any state, stores the
    /// record, posts the announcement and finally schedules its resolution. Failing to
    /// post the announcement is logged; the giveaway still runs.
    ///
    /// # Arguments
    /// - `params` - Prize, duration token, winner count, host and channel
    ///
    /// # Returns
    /// - `Ok(Giveaway)` - Snapshot of the open giveaway
    /// - `Err(AppError::GiveawayErr(InvalidWinnerCount))` - Winner count outside 1-10
    /// - `Err(AppError::GiveawayErr(InvalidDuration))` - Duration token rejected
    /// - `Err(AppError::BadRequest)` - Prize is blank
    /// - `Err(AppError::SchedulerErr)` - Resolution could not be scheduled; the record is
    ///   removed and the announcement withdrawn
    pub async fn create(&self, params: CreateGiveawayParams) -> Result<Giveaway, AppError> {
        let winner_count = validate_winner_count(params.winner_count)?;
        let duration_ms = parse_duration_ms(&params.duration)?;

        let prize = params.prize.trim();
        if prize.is_empty() {
            return Err(AppError::BadRequest("Prize cannot be empty".to_string()));
        }

        let created_at = Utc::now();
        let ends_at = i64::try_from(duration_ms)
            .ok()
            .and_then(chrono::Duration::try_milliseconds)
            .and_then(|duration| created_at.checked_add_signed(duration))
            .ok_or_else(|| GiveawayError::InvalidDuration(params.duration.clone()))?;

        let mut giveaway = Giveaway {
            id: self.registry.allocate_id(),
            prize: prize.to_string(),
            host_id: params.host_id,
            winner_count,
            entries: Default::default(),
            created_at,
            ends_at,
            state: GiveawayState::Open,
            completion_handle: None,
            channel_id: params.channel_id,
            announcement_id: None,
        };
        let id = giveaway.id;

        self.registry.insert(giveaway.clone()).await;

        // Announced before scheduling so a resolution always finds the message to edit
        match self.notifier.announce_created(&giveaway).await {
            Ok(message_id) => {
                if self.registry.set_announcement(id, message_id).await {
                    giveaway.announcement_id = Some(message_id);
                }
            }
            Err(e) => {
                tracing::error!("Failed to announce giveaway {}: {}", id, e);
            }
        }

        match self
            .timer
            .schedule(
                Duration::from_millis(duration_ms),
                self.resolution_callback(id),
            )
            .await
        {
            Ok(handle) => {
                if self.registry.set_completion_handle(id, handle).await {
                    giveaway.completion_handle = Some(handle);
                } else {
                    self.timer.cancel(handle).await;
                }
            }
            Err(e) => {
                self.registry.remove(id).await;

                if let Some(message_id) = giveaway.announcement_id {
                    if let Err(withdraw_err) =
                        self.notifier.withdraw(giveaway.channel_id, message_id).await
                    {
                        tracing::warn!(
                            "Failed to withdraw announcement of giveaway {}: {}",
                            id,
                            withdraw_err
                        );
                    }
                }

                return Err(e);
            }
        }

        tracing::info!(
            "Giveaway {} for '{}' started by {} with {} winner(s), ends at {}",
            id,
            giveaway.prize,
            giveaway.host_id,
            winner_count,
            ends_at
        );

        Ok(giveaway)
    }

    /// Enters a participant into an open giveaway.
    ///
    /// # Arguments
    /// - `id` - The giveaway to join
    /// - `participant_id` - Discord ID of the participant
    ///
    /// # Returns
    /// - `Ok(JoinOutcome)` - Entered (or already entered) with the resulting entry count
    /// - `Err(AppError::GiveawayErr(GiveawayNotFound))` - Giveaway is no longer active
    pub async fn join(&self, id: GiveawayId, participant_id: u64) -> Result<JoinOutcome, AppError> {
        let outcome = self.registry.join(id, participant_id).await?;

        if outcome.newly_added {
            tracing::debug!(
                "User {} joined giveaway {} ({} entries)",
                participant_id,
                id,
                outcome.entry_count
            );
        }

        Ok(outcome)
    }

    /// Ends a giveaway before its timer fires.
    ///
    /// Cancels the pending trigger and resolves immediately. If the timer wins the race
    /// anyway, the giveaway is reported as no longer active and nothing is announced twice.
    ///
    /// # Arguments
    /// - `id` - The giveaway to end
    /// - `requester` - User asking to end it
    ///
    /// # Returns
    /// - `Ok(GiveawayResolution)` - Giveaway resolved by this request
    /// - `Err(AppError::GiveawayErr(GiveawayNotFound))` - Giveaway is no longer active
    /// - `Err(AppError::GiveawayErr(PermissionDenied))` - Requester is neither host nor
    ///   staff; the giveaway is untouched
    pub async fn end_early(
        &self,
        id: GiveawayId,
        requester: Requester,
    ) -> Result<GiveawayResolution, AppError> {
        let handle = self.registry.authorize_end(id, &requester).await?;

        if let Some(handle) = handle {
            self.timer.cancel(handle).await;
        }

        tracing::info!("Giveaway {} ended early by {}", id, requester.user_id);

        self.resolve(id)
            .await
            .ok_or_else(|| GiveawayError::GiveawayNotFound(id).into())
    }

    /// Draws winners and retires a giveaway.
    ///
    /// Safe to call any number of times from any number of tasks; only the first call
    /// for an open giveaway does anything.
    ///
    /// # Arguments
    /// - `id` - The giveaway to resolve
    ///
    /// # Returns
    /// - `Some(GiveawayResolution)` - This call resolved the giveaway
    /// - `None` - Giveaway unknown or already being resolved
    pub async fn resolve(&self, id: GiveawayId) -> Option<GiveawayResolution> {
        let Some(giveaway) = self.registry.begin_resolution(id).await else {
            tracing::debug!("Giveaway {} already resolved or unknown, skipping", id);
            return None;
        };

        if let Some(handle) = giveaway.completion_handle {
            self.timer.cancel(handle).await;
        }

        let outcome = draw_outcome(&giveaway);
        let resolution = GiveawayResolution {
            id,
            prize: giveaway.prize.clone(),
            host_id: giveaway.host_id,
            channel_id: giveaway.channel_id,
            announcement_id: giveaway.announcement_id,
            entry_count: giveaway.entries.len(),
            outcome,
        };

        if let Err(e) = self.notifier.announce_resolution(&resolution).await {
            tracing::error!("Failed to announce resolution of giveaway {}: {}", id, e);
        }

        if let Err(e) = self
            .notifier
            .audit(&builder::audit_message(&resolution))
            .await
        {
            tracing::warn!("Failed to post audit notice for giveaway {}: {}", id, e);
        }

        self.registry.finish_resolution(id).await;

        tracing::info!(
            "Giveaway {} resolved with {} winner(s) from {} entries",
            id,
            resolution.winners().len(),
            resolution.entry_count
        );

        Some(resolution)
    }

    /// Drops every live giveaway and cancels their pending triggers.
    ///
    /// Nothing is announced; giveaways are not persisted, so this mirrors what a
    /// process restart does.
    ///
    /// # Returns
    /// - `usize` - Number of giveaways abandoned
    pub async fn shutdown(&self) -> usize {
        let abandoned = self.registry.drain().await;

        for giveaway in &abandoned {
            if let Some(handle) = giveaway.completion_handle {
                self.timer.cancel(handle).await;
            }
        }

        if !abandoned.is_empty() {
            tracing::warn!("Abandoned {} open giveaway(s) on shutdown", abandoned.len());
        }

        abandoned.len()
    }

    /// Builds the callback run by the timer when a giveaway's time is up.
    fn resolution_callback(&self, id: GiveawayId) -> ResolutionCallback {
        let service = self.clone();

        Arc::new(move || {
            let service = service.clone();

            Box::pin(async move {
                service.resolve(id).await;
            }) as Pin<Box<dyn Future<Output = ()> + Send>>
        })
    }
}

/// Checks the requested number of winners.
///
/// # Returns
/// - `Ok(usize)` - Count within [`MIN_WINNERS`]..=[`MAX_WINNERS`]
/// - `Err(GiveawayError::InvalidWinnerCount)` - Otherwise
fn validate_winner_count(winner_count: i64) -> Result<usize, GiveawayError> {
    if !(MIN_WINNERS..=MAX_WINNERS).contains(&winner_count) {
        return Err(GiveawayError::InvalidWinnerCount(winner_count));
    }

    Ok(winner_count as usize)
}

/// Draws winners from the entries of a resolving giveaway.
fn draw_outcome(giveaway: &Giveaway) -> GiveawayOutcome {
    if giveaway.entries.is_empty() {
        return GiveawayOutcome::NoEntries;
    }

    let entries: Vec<u64> = giveaway.entries.iter().copied().collect();
    let winners = choose_random_subset(&entries, giveaway.winner_count, &mut rand::rng());

    GiveawayOutcome::Winners(winners)
}
