//! Deferred jobs driven by `tokio-cron-scheduler`.
//!
//! Giveaways schedule a one-shot resolution trigger at their end time. The trigger is
//! reached through the [`giveaway_timer::ResolutionTimer`] trait so the giveaway service
//! can be exercised with a manual timer in tests.

pub mod giveaway_timer;
