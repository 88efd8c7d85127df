use crate::{
    error::{giveaway::GiveawayError, AppError},
    model::giveaway::{
        CreateGiveawayParams, Giveaway, GiveawayId, GiveawayOutcome, GiveawayResolution,
        GiveawayState, Requester, TimerHandle,
    },
    scheduler::giveaway_timer::{ResolutionCallback, ResolutionTimer},
    service::giveaway::{notifier::GiveawayNotifier, registry::GiveawayRegistry, GiveawayService},
};
use serenity::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use uuid::Uuid;

mod end_early;
mod join;
mod scenario;

const HOST: u64 = 1;
const CHANNEL: u64 = 500;

/// Timer that only fires when a test tells it to.
#[derive(Default)]
pub struct ManualTimer {
    pending: Mutex<HashMap<TimerHandle, (Duration, ResolutionCallback)>>,
    canceled: Mutex<Vec<TimerHandle>>,
    last_id: AtomicU64,
    fail_schedule: AtomicBool,
    fire_on_schedule: AtomicBool,
}

impl ManualTimer {
    /// Makes every following `schedule` call fail.
    pub fn fail_schedule(&self) {
        self.fail_schedule.store(true, Ordering::SeqCst);
    }

    /// Makes every following trigger fire as soon as it is scheduled.
    pub fn fire_on_schedule(&self) {
        self.fire_on_schedule.store(true, Ordering::SeqCst);
    }

    /// Number of triggers still waiting to fire.
    pub fn pending_count(&self) -> usize {
        self.pending.lock().unwrap().len()
    }

    /// Delay a trigger was scheduled with.
    pub fn delay_of(&self, handle: TimerHandle) -> Option<Duration> {
        self.pending.lock().unwrap().get(&handle).map(|(delay, _)| *delay)
    }

    /// Handles passed to `cancel`.
    pub fn canceled(&self) -> Vec<TimerHandle> {
        self.canceled.lock().unwrap().clone()
    }

    /// Removes a trigger as if it had just fired, returning its callback.
    pub fn take(&self, handle: TimerHandle) -> Option<ResolutionCallback> {
        self.pending
            .lock()
            .unwrap()
            .remove(&handle)
            .map(|(_, callback)| callback)
    }

    /// Fires a trigger and waits for its callback.
    pub async fn fire(&self, handle: TimerHandle) -> bool {
        match self.take(handle) {
            Some(callback) => {
                callback().await;
                true
            }
            None => false,
        }
    }
}

#[async_trait]
impl ResolutionTimer for ManualTimer {
    async fn schedule(
        &self,
        delay: Duration,
        callback: ResolutionCallback,
    ) -> Result<TimerHandle, AppError> {
        if self.fail_schedule.load(Ordering::SeqCst) {
            return Err(AppError::InternalError("scheduler unavailable".to_string()));
        }

        let id = self.last_id.fetch_add(1, Ordering::SeqCst) + 1;
        let handle = TimerHandle(Uuid::from_u128(id as u128));

        if self.fire_on_schedule.load(Ordering::SeqCst) {
            callback().await;
            return Ok(handle);
        }

        self.pending
            .lock()
            .unwrap()
            .insert(handle, (delay, callback));

        Ok(handle)
    }

    async fn cancel(&self, handle: TimerHandle) {
        self.pending.lock().unwrap().remove(&handle);
        self.canceled.lock().unwrap().push(handle);
    }
}

/// Notifier recording every delivery attempt.
#[derive(Default)]
pub struct RecordingNotifier {
    created: Mutex<Vec<GiveawayId>>,
    resolutions: Mutex<Vec<GiveawayResolution>>,
    withdrawn: Mutex<Vec<u64>>,
    audits: Mutex<Vec<String>>,
    last_message_id: AtomicU64,
    fail: AtomicBool,
}

impl RecordingNotifier {
    /// Makes every following delivery fail after being recorded.
    pub fn fail_deliveries(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }

    pub fn created(&self) -> Vec<GiveawayId> {
        self.created.lock().unwrap().clone()
    }

    pub fn resolutions(&self) -> Vec<GiveawayResolution> {
        self.resolutions.lock().unwrap().clone()
    }

    pub fn withdrawn(&self) -> Vec<u64> {
        self.withdrawn.lock().unwrap().clone()
    }

    pub fn audits(&self) -> Vec<String> {
        self.audits.lock().unwrap().clone()
    }

    fn result(&self) -> Result<(), AppError> {
        if self.fail.load(Ordering::SeqCst) {
            Err(AppError::InternalError("discord unavailable".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl GiveawayNotifier for RecordingNotifier {
    async fn announce_created(&self, giveaway: &Giveaway) -> Result<u64, AppError> {
        self.created.lock().unwrap().push(giveaway.id);
        self.result()?;

        Ok(1000 + self.last_message_id.fetch_add(1, Ordering::SeqCst))
    }

    async fn announce_resolution(
        &self,
        resolution: &GiveawayResolution,
    ) -> Result<(), AppError> {
        self.resolutions.lock().unwrap().push(resolution.clone());
        self.result()
    }

    async fn withdraw(&self, _channel_id: u64, message_id: u64) -> Result<(), AppError> {
        self.withdrawn.lock().unwrap().push(message_id);
        self.result()
    }

    async fn audit(&self, message: &str) -> Result<(), AppError> {
        self.audits.lock().unwrap().push(message.to_string());
        self.result()
    }
}

/// Giveaway service wired to a manual timer and a recording notifier.
pub struct TestGiveaways {
    pub service: GiveawayService,
    pub timer: Arc<ManualTimer>,
    pub notifier: Arc<RecordingNotifier>,
}

impl TestGiveaways {
    pub fn new() -> Self {
        let timer = Arc::new(ManualTimer::default());
        let notifier = Arc::new(RecordingNotifier::default());
        let service = GiveawayService::new(
            GiveawayRegistry::new(),
            timer.clone(),
            notifier.clone(),
        );

        Self {
            service,
            timer,
            notifier,
        }
    }

    /// Starts a giveaway hosted by [`HOST`] in [`CHANNEL`].
    pub async fn start(
        &self,
        prize: &str,
        duration: &str,
        winner_count: i64,
    ) -> Result<Giveaway, AppError> {
        self.service
            .create(CreateGiveawayParams {
                prize: prize.to_string(),
                duration: duration.to_string(),
                winner_count,
                host_id: HOST,
                channel_id: CHANNEL,
            })
            .await
    }

    /// Joins each user, ignoring the outcome.
    pub async fn join_all(&self, id: GiveawayId, users: &[u64]) {
        for user in users {
            self.service.join(id, *user).await.unwrap();
        }
    }
}

pub fn host() -> Requester {
    Requester {
        user_id: HOST,
        elevated: false,
    }
}

pub fn member(user_id: u64) -> Requester {
    Requester {
        user_id,
        elevated: false,
    }
}

pub fn staff(user_id: u64) -> Requester {
    Requester {
        user_id,
        elevated: true,
    }
}
