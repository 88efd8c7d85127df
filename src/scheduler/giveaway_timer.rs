use dioxus_logger::tracing;
use serenity::async_trait;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::{error::AppError, model::giveaway::TimerHandle};

/// Work executed when a resolution trigger fires.
///
/// Shared rather than boxed once because scheduler jobs are `FnMut` and may, in
/// principle, be invoked more than once. Resolution itself is idempotent.
pub type ResolutionCallback =
    Arc<dyn Fn() -> Pin<Box<dyn Future<Output = ()> + Send>> + Send + Sync>;

/// One-shot deferred triggers with best-effort cancellation.
#[async_trait]
pub trait ResolutionTimer: Send + Sync {
    /// Schedules `callback` to run once after `delay`.
    ///
    /// # Returns
    /// - `Ok(TimerHandle)` - Handle that can later be passed to [`ResolutionTimer::cancel`]
    /// - `Err(AppError)` - The job could not be scheduled
    async fn schedule(
        &self,
        delay: Duration,
        callback: ResolutionCallback,
    ) -> Result<TimerHandle, AppError>;

    /// Cancels a pending trigger.
    ///
    /// Canceling a trigger that already fired or was already canceled is a no-op.
    async fn cancel(&self, handle: TimerHandle);
}

/// Resolution timer backed by a running [`JobScheduler`].
#[derive(Clone)]
pub struct CronResolutionTimer {
    scheduler: JobScheduler,
}

impl CronResolutionTimer {
    /// Creates and starts the underlying job scheduler.
    ///
    /// # Returns
    /// - `Ok(CronResolutionTimer)` - Scheduler is running and accepting jobs
    /// - `Err(AppError::SchedulerErr)` - Scheduler failed to initialize or start
    pub async fn start() -> Result<Self, AppError> {
        let scheduler = JobScheduler::new().await?;
        scheduler.start().await?;

        tracing::info!("Giveaway resolution scheduler started");

        Ok(Self { scheduler })
    }

    /// Stops the scheduler, dropping every pending job.
    pub async fn shutdown(&self) -> Result<(), AppError> {
        let mut scheduler = self.scheduler.clone();
        scheduler.shutdown().await?;

        Ok(())
    }
}

#[async_trait]
impl ResolutionTimer for CronResolutionTimer {
    async fn schedule(
        &self,
        delay: Duration,
        callback: ResolutionCallback,
    ) -> Result<TimerHandle, AppError> {
        // The scheduler truncates its due time to whole seconds and may run the job
        // up to a second early; the job waits out the remainder itself.
        let deadline = Instant::now() + delay;

        let job = Job::new_one_shot_async(delay, move |_uuid, _lock| {
            let callback = callback.clone();

            Box::pin(async move {
                tokio::time::sleep_until(deadline).await;
                callback().await;
            })
        })?;

        let uuid = self.scheduler.add(job).await?;

        Ok(TimerHandle(uuid))
    }

    async fn cancel(&self, handle: TimerHandle) {
        if let Err(e) = self.scheduler.remove(&handle.0).await {
            tracing::debug!("Failed to cancel resolution job {}: {}", handle.0, e);
        }
    }
}
