//! Staff clock-in/out tracking.
//!
//! This module provides the `ClockService` which keeps one open session per staff
//! member, each with a timestamped task log. Sessions live in memory only.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{
    error::clock::ClockError,
    model::clock::{ClockSession, ClockSummary, TaskLogEntry},
};

/// Service for staff clock sessions.
///
/// Clones share the same sessions.
#[derive(Clone, Default)]
pub struct ClockService {
    sessions: Arc<RwLock<HashMap<u64, ClockSession>>>,
}

impl ClockService {
    /// Creates a service with no open sessions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a session with the initial task description.
    ///
    /// # Arguments
    /// - `user_id` - Discord ID of the staff member
    /// - `tasks` - What they plan to work on
    /// - `now` - Clock-in time
    ///
    /// # Returns
    /// - `Ok(ClockSession)` - The new session
    /// - `Err(ClockError::AlreadyClockedIn)` - A session is already open
    /// - `Err(ClockError::EmptyTask)` - Task description is blank
    pub async fn clock_in(
        &self,
        user_id: u64,
        tasks: &str,
        now: DateTime<Utc>,
    ) -> Result<ClockSession, ClockError> {
        let entry = task_entry(tasks, now)?;
        let mut sessions = self.sessions.write().await;

        if sessions.contains_key(&user_id) {
            return Err(ClockError::AlreadyClockedIn);
        }

        let session = ClockSession {
            user_id,
            clocked_in_at: now,
            tasks: vec![entry],
        };
        sessions.insert(user_id, session.clone());

        Ok(session)
    }

    /// Appends an entry to the task log of an open session.
    ///
    /// # Returns
    /// - `Ok(TaskLogEntry)` - The logged entry
    /// - `Err(ClockError::NotClockedIn)` - No open session
    /// - `Err(ClockError::EmptyTask)` - Description is blank
    pub async fn log_task(
        &self,
        user_id: u64,
        description: &str,
        now: DateTime<Utc>,
    ) -> Result<TaskLogEntry, ClockError> {
        let entry = task_entry(description, now)?;
        let mut sessions = self.sessions.write().await;

        let session = sessions
            .get_mut(&user_id)
            .ok_or(ClockError::NotClockedIn)?;
        session.tasks.push(entry.clone());

        Ok(entry)
    }

    /// Closes the open session.
    ///
    /// # Returns
    /// - `Ok(ClockSummary)` - Closed session with clock-out time
    /// - `Err(ClockError::NotClockedIn)` - No open session
    pub async fn clock_out(
        &self,
        user_id: u64,
        now: DateTime<Utc>,
    ) -> Result<ClockSummary, ClockError> {
        let session = self
            .sessions
            .write()
            .await
            .remove(&user_id)
            .ok_or(ClockError::NotClockedIn)?;

        Ok(ClockSummary {
            session,
            clocked_out_at: now,
        })
    }

    /// Open session of a staff member, if any.
    pub async fn session(&self, user_id: u64) -> Option<ClockSession> {
        self.sessions.read().await.get(&user_id).cloned()
    }
}

fn task_entry(description: &str, now: DateTime<Utc>) -> Result<TaskLogEntry, ClockError> {
    let description = description.trim();
    if description.is_empty() {
        return Err(ClockError::EmptyTask);
    }

    Ok(TaskLogEntry {
        logged_at: now,
        description: description.to_string(),
    })
}
