//! Domain models for staff clock-in sessions.

use chrono::{DateTime, Duration, Utc};

/// A timestamped entry of the task log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskLogEntry {
    /// When the entry was logged.
    pub logged_at: DateTime<Utc>,
    /// What the staff member is working on.
    pub description: String,
}

/// An open clock-in session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockSession {
    /// Discord ID of the staff member.
    pub user_id: u64,
    /// When the session started.
    pub clocked_in_at: DateTime<Utc>,
    /// Task log, oldest first.
    pub tasks: Vec<TaskLogEntry>,
}

/// A closed clock-in session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockSummary {
    pub session: ClockSession,
    pub clocked_out_at: DateTime<Utc>,
}

impl ClockSummary {
    /// Time between clocking in and out.
    pub fn worked(&self) -> Duration {
        self.clocked_out_at - self.session.clocked_in_at
    }
}
