use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClockError {
    /// User tried to clock in while a session is still open.
    #[error("You are already clocked in, clock out first")]
    AlreadyClockedIn,

    /// User tried to clock out or log a task without an open session.
    #[error("You are not clocked in")]
    NotClockedIn,

    /// Task log entries must contain text.
    #[error("Task description cannot be empty")]
    EmptyTask,
}
