use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// Budget amounts must be strictly positive.
    #[error("Amount must be greater than zero, got {0}")]
    InvalidAmount(i64),

    /// Currency option did not match a tracked currency.
    #[error("Unknown currency '{0}'")]
    UnknownCurrency(String),
}
