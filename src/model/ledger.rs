//! Domain models for the shared budget ledger.

use std::fmt;

use crate::error::ledger::LedgerError;

/// Currencies tracked by the budget ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Currency {
    Usd,
    Robux,
}

impl Currency {
    /// All tracked currencies in display order.
    pub const ALL: [Currency; 2] = [Currency::Usd, Currency::Robux];

    /// Value used for the slash command choice.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Usd => "usd",
            Self::Robux => "robux",
        }
    }

    /// Formats an amount of this currency for display.
    pub fn format_amount(&self, amount: u64) -> String {
        match self {
            Self::Usd => format!("${}", amount),
            Self::Robux => format!("R$ {}", amount),
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Usd => write!(f, "USD"),
            Self::Robux => write!(f, "Robux"),
        }
    }
}

impl std::str::FromStr for Currency {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "usd" | "$" => Ok(Self::Usd),
            "robux" | "r$" => Ok(Self::Robux),
            _ => Err(LedgerError::UnknownCurrency(s.to_string())),
        }
    }
}

/// Snapshot of both balances.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Balances {
    pub usd: u64,
    pub robux: u64,
}

impl Balances {
    /// Balance held in the given currency.
    pub fn get(&self, currency: Currency) -> u64 {
        match currency {
            Currency::Usd => self.usd,
            Currency::Robux => self.robux,
        }
    }

    pub(crate) fn get_mut(&mut self, currency: Currency) -> &mut u64 {
        match currency {
            Currency::Usd => &mut self.usd,
            Currency::Robux => &mut self.robux,
        }
    }
}

/// Result of a ledger mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerChange {
    /// Currency that changed.
    pub currency: Currency,
    /// Amount actually applied; smaller than requested when a removal was clamped.
    pub applied: u64,
    /// Balance after the change.
    pub balance: u64,
}
