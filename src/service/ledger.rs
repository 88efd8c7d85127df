//! Shared budget ledger.
//!
//! This module provides the `BudgetLedger`, an in-memory balance sheet shared by the
//! whole staff team. It tracks two currencies and is lost on restart.

use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{
    error::ledger::LedgerError,
    model::ledger::{Balances, Currency, LedgerChange},
};

/// Service for reading and adjusting the shared budget.
///
/// Clones share the same balances.
#[derive(Clone, Default)]
pub struct BudgetLedger {
    balances: Arc<RwLock<Balances>>,
}

impl BudgetLedger {
    /// Creates a ledger with both balances at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current balances.
    pub async fn balances(&self) -> Balances {
        *self.balances.read().await
    }

    /// Adds funds to a currency.
    ///
    /// # Arguments
    /// - `currency` - Currency to credit
    /// - `amount` - Amount to add, must be positive
    ///
    /// # Returns
    /// - `Ok(LedgerChange)` - Applied amount and new balance
    /// - `Err(LedgerError::InvalidAmount)` - Amount is zero or negative
    pub async fn add(&self, currency: Currency, amount: i64) -> Result<LedgerChange, LedgerError> {
        let amount = positive_amount(amount)?;
        let mut balances = self.balances.write().await;

        let balance = balances.get_mut(currency);
        *balance = balance.saturating_add(amount);

        Ok(LedgerChange {
            currency,
            applied: amount,
            balance: *balance,
        })
    }

    /// Removes funds from a currency.
    ///
    /// Removing more than the balance empties it instead of failing; the returned
    /// change reports how much was actually removed.
    ///
    /// # Arguments
    /// - `currency` - Currency to debit
    /// - `amount` - Amount to remove, must be positive
    ///
    /// # Returns
    /// - `Ok(LedgerChange)` - Applied amount (possibly clamped) and new balance
    /// - `Err(LedgerError::InvalidAmount)` - Amount is zero or negative
    pub async fn remove(
        &self,
        currency: Currency,
        amount: i64,
    ) -> Result<LedgerChange, LedgerError> {
        let amount = positive_amount(amount)?;
        let mut balances = self.balances.write().await;

        let balance = balances.get_mut(currency);
        let applied = amount.min(*balance);
        *balance -= applied;

        Ok(LedgerChange {
            currency,
            applied,
            balance: *balance,
        })
    }
}

fn positive_amount(amount: i64) -> Result<u64, LedgerError> {
    u64::try_from(amount)
        .ok()
        .filter(|amount| *amount > 0)
        .ok_or(LedgerError::InvalidAmount(amount))
}
