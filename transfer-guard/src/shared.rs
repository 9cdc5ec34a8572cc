//! Lock-guarded account handle
//!
//! [`SharedAccount`] puts an [`Account`] behind one mutex so any number of
//! threads can transfer against it. The lock is held across the whole
//! check-then-apply step, including recording the receipt, and released
//! before anything is logged.

use crate::account::Account;
use crate::error::TransferError;
use crate::history::TransferHistory;
use crate::types::{AccountSnapshot, TransferReceipt};
use parking_lot::Mutex;
use rust_decimal::Decimal;
use std::sync::Arc;

#[derive(Debug)]
struct Guarded {
    account: Account,
    history: TransferHistory,
}

/// Clonable, thread-safe handle to one account
#[derive(Debug, Clone)]
pub struct SharedAccount {
    inner: Arc<Mutex<Guarded>>,
}

impl SharedAccount {
    /// Wrap an account, keeping the default number of receipts
    pub fn new(account: Account) -> Self {
        Self::with_history(account, TransferHistory::default())
    }

    /// Wrap an account, keeping at most `capacity` receipts
    pub fn with_history_capacity(account: Account, capacity: usize) -> Self {
        Self::with_history(account, TransferHistory::new(capacity))
    }

    fn with_history(account: Account, history: TransferHistory) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Guarded { account, history })),
        }
    }

    /// Apply a transfer atomically
    pub fn transfer(&self, amount: Decimal) -> Result<TransferReceipt, TransferError> {
        let outcome = {
            let mut guarded = self.inner.lock();
            let Guarded { account, history } = &mut *guarded;
            let outcome = account
                .transfer(amount)
                .map(|()| TransferReceipt::issue(amount, account.snapshot()));
            if let Ok(receipt) = &outcome {
                history.record(receipt.clone());
            }
            outcome
        };

        if let Err(err) = &outcome {
            tracing::debug!(kind = err.kind(), %amount, "transfer rejected");
        }
        outcome
    }

    /// Run the guards without applying
    pub fn check(&self, amount: Decimal) -> Result<(), TransferError> {
        self.inner.lock().account.check(amount)
    }

    /// Clear the daily total, returning what it was
    pub fn reset_daily_total(&self) -> Decimal {
        let cleared = self.inner.lock().account.reset_daily_total();
        tracing::info!(%cleared, "daily transfer total reset");
        cleared
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> AccountSnapshot {
        self.inner.lock().account.snapshot()
    }

    /// Most recent accepted transfers, oldest first
    pub fn recent_transfers(&self) -> Vec<TransferReceipt> {
        self.inner.lock().history.recent()
    }
}

impl From<Account> for SharedAccount {
    fn from(account: Account) -> Self {
        Self::new(account)
    }
}
