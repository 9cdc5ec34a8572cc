//! Bounded transfer account
//!
//! An [`Account`] holds a balance and the amount transferred in the current
//! accounting day. The only mutation is [`Account::transfer`], which runs
//! three guards in a fixed order before touching either field:
//!
//! 1. per-transaction limit
//! 2. daily limit (`daily_transferred + amount`)
//! 3. available balance
//!
//! The first failing guard is reported and the account is left as it was.
//!
//! # Invariants
//!
//! - `balance >= 0`
//! - `daily_transferred <= daily_limit` after every accepted transfer
//! - both fields change together or not at all
//!
//! The daily total is never cleared by `transfer`. Clearing it is an explicit
//! call to [`Account::reset_daily_total`], usually driven by
//! [`crate::rollover`].

use crate::error::TransferError;
use crate::limits::TransferLimits;
use crate::types::AccountSnapshot;
use crate::{Error, Result};
use rust_decimal::Decimal;

/// Single account guarded by a [`TransferLimits`] policy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    balance: Decimal,
    daily_transferred: Decimal,
    limits: TransferLimits,
}

impl Account {
    /// Open an account with the default limits
    pub fn new(opening_balance: Decimal) -> Result<Self> {
        Self::with_limits(opening_balance, TransferLimits::default())
    }

    /// Open an account with its own limit policy
    pub fn with_limits(opening_balance: Decimal, limits: TransferLimits) -> Result<Self> {
        if opening_balance < Decimal::ZERO {
            return Err(Error::InvalidBalance(opening_balance));
        }
        limits.validate()?;

        Ok(Self {
            balance: opening_balance,
            daily_transferred: Decimal::ZERO,
            limits,
        })
    }

    /// Available balance
    pub fn balance(&self) -> Decimal {
        self.balance
    }

    /// Amount transferred since the last daily reset
    pub fn daily_transferred(&self) -> Decimal {
        self.daily_transferred
    }

    /// Limit policy
    pub fn limits(&self) -> &TransferLimits {
        &self.limits
    }

    /// Room left under the daily limit
    pub fn remaining_daily_allowance(&self) -> Decimal {
        self.limits.remaining_daily(self.daily_transferred)
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> AccountSnapshot {
        AccountSnapshot {
            balance: self.balance,
            daily_transferred: self.daily_transferred,
            limits: self.limits,
        }
    }

    /// Run the guards for `amount` without applying anything
    pub fn check(&self, amount: Decimal) -> std::result::Result<(), TransferError> {
        self.evaluate(amount).map(|_| ())
    }

    /// Move `amount` out of the account.
    ///
    /// Amount positivity is the caller's concern; a non-positive amount passes
    /// the guards and is applied as given.
    pub fn transfer(&mut self, amount: Decimal) -> std::result::Result<(), TransferError> {
        let (balance, daily_transferred) = self.evaluate(amount)?;
        self.balance = balance;
        self.daily_transferred = daily_transferred;
        Ok(())
    }

    /// Clear the daily total, returning what it was.
    pub fn reset_daily_total(&mut self) -> Decimal {
        std::mem::replace(&mut self.daily_transferred, Decimal::ZERO)
    }

    /// Guards in order, yielding the next (balance, daily_transferred)
    fn evaluate(&self, amount: Decimal) -> std::result::Result<(Decimal, Decimal), TransferError> {
        self.limits.check_transaction(amount)?;
        self.limits.check_daily(amount, self.daily_transferred)?;

        if amount > self.balance {
            return Err(TransferError::InsufficientFunds {
                amount,
                balance: self.balance,
            });
        }

        // check_daily already proved the sum fits; saturation only matters
        // for negative amounts.
        Ok((
            self.balance.saturating_sub(amount),
            self.daily_transferred.saturating_add(amount),
        ))
    }
}
