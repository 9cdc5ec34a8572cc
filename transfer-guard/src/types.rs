//! Core types for the transfer guard
//!
//! Money is always `Decimal`, never floating point.

use crate::limits::TransferLimits;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Account identifier (IBAN, account number, etc.)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountId(String);

impl AccountId {
    /// Create new account ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get as string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for AccountId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Point-in-time copy of an account's state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountSnapshot {
    /// Available balance
    pub balance: Decimal,

    /// Amount transferred in the current accounting day
    pub daily_transferred: Decimal,

    /// Limits in force
    pub limits: TransferLimits,
}

impl AccountSnapshot {
    /// Room left under the daily limit
    pub fn remaining_daily_allowance(&self) -> Decimal {
        self.limits.remaining_daily(self.daily_transferred)
    }
}

/// Record of an accepted transfer, issued by the shared handles
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferReceipt {
    /// Transfer identifier (time-ordered)
    pub transfer_id: Uuid,

    /// Amount moved
    pub amount: Decimal,

    /// Account state right after the transfer
    pub after: AccountSnapshot,

    /// When the transfer was applied
    pub applied_at: DateTime<Utc>,
}

impl TransferReceipt {
    /// Build a receipt for a transfer that was just applied
    pub fn issue(amount: Decimal, after: AccountSnapshot) -> Self {
        Self {
            transfer_id: Uuid::now_v7(),
            amount,
            after,
            applied_at: Utc::now(),
        }
    }
}
