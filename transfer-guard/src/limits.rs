//! Transfer limit policy

use crate::error::TransferError;
use crate::{Error, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Limit configuration for one account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransferLimits {
    /// Single transaction limit
    pub transaction_limit: Decimal,

    /// Cumulative limit per accounting day
    pub daily_limit: Decimal,
}

impl Default for TransferLimits {
    fn default() -> Self {
        Self {
            transaction_limit: Decimal::from(10_000),
            daily_limit: Decimal::from(25_000),
        }
    }
}

impl TransferLimits {
    /// Create a limit policy
    pub fn new(transaction_limit: Decimal, daily_limit: Decimal) -> Result<Self> {
        let limits = Self {
            transaction_limit,
            daily_limit,
        };
        limits.validate()?;
        Ok(limits)
    }

    /// Reject negative limits
    pub fn validate(&self) -> Result<()> {
        if self.transaction_limit < Decimal::ZERO {
            return Err(Error::InvalidConfig(format!(
                "transaction limit {} is negative",
                self.transaction_limit
            )));
        }
        if self.daily_limit < Decimal::ZERO {
            return Err(Error::InvalidConfig(format!(
                "daily limit {} is negative",
                self.daily_limit
            )));
        }
        Ok(())
    }

    /// Check single transaction limit
    pub fn check_transaction(&self, amount: Decimal) -> std::result::Result<(), TransferError> {
        if amount > self.transaction_limit {
            return Err(TransferError::TransactionLimitExceeded {
                amount,
                limit: self.transaction_limit,
            });
        }
        Ok(())
    }

    /// Check daily limit against what was already transferred today.
    ///
    /// An overflowing sum is treated as over the limit.
    pub fn check_daily(
        &self,
        amount: Decimal,
        transferred: Decimal,
    ) -> std::result::Result<(), TransferError> {
        let exceeded = match transferred.checked_add(amount) {
            Some(total) => total > self.daily_limit,
            None => true,
        };
        if exceeded {
            return Err(TransferError::DailyLimitExceeded {
                amount,
                transferred,
                limit: self.daily_limit,
            });
        }
        Ok(())
    }

    /// Room left under the daily limit, floored at zero
    pub fn remaining_daily(&self, transferred: Decimal) -> Decimal {
        self.daily_limit
            .checked_sub(transferred)
            .unwrap_or(Decimal::MAX)
            .max(Decimal::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_transaction_limit() {
        let limits = TransferLimits::default();

        assert!(limits.check_transaction(Decimal::from(10_000)).is_ok());
        assert!(matches!(
            limits.check_transaction(Decimal::from(10_001)),
            Err(TransferError::TransactionLimitExceeded { .. })
        ));
    }

    #[test]
    fn test_daily_limit_is_inclusive() {
        let limits = TransferLimits::default();

        assert!(limits
            .check_daily(Decimal::from(5_000), Decimal::from(20_000))
            .is_ok());
        assert!(matches!(
            limits.check_daily(Decimal::from(5_001), Decimal::from(20_000)),
            Err(TransferError::DailyLimitExceeded { .. })
        ));
    }

    #[test]
    fn test_daily_overflow_counts_as_exceeded() {
        let limits = TransferLimits::new(Decimal::MAX, Decimal::MAX).unwrap();
        assert!(limits.check_daily(Decimal::MAX, Decimal::MAX).is_err());
    }

    #[test]
    fn test_negative_limits_rejected() {
        assert!(TransferLimits::new(Decimal::from(-1), Decimal::from(10)).is_err());
        assert!(TransferLimits::new(Decimal::from(10), Decimal::from(-1)).is_err());
        assert!(TransferLimits::new(Decimal::ZERO, Decimal::ZERO).is_ok());
    }

    #[test]
    fn test_remaining_daily_floors_at_zero() {
        let limits = TransferLimits::default();
        assert_eq!(limits.remaining_daily(Decimal::from(5_000)), Decimal::from(20_000));
        assert_eq!(limits.remaining_daily(Decimal::from(30_000)), Decimal::ZERO);
    }
}
