//! Bounded in-memory record of accepted transfers
//!
//! Only accepted transfers are recorded. Once `capacity` receipts are held,
//! each new one evicts the oldest. A capacity of zero keeps nothing.

use crate::types::TransferReceipt;
use std::collections::VecDeque;

/// Default number of receipts kept per account
pub const DEFAULT_HISTORY_CAPACITY: usize = 20;

/// Most recent accepted transfers, oldest first
#[derive(Debug, Clone)]
pub struct TransferHistory {
    entries: VecDeque<TransferReceipt>,
    capacity: usize,
}

impl TransferHistory {
    /// Empty history holding at most `capacity` receipts
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a receipt, evicting the oldest when full
    pub fn record(&mut self, receipt: TransferReceipt) {
        if self.capacity == 0 {
            return;
        }
        while self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(receipt);
    }

    /// Copy of the held receipts, oldest first
    pub fn recent(&self) -> Vec<TransferReceipt> {
        self.entries.iter().cloned().collect()
    }

    /// Maximum number of receipts held
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of receipts held
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for TransferHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::limits::TransferLimits;
    use crate::types::AccountSnapshot;
    use rust_decimal::Decimal;

    fn receipt(amount: i64) -> TransferReceipt {
        TransferReceipt::issue(
            Decimal::from(amount),
            AccountSnapshot {
                balance: Decimal::ZERO,
                daily_transferred: Decimal::from(amount),
                limits: TransferLimits::default(),
            },
        )
    }

    fn amounts(history: &TransferHistory) -> Vec<Decimal> {
        history.recent().iter().map(|r| r.amount).collect()
    }

    #[test]
    fn test_default_capacity() {
        let history = TransferHistory::default();
        assert_eq!(history.capacity(), 20);
        assert!(history.is_empty());
    }

    #[test]
    fn test_oldest_evicted_first() {
        let mut history = TransferHistory::new(3);
        for amount in 1..=5 {
            history.record(receipt(amount));
        }

        assert_eq!(history.len(), 3);
        assert_eq!(
            amounts(&history),
            vec![Decimal::from(3), Decimal::from(4), Decimal::from(5)]
        );
    }

    #[test]
    fn test_zero_capacity_keeps_nothing() {
        let mut history = TransferHistory::new(0);
        history.record(receipt(1));
        assert!(history.is_empty());
        assert!(history.recent().is_empty());
    }
}
