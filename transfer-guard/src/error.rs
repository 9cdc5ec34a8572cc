//! Error types for the transfer guard

use rust_decimal::Decimal;
use thiserror::Error;

/// Result type for transfer guard operations
pub type Result<T> = std::result::Result<T, Error>;

/// Rejection reasons of a single transfer.
///
/// Guards are evaluated in declaration order; the first failing one is
/// reported. None of these leave the account partially updated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransferError {
    /// Amount is above the single transfer ceiling
    #[error("Transfer of {amount} exceeds per-transaction limit of {limit}")]
    TransactionLimitExceeded {
        /// Requested amount
        amount: Decimal,
        /// Per-transaction limit in force
        limit: Decimal,
    },

    /// Amount would push the day's cumulative total over the ceiling
    #[error("Transfer of {amount} exceeds daily transfer limit of {limit} ({transferred} already transferred)")]
    DailyLimitExceeded {
        /// Requested amount
        amount: Decimal,
        /// Amount already transferred in the current day
        transferred: Decimal,
        /// Daily limit in force
        limit: Decimal,
    },

    /// Amount is above the available balance
    #[error("Insufficient funds: requested {amount}, available {balance}")]
    InsufficientFunds {
        /// Requested amount
        amount: Decimal,
        /// Balance at the time of the request
        balance: Decimal,
    },
}

impl TransferError {
    /// Stable label for this rejection, used for metrics and logs
    pub fn kind(&self) -> &'static str {
        match self {
            TransferError::TransactionLimitExceeded { .. } => "transaction_limit",
            TransferError::DailyLimitExceeded { .. } => "daily_limit",
            TransferError::InsufficientFunds { .. } => "insufficient_funds",
        }
    }

    /// Requested amount that was rejected
    pub fn amount(&self) -> Decimal {
        match self {
            TransferError::TransactionLimitExceeded { amount, .. }
            | TransferError::DailyLimitExceeded { amount, .. }
            | TransferError::InsufficientFunds { amount, .. } => *amount,
        }
    }
}

/// Transfer guard errors
#[derive(Error, Debug)]
pub enum Error {
    /// Transfer rejected by one of the guards
    #[error(transparent)]
    Transfer(#[from] TransferError),

    /// Opening balance below zero
    #[error("Invalid balance: {0} (must be non-negative)")]
    InvalidBalance(Decimal),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// No account registered under this id
    #[error("Account not found: {0}")]
    AccountNotFound(String),

    /// Account id already registered
    #[error("Account already exists: {0}")]
    AccountExists(String),

    /// Concurrency error (actor mailbox closed, etc.)
    #[error("Concurrency error: {0}")]
    Concurrency(String),

    /// Metrics registry error
    #[error("Metrics error: {0}")]
    Metrics(#[from] prometheus::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// The guard rejection, if this error is one
    pub fn as_transfer(&self) -> Option<&TransferError> {
        match self {
            Error::Transfer(err) => Some(err),
            _ => None,
        }
    }
}
