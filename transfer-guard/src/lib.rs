//! Transfer Guard
//!
//! Bounded transfer ledger for a single account: every outgoing transfer is
//! checked against a per-transaction limit, a cumulative daily limit and the
//! available balance, in that order, and applied atomically.
//!
//! # Layers
//!
//! - [`Account`]: single-owner state plus the guarded `transfer`
//! - [`SharedAccount`]: the same account behind a mutex
//! - [`actor`]: the same account owned by one Tokio task
//! - [`AccountRegistry`]: many accounts, each with its own limits
//! - [`history`]: bounded record of recent accepted transfers
//! - [`rollover`]: explicit daily reset of the transferred total

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod account;
pub mod actor;
pub mod config;
pub mod error;
pub mod history;
pub mod limits;
pub mod metrics;
pub mod registry;
pub mod rollover;
pub mod shared;
pub mod types;

// Re-exports
pub use account::Account;
pub use actor::{spawn_account_actor, AccountHandle};
pub use config::{Config, RolloverConfig};
pub use error::{Error, Result, TransferError};
pub use history::TransferHistory;
pub use limits::TransferLimits;
pub use metrics::Metrics;
pub use registry::AccountRegistry;
pub use shared::SharedAccount;
pub use types::{AccountId, AccountSnapshot, TransferReceipt};
