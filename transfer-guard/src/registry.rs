//! Registry of independently guarded accounts

use crate::account::Account;
use crate::history::DEFAULT_HISTORY_CAPACITY;
use crate::limits::TransferLimits;
use crate::shared::SharedAccount;
use crate::types::{AccountId, AccountSnapshot, TransferReceipt};
use crate::{Error, Result};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use rust_decimal::Decimal;
use std::sync::Arc;

/// Accounts keyed by id, each behind its own lock.
///
/// There is no ordering across accounts; a transfer only ever touches the
/// account it names.
#[derive(Debug, Clone)]
pub struct AccountRegistry {
    // Map: account_id -> SharedAccount
    accounts: Arc<DashMap<AccountId, SharedAccount>>,

    // Receipts kept per opened account
    history_capacity: usize,
}

impl Default for AccountRegistry {
    fn default() -> Self {
        Self::with_history_capacity(DEFAULT_HISTORY_CAPACITY)
    }
}

impl AccountRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry whose accounts keep `capacity` receipts
    pub fn with_history_capacity(capacity: usize) -> Self {
        Self {
            accounts: Arc::new(DashMap::new()),
            history_capacity: capacity,
        }
    }

    /// Open an account under `id`
    pub fn open(
        &self,
        id: AccountId,
        opening_balance: Decimal,
        limits: TransferLimits,
    ) -> Result<SharedAccount> {
        match self.accounts.entry(id) {
            Entry::Occupied(entry) => Err(Error::AccountExists(entry.key().to_string())),
            Entry::Vacant(entry) => {
                let account = SharedAccount::with_history_capacity(
                    Account::with_limits(opening_balance, limits)?,
                    self.history_capacity,
                );
                tracing::info!(account = %entry.key(), %opening_balance, "account opened");
                entry.insert(account.clone());
                Ok(account)
            }
        }
    }

    /// Look up an account handle
    pub fn get(&self, id: &AccountId) -> Option<SharedAccount> {
        self.accounts.get(id).map(|entry| entry.value().clone())
    }

    /// Transfer out of the account named `id`
    pub fn transfer(&self, id: &AccountId, amount: Decimal) -> Result<TransferReceipt> {
        let account = self
            .get(id)
            .ok_or_else(|| Error::AccountNotFound(id.to_string()))?;

        account.transfer(amount).map_err(|err| {
            tracing::warn!(account = %id, kind = err.kind(), %amount, "transfer rejected");
            Error::from(err)
        })
    }

    /// Most recent accepted transfers of the account named `id`
    pub fn recent_transfers(&self, id: &AccountId) -> Result<Vec<TransferReceipt>> {
        self.get(id)
            .map(|account| account.recent_transfers())
            .ok_or_else(|| Error::AccountNotFound(id.to_string()))
    }

    /// Clear the daily total of every account; returns how many were reset
    pub fn reset_all_daily(&self) -> usize {
        let accounts: Vec<SharedAccount> = self
            .accounts
            .iter()
            .map(|entry| entry.value().clone())
            .collect();

        for account in &accounts {
            account.reset_daily_total();
        }
        tracing::info!(count = accounts.len(), "daily totals reset");
        accounts.len()
    }

    /// State of every account
    pub fn snapshots(&self) -> Vec<(AccountId, AccountSnapshot)> {
        self.accounts
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().snapshot()))
            .collect()
    }

    /// Number of registered accounts
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Whether no account is registered
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}
