//! Actor-based concurrency for one account
//!
//! This module implements the single-owner pattern using Tokio actors:
//! - One task owns the [`Account`]; no locks are taken
//! - Requests are serialized through a bounded mailbox (backpressure)
//! - Each request carries a oneshot channel for its reply
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │            AccountHandle (Clone)             │
//! │      Sends messages to actor mailbox         │
//! └─────────────────────┬────────────────────────┘
//!                       │ mpsc::channel (bounded)
//!                       ▼
//! ┌──────────────────────────────────────────────┐
//! │            AccountActor (Single Task)        │
//! │   Account::transfer / reset_daily_total      │
//! │   TransferHistory (accepted receipts)        │
//! └──────────────────────────────────────────────┘
//! ```

use crate::account::Account;
use crate::error::TransferError;
use crate::history::TransferHistory;
use crate::metrics::Metrics;
use crate::types::{AccountSnapshot, TransferReceipt};
use crate::{Error, Result};
use rust_decimal::Decimal;
use tokio::sync::{mpsc, oneshot};

/// Message sent to the account actor
#[derive(Debug)]
pub enum AccountMessage {
    /// Apply a transfer
    Transfer {
        /// Amount to move out
        amount: Decimal,
        /// Reply channel
        response: oneshot::Sender<std::result::Result<TransferReceipt, TransferError>>,
    },

    /// Read the current state
    Snapshot {
        /// Reply channel
        response: oneshot::Sender<AccountSnapshot>,
    },

    /// Read the most recent accepted transfers
    RecentTransfers {
        /// Reply channel
        response: oneshot::Sender<Vec<TransferReceipt>>,
    },

    /// Clear the daily total
    ResetDaily {
        /// Reply channel
        response: oneshot::Sender<Decimal>,
    },

    /// Shutdown actor
    Shutdown,
}

/// Actor that owns one account
pub struct AccountActor {
    /// Owned account state
    account: Account,

    /// Mailbox for incoming messages
    mailbox: mpsc::Receiver<AccountMessage>,

    /// Accepted transfers, oldest first
    history: TransferHistory,

    /// Optional metrics sink
    metrics: Option<Metrics>,
}

impl AccountActor {
    /// Create new actor
    pub fn new(
        account: Account,
        mailbox: mpsc::Receiver<AccountMessage>,
        history: TransferHistory,
        metrics: Option<Metrics>,
    ) -> Self {
        Self {
            account,
            mailbox,
            history,
            metrics,
        }
    }

    /// Run the actor event loop until shutdown or all handles are dropped
    pub async fn run(mut self) {
        while let Some(msg) = self.mailbox.recv().await {
            match msg {
                AccountMessage::Shutdown => break,
                msg => self.handle_message(msg),
            }
        }
        tracing::debug!("account actor stopped");
    }

    /// Handle a single message
    fn handle_message(&mut self, msg: AccountMessage) {
        match msg {
            AccountMessage::Transfer { amount, response } => {
                let result = self.apply_transfer(amount);
                if response.send(result).is_err() {
                    tracing::warn!(%amount, "transfer caller went away before the reply");
                }
            }

            AccountMessage::Snapshot { response } => {
                let _ = response.send(self.account.snapshot());
            }

            AccountMessage::RecentTransfers { response } => {
                let _ = response.send(self.history.recent());
            }

            AccountMessage::ResetDaily { response } => {
                let cleared = self.account.reset_daily_total();
                if let Some(metrics) = &self.metrics {
                    metrics.record_daily_reset();
                }
                tracing::info!(%cleared, "daily transfer total reset");
                let _ = response.send(cleared);
            }

            AccountMessage::Shutdown => {
                // Handled in main loop
            }
        }
    }

    fn apply_transfer(
        &mut self,
        amount: Decimal,
    ) -> std::result::Result<TransferReceipt, TransferError> {
        match self.account.transfer(amount) {
            Ok(()) => {
                if let Some(metrics) = &self.metrics {
                    metrics.record_accepted(amount);
                }
                let receipt = TransferReceipt::issue(amount, self.account.snapshot());
                self.history.record(receipt.clone());
                Ok(receipt)
            }
            Err(err) => {
                if let Some(metrics) = &self.metrics {
                    metrics.record_rejected(&err);
                }
                tracing::debug!(kind = err.kind(), %amount, "transfer rejected");
                Err(err)
            }
        }
    }
}

/// Handle for sending messages to the actor
#[derive(Debug, Clone)]
pub struct AccountHandle {
    sender: mpsc::Sender<AccountMessage>,
}

impl AccountHandle {
    /// Create new handle
    pub fn new(sender: mpsc::Sender<AccountMessage>) -> Self {
        Self { sender }
    }

    /// Apply a transfer
    pub async fn transfer(&self, amount: Decimal) -> Result<TransferReceipt> {
        let (tx, rx) = oneshot::channel();
        self.send(AccountMessage::Transfer {
            amount,
            response: tx,
        })
        .await?;

        let outcome = rx
            .await
            .map_err(|_| Error::Concurrency("Response channel closed".to_string()))?;
        Ok(outcome?)
    }

    /// Read the current state
    pub async fn snapshot(&self) -> Result<AccountSnapshot> {
        let (tx, rx) = oneshot::channel();
        self.send(AccountMessage::Snapshot { response: tx }).await?;

        rx.await
            .map_err(|_| Error::Concurrency("Response channel closed".to_string()))
    }

    /// Most recent accepted transfers, oldest first
    pub async fn recent_transfers(&self) -> Result<Vec<TransferReceipt>> {
        let (tx, rx) = oneshot::channel();
        self.send(AccountMessage::RecentTransfers { response: tx })
            .await?;

        rx.await
            .map_err(|_| Error::Concurrency("Response channel closed".to_string()))
    }

    /// Clear the daily total, returning what it was
    pub async fn reset_daily_total(&self) -> Result<Decimal> {
        let (tx, rx) = oneshot::channel();
        self.send(AccountMessage::ResetDaily { response: tx }).await?;

        rx.await
            .map_err(|_| Error::Concurrency("Response channel closed".to_string()))
    }

    /// Shutdown actor
    pub async fn shutdown(&self) -> Result<()> {
        self.send(AccountMessage::Shutdown).await
    }

    /// Whether the actor has stopped
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }

    async fn send(&self, msg: AccountMessage) -> Result<()> {
        self.sender
            .send(msg)
            .await
            .map_err(|_| Error::Concurrency("Actor mailbox closed".to_string()))
    }
}

/// Spawn the account actor, keeping at most `history_capacity` receipts
pub fn spawn_account_actor(
    account: Account,
    mailbox_capacity: usize,
    history_capacity: usize,
    metrics: Option<Metrics>,
) -> AccountHandle {
    let (tx, rx) = mpsc::channel(mailbox_capacity.max(1)); // Bounded channel for backpressure
    let actor = AccountActor::new(account, rx, TransferHistory::new(history_capacity), metrics);

    tokio::spawn(async move {
        actor.run().await;
    });

    AccountHandle::new(tx)
}
