//! Metrics collection for observability
//!
//! This module provides Prometheus metrics for the account actor.
//!
//! # Metrics
//!
//! - `transfer_guard_transfers_total{outcome}` - Transfers by outcome
//!   (`ok` or the rejection kind)
//! - `transfer_guard_transferred_amount_total` - Sum of accepted amounts
//! - `transfer_guard_daily_resets_total` - Daily total resets

use crate::error::TransferError;
use crate::Result;
use prometheus::core::Collector;
use prometheus::{Counter, Encoder, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::sync::Arc;

/// Metrics collector
#[derive(Clone)]
pub struct Metrics {
    /// Transfers by outcome
    pub transfers_total: IntCounterVec,

    /// Sum of accepted amounts
    pub transferred_amount: Counter,

    /// Daily total resets
    pub daily_resets_total: IntCounter,

    /// Prometheus registry
    pub registry: Arc<Registry>,
}

impl Metrics {
    /// Create new metrics collector with its own registry
    pub fn new() -> Result<Self> {
        let registry = Arc::new(Registry::new());

        let transfers_total = register(
            &registry,
            IntCounterVec::new(
                Opts::new("transfer_guard_transfers_total", "Transfers by outcome"),
                &["outcome"],
            )?,
        )?;

        let transferred_amount = register(
            &registry,
            Counter::new(
                "transfer_guard_transferred_amount_total",
                "Sum of accepted transfer amounts",
            )?,
        )?;

        let daily_resets_total = register(
            &registry,
            IntCounter::new(
                "transfer_guard_daily_resets_total",
                "Number of daily total resets",
            )?,
        )?;

        Ok(Self {
            transfers_total,
            transferred_amount,
            daily_resets_total,
            registry,
        })
    }

    /// Record an accepted transfer
    pub fn record_accepted(&self, amount: Decimal) {
        self.transfers_total.with_label_values(&["ok"]).inc();
        // Counters only go up; non-positive amounts are counted but not summed.
        if let Some(value) = amount.to_f64().filter(|v| *v > 0.0) {
            self.transferred_amount.inc_by(value);
        }
    }

    /// Record a rejected transfer
    pub fn record_rejected(&self, err: &TransferError) {
        self.transfers_total.with_label_values(&[err.kind()]).inc();
    }

    /// Record a daily reset
    pub fn record_daily_reset(&self) {
        self.daily_resets_total.inc();
    }

    /// Count for one outcome label
    pub fn outcome_count(&self, outcome: &str) -> u64 {
        self.transfers_total.with_label_values(&[outcome]).get()
    }

    /// Render the registry in the text exposition format
    pub fn encode(&self) -> Result<String> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }

    /// Get metrics registry
    pub fn registry(&self) -> &Registry {
        &self.registry
    }
}

fn register<C>(registry: &Registry, collector: C) -> Result<C>
where
    C: Collector + Clone + 'static,
{
    registry.register(Box::new(collector.clone()))?;
    Ok(collector)
}
