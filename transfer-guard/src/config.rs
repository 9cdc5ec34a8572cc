//! Configuration for the transfer guard

use crate::history::DEFAULT_HISTORY_CAPACITY;
use crate::limits::TransferLimits;
use crate::{Error, Result};
use chrono::FixedOffset;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

/// Environment variable naming a TOML config file
pub const CONFIG_PATH_ENV: &str = "TRANSFER_CONFIG";

/// Transfer guard configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Service name
    pub service_name: String,

    /// Limits applied to newly opened accounts
    pub limits: TransferLimits,

    /// Account actor mailbox capacity
    pub mailbox_capacity: usize,

    /// Accepted transfers kept per account; 0 keeps none
    pub history_capacity: usize,

    /// Daily rollover configuration
    pub rollover: RolloverConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service_name: "transfer-guard".to_string(),
            limits: TransferLimits::default(),
            mailbox_capacity: 1000,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            rollover: RolloverConfig::default(),
        }
    }
}

/// Daily rollover configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RolloverConfig {
    /// Reset daily totals at each local midnight
    pub enabled: bool,

    /// Offset of the accounting day from UTC, in minutes
    pub utc_offset_minutes: i32,
}

impl Default for RolloverConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            utc_offset_minutes: 0,
        }
    }
}

impl RolloverConfig {
    /// Accounting day offset
    pub fn offset(&self) -> Result<FixedOffset> {
        self.utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .filter(|_| self.utc_offset_minutes.abs() <= 14 * 60)
            .ok_or_else(|| {
                Error::InvalidConfig(format!(
                    "utc offset {} minutes is out of range",
                    self.utc_offset_minutes
                ))
            })
    }
}

impl Config {
    /// Load from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::InvalidConfig(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from the file named by `TRANSFER_CONFIG`, or from the environment
    pub fn load() -> Result<Self> {
        match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => Self::from_file(path),
            Err(_) => Self::from_env(),
        }
    }

    /// Overlay variables from `lookup` on the defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Config::default();

        if let Some(value) = lookup("TRANSFER_TRANSACTION_LIMIT") {
            config.limits.transaction_limit = parse_var("TRANSFER_TRANSACTION_LIMIT", &value)?;
        }

        if let Some(value) = lookup("TRANSFER_DAILY_LIMIT") {
            config.limits.daily_limit = parse_var("TRANSFER_DAILY_LIMIT", &value)?;
        }

        if let Some(value) = lookup("TRANSFER_MAILBOX_CAPACITY") {
            config.mailbox_capacity = parse_var("TRANSFER_MAILBOX_CAPACITY", &value)?;
        }

        if let Some(value) = lookup("TRANSFER_HISTORY_CAPACITY") {
            config.history_capacity = parse_var("TRANSFER_HISTORY_CAPACITY", &value)?;
        }

        if let Some(value) = lookup("TRANSFER_ROLLOVER_ENABLED") {
            config.rollover.enabled = parse_var("TRANSFER_ROLLOVER_ENABLED", &value)?;
        }

        if let Some(value) = lookup("TRANSFER_ROLLOVER_UTC_OFFSET_MINUTES") {
            config.rollover.utc_offset_minutes =
                parse_var("TRANSFER_ROLLOVER_UTC_OFFSET_MINUTES", &value)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Check limits, mailbox capacity and rollover offset
    pub fn validate(&self) -> Result<()> {
        self.limits.validate()?;
        if self.mailbox_capacity == 0 {
            return Err(Error::InvalidConfig(
                "mailbox capacity must be at least 1".to_string(),
            ));
        }
        self.rollover.offset()?;
        Ok(())
    }
}

fn parse_var<T: FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::InvalidConfig(format!("{} has invalid value {:?}", key, value)))
}
