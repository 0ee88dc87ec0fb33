//! Configuration structures for the state-log explorer.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Main configuration for the explorer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Extraction configuration.
    pub extraction: ExtractionConfig,
    /// Display / formatting configuration.
    pub display: DisplayConfig,
}

impl Config {
    /// Reject settings the formatters cannot honour.
    pub fn validate(&self) -> Result<()> {
        if self.display.address_chars == 0 {
            return Err(Error::config("display.address_chars must be at least 1"));
        }
        if self.display.ether_decimals > 18 {
            return Err(Error::config("display.ether_decimals must be at most 18"));
        }
        if self.display.default_chain_id.trim().is_empty() {
            return Err(Error::config("display.default_chain_id must not be empty"));
        }
        Ok(())
    }
}

/// What an approval without a timestamp is stamped with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingTimestamp {
    /// Stamp with 0, sorting the approval as oldest. Deterministic.
    #[default]
    Zero,
    /// Stamp with the wall clock sampled once at extraction time.
    ExtractionTime,
}

/// Entity extraction configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Policy for approvals that carry no timestamp.
    pub missing_timestamp: MissingTimestamp,
    /// Whether visited dapp hostnames contribute to the origin index.
    pub visited_hostnames: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            missing_timestamp: MissingTimestamp::Zero,
            visited_hostnames: true,
        }
    }
}

/// Display configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Characters kept on each side of a truncated address.
    pub address_chars: usize,
    /// Maximum fractional digits when formatting ether amounts.
    pub ether_decimals: usize,
    /// Chain id used for explorer links when a record has none.
    pub default_chain_id: String,
    /// Render timestamps in the local timezone instead of UTC.
    pub local_time: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            address_chars: 6,
            ether_decimals: 6,
            default_chain_id: "1".to_string(),
            local_time: false,
        }
    }
}
