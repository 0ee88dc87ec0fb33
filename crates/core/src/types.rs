//! Canonical record types for the state-log explorer.
//!
//! Every record is an owned projection copied out of the raw document; none
//! borrows from it.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Timestamp in milliseconds since Unix epoch (UTC).
pub type TimestampMs = i64;

/// A wallet account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Account address, as written in the source.
    pub address: String,
    /// Identity name, or the address when no identity is known.
    pub display_name: String,
    /// Balance in wei (decimal or `0x` hex string), when recorded.
    pub balance_wei: Option<String>,
}

/// A transaction recorded by the wallet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: Option<String>,
    pub timestamp_ms: Option<TimestampMs>,
    pub status: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    /// Value in wei, unparsed.
    pub value_wei: Option<String>,
    pub hash: Option<String>,
    /// Origin (dapp domain) that requested the transaction.
    pub origin: Option<String>,
    /// Chain id the transaction was sent on, when recorded.
    pub chain_id: Option<String>,
}

impl Transaction {
    /// Ordering key: missing timestamps sort as oldest.
    #[inline]
    pub fn sort_key(&self) -> TimestampMs {
        self.timestamp_ms.unwrap_or(0)
    }
}

/// Which wallet flavour an approval was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Desktop browser extension.
    Extension,
    /// Mobile app.
    Mobile,
}

impl SourceKind {
    pub fn label(self) -> &'static str {
        match self {
            SourceKind::Extension => "Extension",
            SourceKind::Mobile => "Mobile",
        }
    }
}

/// A granted or pending approval of a capability to an origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Approval {
    /// Source key, or `subject-permission` for permission-derived approvals.
    pub id: String,
    pub origin: Option<String>,
    /// Method or capability name (e.g. `eth_sign`, `eth_accounts`).
    #[serde(rename = "type")]
    pub approval_type: Option<String>,
    pub timestamp_ms: TimestampMs,
    /// Request payload copied from the source.
    pub request_data: Value,
    pub source_kind: SourceKind,
}

/// Risk tier assigned to approvals and origins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }

    /// Capitalised label for display.
    pub fn label(self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }
}

/// Activity aggregated for a single origin or visited hostname.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OriginRecord {
    pub origin: String,
    pub interaction_count: u32,
    pub last_activity_ms: Option<TimestampMs>,
    pub visited: bool,
    pub has_transactions: bool,
    pub has_approvals: bool,
}

impl OriginRecord {
    /// Create an empty record for an origin.
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            interaction_count: 0,
            last_activity_ms: None,
            visited: false,
            has_transactions: false,
            has_approvals: false,
        }
    }

    /// Raise the last activity time if `ts_ms` is later.
    pub fn touch(&mut self, ts_ms: Option<TimestampMs>) {
        if let Some(ts) = ts_ms {
            if self.last_activity_ms.map_or(true, |last| ts > last) {
                self.last_activity_ms = Some(ts);
            }
        }
    }

    /// Approvals without any transaction are the most suspicious pattern.
    pub fn risk(&self) -> RiskLevel {
        if self.has_approvals && !self.has_transactions {
            RiskLevel::High
        } else if self.has_approvals {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    /// Ordering key: missing activity sorts as oldest.
    #[inline]
    pub fn sort_key(&self) -> TimestampMs {
        self.last_activity_ms.unwrap_or(0)
    }
}

/// Kind of value a settings variable holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Boolean,
    Date,
    String,
    Number,
}

/// A named wallet setting resolved from the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsVariable {
    pub id: String,
    pub label: String,
    /// `None` when no source carried the setting.
    pub raw_value: Option<Value>,
    pub value_kind: ValueKind,
}

impl SettingsVariable {
    /// Whether any source carried this setting.
    #[inline]
    pub fn is_available(&self) -> bool {
        self.raw_value.is_some()
    }
}
