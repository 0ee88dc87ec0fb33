//! Mobile-specific information.
//!
//! A second settings view aimed at mobile exports: root-level flags plus,
//! when controller state is present, network, feature-flag and count details.
//! Entries with no value are left out.

use crate::collection::{extract_visited_hostnames, records_at, RecordCollection};
use crate::value::as_text;
use serde::Serialize;
use serde_json::Value;
use statelog_core::resolver::lookup;
use statelog_core::{SettingsVariable, StateLog, ValueKind};

/// Mobile information extracted from a state log.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MobileInfo {
    pub variables: Vec<SettingsVariable>,
    /// Whether the export is probably from the mobile app.
    pub likely_mobile: bool,
}

impl MobileInfo {
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

fn variable(id: impl Into<String>, label: impl Into<String>, value: Option<Value>, kind: ValueKind) -> SettingsVariable {
    SettingsVariable {
        id: id.into(),
        label: label.into(),
        raw_value: value,
        value_kind: kind,
    }
}

fn text_at(value: &Value, path: &[&str]) -> Option<Value> {
    as_text(lookup(value, path)).map(Value::String)
}

/// Origin of the first transaction, mobile controller state first.
pub fn first_transaction_origin(log: &StateLog) -> Option<String> {
    const PATHS: [&[&str]; 2] = [
        &["engine", "backgroundState", "TransactionController", "transactions"],
        &["metamask", "transactions"],
    ];
    PATHS.iter().find_map(|path| {
        let first = *records_at(lookup(log.raw(), path), "first transaction").first()?;
        as_text(first.get("origin"))
    })
}

/// Extract mobile information.
pub fn extract_mobile_info(log: &StateLog) -> MobileInfo {
    let raw = log.raw();
    let root = |key: &str| raw.get(key).filter(|v| !v.is_null()).cloned();

    let visited = extract_visited_hostnames(log);
    let visited = if visited.is_empty() { "None".to_string() } else { visited.join(", ") };

    let mut variables = vec![
        variable("submittedTime", "Submitted Time", root("submittedTime"), ValueKind::Date),
        variable(
            "visitedDappsByHostname",
            "Visited Dapps",
            Some(Value::String(visited)),
            ValueKind::String,
        ),
        variable(
            "origin",
            "TX Origin",
            first_transaction_origin(log).map(Value::String),
            ValueKind::String,
        ),
    ];

    for (id, label) in [
        ("seedphraseBackedUp", "Seedphrase Backed Up"),
        ("automaticSecurityChecksEnabled", "Automatic Security Checks Enabled"),
        ("securityAlertsEnabled", "Security Alerts Enabled"),
        ("isProfileSyncingEnabled", "Profile Syncing Enabled"),
        ("hasAccountSyncingSyncedAtLeastOnce", "Account Syncing Has Synced At Least Once"),
    ] {
        variables.push(variable(id, label, root(id), ValueKind::Boolean));
    }

    if let Some(network) = log.controller("NetworkController") {
        variables.push(variable(
            "networkType",
            "Network Type",
            text_at(network, &["network"]),
            ValueKind::String,
        ));
        variables.push(variable(
            "chainId",
            "Chain ID",
            text_at(network, &["provider", "chainId"]),
            ValueKind::String,
        ));
        variables.push(variable(
            "networkName",
            "Network Name",
            text_at(network, &["provider", "nickname"]),
            ValueKind::String,
        ));
    }

    if let Some(flags) = log
        .controller("PreferencesController")
        .and_then(|prefs| prefs.get("featureFlags"))
        .and_then(Value::as_object)
    {
        for (key, value) in flags {
            if value.is_boolean() {
                variables.push(variable(
                    format!("featureFlag_{key}"),
                    format!("Feature Flag: {key}"),
                    Some(value.clone()),
                    ValueKind::Boolean,
                ));
            }
        }
    }

    if let Some(accounts) = log
        .controller("AccountTrackerController")
        .and_then(|c| c.get("accounts"))
        .and_then(Value::as_object)
    {
        variables.push(variable(
            "accountCount",
            "Number of Accounts",
            Some(Value::from(accounts.len())),
            ValueKind::Number,
        ));
    }

    if let Some(transactions) = log
        .controller("TransactionController")
        .and_then(|c| c.get("transactions"))
        .and_then(RecordCollection::from_value)
    {
        variables.push(variable(
            "transactionCount",
            "Number of Transactions",
            Some(Value::from(transactions.len())),
            ValueKind::Number,
        ));
    }

    variables.retain(SettingsVariable::is_available);
    let likely_mobile = variables.len() >= 3 || log.is_mobile();

    MobileInfo {
        variables,
        likely_mobile,
    }
}
