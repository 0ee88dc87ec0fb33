//! Account extraction.
//!
//! Extension exports keep `metamask.accounts` (address to balance, or to an
//! `{address, balance}` object) with names in `metamask.identities`. Mobile
//! exports keep `AccountTrackerController.accounts` with names in
//! `PreferencesController.identities`. Addresses compare case-insensitively
//! and the first occurrence wins.

use crate::collection::entries_at;
use crate::value::as_text;
use serde_json::Value;
use statelog_core::resolver::lookup;
use statelog_core::{Account, StateLog};
use std::collections::HashSet;
use tracing::info;

/// Extract every account in the document.
pub fn extract_accounts(log: &StateLog) -> Vec<Account> {
    let mut accounts = Vec::new();
    let mut seen = HashSet::new();

    let sources = [
        (
            lookup(log.raw(), &["metamask", "accounts"]),
            lookup(log.raw(), &["metamask", "identities"]),
            "metamask.accounts",
        ),
        (
            lookup(log.raw(), &["engine", "backgroundState", "AccountTrackerController", "accounts"]),
            lookup(log.raw(), &["engine", "backgroundState", "PreferencesController", "identities"]),
            "AccountTrackerController.accounts",
        ),
    ];

    for (raw_accounts, identities, source) in sources {
        for (address, entry) in entries_at(raw_accounts, source) {
            if !seen.insert(address.to_lowercase()) {
                continue;
            }
            accounts.push(Account {
                address: address.clone(),
                display_name: identity_name(identities, address).unwrap_or_else(|| address.clone()),
                balance_wei: balance_of(entry),
            });
        }
    }

    info!(count = accounts.len(), "extracted accounts");
    accounts
}

/// Balance stored directly as a string, or in a `balance` field.
fn balance_of(entry: &Value) -> Option<String> {
    match entry {
        Value::Object(_) => as_text(entry.get("balance")),
        other => as_text(Some(other)),
    }
}

/// Name from the identities map; exact key first, then a case-insensitive
/// match since some exports checksum one map and lowercase the other.
fn identity_name(identities: Option<&Value>, address: &str) -> Option<String> {
    let identities = identities?.as_object()?;
    let identity = identities.get(address).or_else(|| {
        identities
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(address))
            .map(|(_, v)| v)
    })?;
    as_text(identity.get("name"))
}
