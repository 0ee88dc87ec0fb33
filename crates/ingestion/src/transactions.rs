//! Transaction extraction.
//!
//! Transactions may appear in up to five raw collections depending on the
//! export layout. They are merged in priority order, de-duplicated by id and
//! sorted newest first.

use crate::collection::records_at;
use crate::value::{as_text, as_timestamp, first_text_field};
use serde_json::Value;
use statelog_core::resolver::lookup;
use statelog_core::{StateLog, Transaction};
use std::collections::HashSet;
use std::fmt;
use tracing::{debug, info};

/// Raw locations transactions are read from, in merge order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionSource {
    /// `transactions` at the document root.
    Root,
    /// `engine.backgroundState.TransactionController.transactions`.
    Mobile,
    /// `metamask.transactions`.
    Extension,
    /// `metamask.txListItems`.
    TxListItems,
    /// `metamask.transactionHistory`.
    History,
}

impl TransactionSource {
    pub const ALL: [TransactionSource; 5] = [
        TransactionSource::Root,
        TransactionSource::Mobile,
        TransactionSource::Extension,
        TransactionSource::TxListItems,
        TransactionSource::History,
    ];

    /// JSON path of this source.
    pub fn path(self) -> &'static [&'static str] {
        match self {
            TransactionSource::Root => &["transactions"],
            TransactionSource::Mobile => &[
                "engine",
                "backgroundState",
                "TransactionController",
                "transactions",
            ],
            TransactionSource::Extension => &["metamask", "transactions"],
            TransactionSource::TxListItems => &["metamask", "txListItems"],
            TransactionSource::History => &["metamask", "transactionHistory"],
        }
    }

    /// Whether this source applies to `log`. Mobile controller state is
    /// only consulted for exports without a `metamask` object.
    pub fn applies_to(self, log: &StateLog) -> bool {
        match self {
            TransactionSource::Mobile => !log.has_metamask(),
            _ => true,
        }
    }
}

impl fmt::Display for TransactionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path().join("."))
    }
}

/// Accumulates transactions from several sources, keeping the first record
/// seen for each id.
#[derive(Debug, Default)]
pub struct TransactionMerger {
    records: Vec<Transaction>,
    seen_ids: HashSet<String>,
    duplicates: usize,
}

impl TransactionMerger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one transaction. Returns false if its id was already merged.
    /// Transactions without an id are always kept.
    pub fn add(&mut self, tx: Transaction) -> bool {
        if let Some(id) = &tx.id {
            if !self.seen_ids.insert(id.clone()) {
                self.duplicates += 1;
                return false;
            }
        }
        self.records.push(tx);
        true
    }

    /// Normalize and add every record from one raw source.
    pub fn add_source(&mut self, source: TransactionSource, raw: &[&Value]) -> usize {
        let before = self.records.len();
        for record in raw {
            self.add(normalize_transaction(record));
        }
        let added = self.records.len() - before;
        debug!(%source, found = raw.len(), added, "merged transactions");
        added
    }

    /// Number of records skipped as duplicates.
    pub fn duplicates(&self) -> usize {
        self.duplicates
    }

    /// Finish merging: stable sort newest first, missing timestamps last.
    pub fn finish(mut self) -> Vec<Transaction> {
        self.records.sort_by(|a, b| b.sort_key().cmp(&a.sort_key()));
        self.records
    }
}

/// Map one raw transaction object into canonical form.
///
/// Address and value fields live under `txParams`; older list items carry
/// them at the top level instead.
pub fn normalize_transaction(raw: &Value) -> Transaction {
    let params = raw.get("txParams").filter(|p| p.is_object());
    let param = |key: &str| {
        params
            .and_then(|p| as_text(p.get(key)))
            .or_else(|| as_text(raw.get(key)))
    };

    Transaction {
        id: as_text(raw.get("id")),
        timestamp_ms: as_timestamp(raw.get("time")).or_else(|| as_timestamp(raw.get("submittedTime"))),
        status: as_text(raw.get("status")),
        from: param("from"),
        to: param("to"),
        value_wei: param("value"),
        hash: as_text(raw.get("hash"))
            .or_else(|| as_text(lookup(raw, &["txReceipt", "transactionHash"]))),
        origin: as_text(raw.get("origin")),
        chain_id: first_text_field(raw, &["chainId", "metamaskNetworkId"]),
    }
}

/// Extract every transaction in the document.
pub fn extract_transactions(log: &StateLog) -> Vec<Transaction> {
    let mut merger = TransactionMerger::new();

    for source in TransactionSource::ALL {
        if !source.applies_to(log) {
            continue;
        }
        let raw = records_at(lookup(log.raw(), source.path()), &source.to_string());
        if !raw.is_empty() {
            merger.add_source(source, &raw);
        }
    }

    let duplicates = merger.duplicates();
    let transactions = merger.finish();
    info!(count = transactions.len(), duplicates, "extracted transactions");
    transactions
}
