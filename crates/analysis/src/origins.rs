//! Origin activity aggregation.
//!
//! Folds transactions, approvals and visited hostnames into one record per
//! origin. Origins are keyed case-sensitively.

use statelog_core::{Approval, OriginRecord, Transaction};
use std::collections::HashMap;

/// Aggregator that builds the origin activity index.
#[derive(Debug, Default)]
pub struct OriginAggregator {
    /// Records in first-seen order.
    records: Vec<OriginRecord>,
    /// Origin to position in `records`.
    index: HashMap<String, usize>,
}

impl OriginAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    fn entry(&mut self, origin: &str) -> &mut OriginRecord {
        let idx = match self.index.get(origin) {
            Some(&idx) => idx,
            None => {
                self.records.push(OriginRecord::new(origin));
                self.index.insert(origin.to_string(), self.records.len() - 1);
                self.records.len() - 1
            }
        };
        &mut self.records[idx]
    }

    /// Add a transaction. Transactions without an origin are ignored.
    pub fn add_transaction(&mut self, tx: &Transaction) {
        let Some(origin) = tx.origin.as_deref().filter(|o| !o.is_empty()) else {
            return;
        };
        let record = self.entry(origin);
        record.interaction_count += 1;
        record.has_transactions = true;
        record.touch(tx.timestamp_ms);
    }

    /// Add an approval. Approvals without an origin are ignored.
    pub fn add_approval(&mut self, approval: &Approval) {
        let Some(origin) = approval.origin.as_deref().filter(|o| !o.is_empty()) else {
            return;
        };
        let record = self.entry(origin);
        record.interaction_count += 1;
        record.has_approvals = true;
        record.touch(Some(approval.timestamp_ms));
    }

    /// Mark a hostname as visited; a visit alone counts as one interaction.
    pub fn add_visited(&mut self, hostname: &str) {
        if hostname.is_empty() {
            return;
        }
        let record = self.entry(hostname);
        record.visited = true;
        if record.interaction_count == 0 {
            record.interaction_count = 1;
        }
    }

    pub fn add_transactions(&mut self, txs: &[Transaction]) {
        for tx in txs {
            self.add_transaction(tx);
        }
    }

    pub fn add_approvals<'a>(&mut self, approvals: impl IntoIterator<Item = &'a Approval>) {
        for approval in approvals {
            self.add_approval(approval);
        }
    }

    pub fn add_visited_hostnames(&mut self, hostnames: &[String]) {
        for hostname in hostnames {
            self.add_visited(hostname);
        }
    }

    /// Number of distinct origins seen.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records by last activity, most recent first. Ties keep first-seen order.
    pub fn finish(self) -> Vec<OriginRecord> {
        let mut records = self.records;
        records.sort_by_key(|r| std::cmp::Reverse(r.sort_key()));
        records
    }
}

/// Build the origin index from canonical records.
pub fn build_origin_index<'a>(
    transactions: &[Transaction],
    approvals: impl IntoIterator<Item = &'a Approval>,
    visited: &[String],
) -> Vec<OriginRecord> {
    let mut aggregator = OriginAggregator::new();
    aggregator.add_transactions(transactions);
    aggregator.add_approvals(approvals);
    aggregator.add_visited_hostnames(visited);
    aggregator.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use statelog_core::{RiskLevel, SourceKind};

    fn make_tx(origin: &str, ts: Option<i64>) -> Transaction {
        Transaction {
            origin: Some(origin.to_string()),
            timestamp_ms: ts,
            ..Transaction::default()
        }
    }

    fn make_approval(origin: &str, ts: i64) -> Approval {
        Approval {
            id: format!("{origin}-eth_accounts"),
            origin: Some(origin.to_string()),
            approval_type: Some("eth_accounts".to_string()),
            timestamp_ms: ts,
            request_data: Value::Null,
            source_kind: SourceKind::Extension,
        }
    }

    #[test]
    fn test_fold_counts_and_flags() {
        let txs = vec![make_tx("a.test", Some(100)), make_tx("a.test", Some(300))];
        let approvals = vec![make_approval("a.test", 200), make_approval("b.test", 50)];
        let origins = build_origin_index(&txs, &approvals, &[]);

        assert_eq!(origins.len(), 2);
        let a = &origins[0];
        assert_eq!(a.origin, "a.test");
        assert_eq!(a.interaction_count, 3);
        assert_eq!(a.last_activity_ms, Some(300));
        assert!(a.has_transactions && a.has_approvals);
        assert_eq!(a.risk(), RiskLevel::Medium);

        let b = &origins[1];
        assert_eq!(b.interaction_count, 1);
        assert_eq!(b.risk(), RiskLevel::High);
    }

    #[test]
    fn test_visited_counts_once_only_when_idle() {
        let txs = vec![make_tx("a.test", Some(10))];
        let visited = vec!["a.test".to_string(), "c.test".to_string()];
        let origins = build_origin_index(&txs, &[] as &[Approval], &visited);

        let a = origins.iter().find(|r| r.origin == "a.test").unwrap();
        assert_eq!(a.interaction_count, 1);
        assert!(a.visited);

        let c = origins.iter().find(|r| r.origin == "c.test").unwrap();
        assert_eq!(c.interaction_count, 1);
        assert_eq!(c.last_activity_ms, None);
        assert_eq!(c.risk(), RiskLevel::Low);
    }

    #[test]
    fn test_origins_are_case_sensitive() {
        let txs = vec![make_tx("A.test", Some(1)), make_tx("a.test", Some(2))];
        assert_eq!(build_origin_index(&txs, &[] as &[Approval], &[]).len(), 2);
    }

    #[test]
    fn test_missing_origin_ignored_and_ties_stable() {
        let mut aggregator = OriginAggregator::new();
        aggregator.add_transaction(&Transaction::default());
        aggregator.add_visited("first.test");
        aggregator.add_visited("second.test");
        aggregator.add_visited("");
        assert_eq!(aggregator.len(), 2);

        let origins = aggregator.finish();
        assert_eq!(origins[0].origin, "first.test");
        assert_eq!(origins[1].origin, "second.test");
    }
}
