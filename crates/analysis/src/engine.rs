//! Report engine.
//!
//! Runs every extractor over a state log and combines the results with the
//! derived origin index into a single report.

use crate::origins::build_origin_index;
use serde::Serialize;
use statelog_core::config::MissingTimestamp;
use statelog_core::{Account, Config, OriginRecord, RiskLevel, SettingsVariable, StateLog, Transaction};
use statelog_ingestion::{
    extract_accounts, extract_approvals, extract_mobile_info, extract_settings, extract_transactions,
    extract_visited_hostnames, missing_timestamp_fallback, ApprovalRiskStats, ClassifiedApproval, MobileInfo,
    RiskClassifier,
};
use tracing::{debug, info};

/// Every view derived from one state log.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StateLogReport {
    /// Whether the export came from the mobile app.
    pub is_mobile: bool,
    pub transactions: Vec<Transaction>,
    pub approvals: Vec<ClassifiedApproval>,
    pub accounts: Vec<Account>,
    pub origins: Vec<OriginRecord>,
    pub settings: Vec<SettingsVariable>,
    pub mobile: MobileInfo,
    pub approval_stats: ApprovalRiskStats,
}

impl StateLogReport {
    /// Whether no entity records were found.
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
            && self.approvals.is_empty()
            && self.accounts.is_empty()
            && self.origins.is_empty()
    }

    /// Origins at the given risk tier, in report order.
    pub fn origins_at(&self, risk: RiskLevel) -> impl Iterator<Item = &OriginRecord> {
        self.origins.iter().filter(move |o| o.risk() == risk)
    }

    /// Approvals at the given risk tier, in report order.
    pub fn approvals_at(&self, risk: RiskLevel) -> impl Iterator<Item = &ClassifiedApproval> {
        self.approvals.iter().filter(move |a| a.risk == risk)
    }

    /// Look up a setting by id.
    pub fn setting(&self, id: &str) -> Option<&SettingsVariable> {
        self.settings.iter().find(|s| s.id == id)
    }
}

/// Report engine.
#[derive(Debug)]
pub struct ReportEngine {
    /// Approval risk classifier.
    classifier: RiskClassifier,
    missing_timestamp: MissingTimestamp,
    visited_hostnames: bool,
}

impl ReportEngine {
    /// Create a new report engine from configuration.
    pub fn new(config: &Config) -> Self {
        Self {
            classifier: RiskClassifier::new(),
            missing_timestamp: config.extraction.missing_timestamp,
            visited_hostnames: config.extraction.visited_hostnames,
        }
    }

    /// Derive every view from `log`. Each call recomputes from scratch.
    pub fn build(&mut self, log: &StateLog) -> StateLogReport {
        self.classifier.reset_stats();
        let missing_ts = missing_timestamp_fallback(self.missing_timestamp);

        let transactions = extract_transactions(log);
        let approvals = self
            .classifier
            .classify_batch(extract_approvals(log, missing_ts));
        let accounts = extract_accounts(log);

        let visited = if self.visited_hostnames {
            extract_visited_hostnames(log)
        } else {
            Vec::new()
        };
        debug!(count = visited.len(), "visited hostnames");

        let origins = build_origin_index(&transactions, approvals.iter().map(|a| &a.approval), &visited);
        let settings = extract_settings(log);
        let mobile = extract_mobile_info(log);

        info!(
            transactions = transactions.len(),
            approvals = approvals.len(),
            accounts = accounts.len(),
            origins = origins.len(),
            high_risk = self.classifier.stats().high,
            "built report"
        );

        StateLogReport {
            is_mobile: log.is_mobile(),
            transactions,
            approvals,
            accounts,
            origins,
            settings,
            mobile,
            approval_stats: self.classifier.stats().clone(),
        }
    }

    /// Statistics from the most recent build.
    pub fn stats(&self) -> &ApprovalRiskStats {
        self.classifier.stats()
    }
}
