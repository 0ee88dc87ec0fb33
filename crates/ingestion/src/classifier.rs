//! Approval risk classification.
//!
//! Classifies approvals as low, medium or high risk from the method or
//! capability name they grant.

use serde::Serialize;
use statelog_core::{Approval, RiskLevel, SourceKind};

/// Transaction-sending, asset-watching and chain-adding methods.
pub const MEDIUM_RISK_PATTERNS: [&str; 3] = [
    "eth_sendTransaction",
    "wallet_watchAsset",
    "wallet_addEthereumChain",
];

/// Signing and permission-broadening methods.
pub const HIGH_RISK_PATTERNS: [&str; 3] = ["eth_sign", "personal_sign", "wallet_requestPermissions"];

/// Risk tier of an approval type. Medium patterns are checked first; the two
/// pattern sets never match the same name.
pub fn classify_approval_type(approval_type: Option<&str>) -> RiskLevel {
    let Some(approval_type) = approval_type else {
        return RiskLevel::Low;
    };
    if MEDIUM_RISK_PATTERNS.iter().any(|p| approval_type.contains(p)) {
        RiskLevel::Medium
    } else if HIGH_RISK_PATTERNS.iter().any(|p| approval_type.contains(p)) {
        RiskLevel::High
    } else {
        RiskLevel::Low
    }
}

/// An approval with its risk tier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifiedApproval {
    #[serde(flatten)]
    pub approval: Approval,
    pub risk: RiskLevel,
}

/// Statistics about approval classification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ApprovalRiskStats {
    /// Total approvals classified.
    pub total: u64,
    pub low: u64,
    pub medium: u64,
    pub high: u64,
    /// Approvals found in mobile sources.
    pub mobile: u64,
}

impl ApprovalRiskStats {
    /// Fraction of approvals classified as high risk.
    pub fn high_frac(&self) -> f64 {
        if self.total > 0 {
            self.high as f64 / self.total as f64
        } else {
            0.0
        }
    }

    /// Reset statistics.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Classifier that tags approvals with a risk tier and keeps tallies.
#[derive(Debug, Default)]
pub struct RiskClassifier {
    stats: ApprovalRiskStats,
}

impl RiskClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify a single approval.
    pub fn classify(&mut self, approval: Approval) -> ClassifiedApproval {
        let risk = classify_approval_type(approval.approval_type.as_deref());

        self.stats.total += 1;
        match risk {
            RiskLevel::Low => self.stats.low += 1,
            RiskLevel::Medium => self.stats.medium += 1,
            RiskLevel::High => self.stats.high += 1,
        }
        if approval.source_kind == SourceKind::Mobile {
            self.stats.mobile += 1;
        }

        ClassifiedApproval { approval, risk }
    }

    /// Classify approvals, preserving order.
    pub fn classify_batch(&mut self, approvals: Vec<Approval>) -> Vec<ClassifiedApproval> {
        approvals.into_iter().map(|a| self.classify(a)).collect()
    }

    /// Get classification statistics.
    pub fn stats(&self) -> &ApprovalRiskStats {
        &self.stats
    }

    /// Reset statistics.
    pub fn reset_stats(&mut self) {
        self.stats.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn make_approval(approval_type: Option<&str>, source_kind: SourceKind) -> Approval {
        Approval {
            id: "id".to_string(),
            origin: Some("https://a.test".to_string()),
            approval_type: approval_type.map(str::to_string),
            timestamp_ms: 0,
            request_data: Value::Null,
            source_kind,
        }
    }

    #[test]
    fn test_tiers() {
        assert_eq!(classify_approval_type(Some("eth_sign")), RiskLevel::High);
        assert_eq!(classify_approval_type(Some("eth_signTypedData_v4")), RiskLevel::High);
        assert_eq!(classify_approval_type(Some("personal_sign")), RiskLevel::High);
        assert_eq!(classify_approval_type(Some("wallet_requestPermissions")), RiskLevel::High);
        assert_eq!(classify_approval_type(Some("eth_sendTransaction")), RiskLevel::Medium);
        assert_eq!(classify_approval_type(Some("wallet_watchAsset")), RiskLevel::Medium);
        assert_eq!(classify_approval_type(Some("wallet_addEthereumChain")), RiskLevel::Medium);
        assert_eq!(classify_approval_type(Some("eth_accounts")), RiskLevel::Low);
        assert_eq!(classify_approval_type(None), RiskLevel::Low);
    }

    #[test]
    fn test_pattern_sets_are_disjoint() {
        for medium in MEDIUM_RISK_PATTERNS {
            for high in HIGH_RISK_PATTERNS {
                assert!(!medium.contains(high), "{medium} contains {high}");
                assert!(!high.contains(medium), "{high} contains {medium}");
            }
        }
    }

    #[test]
    fn test_stats() {
        let mut classifier = RiskClassifier::new();
        let classified = classifier.classify_batch(vec![
            make_approval(Some("eth_sign"), SourceKind::Extension),
            make_approval(Some("wallet_watchAsset"), SourceKind::Mobile),
            make_approval(Some("eth_accounts"), SourceKind::Mobile),
            make_approval(Some("personal_sign"), SourceKind::Extension),
        ]);

        assert_eq!(classified[0].risk, RiskLevel::High);
        assert_eq!(classified[1].risk, RiskLevel::Medium);

        let stats = classifier.stats();
        assert_eq!(stats.total, 4);
        assert_eq!(stats.high, 2);
        assert_eq!(stats.medium, 1);
        assert_eq!(stats.low, 1);
        assert_eq!(stats.mobile, 2);
        assert!((stats.high_frac() - 0.5).abs() < 1e-10);

        classifier.reset_stats();
        assert_eq!(classifier.stats(), &ApprovalRiskStats::default());
    }

    #[test]
    fn test_classified_approval_flattens() {
        let mut classifier = RiskClassifier::new();
        let classified = classifier.classify(make_approval(Some("eth_sign"), SourceKind::Extension));
        let json = serde_json::to_value(&classified).unwrap();
        assert_eq!(json["type"], "eth_sign");
        assert_eq!(json["risk"], "high");
    }
}
