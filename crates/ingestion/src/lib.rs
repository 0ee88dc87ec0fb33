//! Entity extraction and normalization for the state-log explorer.
//!
//! This crate handles:
//! - Walking every known raw layout into canonical record sets
//! - Transaction merging and de-duplication
//! - Approval fan-out from pending, mobile and permission sources
//! - Account de-duplication and identity naming
//! - Settings and mobile-info resolution
//! - Approval risk classification

pub mod accounts;
pub mod approvals;
pub mod classifier;
pub mod collection;
pub mod mobile;
pub mod settings;
pub mod transactions;
pub mod value;

pub use accounts::extract_accounts;
pub use approvals::{extract_approvals, missing_timestamp_fallback};
pub use classifier::{classify_approval_type, ApprovalRiskStats, ClassifiedApproval, RiskClassifier};
pub use collection::{extract_visited_hostnames, RecordCollection};
pub use mobile::{extract_mobile_info, MobileInfo};
pub use settings::{extract_settings, value_kind_of};
pub use transactions::{extract_transactions, TransactionMerger, TransactionSource};
