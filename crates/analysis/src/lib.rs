//! Derived views for the state-log explorer.
//!
//! This crate handles:
//! - Currency, address, timestamp and setting formatting
//! - Block-explorer links
//! - Origin activity aggregation
//! - Search filtering
//! - Building the full report and holding the current session

pub mod engine;
pub mod explorer;
pub mod filter;
pub mod format;
pub mod origins;
pub mod session;

pub use engine::{ReportEngine, StateLogReport};
pub use filter::{filter_records, Searchable, SearchQuery};
pub use origins::{build_origin_index, OriginAggregator};
pub use session::Session;
