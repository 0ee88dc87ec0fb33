//! Core types and configuration for the state-log explorer.
//!
//! This crate provides shared types used across all other crates:
//! - The raw state-log document and its load boundary
//! - Canonical record types (accounts, transactions, approvals, origins, settings)
//! - The source resolver used to probe legacy field locations
//! - Configuration structures
//! - Common error types

pub mod config;
pub mod document;
pub mod error;
pub mod resolver;
pub mod types;

pub use config::Config;
pub use document::StateLog;
pub use error::{Error, Result};
pub use types::*;
