use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "statelog")]
#[command(about = "Inspect a wallet state-log export for risky origins and approvals", long_about = None)]
pub struct Cli {
    /// State-log JSON export, or `-` for stdin
    pub file: PathBuf,
    /// View to print
    #[arg(value_enum, default_value_t = View::Summary)]
    pub view: View,
    /// Only show transactions, approvals and origins matching this term
    #[arg(short, long)]
    pub search: Option<String>,
    /// Print JSON instead of tables
    #[arg(long)]
    pub json: bool,
    /// Configuration file (defaults to ./statelog.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum View {
    /// Counts, risk overview and app type
    Summary,
    /// Transactions, newest first
    Transactions,
    /// Approvals with their risk tier
    Approvals,
    /// Accounts and balances
    Accounts,
    /// Origin activity index
    Origins,
    /// Security-relevant settings
    Settings,
    /// Mobile-specific information
    Mobile,
    /// The untouched document
    Raw,
}
