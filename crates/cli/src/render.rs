//! Terminal tables for each view.

use colored::{Color, Colorize};
use statelog_analysis::explorer::{address_url, tx_url};
use statelog_analysis::format::{
    format_optional_ether, format_setting_value, format_status, format_time, is_ethereum_address, status_tone,
    truncate_address, StatusTone, UNKNOWN,
};
use statelog_analysis::StateLogReport;
use statelog_core::config::DisplayConfig;
use statelog_core::{Account, OriginRecord, RiskLevel, SettingsVariable, Transaction};
use statelog_ingestion::{ClassifiedApproval, MobileInfo};

/// A table cell with an optional colour.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub text: String,
    pub color: Option<Color>,
}

impl Cell {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: None,
        }
    }

    pub fn colored(text: impl Into<String>, color: Color) -> Self {
        Self {
            text: text.into(),
            color: Some(color),
        }
    }
}

fn risk_color(risk: RiskLevel) -> Color {
    match risk {
        RiskLevel::Low => Color::Green,
        RiskLevel::Medium => Color::Yellow,
        RiskLevel::High => Color::Red,
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

/// Pad every column to its widest cell and print. Colour is applied after
/// padding so escape codes do not skew widths.
pub fn print_table(headers: &[&str], rows: &[Vec<Cell>]) {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(i) {
                *width = (*width).max(cell.text.chars().count());
            }
        }
    }

    let header = headers
        .iter()
        .zip(&widths)
        .map(|(h, &w)| format!("{h:<w$}"))
        .collect::<Vec<_>>()
        .join("  ");
    println!("{}", header.bold());

    for row in rows {
        let line = row
            .iter()
            .zip(&widths)
            .map(|(cell, &w)| {
                let padded = format!("{:<w$}", cell.text);
                match cell.color {
                    Some(color) => padded.color(color).to_string(),
                    None => padded,
                }
            })
            .collect::<Vec<_>>()
            .join("  ");
        println!("{}", line.trim_end());
    }

    if rows.is_empty() {
        println!("{}", "(none)".dimmed());
    }
}

/// Row builders configured by the display settings.
pub struct Renderer<'a> {
    display: &'a DisplayConfig,
}

impl<'a> Renderer<'a> {
    pub fn new(display: &'a DisplayConfig) -> Self {
        Self { display }
    }

    fn time(&self, ts_ms: Option<i64>) -> String {
        format_time(ts_ms, self.display.local_time)
    }

    fn address(&self, address: Option<&str>) -> String {
        truncate_address(address, self.display.address_chars)
    }

    pub const TRANSACTION_HEADERS: [&'static str; 7] = ["Date", "Status", "From", "To", "Value (ETH)", "Origin", "Explorer"];

    pub fn transaction_rows(&self, transactions: &[&Transaction]) -> Vec<Vec<Cell>> {
        transactions
            .iter()
            .map(|tx| {
                let status = format_status(tx.status.as_deref());
                let status = match status_tone(tx.status.as_deref()) {
                    StatusTone::Success => Cell::colored(status, Color::Green),
                    StatusTone::Failure => Cell::colored(status, Color::Red),
                    StatusTone::Pending => Cell::colored(status, Color::Yellow),
                };
                let chain = tx.chain_id.as_deref().unwrap_or(&self.display.default_chain_id);
                let link = tx
                    .hash
                    .as_deref()
                    .map(|hash| tx_url(hash, Some(chain)))
                    .unwrap_or_default();
                vec![
                    Cell::plain(self.time(tx.timestamp_ms)),
                    status,
                    Cell::plain(self.address(tx.from.as_deref())),
                    Cell::plain(self.address(tx.to.as_deref())),
                    Cell::plain(format_optional_ether(tx.value_wei.as_deref(), self.display.ether_decimals)),
                    Cell::plain(tx.origin.clone().unwrap_or_else(|| UNKNOWN.to_string())),
                    Cell::plain(link),
                ]
            })
            .collect()
    }

    pub const APPROVAL_HEADERS: [&'static str; 5] = ["Date", "Origin", "Type", "Risk", "Source"];

    pub fn approval_rows(&self, approvals: &[&ClassifiedApproval]) -> Vec<Vec<Cell>> {
        approvals
            .iter()
            .map(|a| {
                vec![
                    Cell::plain(self.time(Some(a.approval.timestamp_ms))),
                    Cell::plain(a.approval.origin.clone().unwrap_or_else(|| UNKNOWN.to_string())),
                    Cell::plain(a.approval.approval_type.clone().unwrap_or_else(|| UNKNOWN.to_string())),
                    Cell::colored(a.risk.label(), risk_color(a.risk)),
                    Cell::plain(a.approval.source_kind.label()),
                ]
            })
            .collect()
    }

    pub const ACCOUNT_HEADERS: [&'static str; 4] = ["Name", "Address", "Balance (ETH)", "Explorer"];

    pub fn account_rows(&self, accounts: &[Account]) -> Vec<Vec<Cell>> {
        accounts
            .iter()
            .map(|account| {
                vec![
                    Cell::plain(account.display_name.clone()),
                    Cell::plain(account.address.clone()),
                    Cell::plain(format_optional_ether(
                        account.balance_wei.as_deref(),
                        self.display.ether_decimals,
                    )),
                    Cell::plain(if is_ethereum_address(&account.address) {
                        address_url(&account.address, Some(&self.display.default_chain_id))
                    } else {
                        String::new()
                    }),
                ]
            })
            .collect()
    }

    pub const ORIGIN_HEADERS: [&'static str; 7] =
        ["Origin", "Interactions", "Last Activity", "Visited", "Transactions", "Approvals", "Risk"];

    pub fn origin_rows(&self, origins: &[&OriginRecord]) -> Vec<Vec<Cell>> {
        origins
            .iter()
            .map(|o| {
                let risk = o.risk();
                vec![
                    Cell::plain(o.origin.clone()),
                    Cell::plain(o.interaction_count.to_string()),
                    Cell::plain(self.time(o.last_activity_ms)),
                    Cell::plain(yes_no(o.visited)),
                    Cell::plain(yes_no(o.has_transactions)),
                    Cell::plain(yes_no(o.has_approvals)),
                    Cell::colored(risk.label(), risk_color(risk)),
                ]
            })
            .collect()
    }

    pub const VARIABLE_HEADERS: [&'static str; 2] = ["Setting", "Value"];

    pub fn variable_rows(&self, variables: &[SettingsVariable]) -> Vec<Vec<Cell>> {
        variables
            .iter()
            .map(|v| {
                let value = format_setting_value(v.raw_value.as_ref(), self.display.local_time);
                let value = if v.is_available() {
                    Cell::plain(value)
                } else {
                    Cell::colored(value, Color::BrightBlack)
                };
                vec![Cell::plain(v.label.clone()), value]
            })
            .collect()
    }

    pub fn print_mobile(&self, mobile: &MobileInfo) {
        if !mobile.likely_mobile {
            println!("{}", "This export does not look like it came from the mobile app.".dimmed());
        }
        print_table(&Self::VARIABLE_HEADERS, &self.variable_rows(&mobile.variables));
    }

    pub fn print_summary(&self, report: &StateLogReport) {
        let app_type = if report.is_mobile { "Mobile App" } else { "Browser Extension" };
        println!("{} {}", "App type:".bold(), app_type);
        println!(
            "{} {}  {} {}  {} {}  {} {}",
            "Transactions:".bold(),
            report.transactions.len(),
            "Approvals:".bold(),
            report.approvals.len(),
            "Accounts:".bold(),
            report.accounts.len(),
            "Origins:".bold(),
            report.origins.len(),
        );

        let stats = &report.approval_stats;
        println!(
            "{} {} high, {} medium, {} low",
            "Approval risk:".bold(),
            stats.high.to_string().red(),
            stats.medium.to_string().yellow(),
            stats.low.to_string().green(),
        );
        if stats.total > 0 {
            println!("{} {:.0}%", "High-risk share:".bold(), stats.high_frac() * 100.0);
        }

        let risky_approvals: Vec<&ClassifiedApproval> = report.approvals_at(RiskLevel::High).collect();
        if !risky_approvals.is_empty() {
            println!();
            println!("{}", "High-risk approvals:".red().bold());
            print_table(&Self::APPROVAL_HEADERS, &self.approval_rows(&risky_approvals));
        }

        let risky: Vec<&OriginRecord> = report.origins_at(RiskLevel::High).collect();
        if !risky.is_empty() {
            println!();
            println!("{}", "Origins with approvals but no transactions:".red().bold());
            print_table(&Self::ORIGIN_HEADERS, &self.origin_rows(&risky));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use statelog_core::{Approval, SourceKind, ValueKind};

    fn texts(row: &[Cell]) -> Vec<&str> {
        row.iter().map(|c| c.text.as_str()).collect()
    }

    #[test]
    fn test_transaction_row() {
        let display = DisplayConfig::default();
        let tx = Transaction {
            status: Some("confirmed".to_string()),
            from: Some("0x1234567890abcdef1234567890abcdef12345678".to_string()),
            value_wei: Some("1500000000000000000".to_string()),
            hash: Some("0xfeed".to_string()),
            chain_id: Some("0x89".to_string()),
            ..Transaction::default()
        };
        let rows = Renderer::new(&display).transaction_rows(&[&tx]);
        assert_eq!(
            texts(&rows[0]),
            vec![
                "Unknown",
                "Confirmed",
                "0x1234...345678",
                "Unknown",
                "1.5",
                "Unknown",
                "https://polygonscan.com/tx/0xfeed",
            ]
        );
        assert_eq!(rows[0][1].color, Some(Color::Green));
    }

    #[test]
    fn test_transaction_link_uses_default_chain() {
        let display = DisplayConfig {
            default_chain_id: "56".to_string(),
            ..DisplayConfig::default()
        };
        let tx = Transaction {
            hash: Some("0xabc".to_string()),
            ..Transaction::default()
        };
        let rows = Renderer::new(&display).transaction_rows(&[&tx]);
        assert_eq!(rows[0][6].text, "https://bscscan.com/tx/0xabc");
    }

    #[test]
    fn test_approval_row_risk_colour() {
        let display = DisplayConfig::default();
        let approval = ClassifiedApproval {
            approval: Approval {
                id: "1".to_string(),
                origin: Some("https://a.test".to_string()),
                approval_type: Some("eth_sign".to_string()),
                timestamp_ms: 0,
                request_data: Value::Null,
                source_kind: SourceKind::Mobile,
            },
            risk: RiskLevel::High,
        };
        let rows = Renderer::new(&display).approval_rows(&[&approval]);
        assert_eq!(texts(&rows[0]), vec!["Unknown", "https://a.test", "eth_sign", "High", "Mobile"]);
        assert_eq!(rows[0][3].color, Some(Color::Red));
    }

    #[test]
    fn test_account_row_links_valid_addresses() {
        let display = DisplayConfig::default();
        let accounts = vec![
            Account {
                address: "0x1234567890abcdef1234567890abcdef12345678".to_string(),
                display_name: "Main".to_string(),
                balance_wei: Some("0xde0b6b3a7640000".to_string()),
            },
            Account {
                address: "not-an-address".to_string(),
                display_name: "not-an-address".to_string(),
                balance_wei: None,
            },
        ];
        let rows = Renderer::new(&display).account_rows(&accounts);
        assert_eq!(rows[0][2].text, "1");
        assert_eq!(
            rows[0][3].text,
            "https://etherscan.io/address/0x1234567890abcdef1234567890abcdef12345678"
        );
        assert_eq!(rows[1][2].text, "0");
        assert_eq!(rows[1][3].text, "");
    }

    #[test]
    fn test_unavailable_setting_is_dimmed() {
        let display = DisplayConfig::default();
        let variables = vec![
            SettingsVariable {
                id: "a".to_string(),
                label: "A".to_string(),
                raw_value: None,
                value_kind: ValueKind::String,
            },
            SettingsVariable {
                id: "b".to_string(),
                label: "B".to_string(),
                raw_value: Some(json!(true)),
                value_kind: ValueKind::Boolean,
            },
        ];
        let rows = Renderer::new(&display).variable_rows(&variables);
        assert_eq!(texts(&rows[0]), vec!["A", "Not available"]);
        assert_eq!(rows[0][1].color, Some(Color::BrightBlack));
        assert_eq!(texts(&rows[1]), vec!["B", "Yes"]);
    }
}
