mod commands;
mod logging;
mod render;
mod settings;

use anyhow::{Context, Result};
use clap::Parser;
use commands::{Cli, View};
use dotenv::dotenv;
use render::{print_table, Renderer};
use serde::Serialize;
use statelog_analysis::{filter_records, SearchQuery, Session, StateLogReport};
use statelog_core::StateLog;
use std::io;
use tracing::{info, warn};

fn main() -> Result<()> {
    dotenv().ok();

    logging::init_logger();

    let args = Cli::parse();

    let config = settings::load_configuration(args.config.as_deref()).context("Error loading configuration")?;
    config.validate()?;

    let mut session = Session::new(&config);
    if args.file.as_os_str() == "-" {
        let log = StateLog::from_reader(io::stdin().lock()).context("Error reading stdin")?;
        session.load(log);
    } else {
        session
            .load_path(&args.file)
            .with_context(|| format!("Error loading {}", args.file.display()))?;
    }
    info!(file = %args.file.display(), "loaded state log");

    let (Some(log), Some(report)) = (session.document(), session.report()) else {
        anyhow::bail!("no state log loaded");
    };

    let query = SearchQuery::new(args.search.as_deref().unwrap_or_default());
    if !query.is_empty() && !matches!(args.view, View::Transactions | View::Approvals | View::Origins) {
        warn!(view = ?args.view, "--search only applies to transactions, approvals and origins");
    }

    let renderer = Renderer::new(&config.display);
    if args.json {
        print_json(args.view, log, report, &query)
    } else {
        print_view(&renderer, args.view, log, report, &query);
        Ok(())
    }
}

fn print_view(renderer: &Renderer, view: View, log: &StateLog, report: &StateLogReport, query: &SearchQuery) {
    match view {
        View::Summary => renderer.print_summary(report),
        View::Transactions => {
            let rows = renderer.transaction_rows(&filter_records(&report.transactions, query));
            print_table(&Renderer::TRANSACTION_HEADERS, &rows);
        }
        View::Approvals => {
            let rows = renderer.approval_rows(&filter_records(&report.approvals, query));
            print_table(&Renderer::APPROVAL_HEADERS, &rows);
        }
        View::Accounts => print_table(&Renderer::ACCOUNT_HEADERS, &renderer.account_rows(&report.accounts)),
        View::Origins => {
            let rows = renderer.origin_rows(&filter_records(&report.origins, query));
            print_table(&Renderer::ORIGIN_HEADERS, &rows);
        }
        View::Settings => print_table(&Renderer::VARIABLE_HEADERS, &renderer.variable_rows(&report.settings)),
        View::Mobile => renderer.print_mobile(&report.mobile),
        View::Raw => println!("{}", log.pretty()),
    }
}

fn print_json(view: View, log: &StateLog, report: &StateLogReport, query: &SearchQuery) -> Result<()> {
    fn emit<T: Serialize + ?Sized>(value: &T) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }

    match view {
        View::Summary => emit(report),
        View::Transactions => emit(&filter_records(&report.transactions, query)),
        View::Approvals => emit(&filter_records(&report.approvals, query)),
        View::Accounts => emit(&report.accounts),
        View::Origins => emit(&filter_records(&report.origins, query)),
        View::Settings => emit(&report.settings),
        View::Mobile => emit(&report.mobile),
        View::Raw => emit(log.raw()),
    }
}
