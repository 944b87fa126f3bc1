//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Table};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::credential_file_adapter::CredentialFileAdapter;
use crate::adapters::http_gateway_adapter::HttpGatewayAdapter;
use crate::adapters::session_file_adapter::SessionFileAdapter;
use crate::domain::error::WealthdeskError;
use crate::domain::gateway::{GatewayCredential, HoldingRow, PositionRow};
use crate::domain::intake::{self, IntakeRecord};
use crate::domain::metrics::{
    AllocationPlan, DebtBadge, DerivedMetrics, EMERGENCY_FUND_PROGRESS, SavingsBadge,
    goal_summaries, savings_comment, savings_progress,
};
use crate::domain::money::format_inr;
use crate::domain::terminal::TradeTerminal;
use crate::ports::gateway_port::GatewayPort;
use crate::ports::store_port::StorePort;

#[derive(Parser, Debug)]
#[command(name = "wealthdesk", about = "Personal finance dashboard and trading-gateway terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Capture intake figures for this session
    Intake {
        #[arg(long)]
        monthly_income: Option<String>,
        #[arg(long)]
        monthly_savings: Option<String>,
        #[arg(long)]
        total_assets: Option<String>,
        #[arg(long)]
        total_liabilities: Option<String>,
        #[arg(long)]
        retirement_age: Option<String>,
        #[arg(long)]
        retirement_corpus: Option<String>,
        #[arg(long)]
        education_fund: Option<String>,
        #[arg(long)]
        home_purchase: Option<String>,
        #[arg(long)]
        session_file: Option<PathBuf>,
    },
    /// Show the derived-metrics dashboard for the captured intake
    Dashboard {
        #[arg(long)]
        session_file: Option<PathBuf>,
    },
    /// Discard the captured intake record
    Reset {
        #[arg(long)]
        session_file: Option<PathBuf>,
    },
    /// Talk to the self-hosted trading gateway
    Gateway {
        #[command(subcommand)]
        command: GatewayCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum GatewayCommand {
    /// Probe the gateway, store the credentials, and pull the first snapshot
    Connect {
        #[arg(long)]
        url: Option<String>,
        #[arg(long)]
        api_key: Option<String>,
        #[arg(long)]
        credentials_file: Option<PathBuf>,
    },
    /// Fetch and show current holdings
    Holdings {
        #[arg(long)]
        credentials_file: Option<PathBuf>,
    },
    /// Fetch and show the position book
    Positions {
        #[arg(long)]
        credentials_file: Option<PathBuf>,
    },
    /// Show the stored gateway credentials
    Status {
        #[arg(long)]
        credentials_file: Option<PathBuf>,
    },
    /// Print the link to the gateway's own order dashboard
    Orders {
        #[arg(long)]
        credentials_file: Option<PathBuf>,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Intake {
            monthly_income,
            monthly_savings,
            total_assets,
            total_liabilities,
            retirement_age,
            retirement_corpus,
            education_fund,
            home_purchase,
            session_file,
        } => {
            let record = IntakeRecord {
                monthly_income: monthly_income.unwrap_or_default(),
                monthly_savings: monthly_savings.unwrap_or_default(),
                total_assets: total_assets.unwrap_or_default(),
                total_liabilities: total_liabilities.unwrap_or_default(),
                retirement_age: retirement_age.unwrap_or_default(),
                retirement_corpus: retirement_corpus.unwrap_or_default(),
                education_fund: education_fund.unwrap_or_default(),
                home_purchase: home_purchase.unwrap_or_default(),
            };
            run_intake(&record, session_file)
        }
        Command::Dashboard { session_file } => run_dashboard(session_file),
        Command::Reset { session_file } => run_reset(session_file),
        Command::Gateway { command } => match command {
            GatewayCommand::Connect {
                url,
                api_key,
                credentials_file,
            } => run_gateway_connect(url, api_key, credentials_file),
            GatewayCommand::Holdings { credentials_file } => {
                run_gateway_holdings(credentials_file)
            }
            GatewayCommand::Positions { credentials_file } => {
                run_gateway_positions(credentials_file)
            }
            GatewayCommand::Status { credentials_file } => {
                let store = credential_store(credentials_file);
                run_status_view(&store)
            }
            GatewayCommand::Orders { credentials_file } => {
                let store = credential_store(credentials_file);
                run_orders_link(&store)
            }
        },
    }
}

fn session_store(path: Option<PathBuf>) -> SessionFileAdapter {
    SessionFileAdapter::new(path.unwrap_or_else(SessionFileAdapter::default_path))
}

fn credential_store(path: Option<PathBuf>) -> CredentialFileAdapter {
    CredentialFileAdapter::new(path.unwrap_or_else(CredentialFileAdapter::default_path))
}

pub fn run_intake(record: &IntakeRecord, session_file: Option<PathBuf>) -> ExitCode {
    let store = session_store(session_file);
    match intake::submit(record, &store) {
        Ok(()) => {
            eprintln!("Intake saved. Run `wealthdesk dashboard` to see your analysis.");
            ExitCode::SUCCESS
        }
        Err(e @ WealthdeskError::MissingField { .. }) => {
            eprintln!("error: {e}");
            eprintln!("Please provide at least your monthly income and savings.");
            (&e).into()
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

pub fn run_dashboard(session_file: Option<PathBuf>) -> ExitCode {
    let store = session_store(session_file);
    let record = match intake::load(&store) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let Some(record) = record else {
        eprintln!("No wealth data found. Please complete the intake first:");
        eprintln!("  wealthdesk intake --monthly-income 50000 --monthly-savings 15000");
        return ExitCode::from(2);
    };

    let metrics = DerivedMetrics::compute(&record);
    print_dashboard(&record, &metrics);
    ExitCode::SUCCESS
}

pub fn run_reset(session_file: Option<PathBuf>) -> ExitCode {
    let store = session_store(session_file);
    match intake::clear(&store) {
        Ok(()) => {
            eprintln!("Session data cleared.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn run_gateway_connect(
    url: Option<String>,
    api_key: Option<String>,
    credentials_file: Option<PathBuf>,
) -> ExitCode {
    let store = credential_store(credentials_file);

    // Flags left out fall back to the stored credential, the way the web
    // form pre-filled its inputs from local storage.
    let stored = match GatewayCredential::load(&store) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    let credential = GatewayCredential::new(
        url.or_else(|| stored.as_ref().map(|c| c.endpoint_url.clone()))
            .unwrap_or_default(),
        api_key
            .or_else(|| stored.as_ref().map(|c| c.api_key.clone()))
            .unwrap_or_default(),
    );

    let gateway = match build_gateway() {
        Ok(g) => g,
        Err(code) => return code,
    };
    run_connect_flow(&gateway, &store, &credential)
}

/// Drives the full connect flow and renders the first snapshot. Split out
/// from the argument wiring so it can run against any gateway and store.
pub fn run_connect_flow(
    gateway: &dyn GatewayPort,
    store: &dyn StorePort,
    credential: &GatewayCredential,
) -> ExitCode {
    let runtime = match build_runtime() {
        Ok(r) => r,
        Err(code) => return code,
    };

    let mut terminal = TradeTerminal::new();
    match runtime.block_on(terminal.connect(gateway, store, credential)) {
        Ok(()) => {
            eprintln!("Connected to {}", credential.endpoint_url);
            print_holdings(terminal.holdings());
            println!();
            print_positions(terminal.positions());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn run_gateway_holdings(credentials_file: Option<PathBuf>) -> ExitCode {
    let store = credential_store(credentials_file);
    let credential = match load_stored_credential(&store) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let gateway = match build_gateway() {
        Ok(g) => g,
        Err(code) => return code,
    };
    run_holdings_view(&gateway, &credential)
}

fn run_gateway_positions(credentials_file: Option<PathBuf>) -> ExitCode {
    let store = credential_store(credentials_file);
    let credential = match load_stored_credential(&store) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let gateway = match build_gateway() {
        Ok(g) => g,
        Err(code) => return code,
    };
    run_positions_view(&gateway, &credential)
}

/// Fetches holdings once and renders them. The fetch is best-effort: on
/// failure the table simply stays empty and a warning is logged.
pub fn run_holdings_view(gateway: &dyn GatewayPort, credential: &GatewayCredential) -> ExitCode {
    let runtime = match build_runtime() {
        Ok(r) => r,
        Err(code) => return code,
    };

    let mut terminal = TradeTerminal::new();
    runtime.block_on(terminal.refresh_holdings(gateway, credential));
    print_holdings(terminal.holdings());
    ExitCode::SUCCESS
}

pub fn run_positions_view(gateway: &dyn GatewayPort, credential: &GatewayCredential) -> ExitCode {
    let runtime = match build_runtime() {
        Ok(r) => r,
        Err(code) => return code,
    };

    let mut terminal = TradeTerminal::new();
    runtime.block_on(terminal.refresh_positions(gateway, credential));
    print_positions(terminal.positions());
    ExitCode::SUCCESS
}

pub fn run_status_view(store: &dyn StorePort) -> ExitCode {
    match GatewayCredential::load(store) {
        Ok(Some(credential)) => {
            println!(
                "Gateway: {} (API key {})",
                credential.endpoint_url,
                credential.masked_key()
            );
            ExitCode::SUCCESS
        }
        Ok(None) => {
            println!("No gateway credentials stored.");
            eprintln!("Run `wealthdesk gateway connect --url <url> --api-key <key>` to connect.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

/// Orders are placed on the gateway's own dashboard; this only prints the
/// link to it.
pub fn run_orders_link(store: &dyn StorePort) -> ExitCode {
    let credential = match load_stored_credential(store) {
        Ok(c) => c,
        Err(code) => return code,
    };
    println!("{}", credential.dashboard_url());
    eprintln!("Open this link in a browser to place orders on the gateway dashboard.");
    ExitCode::SUCCESS
}

pub fn load_stored_credential(store: &dyn StorePort) -> Result<GatewayCredential, ExitCode> {
    match GatewayCredential::load(store) {
        Ok(Some(credential)) => Ok(credential),
        Ok(None) => {
            let err = WealthdeskError::CredentialsMissing {
                reason: "no stored gateway credentials, run `wealthdesk gateway connect` first"
                    .to_string(),
            };
            eprintln!("error: {err}");
            Err((&err).into())
        }
        Err(e) => {
            eprintln!("error: {e}");
            Err((&e).into())
        }
    }
}

fn build_runtime() -> Result<tokio::runtime::Runtime, ExitCode> {
    tokio::runtime::Runtime::new().map_err(|e| {
        let err = WealthdeskError::from(e);
        eprintln!("error: {err}");
        (&err).into()
    })
}

fn build_gateway() -> Result<HttpGatewayAdapter, ExitCode> {
    HttpGatewayAdapter::new().map_err(|e| {
        eprintln!("error: {e}");
        (&e).into()
    })
}

const PROGRESS_BAR_WIDTH: usize = 20;

/// Renders a 0-100 value as a fixed-width bar, clamping anything outside the
/// range.
fn progress_bar(value: f64) -> String {
    let clamped = if value.is_finite() {
        value.clamp(0.0, 100.0)
    } else {
        0.0
    };
    let filled = (clamped / 100.0 * PROGRESS_BAR_WIDTH as f64).round() as usize;
    format!(
        "[{}{}]",
        "#".repeat(filled),
        "-".repeat(PROGRESS_BAR_WIDTH - filled)
    )
}

fn format_quantity(quantity: f64) -> String {
    if quantity.fract() == 0.0 {
        format!("{quantity:.0}")
    } else {
        format!("{quantity:.2}")
    }
}

fn print_dashboard(record: &IntakeRecord, metrics: &DerivedMetrics) {
    println!("Your Wealth Dashboard");
    println!();

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Metric").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
            Cell::new("Note").add_attribute(Attribute::Bold),
        ]);
    table.add_row(vec![
        Cell::new("Net Worth"),
        Cell::new(format_inr(metrics.net_worth)).set_alignment(CellAlignment::Right),
        Cell::new("Assets minus liabilities"),
    ]);
    table.add_row(vec![
        Cell::new("Monthly Income"),
        Cell::new(format_inr(metrics.income)).set_alignment(CellAlignment::Right),
        Cell::new(""),
    ]);
    table.add_row(vec![
        Cell::new("Monthly Savings"),
        Cell::new(format_inr(metrics.savings)).set_alignment(CellAlignment::Right),
        Cell::new(format!("{:.1}% of income", metrics.savings_rate)),
    ]);
    table.add_row(vec![
        Cell::new("Savings Rate"),
        Cell::new(format!("{:.1}%", metrics.savings_rate)).set_alignment(CellAlignment::Right),
        Cell::new(savings_comment(metrics.savings_rate)),
    ]);
    println!("{table}");

    println!();
    println!("Financial Health");
    let savings_fill = savings_progress(metrics.savings_rate);
    println!(
        "  Savings Rate     {}  {}",
        progress_bar(savings_fill),
        SavingsBadge::from_rate(metrics.savings_rate).label()
    );
    println!(
        "                   Saving {:.1}% of income",
        metrics.savings_rate
    );
    println!(
        "  Emergency Fund   {}  Building",
        progress_bar(EMERGENCY_FUND_PROGRESS)
    );
    println!(
        "                   Target: {} (6 months of expenses)",
        format_inr(metrics.emergency_fund_target())
    );
    let debt_badge = DebtBadge::from_liabilities(metrics.liabilities);
    println!(
        "  Debt Management  {}  {}",
        progress_bar(debt_badge.progress()),
        debt_badge.label()
    );
    match debt_badge {
        DebtBadge::DebtFree => println!("                   No outstanding liabilities"),
        DebtBadge::InProgress => println!(
            "                   Outstanding: {}",
            format_inr(metrics.liabilities)
        ),
    }

    println!();
    println!("Recommended Investment Allocation");
    let plan = AllocationPlan::from_savings(metrics.savings);
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Asset Class").add_attribute(Attribute::Bold),
            Cell::new("Split").add_attribute(Attribute::Bold),
            Cell::new("Monthly").add_attribute(Attribute::Bold),
            Cell::new("Note").add_attribute(Attribute::Bold),
        ]);
    table.add_row(vec![
        Cell::new("Equity"),
        Cell::new("60%").set_alignment(CellAlignment::Right),
        Cell::new(format_inr(plan.equity)).set_alignment(CellAlignment::Right),
        Cell::new("Mutual funds and ETFs"),
    ]);
    table.add_row(vec![
        Cell::new("Debt"),
        Cell::new("30%").set_alignment(CellAlignment::Right),
        Cell::new(format_inr(plan.debt)).set_alignment(CellAlignment::Right),
        Cell::new("Bonds and fixed deposits"),
    ]);
    table.add_row(vec![
        Cell::new("Gold"),
        Cell::new("10%").set_alignment(CellAlignment::Right),
        Cell::new(format_inr(plan.gold)).set_alignment(CellAlignment::Right),
        Cell::new("Gold ETFs and sovereign gold bonds"),
    ]);
    println!("{table}");

    let goals = goal_summaries(record);
    if !goals.is_empty() {
        println!();
        println!("Your Financial Goals");
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec![
                Cell::new("Goal").add_attribute(Attribute::Bold),
                Cell::new("Target").add_attribute(Attribute::Bold),
                Cell::new("Note").add_attribute(Attribute::Bold),
            ]);
        for goal in &goals {
            table.add_row(vec![
                Cell::new(goal.name),
                Cell::new(format_inr(goal.target)).set_alignment(CellAlignment::Right),
                Cell::new(&goal.note),
            ]);
        }
        println!("{table}");
    }
}

fn rows_table<'a, I>(rows: I) -> Table
where
    I: Iterator<Item = (&'a str, f64, f64, f64)>,
{
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Symbol").add_attribute(Attribute::Bold),
            Cell::new("Qty").add_attribute(Attribute::Bold),
            Cell::new("LTP").add_attribute(Attribute::Bold),
            Cell::new("P&L").add_attribute(Attribute::Bold),
        ]);

    let mut total_pnl = 0.0;
    for (symbol, quantity, ltp, pnl) in rows {
        total_pnl += pnl;
        table.add_row(vec![
            Cell::new(symbol),
            Cell::new(format_quantity(quantity)).set_alignment(CellAlignment::Right),
            Cell::new(format!("{ltp:.2}")).set_alignment(CellAlignment::Right),
            Cell::new(format!("{pnl:+.2}")).set_alignment(CellAlignment::Right),
        ]);
    }
    table.add_row(vec![
        Cell::new("Total").add_attribute(Attribute::Bold),
        Cell::new(""),
        Cell::new(""),
        Cell::new(format!("{total_pnl:+.2}"))
            .add_attribute(Attribute::Bold)
            .set_alignment(CellAlignment::Right),
    ]);
    table
}

fn print_holdings(holdings: &[HoldingRow]) {
    println!("Holdings");
    if holdings.is_empty() {
        println!("(no holdings)");
        return;
    }
    let table = rows_table(
        holdings
            .iter()
            .map(|h| (h.symbol.as_str(), h.quantity, h.last_traded_price, h.profit_and_loss)),
    );
    println!("{table}");
}

fn print_positions(positions: &[PositionRow]) {
    println!("Positions");
    if positions.is_empty() {
        println!("(no open positions)");
        return;
    }
    let table = rows_table(
        positions
            .iter()
            .map(|p| (p.symbol.as_str(), p.quantity, p.last_traded_price, p.profit_and_loss)),
    );
    println!("{table}");
}
