use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use tally_core::{
    compare, current_month_category_totals, resolve, running_balances, spending_series,
    yearly_flow, Period, Transaction, TxKind,
};
use tally_ledger::{append_transactions, load_ledger, new_id, parse_ledger_csv};

mod config;
mod render;
mod state;

#[derive(Parser, Debug)]
#[command(name = "tally", version, about = "Personal finance tracking CLI")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create ~/.tally with default config and settings
    Init,

    /// Record one transaction
    Add {
        /// Transaction date (YYYY-MM-DD, default: today)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Signed amount: income positive, expense negative
        #[arg(long, allow_negative_numbers = true)]
        amount: f64,

        #[arg(long)]
        category: String,

        /// income, expense, or investment
        #[arg(long, default_value = "expense")]
        kind: String,

        #[arg(long)]
        note: Option<String>,
    },

    /// Import transactions into the ledger
    Import {
        #[command(subcommand)]
        command: ImportCommand,
    },

    /// Reporting views over the ledger
    Report {
        #[command(subcommand)]
        command: ReportCommand,
    },

    /// Manage per-category budgets
    Budget {
        #[command(subcommand)]
        command: BudgetCommand,
    },

    /// AI-assisted analysis
    Ai {
        #[command(subcommand)]
        command: AiCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ImportCommand {
    /// Ledger CSV with columns: date,amount,category,type,note
    Csv { path: PathBuf },

    /// Raw statement text, extracted via the chat-completion API
    Statement { path: PathBuf },
}

#[derive(Subcommand, Debug)]
enum ReportCommand {
    /// Bucketed spending analysis over a navigable window
    Spending {
        /// week, month, half-year, or year
        #[arg(long, default_value = "month")]
        period: String,

        /// 0 = current window, negative = past, positive = future
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        offset: i32,

        /// income, expense, or investment
        #[arg(long, default_value = "expense")]
        kind: String,

        /// Emit chart-ready JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Current-month budget tracking
    Budget,

    /// Wealth and investment running balances
    Balance,

    /// Current-year monthly income/expense/investment totals
    Flow,
}

#[derive(Subcommand, Debug)]
enum BudgetCommand {
    /// Set the monthly target for a category
    Set { category: String, amount: f64 },

    /// Show all configured targets
    List,
}

#[derive(Subcommand, Debug)]
enum AiCommand {
    /// Freeform spending analysis of the ledger
    Insights,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Init => init()?,

        Command::Add {
            date,
            amount,
            category,
            kind,
            note,
        } => {
            let Some(kind) = TxKind::parse(&kind) else {
                bail!("unknown kind '{kind}' (expected income, expense, or investment)");
            };
            let date = date.unwrap_or_else(today);
            let mut tx = Transaction::new(new_id(), date, amount, category, kind);
            tx.note = note;

            let count = append_transactions(&state::ledger_path()?, vec![tx])?;
            println!("Recorded. Ledger now holds {count} transaction(s).");
        }

        Command::Import { command } => match command {
            ImportCommand::Csv { path } => {
                let txns = parse_ledger_csv(&path)
                    .with_context(|| format!("parsing {}", path.display()))?;
                let imported = txns.len();
                let count = append_transactions(&state::ledger_path()?, txns)?;
                println!(
                    "Imported {imported} transaction(s) from {}. Ledger now holds {count}.",
                    path.display()
                );
            }
            ImportCommand::Statement { path } => {
                let text = std::fs::read_to_string(&path)
                    .with_context(|| format!("read {}", path.display()))?;
                let cfg = config::load_config()?;

                println!("Analyzing statement with {}…", cfg.ai.model);
                let txns = tally_ai::extract_statement(&cfg.ai.to_ai_config(), &text).await?;
                if txns.is_empty() {
                    println!("No transactions recognized in the statement.");
                    return Ok(());
                }
                let imported = txns.len();
                let count = append_transactions(&state::ledger_path()?, txns)?;
                println!("Extracted {imported} transaction(s). Ledger now holds {count}.");
            }
        },

        Command::Report { command } => report(command)?,

        Command::Budget { command } => match command {
            BudgetCommand::Set { category, amount } => {
                if amount < 0.0 {
                    bail!("budget targets must be non-negative");
                }
                let mut settings = state::load_settings()?;
                settings.budgets.set(&category, amount);
                state::save_settings(&settings)?;
                println!("Budget set: {category} = {amount:.2}");
            }
            BudgetCommand::List => {
                let settings = state::load_settings()?;
                let mut any = false;
                for (category, target) in settings.budgets.iter() {
                    println!("{category:<16} {target:>10.2}");
                    any = true;
                }
                if !any {
                    println!("No budgets configured. Use: tally budget set <category> <amount>");
                }
            }
        },

        Command::Ai { command } => match command {
            AiCommand::Insights => {
                let cfg = config::load_config()?;
                let settings = state::load_settings()?;
                let ledger = load_ledger(&state::ledger_path()?)?;
                if ledger.is_empty() {
                    bail!("the ledger is empty; add or import transactions first");
                }

                println!("Asking {} for insights…\n", cfg.ai.model);
                let text = tally_ai::generate_insights(
                    &cfg.ai.to_ai_config(),
                    &ledger,
                    &settings.categories,
                )
                .await?;
                println!("{text}");
            }
        },
    }

    Ok(())
}

fn init() -> Result<()> {
    let home = state::ensure_tally_home()?;

    let settings_path = state::settings_path()?;
    if !settings_path.exists() {
        state::save_settings(&state::Settings::default())?;
    }
    let config_path = config::config_path()?;
    if !config_path.exists() {
        config::save_config(&config::Config::default())?;
    }

    println!("Initialized {}", home.display());
    println!("  settings: {}", settings_path.display());
    println!("  config:   {}", config_path.display());
    Ok(())
}

fn report(command: ReportCommand) -> Result<()> {
    let settings = state::load_settings()?;
    let ledger = load_ledger(&state::ledger_path()?)?;
    let now = today();
    tracing::debug!(transactions = ledger.len(), "ledger loaded");

    match command {
        ReportCommand::Spending {
            period,
            offset,
            kind,
            json,
        } => {
            let period: Period = period.parse()?;
            let Some(kind) = TxKind::parse(&kind) else {
                bail!("unknown kind '{kind}' (expected income, expense, or investment)");
            };

            let window = resolve(period, offset, now, settings.week_start_day());
            let series = spending_series(&ledger, &window, kind);

            if json {
                let chart = render::spending_chart_json(&window, &series, &settings.chart_color)?;
                println!("{}", serde_json::to_string_pretty(&chart)?);
            } else {
                render::print_spending(&window, &series);
            }
        }

        ReportCommand::Budget => {
            let tracked = current_month_category_totals(&ledger, now);
            let report = compare(&settings.categories.expense, &settings.budgets, &tracked);
            render::print_budget(&report);
        }

        ReportCommand::Balance => {
            let series = running_balances(&ledger);
            if series.wealth.is_empty() {
                println!("The ledger is empty.");
            } else {
                render::print_balances(&series);
            }
        }

        ReportCommand::Flow => {
            let flow = yearly_flow(&ledger, now);
            render::print_flow(&flow);
        }
    }

    Ok(())
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
