use std::{error::Error, fs, path::PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use time::{Date, macros::format_description};

use finance_dashboard::{
    ChartMode, DashboardConfig, RawTransaction, TransactionType,
    backend::{JsonFileStore, TransactionStore, parse_extraction_reply},
    calculate_insights,
    config::{DEFAULT_CHART_DAYS, DEFAULT_CURRENCY_SYMBOL, DEFAULT_RECENT_COUNT},
    dashboard::render_text_report,
    logging::setup_logging,
    summarize,
};

/// Summarize and edit a personal finance transactions file.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the JSON transactions file.
    #[arg(long)]
    transactions: PathBuf,

    /// The canonical timezone to group dates in, e.g. "Asia/Kolkata".
    /// Defaults to the system's local time.
    #[arg(long)]
    timezone: Option<String>,

    /// The number of most recent days to show in the daily chart.
    #[arg(long, default_value_t = DEFAULT_CHART_DAYS)]
    chart_days: usize,

    /// The number of latest transactions to list.
    #[arg(long, default_value_t = DEFAULT_RECENT_COUNT)]
    recent: usize,

    /// The currency symbol to show in front of amounts.
    #[arg(long, default_value = DEFAULT_CURRENCY_SYMBOL)]
    currency: String,

    /// Also append debug logs to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the dashboard summary.
    Summary {
        /// Which transactions to show in the daily chart.
        #[arg(long, value_enum, default_value_t = Mode::Expenses)]
        mode: Mode,

        /// Print the summary as JSON instead of text.
        #[arg(long)]
        json: bool,
    },
    /// Add a transaction.
    Add {
        /// The amount of money.
        #[arg(long, allow_hyphen_values = true)]
        amount: f64,

        /// Whether the money was earned or spent.
        #[arg(long = "type", value_enum, default_value_t = Kind::Expense)]
        kind: Kind,

        /// Who the money was paid to or received from.
        #[arg(long, default_value = "")]
        merchant: String,

        /// The spending or income category.
        #[arg(long, default_value = "")]
        category: String,

        /// The date as YYYY-MM-DD. Defaults to today.
        #[arg(long, value_parser = parse_date)]
        date: Option<Date>,
    },
    /// Add an expense from the JSON reply of a bill-extraction model.
    ImportBill {
        /// File path to the saved reply text.
        #[arg(long)]
        reply: PathBuf,
    },
    /// Delete a transaction.
    Delete {
        /// The ID of the transaction to delete.
        #[arg(long)]
        id: i64,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum Mode {
    All,
    Expenses,
}

impl From<Mode> for ChartMode {
    fn from(value: Mode) -> Self {
        match value {
            Mode::All => ChartMode::All,
            Mode::Expenses => ChartMode::Expenses,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum Kind {
    Income,
    Expense,
}

impl From<Kind> for TransactionType {
    fn from(value: Kind) -> Self {
        match value {
            Kind::Income => TransactionType::Income,
            Kind::Expense => TransactionType::Expense,
        }
    }
}

fn parse_date(text: &str) -> Result<Date, String> {
    Date::parse(text, format_description!("[year]-[month]-[day]"))
        .map_err(|error| format!("expected a date as YYYY-MM-DD: {error}"))
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    setup_logging(args.log_file.as_deref())?;

    let config = DashboardConfig {
        timezone: args.timezone,
        chart_days: args.chart_days,
        recent_count: args.recent,
        currency_symbol: args.currency,
    };
    let normalizer = config.normalizer()?;
    let formatter = config.currency_formatter()?;
    let today = normalizer.zone().today();

    let mut store = JsonFileStore::new(args.transactions);
    tracing::debug!("using transactions file {}", store.path().display());

    match args.command {
        Command::Summary { mode, json } => {
            let records = store.list()?;
            let transactions = normalizer.normalize_all(&records);
            let insights = calculate_insights(&transactions, today, &formatter);
            let summary = summarize(&transactions, Some(insights), &config);

            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print!("{}", render_text_report(&summary, mode.into(), &formatter));
            }
        }
        Command::Add {
            amount,
            kind,
            merchant,
            category,
            date,
        } => {
            let kind = TransactionType::from(kind);
            let record = RawTransaction::new()
                .with("date", date.unwrap_or(today).to_string())
                .with("merchant", merchant)
                .with("category", category)
                .with("amount", amount)
                .with("type", kind.as_str());

            let created = store.create(record)?;
            println!("Added transaction {}", created.id().unwrap_or_default());
        }
        Command::ImportBill { reply } => {
            let bill = parse_extraction_reply(&fs::read_to_string(reply)?)?;
            let amount = formatter.format(bill.total_amount);
            let merchant = bill.merchant.clone();

            let created = store.create(bill.into_record())?;
            println!(
                "Added {amount} at {merchant} as transaction {}",
                created.id().unwrap_or_default()
            );
        }
        Command::Delete { id } => {
            store.delete(id)?;
            println!("Deleted transaction {id}");
        }
    }

    Ok(())
}
