//! Plain-text rendering of a [DashboardSummary] for the terminal.

use std::fmt::Write;

use crate::{
    dashboard::{ChartMode, DashboardSummary, format::CurrencyFormatter, format_percentage},
    transaction::TransactionType,
};

/// Render `summary` as a plain-text report with the daily series for `mode`.
pub fn render_text_report(
    summary: &DashboardSummary,
    mode: ChartMode,
    formatter: &CurrencyFormatter,
) -> String {
    let mut report = String::new();

    if let Err(error) = write_report(&mut report, summary, mode, formatter) {
        tracing::error!("could not render the dashboard report: {error}");
    }

    report
}

fn write_report(
    out: &mut String,
    summary: &DashboardSummary,
    mode: ChartMode,
    formatter: &CurrencyFormatter,
) -> std::fmt::Result {
    writeln!(out, "Total Balance: {}", formatter.format(summary.balance))?;
    writeln!(
        out,
        "Income: {}  Expenses: {}",
        formatter.format(summary.totals.total_income),
        formatter.format(summary.totals.total_expenses)
    )?;
    writeln!(
        out,
        "Savings Rate: {}%",
        format_percentage(summary.savings_rate_percent)
    )?;

    let title = match mode {
        ChartMode::All => "All Transactions",
        ChartMode::Expenses => "Expenses",
    };
    writeln!(out)?;
    writeln!(out, "{title} by Day")?;

    let buckets = summary.buckets(mode);
    if buckets.is_empty() {
        writeln!(out, "  No data yet")?;
    }
    for bucket in buckets {
        writeln!(out, "  {:<7}{}", bucket.day, formatter.format(bucket.total_amount))?;
    }

    writeln!(out)?;
    writeln!(out, "Recent Transactions")?;
    if summary.recent_transactions.is_empty() {
        writeln!(out, "  No transactions yet")?;
    }
    for transaction in &summary.recent_transactions {
        let sign = match transaction.kind {
            TransactionType::Income => '+',
            TransactionType::Expense => '-',
        };
        let merchant = match transaction.merchant.as_str() {
            "" => "Unknown",
            merchant => merchant,
        };
        writeln!(
            out,
            "  {sign}{} {merchant} ({})",
            formatter.format(transaction.amount),
            transaction.category
        )?;
    }

    if let Some(insights) = &summary.insights {
        writeln!(out)?;
        writeln!(out, "Insights")?;
        for message in &insights.messages {
            writeln!(out, "  {message}")?;
        }
    }

    Ok(())
}
