//! Dashboard module
//!
//! Computes everything the dashboard view displays from a list of
//! transactions: daily chart buckets, income and expense totals, the savings
//! rate, the latest transactions and the spending insights.

mod aggregation;
mod format;
mod insights;
mod report;

pub use aggregation::{
    ChartMode, DailyBucket, RunningTotals, compute_totals, filter_by_type, format_day_label,
    group_by_day, recent_transactions,
};
pub use format::{CurrencyFormatter, format_percentage};
pub use insights::{Insights, NO_TRANSACTIONS_MESSAGE, UNCATEGORIZED_LABEL, calculate_insights};
pub use report::render_text_report;

use serde::Serialize;

use crate::{
    config::DashboardConfig,
    transaction::{Normalizer, RawTransaction, Transaction, TransactionType},
};

/// Holds all the data needed to render the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    /// Daily totals of all transactions for the most recent days.
    pub daily_buckets: Vec<DailyBucket>,
    /// Daily totals of expenses only for the most recent days.
    pub expense_buckets: Vec<DailyBucket>,
    /// Income and expense totals over every transaction.
    pub totals: RunningTotals,
    /// Income minus expenses.
    pub balance: f64,
    /// The share of income saved, between 0 and 100.
    pub savings_rate_percent: f64,
    /// The latest transactions, newest first.
    pub recent_transactions: Vec<Transaction>,
    /// The spending insights, if available.
    pub insights: Option<Insights>,
}

impl DashboardSummary {
    /// The daily chart series for `mode`.
    ///
    /// Both series are computed up front so the view can switch between
    /// them without fetching the transactions again.
    pub fn buckets(&self, mode: ChartMode) -> &[DailyBucket] {
        match mode {
            ChartMode::All => &self.daily_buckets,
            ChartMode::Expenses => &self.expense_buckets,
        }
    }
}

/// Normalize `records` and summarize them for the dashboard.
///
/// `insights` is passed through as is. It is usually computed by the backend.
/// This never fails: records with missing or malformed fields are
/// normalized to defaults rather than rejected.
pub fn build_dashboard(
    records: &[RawTransaction],
    insights: Option<Insights>,
    normalizer: &Normalizer,
    config: &DashboardConfig,
) -> DashboardSummary {
    let transactions = normalizer.normalize_all(records);
    summarize(&transactions, insights, config)
}

/// Summarize already normalized transactions for the dashboard.
pub fn summarize(
    transactions: &[Transaction],
    insights: Option<Insights>,
    config: &DashboardConfig,
) -> DashboardSummary {
    let daily_buckets = group_by_day(transactions, config.chart_days);
    let expense_buckets = group_by_day(
        filter_by_type(transactions, TransactionType::Expense),
        config.chart_days,
    );
    let totals = compute_totals(transactions);

    tracing::debug!(
        "summarized {} transactions into {} daily buckets ({} expense buckets)",
        transactions.len(),
        daily_buckets.len(),
        expense_buckets.len()
    );

    DashboardSummary {
        daily_buckets,
        expense_buckets,
        totals,
        balance: totals.balance(),
        savings_rate_percent: totals.savings_rate_percent(),
        recent_transactions: recent_transactions(transactions, config.recent_count),
        insights,
    }
}
