//! Spending insights: where the money went and how spending is trending.
//!
//! The same summary is normally computed by the backend and sent alongside
//! the transactions; [Insights] deserializes that payload and
//! [calculate_insights] produces it locally.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use time::{Date, Duration};

use crate::{
    dashboard::{aggregation::filter_by_type, format::CurrencyFormatter},
    transaction::{Transaction, TransactionType},
};

/// The category used for expenses with a blank category.
pub const UNCATEGORIZED_LABEL: &str = "Other";

/// Message shown when there is nothing to summarize.
pub const NO_TRANSACTIONS_MESSAGE: &str =
    "No transactions yet. Upload your first bill to get started!";

/// Week-on-week and month-on-month changes smaller than this are not reported.
const SIGNIFICANT_CHANGE_PERCENT: f64 = 10.0;

const WEEK_DAYS: i64 = 7;
const MONTH_DAYS: i64 = 30;

/// A summary of expense transactions.
///
/// Field names match the backend's JSON payload and every field is optional
/// when deserializing.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Insights {
    /// The sum of all expenses.
    pub total_spent: f64,
    /// The number of expenses.
    pub transaction_count: usize,
    /// The total spent per category.
    pub category_breakdown: BTreeMap<String, f64>,
    /// The category with the highest total.
    pub top_category: Option<String>,
    /// The total spent in the last 7 days.
    pub this_week_spending: f64,
    /// The total spent in the last 30 days.
    pub this_month_spending: f64,
    /// The mean expense amount.
    pub average_transaction: f64,
    /// Human-readable observations about the above.
    #[serde(rename = "insights")]
    pub messages: Vec<String>,
}

/// Summarize the expenses in `transactions` as of `today`.
///
/// Income is ignored. Periods are counted back from `today` inclusive: this
/// week is the last 7 days and last week the 7 days before that, this month
/// is the last 30 days and last month the 30 days before that. Undated
/// expenses count towards the totals but not towards any period.
pub fn calculate_insights(
    transactions: &[Transaction],
    today: Date,
    formatter: &CurrencyFormatter,
) -> Insights {
    let expenses: Vec<&Transaction> =
        filter_by_type(transactions, TransactionType::Expense).collect();

    if expenses.is_empty() {
        return Insights {
            messages: vec![NO_TRANSACTIONS_MESSAGE.to_owned()],
            ..Default::default()
        };
    }

    let total_spent: f64 = expenses.iter().map(|t| t.amount).sum();
    let transaction_count = expenses.len();

    let mut category_breakdown: BTreeMap<String, f64> = BTreeMap::new();
    for expense in &expenses {
        let category = match expense.category.trim() {
            "" => UNCATEGORIZED_LABEL,
            category => category,
        };
        *category_breakdown.entry(category.to_owned()).or_insert(0.0) += expense.amount;
    }

    let top_category = category_breakdown
        .iter()
        .fold(None, |top: Option<(&String, f64)>, (category, &amount)| match top {
            Some((_, top_amount)) if top_amount >= amount => top,
            _ => Some((category, amount)),
        })
        .map(|(category, _)| category.clone());

    let this_week = sum_in_period(&expenses, today, 0, WEEK_DAYS);
    let last_week = sum_in_period(&expenses, today, WEEK_DAYS, 2 * WEEK_DAYS);
    let this_month = sum_in_period(&expenses, today, 0, MONTH_DAYS);
    let last_month = sum_in_period(&expenses, today, MONTH_DAYS, 2 * MONTH_DAYS);

    let average_transaction = total_spent / transaction_count as f64;

    let mut messages = vec![format!(
        "Total spent across all transactions: {}",
        formatter.format(total_spent)
    )];

    if let Some(top_category) = &top_category {
        let top_amount = category_breakdown[top_category];
        let top_percentage = if total_spent > 0.0 {
            top_amount / total_spent * 100.0
        } else {
            0.0
        };
        messages.push(format!(
            "Your highest spending category is {top_category} at {} ({top_percentage:.1}%)",
            formatter.format(top_amount)
        ));
    }

    if let Some(change) = significant_change(this_week, last_week) {
        let direction = if change > 0.0 { "up" } else { "down" };
        messages.push(format!(
            "Weekly spending is {direction} {:.1}% compared to last week",
            change.abs()
        ));
    }

    if let Some(change) = significant_change(this_month, last_month) {
        let direction = if change > 0.0 { "increased" } else { "decreased" };
        messages.push(format!(
            "Monthly spending {direction} by {:.1}% compared to last month",
            change.abs()
        ));
    }

    messages.push(format!(
        "Average transaction amount: {}",
        formatter.format(average_transaction)
    ));

    Insights {
        total_spent: round_cents(total_spent),
        transaction_count,
        category_breakdown,
        top_category,
        this_week_spending: round_cents(this_week),
        this_month_spending: round_cents(this_month),
        average_transaction: round_cents(average_transaction),
        messages,
    }
}

/// Sums the expenses dated within `(today - end_days, today - start_days]`.
///
/// The most recent period (`start_days == 0`) also includes future dates.
fn sum_in_period(expenses: &[&Transaction], today: Date, start_days: i64, end_days: i64) -> f64 {
    let after = today - Duration::days(end_days);
    let until = today - Duration::days(start_days);

    expenses
        .iter()
        .filter(|expense| match expense.date {
            Some(date) => date > after && (start_days == 0 || date <= until),
            None => false,
        })
        .map(|expense| expense.amount)
        .sum()
}

/// The percentage change from `previous` to `current`, if both are positive
/// and the change is large enough to mention.
fn significant_change(current: f64, previous: f64) -> Option<f64> {
    if current <= 0.0 || previous <= 0.0 {
        return None;
    }

    let change = (current - previous) / previous * 100.0;
    (change.abs() >= SIGNIFICANT_CHANGE_PERCENT).then_some(change)
}

fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use time::{Date, macros::date};

    use super::{Insights, NO_TRANSACTIONS_MESSAGE, UNCATEGORIZED_LABEL, calculate_insights};
    use crate::{
        dashboard::format::CurrencyFormatter,
        transaction::{Transaction, TransactionType},
    };

    const TODAY: Date = date!(2024 - 03 - 31);

    fn create_test_expense(amount: f64, date: Date, category: &str) -> Transaction {
        Transaction::build(amount, TransactionType::Expense)
            .date(date)
            .category(category)
    }

    fn formatter() -> CurrencyFormatter {
        CurrencyFormatter::new("$").unwrap()
    }

    #[test]
    fn empty_input_has_welcome_message() {
        let insights = calculate_insights(&[], TODAY, &formatter());

        assert_eq!(insights.total_spent, 0.0);
        assert_eq!(insights.transaction_count, 0);
        assert_eq!(insights.top_category, None);
        assert_eq!(insights.messages, vec![NO_TRANSACTIONS_MESSAGE]);
    }

    #[test]
    fn income_is_ignored() {
        let transactions = vec![
            Transaction::build(1000.0, TransactionType::Income).date(TODAY),
            create_test_expense(20.0, TODAY, "Food"),
        ];

        let insights = calculate_insights(&transactions, TODAY, &formatter());

        assert_eq!(insights.total_spent, 20.0);
        assert_eq!(insights.transaction_count, 1);
    }

    #[test]
    fn breaks_spending_down_by_category() {
        let transactions = vec![
            create_test_expense(30.0, TODAY, "Food"),
            create_test_expense(30.0, TODAY, "Food"),
            create_test_expense(25.0, TODAY, "Transport"),
            create_test_expense(15.0, TODAY, ""),
        ];

        let insights = calculate_insights(&transactions, TODAY, &formatter());

        assert_eq!(insights.category_breakdown["Food"], 60.0);
        assert_eq!(insights.category_breakdown["Transport"], 25.0);
        assert_eq!(insights.category_breakdown[UNCATEGORIZED_LABEL], 15.0);
        assert_eq!(insights.top_category.as_deref(), Some("Food"));
        assert_eq!(insights.average_transaction, 25.0);
        assert!(
            insights.messages[1].contains("Food") && insights.messages[1].contains("(60.0%)"),
            "got {:?}",
            insights.messages
        );
    }

    #[test]
    fn top_category_tie_goes_to_first_alphabetically() {
        let transactions = vec![
            create_test_expense(10.0, TODAY, "Transport"),
            create_test_expense(10.0, TODAY, "Groceries"),
        ];

        let insights = calculate_insights(&transactions, TODAY, &formatter());

        assert_eq!(insights.top_category.as_deref(), Some("Groceries"));
    }

    #[test]
    fn reports_weekly_and_monthly_changes() {
        let transactions = vec![
            // This week and this month.
            create_test_expense(150.0, date!(2024 - 03 - 30), "Food"),
            // Last week, still this month.
            create_test_expense(100.0, date!(2024 - 03 - 22), "Food"),
            // Last month.
            create_test_expense(500.0, date!(2024 - 02 - 15), "Rent"),
        ];

        let insights = calculate_insights(&transactions, TODAY, &formatter());

        assert_eq!(insights.this_week_spending, 150.0);
        assert_eq!(insights.this_month_spending, 250.0);
        assert!(
            insights
                .messages
                .contains(&"Weekly spending is up 50.0% compared to last week".to_owned()),
            "got {:?}",
            insights.messages
        );
        assert!(
            insights
                .messages
                .contains(&"Monthly spending decreased by 50.0% compared to last month".to_owned()),
            "got {:?}",
            insights.messages
        );
    }

    #[test]
    fn small_changes_are_not_reported() {
        let transactions = vec![
            create_test_expense(105.0, date!(2024 - 03 - 30), "Food"),
            create_test_expense(100.0, date!(2024 - 03 - 22), "Food"),
        ];

        let insights = calculate_insights(&transactions, TODAY, &formatter());

        assert!(!insights.messages.iter().any(|m| m.starts_with("Weekly")));
    }

    #[test]
    fn undated_expenses_count_towards_totals_only() {
        let transactions = vec![Transaction::build(40.0, TransactionType::Expense)];

        let insights = calculate_insights(&transactions, TODAY, &formatter());

        assert_eq!(insights.total_spent, 40.0);
        assert_eq!(insights.this_week_spending, 0.0);
        assert_eq!(insights.this_month_spending, 0.0);
    }

    #[test]
    fn deserializes_partial_server_payload() {
        let insights: Insights = serde_json::from_value(json!({
            "total_spent": 12.5,
            "category_breakdown": {"Food": 12.5},
            "top_category": "Food",
            "insights": ["Total spent across all transactions: $12.50"]
        }))
        .unwrap();

        assert_eq!(insights.total_spent, 12.5);
        assert_eq!(insights.transaction_count, 0);
        assert_eq!(insights.messages.len(), 1);
    }
}
