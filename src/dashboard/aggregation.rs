//! Transaction aggregation for the dashboard charts and summary cards.
//!
//! Provides functions to group transaction amounts by day, split totals by
//! transaction type, and compute the savings rate.

use std::collections::BTreeMap;

use serde::Serialize;
use time::{Date, Month};

use crate::transaction::{Transaction, TransactionType};

/// The summed amount of the transactions on one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyBucket {
    /// The calendar date the bucket covers.
    pub date: Date,
    /// The chart label for the date, e.g. "Jan 1".
    pub day: String,
    /// The sum of the amounts on `date`.
    pub total_amount: f64,
}

/// Income and expense totals over a set of transactions.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunningTotals {
    /// The sum of all income amounts.
    pub total_income: f64,
    /// The sum of all expense amounts.
    pub total_expenses: f64,
}

impl RunningTotals {
    /// Income minus expenses.
    pub fn balance(&self) -> f64 {
        self.total_income - self.total_expenses
    }

    /// The share of income that was not spent, as a percentage in `[0, 100]`.
    ///
    /// Zero when there is no income.
    pub fn savings_rate_percent(&self) -> f64 {
        if self.total_income > 0.0 {
            (self.balance() / self.total_income * 100.0).clamp(0.0, 100.0)
        } else {
            0.0
        }
    }
}

/// Which transactions the daily chart shows.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ChartMode {
    /// Income and expenses together.
    All,
    /// Expenses only.
    #[default]
    Expenses,
}

/// Keeps the transactions of one type, preserving their order.
pub fn filter_by_type<'a, I>(
    transactions: I,
    kind: TransactionType,
) -> impl Iterator<Item = &'a Transaction>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    transactions
        .into_iter()
        .filter(move |transaction| transaction.kind == kind)
}

/// Sums transaction amounts per calendar day.
///
/// Transactions without a date are skipped. Buckets are sorted by date,
/// oldest first, and only the `limit` most recent days are returned.
pub fn group_by_day<'a, I>(transactions: I, limit: usize) -> Vec<DailyBucket>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut totals: BTreeMap<Date, f64> = BTreeMap::new();

    for transaction in transactions {
        if let Some(date) = transaction.date {
            *totals.entry(date).or_insert(0.0) += transaction.amount;
        }
    }

    let skip = totals.len().saturating_sub(limit);

    totals
        .into_iter()
        .skip(skip)
        .map(|(date, total_amount)| DailyBucket {
            date,
            day: format_day_label(date),
            total_amount,
        })
        .collect()
}

/// Sums income and expense amounts in a single pass.
///
/// Amounts are summed as is, without rounding.
pub fn compute_totals<'a, I>(transactions: I) -> RunningTotals
where
    I: IntoIterator<Item = &'a Transaction>,
{
    transactions
        .into_iter()
        .fold(RunningTotals::default(), |mut totals, transaction| {
            match transaction.kind {
                TransactionType::Income => totals.total_income += transaction.amount,
                TransactionType::Expense => totals.total_expenses += transaction.amount,
            }

            totals
        })
}

/// The last `count` transactions, newest first.
pub fn recent_transactions(transactions: &[Transaction], count: usize) -> Vec<Transaction> {
    transactions.iter().rev().take(count).cloned().collect()
}

/// Formats a date as a three-letter month abbreviation and the day, e.g. "Jan 1".
pub fn format_day_label(date: Date) -> String {
    format!("{} {}", month_abbreviation(date.month()), date.day())
}

fn month_abbreviation(month: Month) -> &'static str {
    match month {
        Month::January => "Jan",
        Month::February => "Feb",
        Month::March => "Mar",
        Month::April => "Apr",
        Month::May => "May",
        Month::June => "Jun",
        Month::July => "Jul",
        Month::August => "Aug",
        Month::September => "Sep",
        Month::October => "Oct",
        Month::November => "Nov",
        Month::December => "Dec",
    }
}

#[cfg(test)]
mod tests {
    use time::{Date, macros::date};

    use crate::{
        dashboard::aggregation::{
            RunningTotals, compute_totals, filter_by_type, format_day_label, group_by_day,
            recent_transactions,
        },
        transaction::{Transaction, TransactionType},
    };

    fn create_test_transaction(amount: f64, date: Date, kind: TransactionType) -> Transaction {
        Transaction::build(amount, kind).date(date)
    }

    fn example_transactions() -> Vec<Transaction> {
        vec![
            create_test_transaction(100.0, date!(2024 - 01 - 01), TransactionType::Income),
            create_test_transaction(40.0, date!(2024 - 01 - 01), TransactionType::Expense),
            create_test_transaction(10.0, date!(2024 - 01 - 02), TransactionType::Expense),
        ]
    }

    #[test]
    fn compute_totals_splits_by_type() {
        let totals = compute_totals(&example_transactions());

        assert_eq!(totals.total_income, 100.0);
        assert_eq!(totals.total_expenses, 50.0);
        assert_eq!(totals.balance(), 50.0);
        assert_eq!(totals.savings_rate_percent(), 50.0);
    }

    #[test]
    fn compute_totals_is_order_independent() {
        let transactions = example_transactions();
        let reversed: Vec<_> = transactions.iter().rev().cloned().collect();
        let rotated: Vec<_> = transactions[1..]
            .iter()
            .chain(&transactions[..1])
            .cloned()
            .collect();

        let want = compute_totals(&transactions);

        assert_eq!(compute_totals(&reversed), want);
        assert_eq!(compute_totals(&rotated), want);
    }

    #[test]
    fn compute_totals_counts_undated_transactions() {
        let transactions = vec![
            Transaction::build(30.0, TransactionType::Expense),
            Transaction::build(70.0, TransactionType::Income),
        ];

        let totals = compute_totals(&transactions);

        assert_eq!(totals.total_expenses, 30.0);
        assert_eq!(totals.total_income, 70.0);
    }

    #[test]
    fn compute_totals_sums_negative_amounts() {
        let transactions = vec![
            create_test_transaction(50.0, date!(2024 - 01 - 01), TransactionType::Expense),
            create_test_transaction(-20.0, date!(2024 - 01 - 02), TransactionType::Expense),
        ];

        assert_eq!(compute_totals(&transactions).total_expenses, 30.0);
    }

    #[test]
    fn empty_input_has_zero_totals_and_savings_rate() {
        let transactions: Vec<Transaction> = Vec::new();

        let totals = compute_totals(&transactions);

        assert_eq!(totals, RunningTotals::default());
        assert_eq!(totals.savings_rate_percent(), 0.0);
        assert!(group_by_day(&transactions, 7).is_empty());
    }

    #[test]
    fn savings_rate_is_clamped() {
        let overspent = RunningTotals {
            total_income: 100.0,
            total_expenses: 250.0,
        };
        let refunded = RunningTotals {
            total_income: 100.0,
            total_expenses: -20.0,
        };

        assert_eq!(overspent.savings_rate_percent(), 0.0);
        assert_eq!(refunded.savings_rate_percent(), 100.0);
    }

    #[test]
    fn savings_rate_is_zero_without_income() {
        let totals = RunningTotals {
            total_income: 0.0,
            total_expenses: 80.0,
        };

        assert_eq!(totals.savings_rate_percent(), 0.0);
        assert_eq!(totals.balance(), -80.0);
    }

    #[test]
    fn group_by_day_sums_expenses_per_day() {
        let transactions = example_transactions();

        let buckets = group_by_day(
            filter_by_type(&transactions, TransactionType::Expense),
            7,
        );

        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].day, "Jan 1");
        assert_eq!(buckets[0].total_amount, 40.0);
        assert_eq!(buckets[1].day, "Jan 2");
        assert_eq!(buckets[1].total_amount, 10.0);
    }

    #[test]
    fn group_by_day_sorts_by_date_across_month_boundaries() {
        let transactions = vec![
            create_test_transaction(1.0, date!(2024 - 02 - 03), TransactionType::Expense),
            create_test_transaction(2.0, date!(2024 - 01 - 30), TransactionType::Expense),
            create_test_transaction(3.0, date!(2024 - 01 - 04), TransactionType::Expense),
        ];

        let buckets = group_by_day(&transactions, 7);

        let labels: Vec<_> = buckets.iter().map(|bucket| bucket.day.as_str()).collect();
        assert_eq!(labels, vec!["Jan 4", "Jan 30", "Feb 3"]);
    }

    #[test]
    fn group_by_day_keeps_the_most_recent_days() {
        let transactions: Vec<_> = (1..=10)
            .map(|day| {
                create_test_transaction(
                    day as f64,
                    Date::from_calendar_date(2024, time::Month::March, day).unwrap(),
                    TransactionType::Expense,
                )
            })
            .collect();

        let buckets = group_by_day(&transactions, 7);

        assert_eq!(buckets.len(), 7);
        assert_eq!(buckets[0].date, date!(2024 - 03 - 04));
        assert_eq!(buckets[6].date, date!(2024 - 03 - 10));
        assert!(buckets.windows(2).all(|pair| pair[0].date < pair[1].date));
    }

    #[test]
    fn group_by_day_keeps_same_day_of_different_years_apart() {
        let transactions = vec![
            create_test_transaction(5.0, date!(2023 - 01 - 01), TransactionType::Expense),
            create_test_transaction(7.0, date!(2024 - 01 - 01), TransactionType::Expense),
        ];

        let buckets = group_by_day(&transactions, 7);

        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].total_amount, 5.0);
        assert_eq!(buckets[1].total_amount, 7.0);
    }

    #[test]
    fn group_by_day_skips_undated_transactions() {
        let transactions = vec![
            create_test_transaction(5.0, date!(2024 - 01 - 01), TransactionType::Expense),
            Transaction::build(100.0, TransactionType::Expense),
        ];

        let buckets = group_by_day(&transactions, 7);

        let total: f64 = buckets.iter().map(|bucket| bucket.total_amount).sum();
        assert_eq!(total, 5.0);
    }

    #[test]
    fn group_by_day_total_matches_input_total() {
        let transactions = example_transactions();

        let buckets = group_by_day(&transactions, 7);

        let bucket_total: f64 = buckets.iter().map(|bucket| bucket.total_amount).sum();
        let input_total: f64 = transactions.iter().map(|t| t.amount).sum();
        assert_eq!(bucket_total, input_total);
    }

    #[test]
    fn group_by_day_is_repeatable() {
        let transactions = example_transactions();

        assert_eq!(group_by_day(&transactions, 7), group_by_day(&transactions, 7));
    }

    #[test]
    fn filter_by_type_preserves_order() {
        let transactions = vec![
            create_test_transaction(1.0, date!(2024 - 01 - 03), TransactionType::Expense),
            create_test_transaction(2.0, date!(2024 - 01 - 01), TransactionType::Income),
            create_test_transaction(3.0, date!(2024 - 01 - 02), TransactionType::Expense),
        ];

        let amounts: Vec<_> = filter_by_type(&transactions, TransactionType::Expense)
            .map(|t| t.amount)
            .collect();

        assert_eq!(amounts, vec![1.0, 3.0]);
    }

    #[test]
    fn recent_transactions_are_newest_first() {
        let transactions: Vec<_> = (1..=7)
            .map(|amount| Transaction::build(amount as f64, TransactionType::Expense))
            .collect();

        let amounts: Vec<_> = recent_transactions(&transactions, 5)
            .iter()
            .map(|t| t.amount)
            .collect();

        assert_eq!(amounts, vec![7.0, 6.0, 5.0, 4.0, 3.0]);
    }

    #[test]
    fn format_day_label_has_no_leading_zero() {
        assert_eq!(format_day_label(date!(2024 - 12 - 05)), "Dec 5");
    }
}
