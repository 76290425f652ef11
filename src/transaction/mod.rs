//! Transactions: the loosely typed records the backend returns, and the
//! canonical form the dashboard aggregates.
//!
//! Records only ever enter the aggregation code through a [Normalizer],
//! so the amount and date fallbacks live in exactly one place.

mod normalize;
mod record;

pub use normalize::Normalizer;
pub use record::{RawTransaction, parse_amount};

use serde::{Deserialize, Serialize};
use time::Date;

/// Whether money was earned or spent.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money earned.
    Income,
    /// Money spent. Records without a type are expenses.
    #[default]
    Expense,
}

impl TransactionType {
    /// Parse a type label, ignoring case and surrounding whitespace.
    ///
    /// Returns `None` for anything other than "income" or "expense".
    pub fn parse(label: &str) -> Option<Self> {
        let label = label.trim();

        if label.eq_ignore_ascii_case("income") {
            Some(Self::Income)
        } else if label.eq_ignore_ascii_case("expense") {
            Some(Self::Expense)
        } else {
            None
        }
    }

    /// The label used for this type in transaction records.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

/// A normalized income or expense record.
///
/// Every transaction has exactly one resolved amount. The date is `None`
/// when the record had no usable date, in which case the transaction still
/// counts towards totals but cannot be placed in a daily bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    /// The identifier assigned by the store, if any.
    pub id: Option<i64>,
    /// The calendar date in the viewer's time zone.
    pub date: Option<Date>,
    /// Who the money was paid to or received from. May be empty.
    pub merchant: String,
    /// A free-text label used as a grouping key. May be empty.
    pub category: String,
    /// The amount of money. Negative amounts (e.g., refunds) are kept as is.
    pub amount: f64,
    /// Whether this is income or an expense.
    #[serde(rename = "type")]
    pub kind: TransactionType,
}

impl Transaction {
    /// Create a transaction with no date, merchant or category.
    ///
    /// Use the chained setters to fill in the remaining fields.
    pub fn build(amount: f64, kind: TransactionType) -> Self {
        Self {
            id: None,
            date: None,
            merchant: String::new(),
            category: String::new(),
            amount,
            kind,
        }
    }

    /// Set the date.
    pub fn date(mut self, date: Date) -> Self {
        self.date = Some(date);
        self
    }

    /// Set the merchant.
    pub fn merchant(mut self, merchant: &str) -> Self {
        merchant.clone_into(&mut self.merchant);
        self
    }

    /// Set the category.
    pub fn category(mut self, category: &str) -> Self {
        category.clone_into(&mut self.category);
        self
    }

    /// Whether this transaction is income.
    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }
}
