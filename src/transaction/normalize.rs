//! Converts raw records into [Transaction]s.

use serde_json::Value;
use time::{
    Date, OffsetDateTime, PrimitiveDateTime, UtcOffset, format_description::well_known::Rfc3339,
    macros::format_description,
};

use super::{RawTransaction, Transaction, TransactionType, parse_amount};
use crate::timezone::ViewerZone;

/// The largest epoch millisecond value accepted as a numeric timestamp.
///
/// Year 9999 is the last year [OffsetDateTime] can represent by default.
const MAX_EPOCH_MILLIS: f64 = 253_402_300_799_999.0;

/// Normalizes raw records for a viewer in one time zone.
///
/// Dates are resolved to calendar dates in the viewer's time zone here, so
/// the aggregation code only ever deals with plain [Date]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Normalizer {
    zone: ViewerZone,
}

impl Normalizer {
    /// Create a normalizer for a viewer at a fixed `offset` from UTC.
    pub fn new(offset: UtcOffset) -> Self {
        Self::in_zone(ViewerZone::Fixed(offset))
    }

    /// Create a normalizer for a viewer in `zone`.
    pub fn in_zone(zone: ViewerZone) -> Self {
        Self { zone }
    }

    /// The viewer's time zone.
    pub fn zone(&self) -> ViewerZone {
        self.zone
    }

    /// Normalize every record in `records`, keeping their order.
    pub fn normalize_all(&self, records: &[RawTransaction]) -> Vec<Transaction> {
        records.iter().map(|record| self.normalize(record)).collect()
    }

    /// Normalize a single record.
    ///
    /// - The amount comes from `amount`, or `total_amount` if `amount` is
    ///   missing. Missing or non-numeric amounts become zero.
    /// - The date comes from `date`, or `timestamp` if `date` is missing.
    ///   A record without a usable date gets `None`.
    /// - A missing or unknown `type` means expense.
    ///
    /// This never fails and never drops a record.
    pub fn normalize(&self, record: &RawTransaction) -> Transaction {
        let amount = match record.first_of("amount", "total_amount") {
            Some(value) => parse_amount(value).unwrap_or_else(|| {
                tracing::warn!(
                    "treating non-numeric amount {value} of transaction {:?} as zero",
                    record.id()
                );
                0.0
            }),
            None => 0.0,
        };

        let date = record
            .first_of("date", "timestamp")
            .and_then(|value| self.resolve_date(value));

        let kind = match record.get("type") {
            None => TransactionType::Expense,
            Some(value) => value
                .as_str()
                .and_then(TransactionType::parse)
                .unwrap_or_else(|| {
                    tracing::warn!(
                        "treating unknown type {value} of transaction {:?} as an expense",
                        record.id()
                    );
                    TransactionType::Expense
                }),
        };

        Transaction {
            id: record.id(),
            date,
            merchant: record.get_str("merchant").unwrap_or_default().to_owned(),
            category: record.get_str("category").unwrap_or_default().to_owned(),
            amount,
            kind,
        }
    }

    fn resolve_date(&self, value: &Value) -> Option<Date> {
        let date = match value {
            Value::String(text) => self.parse_date_text(text.trim()),
            // Numeric timestamps are Unix epoch milliseconds.
            Value::Number(number) => epoch_millis(number)
                .and_then(|millis| {
                    OffsetDateTime::from_unix_timestamp_nanos(i128::from(millis) * 1_000_000).ok()
                })
                .map(|date_time| self.zone.to_local(date_time).date()),
            _ => None,
        };

        if date.is_none() {
            tracing::debug!("could not read a date from {value}");
        }

        date
    }

    fn parse_date_text(&self, text: &str) -> Option<Date> {
        if let Ok(date_time) = OffsetDateTime::parse(text, &Rfc3339) {
            return Some(self.zone.to_local(date_time).date());
        }

        // Date-times without an offset are wall-clock times in the viewer's zone.
        let naive_formats = [
            format_description!("[year]-[month]-[day]T[hour]:[minute]:[second][optional [.[subsecond]]]"),
            format_description!("[year]-[month]-[day] [hour]:[minute]:[second][optional [.[subsecond]]]"),
        ];

        for format in naive_formats {
            if let Ok(date_time) = PrimitiveDateTime::parse(text, format) {
                return Some(date_time.date());
            }
        }

        Date::parse(text, format_description!("[year]-[month]-[day]")).ok()
    }
}

/// Reads a JSON number as whole epoch milliseconds, truncating any fraction.
fn epoch_millis(number: &serde_json::Number) -> Option<i64> {
    number.as_i64().or_else(|| {
        number
            .as_f64()
            .filter(|millis| millis.is_finite() && millis.abs() <= MAX_EPOCH_MILLIS)
            .map(|millis| millis.trunc() as i64)
    })
}
