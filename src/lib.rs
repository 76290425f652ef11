//! Finance Dashboard turns a personal finance tracker's transaction records
//! into the numbers its dashboard shows.
//!
//! Records arrive loosely typed (two historical field names for the amount
//! and for the date, an optional type). They are normalized once into
//! [Transaction]s and then aggregated into daily chart buckets, income and
//! expense totals, a savings rate, and a spending insights summary.
//!
//! The bill-extraction, chat, authentication and storage backends are
//! external collaborators. This library defines their interfaces in
//! [backend] and ships a JSON-file [TransactionStore](backend::TransactionStore).

#![warn(missing_docs)]

pub mod backend;
pub mod config;
pub mod dashboard;
pub mod logging;
pub mod timezone;
pub mod transaction;

pub use config::DashboardConfig;
pub use dashboard::{
    ChartMode, DailyBucket, DashboardSummary, Insights, RunningTotals, build_dashboard,
    calculate_insights, compute_totals, filter_by_type, group_by_day, recent_transactions,
    summarize,
};
pub use transaction::{Normalizer, RawTransaction, Transaction, TransactionType};

/// The errors that may occur in the application.
///
/// The aggregation engine itself never fails. These errors come from the
/// boundaries: configuration, the transaction file and the external backends.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// The currency symbol could not be used to build a number formatter.
    #[error("invalid currency symbol \"{0}\"")]
    InvalidCurrencySymbol(String),

    /// The transactions file could not be read or written.
    ///
    /// Callers should pass in the file path and the original error as a string.
    #[error("could not access the transactions file {0}: {1}")]
    StoreError(String, String),

    /// The log file could not be opened.
    #[error("could not open the log file {0}: {1}")]
    LogFileError(String, String),

    /// An error occurred while serializing a struct as JSON
    #[error("could not serialize as JSON: {0}")]
    JSONSerializationError(String),

    /// Tried to delete a transaction that does not exist
    #[error("tried to delete a transaction that is not in the store")]
    DeleteMissingTransaction,

    /// The user provided an invalid email or an empty password.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// An uploaded bill was not an image.
    #[error("only image files are accepted")]
    NotAnImage,

    /// An uploaded bill was larger than the upload limit.
    #[error("file size of {0} bytes exceeds the {1} byte limit")]
    FileTooLarge(usize, usize),

    /// The bill-extraction backend returned nothing.
    #[error("empty response from the bill extraction backend")]
    EmptyExtraction,

    /// The bill-extraction backend returned text that is not a JSON object.
    #[error("could not parse the extracted bill: {0}")]
    InvalidExtraction(String),

    /// An external backend failed.
    ///
    /// The string should name the backend and include its error message.
    #[error("backend request failed: {0}")]
    BackendError(String),
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        tracing::error!("could not serialize as JSON: {value}");
        Error::JSONSerializationError(value.to_string())
    }
}
