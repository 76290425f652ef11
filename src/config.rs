//! Settings that control how the dashboard is computed and displayed.

use crate::{Error, dashboard::CurrencyFormatter, timezone::resolve_zone, transaction::Normalizer};

/// The number of most recent days shown in the daily chart.
pub const DEFAULT_CHART_DAYS: usize = 7;

/// The number of transactions shown in the recent transactions list.
pub const DEFAULT_RECENT_COUNT: usize = 5;

/// The currency symbol used when formatting amounts.
pub const DEFAULT_CURRENCY_SYMBOL: &str = "₹";

/// The dashboard settings.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    /// The viewer's timezone as a canonical timezone name, e.g. "Asia/Kolkata".
    ///
    /// `None` uses the system's current local offset.
    pub timezone: Option<String>,

    /// How many of the most recent days with transactions to keep in the daily chart.
    pub chart_days: usize,

    /// How many of the latest transactions to list.
    pub recent_count: usize,

    /// The symbol placed in front of formatted amounts.
    pub currency_symbol: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            timezone: None,
            chart_days: DEFAULT_CHART_DAYS,
            recent_count: DEFAULT_RECENT_COUNT,
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_owned(),
        }
    }
}

impl DashboardConfig {
    /// Create a normalizer for the configured timezone.
    ///
    /// # Errors
    /// Returns [Error::InvalidTimezoneError] if the timezone name is not valid.
    pub fn normalizer(&self) -> Result<Normalizer, Error> {
        resolve_zone(self.timezone.as_deref()).map(Normalizer::in_zone)
    }

    /// Create a formatter for the configured currency symbol.
    ///
    /// # Errors
    /// Returns [Error::InvalidCurrencySymbol] if the symbol cannot be used as a prefix.
    pub fn currency_formatter(&self) -> Result<CurrencyFormatter, Error> {
        CurrencyFormatter::new(&self.currency_symbol)
    }
}
