//! Number formatting for display. Amounts are only rounded here, never
//! before they are summed.

use numfmt::{Formatter, Precision};

use crate::Error;

/// Formats amounts as currency with two decimal places, e.g. "₹1,234.50".
pub struct CurrencyFormatter {
    symbol: String,
    positive: Formatter,
    negative: Formatter,
}

impl CurrencyFormatter {
    /// Create a formatter that puts `symbol` in front of amounts.
    ///
    /// # Errors
    /// Returns [Error::InvalidCurrencySymbol] if numfmt rejects the symbol as a prefix.
    pub fn new(symbol: &str) -> Result<Self, Error> {
        let build = |prefix: &str| {
            Formatter::currency(prefix)
                .map(|formatter| formatter.precision(Precision::Decimals(2)))
                .map_err(|_| {
                    tracing::error!("could not create a currency formatter for \"{symbol}\"");
                    Error::InvalidCurrencySymbol(symbol.to_owned())
                })
        };

        Ok(Self {
            symbol: symbol.to_owned(),
            positive: build(symbol)?,
            negative: build(&format!("-{symbol}"))?,
        })
    }

    /// The currency symbol.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Format `number` with the currency symbol and two decimal places.
    pub fn format(&self, number: f64) -> String {
        let formatted = if number < 0.0 {
            self.negative.fmt_string(number.abs())
        } else if number > 0.0 {
            self.positive.fmt_string(number)
        } else {
            // Zero is hardcoded as "0", so we must specify the formatted string for zero
            return format!("{}0.00", self.symbol);
        };

        pad_decimals(formatted)
    }
}

/// numfmt drops trailing zeros, e.g. "12.30" is rendered as "12.3".
fn pad_decimals(mut formatted: String) -> String {
    match formatted.rfind('.') {
        Some(index) => {
            let decimals = formatted.len() - index - 1;
            for _ in decimals..2 {
                formatted.push('0');
            }
        }
        None => formatted.push_str(".00"),
    }

    formatted
}

/// Formats a percentage with no decimal places, avoiding "-0".
pub fn format_percentage(value: f64) -> String {
    let rounded = value.round();
    if rounded.abs() < 0.5 {
        "0".to_string()
    } else {
        format!("{rounded:.0}")
    }
}
