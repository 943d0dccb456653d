//! # Display Configuration
//!
//! How amounts and dates are rendered in the views.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`GANADERA_CURRENCY_SYMBOL`, `GANADERA_DATE_FORMAT`)
//! 2. Defaults (this file)
//!
//! Read-only after startup.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use ganadera_core::Money;

pub const ENV_CURRENCY_SYMBOL: &str = "GANADERA_CURRENCY_SYMBOL";
pub const ENV_DATE_FORMAT: &str = "GANADERA_DATE_FORMAT";

/// Shown where a value is absent (no email, no registration date).
pub const EMPTY_CELL: &str = "-";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayConfig {
    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Number of decimal places for currency
    pub currency_decimals: u8,

    /// `chrono` format string for dates
    pub date_format: String,
}

impl Default for DisplayConfig {
    /// US dollars, day-month-year dates ("05 Jul 2024").
    fn default() -> Self {
        DisplayConfig {
            currency_symbol: "$".to_string(),
            currency_decimals: 2,
            date_format: "%d %b %Y".to_string(),
        }
    }
}

impl DisplayConfig {
    pub fn from_env() -> Self {
        Self::default().with_env(|key| std::env::var(key).ok())
    }

    /// Applies overrides from `lookup`. Blank values are ignored.
    pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let present = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(symbol) = present(ENV_CURRENCY_SYMBOL) {
            self.currency_symbol = symbol;
        }
        if let Some(format) = present(ENV_DATE_FORMAT) {
            self.date_format = format;
        }
        self
    }

    /// Formats an amount as a currency string.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let config = DisplayConfig::default();
    /// assert_eq!(config.format_money(Money::from_cents(3150)), "$31.50");
    /// ```
    pub fn format_money(&self, amount: Money) -> String {
        let cents = amount.cents();
        let decimals = u32::from(self.currency_decimals.min(2));
        let divisor = 10_i64.pow(decimals);
        let scaled = cents / 10_i64.pow(2 - decimals);
        let whole = scaled / divisor;
        let frac = (scaled % divisor).abs();

        format!(
            "{}{}{}",
            if cents < 0 { "-" } else { "" },
            self.currency_symbol,
            if decimals > 0 {
                format!("{}.{:0width$}", whole.abs(), frac, width = decimals as usize)
            } else {
                whole.abs().to_string()
            }
        )
    }

    /// Formats an optional amount; absent renders as [`EMPTY_CELL`].
    pub fn format_optional_money(&self, amount: Option<Money>) -> String {
        amount.map_or_else(|| EMPTY_CELL.to_string(), |m| self.format_money(m))
    }

    pub fn format_date(&self, at: &DateTime<Utc>) -> String {
        at.format(&self.date_format).to_string()
    }

    pub fn format_optional_date(&self, at: Option<&DateTime<Utc>>) -> String {
        at.map_or_else(|| EMPTY_CELL.to_string(), |at| self.format_date(at))
    }
}
