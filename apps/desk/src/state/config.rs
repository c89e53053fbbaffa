//! # Configuration State
//!
//! Desk configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Command-line flags (shell only)
//! 2. Environment variables (`PHARMACY_*`)
//! 3. Defaults (this file)
//!
//! Read-only after initialization.

use std::path::PathBuf;

use pharmacy_core::{Money, DEFAULT_LOW_STOCK_THRESHOLD};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Desk configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// Store name shown by `status`
    pub store_name: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Stock rows strictly below this are reported as low
    pub low_stock_threshold: i64,

    /// Database file; `None` means the platform data directory
    pub database_path: Option<PathBuf>,
}

impl Default for ConfigState {
    /// ## Default Values
    /// - Store: "Pharmacy Desk"
    /// - Currency: `$`
    /// - Low stock: below 5 units
    /// - Database: platform data directory
    fn default() -> Self {
        ConfigState {
            store_name: "Pharmacy Desk".to_string(),
            currency_symbol: "$".to_string(),
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
            database_path: None,
        }
    }
}

impl ConfigState {
    /// Creates a new ConfigState from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `PHARMACY_DB_PATH`: database file
    /// - `PHARMACY_STORE_NAME`: store name
    /// - `PHARMACY_LOW_STOCK_THRESHOLD`: whole number of units
    /// - `PHARMACY_CURRENCY_SYMBOL`: e.g. "Rs "
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key lookup.
    ///
    /// Unparsable values are logged and ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = ConfigState::default();

        if let Some(path) = lookup("PHARMACY_DB_PATH").filter(|p| !p.trim().is_empty()) {
            config.database_path = Some(PathBuf::from(path));
        }

        if let Some(store_name) = lookup("PHARMACY_STORE_NAME") {
            config.store_name = store_name;
        }

        if let Some(symbol) = lookup("PHARMACY_CURRENCY_SYMBOL") {
            config.currency_symbol = symbol;
        }

        if let Some(raw) = lookup("PHARMACY_LOW_STOCK_THRESHOLD") {
            match raw.trim().parse::<i64>() {
                Ok(threshold) => config.low_stock_threshold = threshold,
                Err(_) => warn!(value = %raw, "Ignoring invalid PHARMACY_LOW_STOCK_THRESHOLD"),
            }
        }

        config
    }

    /// Formats an amount with the configured currency symbol.
    ///
    /// Amounts are always in cents, so two decimals are shown.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_currency(Money::from_cents(1234)), "$12.34");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        format!(
            "{}{}{}.{:02}",
            if amount.cents() < 0 { "-" } else { "" },
            self.currency_symbol,
            amount.major().abs(),
            amount.minor()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_format_currency() {
        let config = ConfigState::default();
        assert_eq!(config.format_currency(Money::from_cents(1234)), "$12.34");
        assert_eq!(config.format_currency(Money::from_cents(5)), "$0.05");
        assert_eq!(config.format_currency(Money::zero()), "$0.00");
        assert_eq!(config.format_currency(Money::from_cents(-1234)), "-$12.34");
    }

    #[test]
    fn test_defaults_without_env() {
        let config = ConfigState::from_lookup(|_| None);
        assert_eq!(config, ConfigState::default());
        assert_eq!(config.low_stock_threshold, 5);
    }

    #[test]
    fn test_env_overrides() {
        let config = ConfigState::from_lookup(lookup_from(&[
            ("PHARMACY_DB_PATH", "/tmp/p.db"),
            ("PHARMACY_STORE_NAME", "Corner Chemist"),
            ("PHARMACY_CURRENCY_SYMBOL", "Rs "),
            ("PHARMACY_LOW_STOCK_THRESHOLD", "12"),
        ]));

        assert_eq!(config.database_path, Some(PathBuf::from("/tmp/p.db")));
        assert_eq!(config.store_name, "Corner Chemist");
        assert_eq!(config.low_stock_threshold, 12);
        assert_eq!(config.format_currency(Money::from_cents(750)), "Rs 7.50");
    }

    #[test]
    fn test_invalid_threshold_keeps_default() {
        let config =
            ConfigState::from_lookup(lookup_from(&[("PHARMACY_LOW_STOCK_THRESHOLD", "lots")]));
        assert_eq!(config.low_stock_threshold, DEFAULT_LOW_STOCK_THRESHOLD);
    }
}
