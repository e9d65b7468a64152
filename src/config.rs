//! Settings for computing sales and inventory views.

use time::{OffsetDateTime, UtcOffset};

use crate::{Error, timezone::get_local_offset};

/// Products with fewer units than this are flagged as low on stock.
pub const DEFAULT_LOW_STOCK_THRESHOLD: u32 = 10;

const TIMEZONE_VAR: &str = "VENMOL_TIMEZONE";
const LOW_STOCK_THRESHOLD_VAR: &str = "VENMOL_LOW_STOCK_THRESHOLD";

/// The config for the sales and inventory views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalesConfig {
    /// The local timezone as a canonical timezone name, e.g. "America/El_Salvador".
    ///
    /// Decides which sales count as made "today".
    pub local_timezone: String,
    /// Products with fewer units than this are counted as low on stock.
    pub low_stock_threshold: u32,
}

impl Default for SalesConfig {
    fn default() -> Self {
        Self {
            local_timezone: "UTC".to_owned(),
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
        }
    }
}

impl SalesConfig {
    /// Read the config from the `VENMOL_TIMEZONE` and
    /// `VENMOL_LOW_STOCK_THRESHOLD` environment variables, falling back to
    /// the defaults for unset variables.
    ///
    /// # Errors
    /// Returns [Error::InvalidConfig] if the threshold is not a non-negative integer.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
        let defaults = Self::default();

        let local_timezone = lookup(TIMEZONE_VAR)
            .map(|timezone| timezone.trim().to_owned())
            .filter(|timezone| !timezone.is_empty())
            .unwrap_or(defaults.local_timezone);

        let low_stock_threshold = match lookup(LOW_STOCK_THRESHOLD_VAR) {
            Some(text) => text.trim().parse().map_err(|error| {
                Error::InvalidConfig(format!(
                    "{LOW_STOCK_THRESHOLD_VAR} should be a non-negative integer, got \"{text}\": {error}"
                ))
            })?,
            None => defaults.low_stock_threshold,
        };

        Ok(Self {
            local_timezone,
            low_stock_threshold,
        })
    }

    /// The UTC offset of the configured timezone at the instant `at`.
    ///
    /// # Errors
    /// Returns [Error::InvalidTimezoneError] if the timezone name is not known.
    pub fn local_offset(&self, at: OffsetDateTime) -> Result<UtcOffset, Error> {
        get_local_offset(&self.local_timezone, at)
            .ok_or_else(|| Error::InvalidTimezoneError(self.local_timezone.clone()))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use time::macros::{datetime, offset};

    use crate::Error;

    use super::{DEFAULT_LOW_STOCK_THRESHOLD, SalesConfig};

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();

        move |name| vars.get(name).cloned()
    }

    #[test]
    fn unset_variables_use_defaults() {
        let config = SalesConfig::from_lookup(lookup_from(&[])).unwrap();

        assert_eq!(config, SalesConfig::default());
        assert_eq!(config.low_stock_threshold, DEFAULT_LOW_STOCK_THRESHOLD);
    }

    #[test]
    fn reads_variables() {
        let config = SalesConfig::from_lookup(lookup_from(&[
            ("VENMOL_TIMEZONE", "America/El_Salvador"),
            ("VENMOL_LOW_STOCK_THRESHOLD", " 5 "),
        ]))
        .unwrap();

        assert_eq!(config.local_timezone, "America/El_Salvador");
        assert_eq!(config.low_stock_threshold, 5);
    }

    #[test]
    fn rejects_invalid_threshold() {
        let got = SalesConfig::from_lookup(lookup_from(&[("VENMOL_LOW_STOCK_THRESHOLD", "-1")]));

        assert!(matches!(got, Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn local_offset_resolves_timezone() {
        let config = SalesConfig {
            local_timezone: "America/El_Salvador".to_owned(),
            ..Default::default()
        };

        assert_eq!(
            config.local_offset(datetime!(2024-06-01 12:00 UTC)),
            Ok(offset!(-6))
        );
    }

    #[test]
    fn local_offset_rejects_unknown_timezone() {
        let config = SalesConfig {
            local_timezone: "Nowhere/Special".to_owned(),
            ..Default::default()
        };

        assert_eq!(
            config.local_offset(datetime!(2024-06-01 12:00 UTC)),
            Err(Error::InvalidTimezoneError("Nowhere/Special".to_owned()))
        );
    }
}
