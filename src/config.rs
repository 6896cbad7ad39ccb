//! Configuration Module
//!
//! Handles loading server and scoring configuration from environment
//! variables.

use std::env;
use std::str::FromStr;

use chrono::NaiveTime;
use thiserror::Error;
use tracing::debug;

use crate::receipt::{is_clock_time, parse_cents, Multipliers, Options};

/// Configuration values that are present but unusable.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: &'static str,
    },

    #[error("purchase window start {start} must be before end {end}")]
    InvalidWindow { start: String, end: String },
}

/// Runtime stage; selects the log format and verbosity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Production,
}

impl AppEnvironment {
    fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            _ => Self::Development,
        }
    }

    /// Reads `APP_ENV`; anything other than `prod` is development.
    pub fn current() -> Self {
        env::var("APP_ENV")
            .map(|v| Self::parse(&v))
            .unwrap_or(Self::Development)
    }

    pub fn is_production(self) -> bool {
        self == Self::Production
    }
}

/// Server configuration parameters.
///
/// Every value has a default; only values that are set but unparsable are
/// errors.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub environment: AppEnvironment,
    /// Port of the public receipts API
    pub app_port: u16,
    /// Port of the admin API (health, stats)
    pub admin_port: u16,
    /// Maximum number of scores kept in memory
    pub cache_capacity: usize,
    pub options: Options,
    pub multipliers: Multipliers,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `APP_ENV` - `prod` for JSON logs (default: dev)
    /// - `APP_PORT` / `ADMIN_PORT` - HTTP ports (default: 8080 / 8081)
    /// - `CACHE_CAP` - Maximum stored scores (default: 1000)
    /// - `MULT_*` - Rule weights
    /// - `START_TIME` / `END_TIME` - Bonus window (default: 14:00 / 16:00)
    /// - `TOTAL_MULTIPLE`, `ITEMS_MULTIPLE`, `DESCRIPTION_MULTIPLE` - Rule divisors
    ///
    /// A `.env` file is not read here; load it first with `dotenvy`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a Config from any key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let reader = Reader { lookup };

        let environment = reader
            .raw("APP_ENV")
            .map(|v| AppEnvironment::parse(&v))
            .unwrap_or(defaults.environment);

        let window_start = reader.clock_time("START_TIME", defaults.options.window_start)?;
        let window_end = reader.clock_time("END_TIME", defaults.options.window_end)?;
        if window_start >= window_end {
            return Err(ConfigError::InvalidWindow {
                start: window_start.format("%H:%M").to_string(),
                end: window_end.format("%H:%M").to_string(),
            });
        }

        let options = Options {
            window_start,
            window_end,
            total_divisor_cents: reader
                .cents("TOTAL_MULTIPLE", defaults.options.total_divisor_cents)?,
            items_batch_size: reader.number("ITEMS_MULTIPLE", defaults.options.items_batch_size)?,
            description_divisor: reader
                .number("DESCRIPTION_MULTIPLE", defaults.options.description_divisor)?,
        };

        let m = defaults.multipliers;
        let multipliers = Multipliers {
            retailer: reader.number("MULT_RETAILER", m.retailer)?,
            round_total: reader.number("MULT_ROUND_TOTAL", m.round_total)?,
            divisible_total: reader.number("MULT_DIVISIBLE_TOTAL", m.divisible_total)?,
            items: reader.weight("MULT_ITEMS", m.items)?,
            description: reader.weight("MULT_DESCRIPTION", m.description)?,
            purchase_time: reader.number("MULT_PURCHASE_TIME", m.purchase_time)?,
            purchase_date: reader.number("MULT_PURCHASE_DATE", m.purchase_date)?,
        };

        Ok(Self {
            environment,
            app_port: reader.number("APP_PORT", defaults.app_port)?,
            admin_port: reader.number("ADMIN_PORT", defaults.admin_port)?,
            cache_capacity: reader.number("CACHE_CAP", defaults.cache_capacity)?,
            options,
            multipliers,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: AppEnvironment::Development,
            app_port: 8080,
            admin_port: 8081,
            cache_capacity: 1000,
            options: Options::default(),
            multipliers: Multipliers::default(),
        }
    }
}

struct Reader<F> {
    lookup: F,
}

impl<F> Reader<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn raw(&self, key: &'static str) -> Option<String> {
        let value = (self.lookup)(key).filter(|v| !v.trim().is_empty());
        if value.is_none() {
            debug!(key, "environment variable not set, using default");
        }
        value
    }

    fn number<T: FromStr>(&self, key: &'static str, default: T) -> Result<T, ConfigError> {
        match self.raw(key) {
            None => Ok(default),
            Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
                key,
                value,
                reason: "expected a non-negative integer",
            }),
        }
    }

    fn weight(&self, key: &'static str, default: f64) -> Result<f64, ConfigError> {
        let Some(value) = self.raw(key) else {
            return Ok(default);
        };
        match value.trim().parse::<f64>() {
            Ok(weight) if weight.is_finite() && weight >= 0.0 => Ok(weight),
            _ => Err(ConfigError::Invalid {
                key,
                value,
                reason: "expected a non-negative number",
            }),
        }
    }

    fn cents(&self, key: &'static str, default: u64) -> Result<u64, ConfigError> {
        let Some(value) = self.raw(key) else {
            return Ok(default);
        };
        parse_cents(value.trim()).ok_or(ConfigError::Invalid {
            key,
            value,
            reason: "expected an amount like 0.25",
        })
    }

    fn clock_time(&self, key: &'static str, default: NaiveTime) -> Result<NaiveTime, ConfigError> {
        let Some(value) = self.raw(key) else {
            return Ok(default);
        };
        let invalid = || ConfigError::Invalid {
            key,
            value: value.clone(),
            reason: "expected a 24-hour HH:MM time",
        };
        if !is_clock_time(value.trim()) {
            return Err(invalid());
        }
        NaiveTime::parse_from_str(value.trim(), "%H:%M").map_err(|_| invalid())
    }
}
