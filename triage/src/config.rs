use std::env;

use crate::adapters::CustomerThresholds;
use crate::error::ConfigError;

const HIGH_REVENUE: &str = "TRIAGE_HIGH_REVENUE";
const MEDIUM_REVENUE: &str = "TRIAGE_MEDIUM_REVENUE";
const MANY_PREVIOUS_TICKETS: &str = "TRIAGE_MANY_PREVIOUS_TICKETS";
const SOME_PREVIOUS_TICKETS: &str = "TRIAGE_SOME_PREVIOUS_TICKETS";
const MONOTONIC_PRIORITY: &str = "TRIAGE_MONOTONIC_PRIORITY";
const MAX_CONCURRENCY: &str = "TRIAGE_MAX_CONCURRENCY";

/// Worker limit for batch processing when none is configured
pub const DEFAULT_MAX_CONCURRENCY: usize = 8;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Revenue and history thresholds for the customer context analyzer
    pub thresholds: CustomerThresholds,
    /// Maximum tickets analyzed in parallel by `process_batch`
    pub max_concurrency: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            thresholds: CustomerThresholds::default(),
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
        }
    }
}

impl Config {
    /// Load from the process environment (and `.env` if present).
    /// Unset variables keep their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = CustomerThresholds::default();

        let thresholds = CustomerThresholds {
            high_revenue: parse_revenue(&lookup, HIGH_REVENUE)?.unwrap_or(defaults.high_revenue),
            medium_revenue: parse_revenue(&lookup, MEDIUM_REVENUE)?
                .unwrap_or(defaults.medium_revenue),
            many_previous_tickets: parse_count(&lookup, MANY_PREVIOUS_TICKETS)?
                .unwrap_or(defaults.many_previous_tickets),
            some_previous_tickets: parse_count(&lookup, SOME_PREVIOUS_TICKETS)?
                .unwrap_or(defaults.some_previous_tickets),
            monotonic_priority: parse_bool(&lookup, MONOTONIC_PRIORITY)?
                .unwrap_or(defaults.monotonic_priority),
        };

        let max_concurrency = match lookup(MAX_CONCURRENCY) {
            Some(raw) => {
                let n: usize = raw.trim().parse().map_err(|_| invalid(
                    MAX_CONCURRENCY,
                    &raw,
                    "expected a positive integer",
                ))?;
                if n == 0 {
                    return Err(invalid(MAX_CONCURRENCY, &raw, "must be at least 1"));
                }
                n
            }
            None => DEFAULT_MAX_CONCURRENCY,
        };

        let config = Self {
            thresholds,
            max_concurrency,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let t = &self.thresholds;
        if t.medium_revenue > t.high_revenue {
            return Err(ConfigError::Inconsistent(format!(
                "{} ({}) must not exceed {} ({})",
                MEDIUM_REVENUE, t.medium_revenue, HIGH_REVENUE, t.high_revenue
            )));
        }
        if t.some_previous_tickets > t.many_previous_tickets {
            return Err(ConfigError::Inconsistent(format!(
                "{} ({}) must not exceed {} ({})",
                SOME_PREVIOUS_TICKETS,
                t.some_previous_tickets,
                MANY_PREVIOUS_TICKETS,
                t.many_previous_tickets
            )));
        }
        Ok(())
    }
}

fn invalid(key: &'static str, value: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn parse_revenue<F>(lookup: &F, key: &'static str) -> Result<Option<f64>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };
    let amount: f64 = raw
        .trim()
        .parse()
        .map_err(|_| invalid(key, &raw, "expected a number"))?;
    if !amount.is_finite() || amount < 0.0 {
        return Err(invalid(key, &raw, "must be a finite number >= 0"));
    }
    Ok(Some(amount))
}

fn parse_count<F>(lookup: &F, key: &'static str) -> Result<Option<u32>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse()
                .map_err(|_| invalid(key, &raw, "expected a non-negative integer"))
        })
        .transpose()
}

fn parse_bool<F>(lookup: &F, key: &'static str) -> Result<Option<bool>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(Some(true)),
        "0" | "false" | "no" | "off" => Ok(Some(false)),
        _ => Err(invalid(key, &raw, "expected true or false")),
    }
}
