//! Configuration module
//!
//! Loads configuration from environment variables.

use std::env;
use std::str::FromStr;

use crate::domain::Money;
use crate::ledger::SETTLEMENT_TOLERANCE;

/// What to do when a group's net balances do not sum to zero
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConservationPolicy {
    /// Log the drift and settle what can be settled
    #[default]
    Permissive,
    /// Reject the group with `DomainError::ConservationViolated`
    Strict,
}

impl FromStr for ConservationPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "permissive" => Ok(Self::Permissive),
            "strict" => Ok(Self::Strict),
            _ => Err(ConfigError::InvalidValue("CONSERVATION_POLICY")),
        }
    }
}

/// Log output format for the binary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            _ => Err(ConfigError::InvalidValue("LOG_FORMAT")),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Residual balance treated as settled
    pub settlement_tolerance: Money,

    /// Allowed gap between an expense amount and the sum of its splits
    pub split_tolerance: Money,

    /// Behaviour when balances drift from zero
    pub conservation_policy: ConservationPolicy,

    /// Log output format
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            settlement_tolerance: SETTLEMENT_TOLERANCE,
            split_tolerance: SETTLEMENT_TOLERANCE,
            conservation_policy: ConservationPolicy::Permissive,
            log_format: LogFormat::Pretty,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key lookup (the environment, a map in tests)
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let settlement_tolerance = match lookup("SETTLEMENT_TOLERANCE") {
            Some(raw) => parse_tolerance(&raw, "SETTLEMENT_TOLERANCE")?,
            None => defaults.settlement_tolerance,
        };

        let split_tolerance = match lookup("SPLIT_TOLERANCE") {
            Some(raw) => parse_tolerance(&raw, "SPLIT_TOLERANCE")?,
            None => defaults.split_tolerance,
        };

        let conservation_policy = lookup("CONSERVATION_POLICY")
            .map(|raw| raw.parse::<ConservationPolicy>())
            .transpose()?
            .unwrap_or(defaults.conservation_policy);

        let log_format = lookup("LOG_FORMAT")
            .map(|raw| raw.parse::<LogFormat>())
            .transpose()?
            .unwrap_or(defaults.log_format);

        Ok(Self {
            settlement_tolerance,
            split_tolerance,
            conservation_policy,
            log_format,
        })
    }

    /// Check if drift should be rejected
    pub fn is_strict(&self) -> bool {
        self.conservation_policy == ConservationPolicy::Strict
    }
}

fn parse_tolerance(raw: &str, key: &'static str) -> Result<Money, ConfigError> {
    let value: Money = raw.parse().map_err(|_| ConfigError::InvalidValue(key))?;
    if value.is_negative() {
        return Err(ConfigError::InvalidValue(key));
    }
    Ok(value)
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(&'static str),
}
