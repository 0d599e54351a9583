//! Environment configuration helpers
//!
//! Small typed readers over `std::env` shared by every crate that loads
//! settings at startup. Missing optional values fall back to defaults;
//! present but malformed values are errors rather than silently ignored.

use std::env;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} has an invalid value: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Non-empty value of `key`, or `None` when unset or blank
pub fn optional(key: &'static str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub fn required(key: &'static str) -> Result<String, ConfigError> {
    optional(key).ok_or(ConfigError::Missing(key))
}

pub fn or_default(key: &'static str, default: &str) -> String {
    optional(key).unwrap_or_else(|| default.to_string())
}

/// Parse `key` with `FromStr`, falling back to `default` when unset
pub fn parse_or<T>(key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match optional(key) {
        Some(raw) => parse_value(key, &raw),
        None => Ok(default),
    }
}

/// Accepts `true/false`, `1/0`, `yes/no`, `on/off`
pub fn flag(key: &'static str, default: bool) -> Result<bool, ConfigError> {
    match optional(key) {
        Some(raw) => parse_flag(key, &raw),
        None => Ok(default),
    }
}

/// Comma-separated list with blanks dropped
pub fn list(key: &'static str) -> Vec<String> {
    optional(key).map(|raw| split_list(&raw)).unwrap_or_default()
}

fn parse_value<T>(key: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse().map_err(|e: T::Err| ConfigError::Invalid {
        key,
        reason: e.to_string(),
    })
}

fn parse_flag(key: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        other => Err(ConfigError::Invalid {
            key,
            reason: format!("expected a boolean, got {other:?}"),
        }),
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
