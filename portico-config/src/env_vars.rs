//! Typed lookups used by hand-written [`FromEnv`](crate::FromEnv) impls.

use std::env;
use std::fmt::Display;
use std::str::FromStr;

use crate::ConfigError;

fn parse<T>(key: &str, raw: String) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError::ParseError {
        key: key.to_string(),
        message: e.to_string(),
    })
}

/// Errors with [`ConfigError::MissingEnvVar`] when `key` is unset.
pub fn required<T>(key: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    let raw = env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))?;
    parse(key, raw)
}

/// `None` when `key` is unset or empty.
pub fn optional<T>(key: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => parse(key, raw).map(Some),
        _ => Ok(None),
    }
}

pub fn or_default<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    Ok(optional(key)?.unwrap_or(default))
}
