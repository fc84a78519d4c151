//! Environment variable lookup.
//!
//! Configuration loaders take a lookup function instead of reading the
//! process environment directly, so tests can feed a map without mutating
//! global state. [`process_env`] is the lookup used in production.

use crate::PlatformError;

/// Look up a variable in the process environment.
///
/// Variables that are unset or not valid unicode yield `None`.
#[must_use]
pub fn process_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Read a variable, defaulting to the empty string when unset.
pub fn var_or_empty<L>(lookup: &L, name: &str) -> String
where
    L: Fn(&str) -> Option<String>,
{
    lookup(name).unwrap_or_default()
}

/// Fail with [`PlatformError::MissingEnv`] naming `name` when `value` is empty.
///
/// # Errors
///
/// Returns an error if `value` is empty or only whitespace.
pub fn require_non_empty<'a>(name: &str, value: &'a str) -> Result<&'a str, PlatformError> {
    if value.trim().is_empty() {
        return Err(PlatformError::missing_env(name));
    }
    Ok(value)
}

/// Parse a variable with a default value.
///
/// Unset and empty variables both produce `default`.
///
/// # Errors
///
/// Returns an error if the variable is set but does not parse.
pub fn parse_env<L, T>(lookup: &L, name: &str, default: T) -> Result<T, PlatformError>
where
    L: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(name) {
        Some(val) if !val.trim().is_empty() => val
            .trim()
            .parse()
            .map_err(|e| PlatformError::invalid_input(format!("Invalid {name}: {e}"))),
        _ => Ok(default),
    }
}
