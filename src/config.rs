//! Environment overrides shared by the HTTP adapter configs.

use std::env;

use tracing::warn;

/// Value of `key`, or `default` when unset or blank.
pub(crate) fn env_or(key: &str, default: String) -> String {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => value.trim().to_string(),
        _ => default,
    }
}

/// `SAFEROUTE_HTTP_TIMEOUT_SECS`, or `default` when unset or not a number.
pub(crate) fn timeout_from_env(default: u64) -> u64 {
    match env::var("SAFEROUTE_HTTP_TIMEOUT_SECS") {
        Ok(raw) => parse_timeout(&raw, default),
        Err(_) => default,
    }
}

fn parse_timeout(raw: &str, default: u64) -> u64 {
    match raw.trim().parse() {
        Ok(secs) => secs,
        Err(_) => {
            warn!(value = %raw, "ignoring invalid SAFEROUTE_HTTP_TIMEOUT_SECS");
            default
        }
    }
}
