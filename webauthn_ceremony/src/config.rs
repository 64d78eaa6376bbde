//! Central configuration for the webauthn_ceremony crate

use std::{env, sync::LazyLock};

/// Origin every ceremony request is resolved against, e.g. `https://example.com`
///
/// Only [`crate::HttpTransport::from_env`] needs it, so it is optional here.
pub(crate) static ORIGIN: LazyLock<Option<String>> = LazyLock::new(|| env::var("ORIGIN").ok());

/// Timeout in seconds applied to every options/validate request.
/// Default: 30
pub(crate) static WEBAUTHN_HTTP_TIMEOUT: LazyLock<u64> =
    LazyLock::new(|| timeout_from_env("WEBAUTHN_HTTP_TIMEOUT", 30));

fn timeout_from_env(var: &str, default: u64) -> u64 {
    match env::var(var) {
        Ok(v) => match v.parse::<u64>() {
            Ok(secs) if secs > 0 => secs,
            _ => {
                tracing::warn!("Invalid {}: {}. Using default '{}'", var, v, default);
                default
            }
        },
        Err(_) => default,
    }
}
