//! Logging setup for relmap.
//!
//! Resolution itself only emits `tracing` events; nothing is printed unless
//! a subscriber is installed. This module installs one, controlled by
//! environment variables.
//!
//! # Environment Variables
//!
//! - `RELMAP_DEBUG=true` / `RELMAP_DEBUG=1` - Enable debug logging
//! - `RELMAP_LOG_LEVEL=debug|info|warn|error|trace` - Set specific log level
//! - `RELMAP_LOG_FORMAT=json|pretty|compact` - Set output format (default: json)
//!
//! # Usage
//!
//! ```rust,no_run
//! use relmap_query::logging;
//!
//! // Initialize logging (call once at startup)
//! logging::init();
//! ```
//!
//! The resolver logs with the standard tracing macros:
//!
//! ```rust,ignore
//! debug!(entity = ?entity, "RelationResolver::resolve()");
//! trace!(path = %path, level, "classified as relation");
//! ```

use std::env;
use std::sync::Once;

static INIT: Once = Once::new();

/// Check if debug logging is enabled via the `RELMAP_DEBUG` environment variable.
///
/// Returns `true` if `RELMAP_DEBUG` is set to "true", "1", or "yes" (case-insensitive).
#[inline]
pub fn is_debug_enabled() -> bool {
    env::var("RELMAP_DEBUG")
        .map(|v| matches!(v.to_lowercase().as_str(), "true" | "1" | "yes"))
        .unwrap_or(false)
}

/// Get the configured log level from the `RELMAP_LOG_LEVEL` environment variable.
///
/// Defaults to "debug" if `RELMAP_DEBUG` is enabled, otherwise "warn".
pub fn get_log_level() -> &'static str {
    let fallback = if is_debug_enabled() { "debug" } else { "warn" };

    match env::var("RELMAP_LOG_LEVEL") {
        Ok(level) => parse_level(&level).unwrap_or(fallback),
        Err(_) => fallback,
    }
}

/// Normalize a level name, returning `None` for anything unrecognized.
pub fn parse_level(level: &str) -> Option<&'static str> {
    match level.to_lowercase().as_str() {
        "trace" => Some("trace"),
        "debug" => Some("debug"),
        "info" => Some("info"),
        "warn" => Some("warn"),
        "error" => Some("error"),
        _ => None,
    }
}

/// Get the configured log format from the `RELMAP_LOG_FORMAT` environment variable.
///
/// Defaults to "json" for structured logging.
pub fn get_log_format() -> &'static str {
    env::var("RELMAP_LOG_FORMAT")
        .map(|f| parse_format(&f))
        .unwrap_or("json")
}

/// Normalize a format name; unknown names fall back to "json".
pub fn parse_format(format: &str) -> &'static str {
    match format.to_lowercase().as_str() {
        "pretty" => "pretty",
        "compact" => "compact",
        _ => "json",
    }
}

/// Initialize the relmap logging system from the environment.
///
/// Subsequent calls are no-ops. Without `RELMAP_DEBUG` or `RELMAP_LOG_LEVEL`
/// nothing is installed, so an application's own subscriber stays in charge.
pub fn init() {
    if !is_debug_enabled() && env::var("RELMAP_LOG_LEVEL").is_err() {
        return;
    }
    init_with(get_log_level(), get_log_format());
}

/// Initialize logging with an explicit level and format.
///
/// Used when the level comes from configuration rather than the environment.
/// Unknown levels fall back to "warn".
#[cfg_attr(not(feature = "tracing-subscriber"), allow(unused_variables))]
pub fn init_with(level: &str, format: &str) {
    INIT.call_once(|| {
        #[cfg(feature = "tracing-subscriber")]
        {
            use tracing_subscriber::{EnvFilter, fmt, prelude::*};

            let level = parse_level(level).unwrap_or("warn");
            let format = parse_format(format);

            let filter = EnvFilter::try_new(format!(
                "relmap={},relmap_query={},relmap_schema={}",
                level, level, level
            ))
            .unwrap_or_else(|_| EnvFilter::new("warn"));

            match format {
                "json" => {
                    tracing_subscriber::registry()
                        .with(filter)
                        .with(fmt::layer().json())
                        .init();
                }
                "compact" => {
                    tracing_subscriber::registry()
                        .with(filter)
                        .with(fmt::layer().compact())
                        .init();
                }
                _ => {
                    tracing_subscriber::registry()
                        .with(filter)
                        .with(fmt::layer().pretty())
                        .init();
                }
            }

            tracing::info!(level, format, "relmap logging initialized");
        }

        #[cfg(not(feature = "tracing-subscriber"))]
        {
            // Tracing subscriber not available, logging stays silent
            // unless the application installs its own subscriber
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("TRACE"), Some("trace"));
        assert_eq!(parse_level("warn"), Some("warn"));
        assert_eq!(parse_level("verbose"), None);
    }

    #[test]
    fn test_parse_format() {
        assert_eq!(parse_format("Pretty"), "pretty");
        assert_eq!(parse_format("compact"), "compact");
        assert_eq!(parse_format("xml"), "json");
    }

    #[test]
    fn test_init_with_is_idempotent() {
        init_with("debug", "pretty");
        init_with("verbose", "xml");
        init();
    }
}
