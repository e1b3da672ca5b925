//! Logging and observability
//!
//! Structured logging setup built on tracing-subscriber. Supports text and
//! JSON formatting, selected at runtime via a CLI flag or environment
//! variables. All output goes to stderr so stdout stays free for command
//! output.

use anyhow::Result;
use std::{io, sync::Once};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static INIT: Once = Once::new();

/// Initialize the logging system with an optional format specification
///
/// Sets up tracing-subscriber with either JSON or text formatting. Safe to
/// call multiple times; subsequent calls are no-ops.
///
/// ## Arguments
///
/// * `format` - `None` or `"text"` for human-readable output, `"json"` for
///   structured JSON output.
///
/// ## Environment Variables
///
/// * `ESACTL_LOG_FORMAT` - log output format ("json" for JSON, anything else for text)
/// * `ESACTL_LOG` - logging filter level
/// * `RUST_LOG` - standard Rust logging variable (used as fallback)
pub fn init(format: Option<&str>) -> Result<()> {
    init_with_level(format, None)
}

/// Initialize the logging system with an explicit default level
///
/// The level only applies when neither `ESACTL_LOG` nor `RUST_LOG` is set;
/// environment filters always win.
pub fn init_with_level(format: Option<&str>, default_level: Option<&str>) -> Result<()> {
    INIT.call_once(|| {
        let filter = create_env_filter(default_level);

        let env_format = std::env::var("ESACTL_LOG_FORMAT").ok();
        let effective_format = format.or(env_format.as_deref()).unwrap_or("text");

        match effective_format {
            "json" => {
                tracing_subscriber::registry()
                    .with(
                        fmt::layer()
                            .json()
                            .with_target(true)
                            .with_writer(io::stderr),
                    )
                    .with(filter)
                    .init();
            }
            _ => {
                tracing_subscriber::registry()
                    .with(fmt::layer().with_target(true).with_writer(io::stderr))
                    .with(filter)
                    .init();
            }
        }

        tracing::debug!("Logging initialized with format: {}", effective_format);
    });

    Ok(())
}

/// Build the env filter from `ESACTL_LOG`, then `RUST_LOG`, then the given
/// default level (or `info` when none is given).
fn create_env_filter(default_level: Option<&str>) -> EnvFilter {
    let default = default_level.unwrap_or("info");

    if let Ok(filter) = std::env::var("ESACTL_LOG") {
        EnvFilter::new(filter)
    } else if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        assert!(init(None).is_ok());
        assert!(init(Some("json")).is_ok());
    }

    #[test]
    fn test_create_env_filter_default() {
        // No assertion on internals; just ensure construction succeeds
        let _ = create_env_filter(None);
        let _ = create_env_filter(Some("debug"));
    }
}
