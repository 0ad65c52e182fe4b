//! Structured logging for nodestat.
//!
//! The decoding crates only emit `tracing` events:
//! - `debug` when a table is decoded (table name, row count)
//! - `trace` when a field falls back to its raw string
//! - `warn` when a later volume row replaces an earlier one
//!
//! Installing a subscriber is left to the embedding application, which can
//! use [`init_logging`] for the standard stderr setup.
//!
//! ```ignore
//! use ns_core::logging::{init_logging, LogConfig};
//!
//! let config = LogConfig::from_env(None, None);
//! init_logging(&config)?;
//! ```

pub mod config;

pub use config::{LogConfig, LogFormat, LogLevel, LogSettings};

use std::io::IsTerminal;

use ns_common::{Error, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Crates whose events the default filter lets through.
const CRATES: [&str; 3] = ["ns_common", "ns_decode", "ns_core"];

/// Default `EnvFilter` directives for `level`.
fn default_directives(level: LogLevel) -> String {
    CRATES
        .iter()
        .map(|krate| format!("{}={}", krate, level))
        .collect::<Vec<_>>()
        .join(",")
}

/// Install the global subscriber, writing to stderr.
///
/// A `RUST_LOG` directive, when set, replaces the level from `config`.
///
/// # Errors
/// [`Error::Config`] if a global subscriber is already installed.
pub fn init_logging(config: &LogConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(config.level)));

    let installed = match config.format {
        LogFormat::Human => {
            let use_ansi = std::io::stderr().is_terminal();
            let fmt_layer = fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_ansi(use_ansi);

            if config.timestamps {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(fmt_layer)
                    .try_init()
            } else {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(fmt_layer.without_time())
                    .try_init()
            }
        }
        LogFormat::Jsonl => {
            let json_layer = fmt::layer()
                .json()
                .flatten_event(true)
                .with_current_span(false)
                .with_writer(std::io::stderr);
            tracing_subscriber::registry()
                .with(filter)
                .with(json_layer)
                .try_init()
        }
    };

    installed.map_err(|e| Error::Config(format!("logging already initialized: {}", e)))
}
