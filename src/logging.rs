// ABOUTME: Structured logging setup built on tracing-subscriber
// ABOUTME: Log level and output format come from RUST_LOG / LOG_FORMAT
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ladle Project

//! Logging initialization.
//!
//! The server logs through `tracing`; this module installs the global
//! subscriber once at startup. `RUST_LOG` picks the level, `LOG_FORMAT`
//! picks the output shape (`json`, `pretty`, or `compact`).

use crate::constants::service_names;
use anyhow::Result;
use std::env;
use std::io;
use tracing::info;
use tracing_subscriber::{
    filter::Directive,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Log output format options
#[derive(Debug, Clone, Copy)]
pub enum LogFormat {
    /// `JSON` lines for production log shippers
    Json,
    /// Human-readable output for development
    Pretty,
    /// Single-line output for space-constrained environments
    Compact,
}

impl LogFormat {
    fn from_env() -> Self {
        match env::var("LOG_FORMAT").as_deref() {
            Ok("json") => Self::Json,
            Ok("compact") => Self::Compact,
            _ => Self::Pretty,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level directive (trace, debug, info, warn, error)
    pub level: String,
    /// Output format
    pub format: LogFormat,
    /// Emit source file and line numbers
    pub include_location: bool,
    /// Emit span open/close events
    pub include_spans: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: LogFormat::Pretty,
            include_location: false,
            include_spans: false,
        }
    }
}

impl LoggingConfig {
    /// Read the logging configuration from environment variables.
    ///
    /// Production environments turn on location and span output unless the
    /// `LOG_INCLUDE_*` variables say otherwise.
    #[must_use]
    pub fn from_env() -> Self {
        let is_production =
            env::var("ENVIRONMENT").as_deref() == Ok("production");

        Self {
            level: env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
            format: LogFormat::from_env(),
            include_location: is_production || env::var("LOG_INCLUDE_LOCATION").is_ok(),
            include_spans: is_production || env::var("LOG_INCLUDE_SPANS").is_ok(),
        }
    }

    // Dependency chatter stays capped no matter what RUST_LOG says
    fn filter(&self) -> EnvFilter {
        let mut filter = EnvFilter::try_new(&self.level).unwrap_or_else(|_| EnvFilter::new("info"));
        for noise in ["hyper=warn", "sqlx=info", "tower_http=info"] {
            filter = filter.add_directive(parse_directive(noise));
        }
        filter.add_directive(parse_directive(&format!("ladle={}", self.level)))
    }

    /// Install the global tracing subscriber for this configuration
    ///
    /// # Errors
    ///
    /// Returns an error if a global subscriber is already installed.
    pub fn init(&self) -> Result<()> {
        let registry = tracing_subscriber::registry().with(self.filter());

        let span_events = if self.include_spans {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        };

        match self.format {
            LogFormat::Json => {
                let layer = fmt::layer()
                    .with_file(self.include_location)
                    .with_line_number(self.include_location)
                    .with_writer(io::stdout)
                    .with_span_events(span_events)
                    .json();
                registry.with(layer).try_init()?;
            }
            LogFormat::Pretty => {
                let layer = fmt::layer()
                    .with_file(self.include_location)
                    .with_line_number(self.include_location)
                    .with_writer(io::stdout)
                    .with_span_events(span_events);
                registry.with(layer).try_init()?;
            }
            LogFormat::Compact => {
                let layer = fmt::layer()
                    .compact()
                    .with_target(false)
                    .with_writer(io::stdout)
                    .with_span_events(FmtSpan::NONE);
                registry.with(layer).try_init()?;
            }
        }

        info!(
            service = service_names::LADLE,
            version = env!("CARGO_PKG_VERSION"),
            level = %self.level,
            format = ?self.format,
            "logging initialized"
        );

        Ok(())
    }
}

fn parse_directive(directive: &str) -> Directive {
    directive
        .parse()
        .unwrap_or_else(|_| tracing::Level::INFO.into())
}

/// Initialize logging from environment variables
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_from_env() -> Result<()> {
    LoggingConfig::from_env().init()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, "info");
        assert!(matches!(config.format, LogFormat::Pretty));
        assert!(!config.include_location);
    }

    #[test]
    fn test_directive_fallback() {
        // A malformed directive degrades to info instead of panicking
        let directive = parse_directive("not a directive!!");
        assert_eq!(directive.to_string(), "info");
    }
}
