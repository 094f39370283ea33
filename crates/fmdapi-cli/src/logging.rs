//! Logging for the fmdapi CLI
//!
//! Everything is written to stderr through a tracing subscriber. The core
//! library logs through the `log` facade, and those records are bridged into
//! the same subscriber. Each run gets a request id that is attached to the
//! operation spans created by [`timing::Timer`].

use crate::config;
use crate::error::{Error, Result};
use std::io::IsTerminal;
use std::sync::OnceLock;
use tracing::{field, Span};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

static REQUEST_ID: OnceLock<String> = OnceLock::new();

/// Environment variable selecting the log format
pub const FORMAT_ENV: &str = "FMDAPI_LOG_FORMAT";

/// Resolved logging settings for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    /// `EnvFilter` directive, e.g. `warn` or `fmdapi_core=debug`
    pub level: String,
    pub format: LogFormat,
    /// Attach file and line to each event
    pub source_location: bool,
}

/// How events are rendered on stderr
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// One line per event, coloured on a terminal
    Compact,
    /// One JSON object per event
    Json,
}

impl LogFormat {
    /// Parse a format name, case-insensitively
    pub fn parse(name: &str) -> Option<Self> {
        if name.eq_ignore_ascii_case("compact") {
            Some(Self::Compact)
        } else if name.eq_ignore_ascii_case("json") {
            Some(Self::Json)
        } else {
            None
        }
    }
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::Compact,
            source_location: false,
        }
    }
}

impl LogSettings {
    /// Settings implied by the number of `-v` flags
    pub fn from_verbosity(verbosity: u8) -> Self {
        let (level, source_location) = match verbosity {
            0 => ("warn", false),
            1 => ("info", false),
            2 => ("debug", true),
            _ => ("trace", true),
        };
        Self {
            level: level.to_string(),
            source_location,
            ..Self::default()
        }
    }

    /// Apply the `logging` section of a config file
    ///
    /// A configured level only applies when no `-v` flag was given.
    pub fn apply_config(&mut self, file: &config::LoggingConfig, verbosity: u8) {
        if verbosity == 0 {
            if let Some(level) = &file.level {
                self.level = level.clone();
            }
        }
        match LogFormat::parse(&file.format) {
            Some(format) => self.format = format,
            None => tracing::warn!(format = %file.format, "Ignoring unknown log format in config"),
        }
    }

    /// Apply `RUST_LOG` and [`FORMAT_ENV`]
    pub fn apply_env(&mut self) {
        if let Ok(directive) = std::env::var("RUST_LOG") {
            self.level = directive;
        }
        if let Ok(name) = std::env::var(FORMAT_ENV) {
            match LogFormat::parse(&name) {
                Some(format) => self.format = format,
                None => eprintln!("Invalid {}: {}, using {:?}", FORMAT_ENV, name, self.format),
            }
        }
    }
}

/// Install the global subscriber and assign this run's request id
pub fn init_logging(settings: LogSettings) -> Result<()> {
    let filter = EnvFilter::try_new(&settings.level)
        .map_err(|e| Error::config(format!("Invalid log level '{}': {}", settings.level, e)))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_file(settings.source_location)
        .with_line_number(settings.source_location);

    let installed = match settings.format {
        LogFormat::Compact => builder
            .with_ansi(std::io::stderr().is_terminal())
            .compact()
            .try_init(),
        LogFormat::Json => builder.with_ansi(false).json().try_init(),
    };
    installed.map_err(|e| Error::logging(e.to_string()))?;

    let request_id = generate_request_id();
    REQUEST_ID
        .set(request_id.clone())
        .map_err(|_| Error::logging("request id was already assigned"))?;

    tracing::debug!(request_id = %request_id, settings = ?settings, "Logging initialized");
    Ok(())
}

/// A fresh `req_`-prefixed id
pub fn generate_request_id() -> String {
    format!("req_{}", Uuid::new_v4().simple())
}

pub fn current_request_id() -> Option<&'static str> {
    REQUEST_ID.get().map(String::as_str)
}

fn operation_span(operation: &str, details: &str) -> Span {
    tracing::info_span!(
        "operation",
        operation = operation,
        request_id = current_request_id().unwrap_or("unknown"),
        details = details,
        duration_ms = field::Empty,
    )
}

/// Operation timing
pub mod timing {
    use std::time::Instant;
    use tracing::Span;

    /// Times one operation and records the duration on its span
    pub struct Timer {
        start: Instant,
        span: Span,
        operation: &'static str,
    }

    impl Timer {
        pub fn new(operation: &'static str) -> Self {
            Self::with_details(operation, "")
        }

        pub fn with_details(operation: &'static str, details: &str) -> Self {
            Self {
                start: Instant::now(),
                span: super::operation_span(operation, details),
                operation,
            }
        }

        /// The span the timed work should run in
        pub fn span(&self) -> &Span {
            &self.span
        }

        pub fn finish(self) {
            let elapsed_ms = self.start.elapsed().as_millis() as u64;
            self.span.record("duration_ms", elapsed_ms);
            tracing::info!(operation = self.operation, duration_ms = elapsed_ms, "Operation completed");
        }
    }
}
