//! Error types for the CLI
//!
//! Every failure the `fmdapi` binary reports, with the exit code it maps to.
//! Data API errors carried in a response envelope get their own code so
//! scripts can tell "the server said no" apart from "the input was unusable".

use std::io;
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Shaping or decoding failed in fmdapi-core
    #[error("{0}")]
    Core(#[from] fmdapi_core::Error),

    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// A document could not be parsed in the format its path implies
    #[error("Invalid file format for {}: expected {}", path.display(), expected)]
    InvalidFormat { path: PathBuf, expected: String },

    #[error("Configuration error: {0}")]
    Config(String),

    /// The tracing subscriber or request id could not be installed
    #[error("Logging setup failed: {0}")]
    Logging(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn logging(message: impl Into<String>) -> Self {
        Self::Logging(message.into())
    }

    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Io(_) => 1,
            Self::Core(fmdapi_core::Error::Api { .. }) => 10,
            Self::Core(_) => 2,
            Self::FileNotFound { .. } => 3,
            Self::InvalidFormat { .. } => 4,
            Self::Config(_) => 5,
            Self::Logging(_) => 6,
            Self::Json(_) => 12,
            Self::Yaml(_) => 13,
        }
    }

    /// A follow-up hint printed under the error, if one applies
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::Core(fmdapi_core::Error::Api { .. }) => {
                Some("pass --skip-message-check to decode the payload anyway")
            }
            Self::InvalidFormat { .. } => {
                Some("files ending in .yaml or .yml are read as YAML, anything else as JSON")
            }
            _ => None,
        }
    }
}

/// Render an error, and its hint when there is one, for stderr
pub fn format_error(error: &Error, use_color: bool) -> String {
    use colored::Colorize;

    let mut rendered = if use_color {
        format!("{} {}", "Error:".red().bold(), error)
    } else {
        format!("Error: {}", error)
    };
    if let Some(hint) = error.hint() {
        if use_color {
            rendered.push_str(&format!("\n{} {}", "hint:".dimmed(), hint));
        } else {
            rendered.push_str(&format!("\nhint: {}", hint));
        }
    }
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api_error() -> Error {
        Error::Core(fmdapi_core::Error::Api {
            code: "401".to_string(),
            message: "No records match the request".to_string(),
        })
    }

    #[test]
    fn test_exit_codes_are_distinct_for_api_errors() {
        let shape = Error::Core(fmdapi_core::Error::missing_field("response", "envelope"));
        assert_eq!(api_error().exit_code(), 10);
        assert_eq!(shape.exit_code(), 2);
        assert!(shape.hint().is_none());
    }

    #[test]
    fn test_format_error_without_color() {
        let err = Error::FileNotFound {
            path: PathBuf::from("missing.json"),
        };
        assert_eq!(format_error(&err, false), "Error: File not found: missing.json");
    }

    #[test]
    fn test_api_error_carries_decode_hint() {
        let rendered = format_error(&api_error(), false);
        assert!(rendered.starts_with("Error: "));
        assert!(rendered.ends_with("\nhint: pass --skip-message-check to decode the payload anyway"));
        assert!(Error::config("bad").hint().is_none());
    }
}
