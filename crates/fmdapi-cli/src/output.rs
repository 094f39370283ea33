//! Output formatting and writing utilities
//!
//! This module provides utilities for formatting and writing output
//! in various formats (JSON, YAML, human-readable), with human renderings
//! for shaped parameters and decoded records.

use crate::cli::OutputFormat;
use crate::error::Result;
use colored::Colorize;
use fmdapi_core::Parameters;
use serde::Serialize;
use serde_json::Value;
use std::io::{self, Write};
use tracing::trace;

/// Trait for formatting output with specialized support for common types
pub trait OutputFormatter {
    /// Format a serializable value
    fn format<T: Serialize>(&self, value: &T) -> Result<String>;

    /// Format a flat parameter mapping
    fn format_parameters(&self, parameters: &Parameters) -> Result<String>;

    /// Format decoded records, or any other decoded value
    fn format_records(&self, records: &Value) -> Result<String>;
}

impl OutputFormatter for OutputFormat {
    fn format<T: Serialize>(&self, value: &T) -> Result<String> {
        match self {
            OutputFormat::Json => Ok(serde_json::to_string(value)?),
            OutputFormat::JsonPretty => Ok(serde_json::to_string_pretty(value)?),
            OutputFormat::Yaml => Ok(serde_yaml::to_string(value)?),
            OutputFormat::Human => {
                // For human format, use pretty JSON as fallback
                Ok(serde_json::to_string_pretty(value)?)
            }
        }
    }

    fn format_parameters(&self, parameters: &Parameters) -> Result<String> {
        match self {
            OutputFormat::Human => Ok(format_parameters_human(parameters)),
            _ => self.format(parameters),
        }
    }

    fn format_records(&self, records: &Value) -> Result<String> {
        match self {
            OutputFormat::Human => Ok(format_records_human(records)),
            _ => self.format(records),
        }
    }
}

/// Output writer that handles different output formats and colors
pub struct OutputWriter {
    format: OutputFormat,
    use_color: bool,
    quiet: bool,
    writer: Box<dyn Write>,
}

impl OutputWriter {
    /// Create a new output writer
    pub fn new(format: OutputFormat, use_color: bool, quiet: bool) -> Self {
        Self::with_writer(format, use_color, quiet, Box::new(io::stdout()))
    }

    /// Create an output writer with a custom writer
    pub fn with_writer(
        format: OutputFormat,
        use_color: bool,
        quiet: bool,
        writer: Box<dyn Write>,
    ) -> Self {
        Self {
            format,
            use_color,
            quiet,
            writer,
        }
    }

    /// Get the output format
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Write raw output
    pub fn write(&mut self, content: &str) -> Result<()> {
        write!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write a line of output
    pub fn writeln(&mut self, content: &str) -> Result<()> {
        writeln!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write an info message
    pub fn info(&mut self, message: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&format!("{} {}", "ℹ".blue(), message))
        } else {
            self.writeln(&format!("INFO: {}", message))
        }
    }

    /// Write a success message
    pub fn success(&mut self, message: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&message.green().to_string())
        } else {
            self.writeln(message)
        }
    }

    /// Write a warning message
    pub fn warning(&mut self, message: &str) -> Result<()> {
        if self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&message.yellow().to_string())
        } else {
            self.writeln(&format!("WARNING: {}", message))
        }
    }

    /// Write a section header
    pub fn section(&mut self, title: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        self.writeln("")?;
        if self.use_color {
            self.writeln(&format!("═══ {} ═══", title).bright_blue().to_string())
        } else {
            self.writeln(&format!("=== {} ===", title))
        }
    }

    /// Write shaped parameters in the configured format
    pub fn parameters(&mut self, parameters: &Parameters) -> Result<()> {
        trace!(count = parameters.len(), "Outputting parameters");
        let formatted = self.format.format_parameters(parameters)?;
        self.emit(&formatted)
    }

    /// Write decoded records in the configured format
    pub fn records(&mut self, records: &Value) -> Result<()> {
        trace!("Outputting decoded value");
        let formatted = self.format.format_records(records)?;
        self.emit(&formatted)
    }

    fn emit(&mut self, formatted: &str) -> Result<()> {
        if formatted.ends_with('\n') {
            self.write(formatted)
        } else {
            self.writeln(formatted)
        }
    }
}

/// Format parameters as aligned `key = value` lines
fn format_parameters_human(parameters: &Parameters) -> String {
    if parameters.is_empty() {
        return "(no parameters)\n".to_string();
    }

    let width = parameters.keys().map(String::len).max().unwrap_or(0);
    parameters
        .iter()
        .map(|(key, value)| format!("{:width$} = {}\n", key, format_value_compact(value), width = width))
        .collect()
}

/// Format records one block per record, other values on a single line
fn format_records_human(records: &Value) -> String {
    let Value::Array(items) = records else {
        return format!("{}\n", format_value_compact(records));
    };
    if items.is_empty() {
        return "(no records)\n".to_string();
    }

    let mut output = String::new();
    for (index, item) in items.iter().enumerate() {
        match item {
            Value::Object(fields) => {
                let heading = match fields.get("recordId") {
                    Some(id) => format!("Record {} (id {})", index + 1, format_value_compact(id)),
                    None => format!("Record {}", index + 1),
                };
                output.push_str(&heading);
                output.push('\n');
                for (key, value) in fields {
                    output.push_str(&format!("  {}: {}\n", key, format_value_compact(value)));
                }
            }
            other => {
                output.push_str(&format!("{}. {}\n", index + 1, format_value_compact(other)));
            }
        }
    }
    output
}

/// Format a JSON value in a compact, human-readable way
fn format_value_compact(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(arr) => {
            if arr.len() <= 3 {
                format!(
                    "[{}]",
                    arr.iter().map(format_value_compact).collect::<Vec<_>>().join(", ")
                )
            } else {
                format!("[{} items]", arr.len())
            }
        }
        Value::Object(obj) => {
            if obj.len() <= 2 {
                let items: Vec<String> = obj
                    .iter()
                    .map(|(k, v)| format!("{}: {}", k, format_value_compact(v)))
                    .collect();
                format!("{{{}}}", items.join(", "))
            } else {
                format!("{{{} fields}}", obj.len())
            }
        }
    }
}
