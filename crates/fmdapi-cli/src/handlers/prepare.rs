//! Prepare command handler

use super::utils::{read_document, write_output};
use crate::cli::PrepareArgs;
use crate::config::Config;
use crate::error::Result;
use crate::logging::timing::Timer;
use crate::output::{OutputFormatter, OutputWriter};
use fmdapi_core::{Operation, Parameters, RequestShaper, WireParameters};

/// Handle the prepare command
pub fn handle_prepare(args: PrepareArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    output.info(&format!("Shaping parameters from {}", args.input.display()))?;

    let document = read_document(&args.input)?;
    let shaper = build_shaper(&args, config);

    let timer = Timer::with_details(
        "prepare",
        shaper.operation().map(Operation::as_str).unwrap_or("unfiltered"),
    );
    let shaped = timer.span().in_scope(|| shaper.shape_value(&document))?;
    timer.finish();

    tracing::debug!(
        input_keys = document.as_object().map(|o| o.len()).unwrap_or(0),
        shaped_keys = shaped.len(),
        "Shaped parameters"
    );

    if args.query_string {
        let query = WireParameters::from_parameters(&shaped).to_query_string();
        return match &args.output_file {
            Some(path) => {
                write_output(path, &query)?;
                output.success(&format!("✓ Query string saved to {}", path.display()))
            }
            None => output.writeln(&query),
        };
    }

    match &args.output_file {
        Some(path) => {
            write_output(path, &render_for_file(&shaped, output)?)?;
            output.success(&format!("✓ {} parameters saved to {}", shaped.len(), path.display()))
        }
        None => {
            output.section("Shaped Parameters")?;
            output.parameters(&shaped)
        }
    }
}

/// Combine command-line flags with the `shaping` config section
///
/// Flags win. The allow-list is the operation preset, if any, plus every
/// configured and command-line extra.
fn build_shaper(args: &PrepareArgs, config: &Config) -> RequestShaper {
    if args.no_filter {
        let shaper = RequestShaper::new();
        return match args.namespace_override().or(config.shaping.namespace) {
            Some(enabled) => shaper.namespace_control_keys(enabled),
            None => shaper,
        };
    }

    let operation = args.operation.map(Operation::from).or(config.shaping.operation);
    let mut shaper = match operation {
        Some(operation) => RequestShaper::for_operation(operation),
        None => RequestShaper::new(),
    };

    let extras: Vec<&str> = config
        .shaping
        .allow
        .iter()
        .chain(args.allow.iter())
        .map(String::as_str)
        .collect();
    if !extras.is_empty() {
        shaper = shaper.allow(extras);
    }

    match args.namespace_override().or(config.shaping.namespace) {
        Some(enabled) => shaper.namespace_control_keys(enabled),
        None => shaper,
    }
}

/// Files always get a machine-readable rendering
fn render_for_file(shaped: &Parameters, output: &OutputWriter) -> Result<String> {
    use crate::cli::OutputFormat;

    let format = match output.format() {
        OutputFormat::Human => OutputFormat::JsonPretty,
        other => other,
    };
    format.format_parameters(shaped)
}
