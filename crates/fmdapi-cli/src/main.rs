//! fmdapi CLI - Command-line interface for FileMaker Data API parameter shaping
//!
//! This is the main entry point for the fmdapi CLI application, providing
//! commands for shaping request parameters and decoding response envelopes.

mod cli;
mod config;
mod error;
mod handlers;
mod logging;
mod output;

use cli::{Cli, Commands};
use colored::control;
use config::Config;
use error::Result;
use logging::{timing::Timer, LogSettings};
use output::OutputWriter;
use std::process;
use tracing::instrument;

fn main() {
    // Parse command-line arguments
    let cli = Cli::parse_args();

    // Set up colored output
    control::set_override(cli.use_color());

    let result = Config::load_with_file(cli.config.as_deref()).and_then(|config| {
        if let Err(e) = init_logging(&cli, &config) {
            eprintln!("Failed to initialize logging: {}", e);
        }
        run(cli, config)
    });

    match result {
        Ok(()) => {
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}", error::format_error(&e, control::SHOULD_COLORIZE.should_colorize()));
            process::exit(e.exit_code());
        }
    }
}

/// Main application logic
#[instrument(skip(cli, config), fields(command = ?cli.command))]
fn run(cli: Cli, config: Config) -> Result<()> {
    let timer = Timer::new("cli_execution");

    let format = match cli.output {
        Some(format) => format,
        None => config.output.output_format()?,
    };
    let use_color = cli.use_color() && config.output.color;
    let mut output = OutputWriter::new(format, use_color, cli.quiet);

    tracing::info!(
        verbosity = cli.verbosity_level(),
        format = ?format,
        "Executing command"
    );

    // Handle the subcommand
    let result = match cli.command {
        Commands::Prepare(args) => handlers::handle_prepare(args, &config, &mut output),
        Commands::Decode(args) => handlers::handle_decode(args, &config, &mut output),
        Commands::Config(args) => handlers::handle_config(args, &config, &mut output),
        Commands::Completions(args) => handlers::handle_completions(args),
    };
    timer.finish();
    result
}

/// Initialize the logging system
fn init_logging(cli: &Cli, config: &Config) -> Result<()> {
    // Flags, then the config file, then the environment
    let mut settings = LogSettings::from_verbosity(cli.verbosity_level());
    settings.apply_config(&config.logging, cli.verbosity_level());
    settings.apply_env();

    if cli.quiet {
        settings.level = "error".to_string();
    }

    logging::init_logging(settings)
}
