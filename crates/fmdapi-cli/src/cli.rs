//! Command-line interface argument parsing and definitions
//!
//! This module defines the CLI structure using clap's derive API,
//! providing a type-safe and well-documented command interface.

use clap::{Parser, Subcommand, ValueEnum};
use std::io::IsTerminal;
use std::path::PathBuf;

/// fmdapi CLI - FileMaker Data API parameter shaping and response decoding
///
/// Shapes query and record documents into the flat, string-typed parameters
/// the Data API expects, and decodes Data API response envelopes back into
/// flat records. No requests are sent.
#[derive(Parser, Debug)]
#[command(
    name = "fmdapi",
    version,
    author,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Enable verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "FMDAPI_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format for results (defaults to the configured format)
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Shape a query or record document into Data API parameters
    Prepare(PrepareArgs),

    /// Decode a Data API response envelope
    Decode(DecodeArgs),

    /// Manage configuration files and settings
    Config(ConfigArgs),

    /// Generate shell completions for the specified shell
    Completions(CompletionsArgs),
}

/// Arguments for the prepare command
#[derive(Parser, Debug)]
pub struct PrepareArgs {
    /// Path to the parameters document (JSON or YAML), or `-` for stdin
    #[arg(value_name = "PARAMETERS")]
    pub input: PathBuf,

    /// Filter through the preset allow-list of this operation
    #[arg(long, value_enum)]
    pub operation: Option<OperationArg>,

    /// Additional allowed keys or wildcard sentinels such as `limit.*`
    #[arg(short, long = "allow", value_name = "KEY")]
    pub allow: Vec<String>,

    /// Keep every assembled key, ignoring operation and allow-list settings
    #[arg(long, conflicts_with_all = ["operation", "allow"])]
    pub no_filter: bool,

    /// Rename bare limit/offset/sort to _limit/_offset/_sort
    #[arg(long, overrides_with = "no_namespace")]
    pub namespace: bool,

    /// Never rename bare control keys, even for query-string operations
    #[arg(long)]
    pub no_namespace: bool,

    /// Print the parameters as a URL query string
    #[arg(long)]
    pub query_string: bool,

    /// Output file path (stdout if not specified)
    #[arg(long = "save-to")]
    pub output_file: Option<PathBuf>,
}

/// Arguments for the decode command
#[derive(Parser, Debug)]
pub struct DecodeArgs {
    /// Path to the response envelope (JSON or YAML), or `-` for stdin
    #[arg(value_name = "RESPONSE")]
    pub input: PathBuf,

    /// Flatten the records under `response.data`
    #[arg(long, conflicts_with = "record_ids")]
    pub records: bool,

    /// Print only the record ids under `response.data`
    #[arg(long)]
    pub record_ids: bool,

    /// Decode the payload even when the envelope reports an error code
    #[arg(long)]
    pub skip_message_check: bool,

    /// Output file path (stdout if not specified)
    #[arg(long = "save-to")]
    pub output_file: Option<PathBuf>,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration management actions
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Write a default configuration file
    Init(ConfigInitArgs),

    /// Show the effective configuration
    Show(ConfigShowArgs),
}

/// Arguments for config init
#[derive(Parser, Debug)]
pub struct ConfigInitArgs {
    /// Where to write the file (defaults to the user config directory)
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Force overwrite an existing config file
    #[arg(long)]
    pub force: bool,
}

/// Arguments for config show
#[derive(Parser, Debug)]
pub struct ConfigShowArgs {
    /// Show configuration in specified format
    #[arg(short, long, value_enum, default_value = "yaml")]
    pub format: ConfigFormat,
}

/// Configuration file formats
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ConfigFormat {
    /// JSON format
    Json,
    /// YAML format
    Yaml,
}

/// Arguments for generating shell completions
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Output format options
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable formatted output
    Human,
    /// JSON output
    Json,
    /// YAML output
    Yaml,
    /// Pretty-printed JSON output
    JsonPretty,
}

/// Data API operations with preset allow-lists
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OperationArg {
    Create,
    Edit,
    Get,
    List,
    Find,
    Delete,
}

/// Supported shells for completion generation
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    /// Bash shell
    Bash,
    /// Zsh shell
    Zsh,
    /// Fish shell
    Fish,
    /// PowerShell
    PowerShell,
    /// Elvish shell
    Elvish,
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the effective verbosity level (considering quiet flag)
    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }

    /// Check if colored output should be used
    pub fn use_color(&self) -> bool {
        !self.no_color && std::io::stdout().is_terminal()
    }
}

impl PrepareArgs {
    /// The namespacing override requested on the command line, if any
    pub fn namespace_override(&self) -> Option<bool> {
        if self.no_namespace {
            Some(false)
        } else if self.namespace {
            Some(true)
        } else {
            None
        }
    }
}

impl From<OperationArg> for fmdapi_core::Operation {
    fn from(operation: OperationArg) -> Self {
        match operation {
            OperationArg::Create => fmdapi_core::Operation::Create,
            OperationArg::Edit => fmdapi_core::Operation::Edit,
            OperationArg::Get => fmdapi_core::Operation::Get,
            OperationArg::List => fmdapi_core::Operation::List,
            OperationArg::Find => fmdapi_core::Operation::Find,
            OperationArg::Delete => fmdapi_core::Operation::Delete,
        }
    }
}

impl Shell {
    /// Convert to clap_complete shell type
    pub fn to_clap_shell(self) -> clap_complete::Shell {
        match self {
            Shell::Bash => clap_complete::Shell::Bash,
            Shell::Zsh => clap_complete::Shell::Zsh,
            Shell::Fish => clap_complete::Shell::Fish,
            Shell::PowerShell => clap_complete::Shell::PowerShell,
            Shell::Elvish => clap_complete::Shell::Elvish,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_prepare_parsing() {
        let cli = Cli::parse_from([
            "fmdapi", "prepare", "query.json", "--operation", "find", "-a", "layout", "--query-string",
        ]);
        match cli.command {
            Commands::Prepare(args) => {
                assert_eq!(args.operation, Some(OperationArg::Find));
                assert_eq!(args.allow, vec!["layout".to_string()]);
                assert!(args.query_string);
                assert_eq!(args.namespace_override(), None);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_no_filter_conflicts_with_operation() {
        let result = Cli::try_parse_from([
            "fmdapi", "prepare", "q.json", "--no-filter", "--operation", "get",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_decode_parsing() {
        let cli = Cli::parse_from(["fmdapi", "-vv", "decode", "-", "--records"]);
        assert_eq!(cli.verbosity_level(), 2);
        match cli.command {
            Commands::Decode(args) => {
                assert!(args.records);
                assert_eq!(args.input, PathBuf::from("-"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_verbosity_level() {
        let cli = Cli {
            verbose: 2,
            quiet: false,
            config: None,
            output: None,
            no_color: false,
            command: Commands::Completions(CompletionsArgs { shell: Shell::Bash }),
        };
        assert_eq!(cli.verbosity_level(), 2);

        let quiet_cli = Cli { quiet: true, ..cli };
        assert_eq!(quiet_cli.verbosity_level(), 0);
    }

    #[test]
    fn test_operation_conversion() {
        let operation: fmdapi_core::Operation = OperationArg::List.into();
        assert_eq!(operation, fmdapi_core::Operation::List);
    }
}
