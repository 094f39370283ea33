//! Command handlers for CLI subcommands
//!
//! This module contains the implementation logic for each CLI subcommand.

mod completions;
mod config;
mod decode;
mod prepare;
mod utils;

pub use completions::handle_completions;
pub use config::handle_config;
pub use decode::handle_decode;
pub use prepare::handle_prepare;
