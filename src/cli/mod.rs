//! CLI layer for streamseg.
//!
//! Provides the command-line interface using clap, with commands for
//! splitting, classifying and replaying generated text.

pub mod commands;
pub mod output;
pub mod parser;

pub use commands::execute;
pub use output::OutputFormat;
pub use parser::{Cli, Commands};
