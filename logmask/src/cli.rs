//! This file defines the command-line interface (CLI) for the logmask
//! application, including all available commands and their arguments.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use logmask_core::DEFAULT_RULES_DELIMITER;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "logmask",
    version = env!("CARGO_PKG_VERSION"),
    about = "Mask sensitive values in log lines",
    long_about = "logmask applies an ordered list of regular-expression rules to log messages and overwrites the sensitive part of every match (a password, a phone number, a token) with mask characters of the same length, leaving the surrounding text intact.",
    arg_required_else_help = true,
)]
pub struct Cli {
    /// Disable informational messages
    #[arg(long, short = 'q', global = true, help = "Suppress all informational and debug messages.")]
    pub quiet: bool,

    /// Enable debug logging (overrides RUST_LOG)
    #[arg(long, short = 'd', global = true, help = "Enable debug logging.")]
    pub debug: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// All available commands for the `logmask` CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Masks an input file or stdin.
    #[command(about = "Masks an input file or stdin and writes the result.")]
    Mask(MaskCommand),

    /// Compiles the configured rules and lists them.
    #[command(about = "Compiles the configured rules and lists them; fails on invalid patterns.")]
    Check(CheckCommand),

    /// Emits a sample login event through the masking JSON logger.
    #[command(about = "Emits a sample login event through the masking JSON logger.")]
    Demo(DemoCommand),
}

/// Where the mask rules come from. Shared by every command.
#[derive(Args, Debug, Clone, Default)]
pub struct RuleSourceArgs {
    /// Path to a YAML rule file.
    #[arg(long = "config", value_name = "FILE", help = "Path to a YAML mask rule file.")]
    pub config: Option<PathBuf>,

    /// Delimiter-separated list of patterns. Ignored when `--config` is given.
    #[arg(
        long = "rules",
        value_name = "PATTERNS",
        env = "LOGMASK_RULES",
        help = "Delimiter-separated regex patterns, applied in order."
    )]
    pub rules: Option<String>,

    /// Separator between patterns in `--rules`.
    #[arg(
        long = "delimiter",
        value_name = "SEP",
        env = "LOGMASK_RULES_DELIMITER",
        default_value = DEFAULT_RULES_DELIMITER,
        help = "Separator between patterns in --rules."
    )]
    pub delimiter: String,

    /// Overrides the mask character.
    #[arg(long = "mask-char", value_name = "CHAR", help = "Character used to build masks (default '*').")]
    pub mask_char: Option<char>,
}

/// Arguments for the `mask` command.
#[derive(Parser, Debug)]
pub struct MaskCommand {
    #[command(flatten)]
    pub source: RuleSourceArgs,

    /// Path to an input file (reads from stdin if not provided).
    #[arg(long, short = 'i', value_name = "FILE", help = "Read input from a specified file instead of stdin.")]
    pub input_file: Option<PathBuf>,

    /// Write masked output to this file instead of stdout.
    #[arg(long, short = 'o', value_name = "FILE", help = "Write output to a specified file instead of stdout.")]
    pub output: Option<PathBuf>,

    /// Process input line by line (useful for streaming data from pipes).
    #[arg(long = "line-buffered", help = "Mask and flush each line as it arrives.")]
    pub line_buffered: bool,
}

/// Arguments for the `check` command.
#[derive(Parser, Debug)]
pub struct CheckCommand {
    #[command(flatten)]
    pub source: RuleSourceArgs,
}

/// Arguments for the `demo` command. `--quiet` and `--debug` set the level of
/// the masking logger rather than of the stderr diagnostics.
#[derive(Parser, Debug)]
pub struct DemoCommand {
    #[command(flatten)]
    pub source: RuleSourceArgs,

    /// JSON field the masked message is written to.
    #[arg(long = "field-name", value_name = "NAME", default_value = logmask_core::DEFAULT_MESSAGE_FIELD, help = "JSON field that receives the masked message.")]
    pub field_name: String,
}
