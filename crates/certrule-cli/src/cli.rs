//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use certrule_model::RuleType;

#[derive(Parser)]
#[command(
    name = "certrule",
    version,
    about = "Select the certificate validation rules that apply right now",
    long_about = "Select certificate validation rules by category and validity window.\n\n\
                  Only the highest version of each rule identifier is kept. Versions are\n\
                  compared component by component, numerically where possible."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags and settings).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (overrides settings).
    #[arg(long = "log-format", value_enum, global = true)]
    pub log_format: Option<LogFormatArg>,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Settings file (default: platform config directory).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Select the rules that apply to a certificate category at an instant.
    Select(SelectArgs),

    /// Compare two rule versions.
    Compare {
        /// Left-hand version.
        left: String,
        /// Right-hand version.
        right: String,
    },

    /// List the certificate categories.
    Categories,

    /// Manage the settings file.
    #[command(subcommand)]
    Settings(SettingsCommand),
}

#[derive(Parser)]
pub struct SelectArgs {
    /// JSON rule set in engine layout (default: selection.rules_path).
    #[arg(long = "rules", value_name = "FILE")]
    pub rules: Option<PathBuf>,

    /// Certificate category, case-insensitive (default: selection.default_category).
    #[arg(long = "category", value_name = "CATEGORY")]
    pub category: Option<String>,

    /// Evaluation instant in RFC 3339 (default: now).
    #[arg(long = "at", value_name = "TIMESTAMP")]
    pub at: Option<String>,

    /// Only consider rules of this type.
    #[arg(long = "type", value_enum)]
    pub rule_type: Option<RuleTypeArg>,

    /// Only consider rules published for this country code.
    #[arg(long = "country", value_name = "CC")]
    pub country: Option<String>,

    /// Output format.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,
}

#[derive(Subcommand)]
pub enum SettingsCommand {
    /// Print the settings in effect.
    Show,

    /// Write a settings file with default values.
    Init {
        /// Overwrite an existing file.
        #[arg(long = "force")]
        force: bool,
    },

    /// Print the settings file path.
    Path,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormatArg {
    Table,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum RuleTypeArg {
    Acceptance,
    Invalidation,
}

impl From<RuleTypeArg> for RuleType {
    fn from(arg: RuleTypeArg) -> Self {
        match arg {
            RuleTypeArg::Acceptance => RuleType::Acceptance,
            RuleTypeArg::Invalidation => RuleType::Invalidation,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
