//! certrule CLI.

use std::io::{self, IsTerminal};
use std::path::Path;

use anyhow::{Context, Result};
use clap::{ColorChoice, Parser};
use tracing::level_filters::LevelFilter;
use tracing::warn;

use certrule_cli::commands::{SelectRequest, run_select, run_settings_init};
use certrule_cli::logging::{LogConfig, LogFormat, init_logging};
use certrule_cli::settings::{LoggingSettings, Settings};
use certrule_cli::summary::{
    ordering_symbol, print_categories, print_selection, print_selection_json,
};
use certrule_model::compare_versions;

mod cli;

use crate::cli::{
    Cli, Command, LogFormatArg, LogLevelArg, OutputFormatArg, SelectArgs, SettingsCommand,
};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let settings_path = cli.config.clone().unwrap_or_else(Settings::config_path);
    // An explicit --config must parse; the default file only warns.
    let (settings, discarded) = match &cli.config {
        Some(path) => match Settings::read_or_default(path) {
            Ok(settings) => (settings, None),
            Err(error) => {
                eprintln!("error: {error:#}");
                std::process::exit(1);
            }
        },
        None => match Settings::load() {
            Ok(settings) => (settings, None),
            Err(error) => (Settings::default(), Some(error)),
        },
    };
    let log_config = log_config_from_cli(&cli, &settings.logging);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    if let Some(error) = discarded {
        warn!("ignoring settings file, using defaults: {error:#}");
    }
    let exit_code = match run(cli.command, &settings, &settings_path) {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

fn run(command: Command, settings: &Settings, settings_path: &Path) -> Result<()> {
    match command {
        Command::Select(args) => run_select_command(&args, settings),
        Command::Compare { left, right } => {
            let ordering = compare_versions(&left, &right);
            println!("{left} {} {right}", ordering_symbol(ordering));
            Ok(())
        }
        Command::Categories => {
            print_categories();
            Ok(())
        }
        Command::Settings(SettingsCommand::Show) => {
            let content = toml::to_string_pretty(settings).context("serialize settings")?;
            print!("{content}");
            Ok(())
        }
        Command::Settings(SettingsCommand::Init { force }) => {
            run_settings_init(settings_path, force)?;
            println!("{}", settings_path.display());
            Ok(())
        }
        Command::Settings(SettingsCommand::Path) => {
            println!("{}", settings_path.display());
            Ok(())
        }
    }
}

fn run_select_command(args: &SelectArgs, settings: &Settings) -> Result<()> {
    let request = SelectRequest {
        rules_path: args.rules.clone(),
        category: args.category.clone(),
        at: args.at.clone(),
        rule_type: args.rule_type.map(Into::into),
        country: args.country.clone(),
    };
    let selection = run_select(&request, &settings.selection)?;
    match args.format {
        OutputFormatArg::Table => {
            print_selection(&selection, &settings.selection.language);
            Ok(())
        }
        OutputFormatArg::Json => print_selection_json(&selection),
    }
}

/// Build logging configuration: explicit flags, then verbosity, then settings.
fn log_config_from_cli(cli: &Cli, logging: &LoggingSettings) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    if !cli.verbosity.is_present()
        && let Some(level) = logging.level_filter()
    {
        config.level_filter = level;
    }
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        Some(LogFormatArg::Pretty) => LogFormat::Pretty,
        Some(LogFormatArg::Compact) => LogFormat::Compact,
        Some(LogFormatArg::Json) => LogFormat::Json,
        None => logging.format.unwrap_or_default(),
    };
    config.with_timestamps = logging.timestamps;
    config.with_target = logging.target;
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
