//! Command-line entry points.
//!
//! Parsing lives in [`parser`], flag validation in [`validation`], the
//! settings merge in [`config_merger`] and command execution in
//! [`executor`] and [`handlers`].

pub mod config_merger;
pub mod executor;
pub mod handlers;
pub mod parser;
pub mod validation;

pub use config_merger::ConfigurationMerger;
pub use executor::execute_command;
pub use parser::{Cli, Commands, Environment, LogLevel};

use crate::config::Settings;
use crate::config::error::ConfigError;

/// Loads the configuration files and applies the CLI overrides.
pub fn load_and_merge_config(cli: &Cli) -> Result<Settings, ConfigError> {
    ConfigurationMerger::from_cli(cli)?.merge_cli_args(cli)
}

/// Installs the global subscriber described by `settings.logger`.
pub fn init_logger_from_settings(settings: &Settings) -> anyhow::Result<()> {
    let logger_config = settings.logger.clone().into_logger_config()?;
    crate::logger::init_logger(logger_config)
}
