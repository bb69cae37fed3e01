//! `menucost` command line: loads a catalog snapshot and prints cost reports as JSON.

pub mod cli;
pub mod load;
pub mod report;
pub mod settings;

pub use cli::{execute, run, Cli, CliError, Command};
pub use load::{load_catalog, LoadError};
pub use settings::{ConfigError, Settings, SettingsArgs};
