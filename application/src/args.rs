//! [`Args`] definitions.

use clap::Parser;

use crate::config::LogLevel;

/// Site server of the land-plot catalog.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to the configuration file.
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,

    /// Log level overriding the configured one.
    #[arg(short, long, value_enum)]
    pub log_level: Option<LogLevel>,
}

impl Args {
    /// Parses command line arguments.
    ///
    /// # Errors
    ///
    /// Errors if failed to parse command line arguments.
    pub fn parse() -> Result<Self, clap::Error> {
        <Self as Parser>::try_parse()
    }
}
