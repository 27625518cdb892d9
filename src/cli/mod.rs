//! Command-line interface for the `attrlog` binary.
//!
//! `attrlog` reads JSON log lines, as written by [`crate::JsonHandler`], and
//! pretty-prints them through the console handler.

mod json;

pub use json::{cmd_pretty, parse_line};

use crate::config::Config;
use crate::handler::CliHandlerOptions;
use crate::level::Level;
use crate::output::ColorChoice;
use clap::Parser;
use std::path::PathBuf;

/// attrlog - Pretty-print JSON log lines.
#[derive(Debug, Parser)]
#[command(name = "attrlog", version, about = "Pretty-print JSON log lines")]
pub struct Cli {
    /// Input file (reads stdin if omitted or "-")
    pub input: Option<PathBuf>,

    /// Minimum level to print (trace, debug, info, warn, error, or e.g. info+2)
    #[arg(short, long)]
    pub level: Option<Level>,

    /// Config file (defaults to <config_dir>/attrlog/config.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// When to color output (auto, always, never)
    #[arg(long)]
    pub color: Option<ColorChoice>,

    /// Message column width; negative disables padding
    #[arg(long, allow_hyphen_values = true)]
    pub message_padding: Option<i32>,
}

impl Cli {
    /// Loads the config file named on the command line, or the default one.
    ///
    /// # Errors
    /// Fails if an explicitly named config is missing or either file is malformed.
    pub fn load_config(&self) -> Result<Config, crate::Error> {
        self.config
            .as_deref()
            .map_or_else(Config::load, Config::load_from)
    }

    /// Config-derived options with command-line overrides applied.
    #[must_use]
    pub fn handler_options(&self, config: &Config) -> CliHandlerOptions {
        let mut opts = config.cli_handler_options();
        if let Some(level) = self.level {
            opts = opts.level(level);
        }
        if let Some(color) = self.color {
            opts = opts.color(color);
        }
        if let Some(padding) = self.message_padding {
            opts = opts.message_padding(padding);
        }
        opts
    }
}
