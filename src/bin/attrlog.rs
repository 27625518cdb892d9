//! `attrlog` pretty-prints JSON log lines on the terminal.
//!
//! Usage:
//!   attrlog [<file>]                     Read from a file (or stdin)
//!   attrlog --level debug app.log        Show debug and above
//!   attrlog --color never < app.log      Plain output

use attrlog::cli::{Cli, cmd_pretty};
use attrlog::handler::CliHandler;
use attrlog::internal;
use clap::Parser;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match cli.load_config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading config: {e}");
            return ExitCode::FAILURE;
        }
    };

    internal::init_with_config(&config);

    let handler = CliHandler::from_terminal(std::io::stdout(), cli.handler_options(&config));
    cmd_pretty(cli.input.as_deref(), &handler)
}
