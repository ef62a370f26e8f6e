//! Command-line interface layer.

use anyhow::Result;

pub mod args;
pub mod commands;
pub mod exit_status;
pub mod report;
mod run;

pub use args::{Arguments, Command};
pub use exit_status::ExitStatus;

use crate::logging;

pub fn run_cli(args: Arguments) -> Result<ExitStatus> {
    logging::init(args.verbose());
    run::run(args)
}
