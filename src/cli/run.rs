//! Dispatches parsed arguments to a command.
//!
//! Without a subcommand the sync run is executed.

use anyhow::Result;

use super::{
    args::{Arguments, Command},
    commands::{init::init, sync::sync},
    exit_status::ExitStatus,
};

pub fn run(Arguments { command, sync: args }: Arguments) -> Result<ExitStatus> {
    match command {
        Some(Command::Init) => init(),
        None => sync(args),
    }
}
