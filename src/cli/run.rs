use anyhow::Result;

use super::{
    args::{Arguments, Command},
    commands::{CommandResult, images::images, init::init, locales::locales},
};

/// Dispatch to the handler of the parsed command.
pub fn run(Arguments { command }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Images(args)) => images(args),
        Some(Command::Locales(args)) => locales(args),
        Some(Command::Init) => init(),
        None => {
            anyhow::bail!("No command provided. Use --help to see available commands.")
        }
    }
}
