use crate::{
    cli::{help, params::CommandParams, registry, registry::CommandEntry},
    errors::{DomainError, Result},
    utils::build_info,
};

use super::{Command, CommandResult, DisplayedPane};

pub(crate) static HELP: CommandEntry = CommandEntry::new(
    "help",
    "Show available commands",
    "help [command]",
    &[],
    Command::Help,
);

pub(crate) static VERSION: CommandEntry =
    CommandEntry::new("version", "Show build metadata", "version", &[], Command::Version);

pub(crate) static EXIT: CommandEntry =
    CommandEntry::new("exit", "Exit the shell", "exit", &[], Command::Exit);

pub(crate) fn help(params: &CommandParams) -> Result<CommandResult> {
    let registry = registry::global();
    let text = match params.main_param() {
        Some(name) => {
            let entry = registry
                .get(name)
                .ok_or_else(|| DomainError::UnknownCommand(name.to_string()))?;
            help::command_text(entry)
        }
        None => help::overview_text(registry),
    };
    Ok(CommandResult::new(text, DisplayedPane::Unchanged))
}

pub(crate) fn version(_params: &CommandParams) -> Result<CommandResult> {
    Ok(CommandResult::new(
        build_info::current().summary(),
        DisplayedPane::Unchanged,
    ))
}

pub(crate) fn exit(_params: &CommandParams) -> Result<CommandResult> {
    Ok(CommandResult::exit("Bye!"))
}
