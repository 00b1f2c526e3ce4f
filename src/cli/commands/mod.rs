pub mod budget;
pub mod expense;
pub mod payment;
pub mod plan;
pub mod system;

use tracing::info;

use crate::{
    errors::{DomainError, MalformedCommand, Result},
    model::Model,
    storage::Storage,
};

use super::{params::CommandParams, registry::CommandEntry};

/// Which pane the shell should show after a command ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayedPane {
    Expense,
    Payment,
    Budget,
    Plan,
    Unchanged,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    pub message: String,
    pub pane: DisplayedPane,
    pub exit: bool,
}

impl CommandResult {
    pub fn new(message: impl Into<String>, pane: DisplayedPane) -> Self {
        Self {
            message: message.into(),
            pane,
            exit: false,
        }
    }

    pub fn exit(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            pane: DisplayedPane::Unchanged,
            exit: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    AddExpense,
    DeleteExpense,
    ClearExpense,
    SortExpense,
    ViewExpense,
    FilterExpense,
    AddPayment,
    DeletePayment,
    SortPayment,
    SetBudget,
    ViewBudget,
    Plan,
    Help,
    Version,
    Exit,
}

impl Command {
    pub const ALL: [Command; 15] = [
        Command::AddExpense,
        Command::DeleteExpense,
        Command::ClearExpense,
        Command::SortExpense,
        Command::ViewExpense,
        Command::FilterExpense,
        Command::AddPayment,
        Command::DeletePayment,
        Command::SortPayment,
        Command::SetBudget,
        Command::ViewBudget,
        Command::Plan,
        Command::Help,
        Command::Version,
        Command::Exit,
    ];

    pub fn entry(self) -> &'static CommandEntry {
        match self {
            Command::AddExpense => &expense::ADD,
            Command::DeleteExpense => &expense::DELETE,
            Command::ClearExpense => &expense::CLEAR,
            Command::SortExpense => &expense::SORT,
            Command::ViewExpense => &expense::VIEW,
            Command::FilterExpense => &expense::FILTER,
            Command::AddPayment => &payment::ADD,
            Command::DeletePayment => &payment::DELETE,
            Command::SortPayment => &payment::SORT,
            Command::SetBudget => &budget::SET,
            Command::ViewBudget => &budget::VIEW,
            Command::Plan => &plan::PLAN,
            Command::Help => &system::HELP,
            Command::Version => &system::VERSION,
            Command::Exit => &system::EXIT,
        }
    }

    /// Rejects parameters the command does not declare, then runs it.
    pub fn execute(
        self,
        params: &CommandParams,
        model: &mut Model,
        storage: &dyn Storage,
    ) -> Result<CommandResult> {
        let entry = self.entry();
        let mut unexpected: Vec<&str> = params
            .param_names()
            .filter(|name| !entry.accepts(name))
            .collect();
        unexpected.sort_unstable();
        if let Some(name) = unexpected.first() {
            return Err(MalformedCommand::UnexpectedParam(name.to_string()).into());
        }

        let result = match self {
            Command::AddExpense => expense::add(params, model, storage),
            Command::DeleteExpense => expense::delete(params, model, storage),
            Command::ClearExpense => expense::clear(params, model, storage),
            Command::SortExpense => expense::sort(params, model),
            Command::ViewExpense => expense::view(params, model),
            Command::FilterExpense => expense::filter(params, model),
            Command::AddPayment => payment::add(params, model, storage),
            Command::DeletePayment => payment::delete(params, model, storage),
            Command::SortPayment => payment::sort(params, model),
            Command::SetBudget => budget::set(params, model, storage),
            Command::ViewBudget => budget::view(params, model, storage),
            Command::Plan => plan::plan(params, model, storage),
            Command::Help => system::help(params),
            Command::Version => system::version(params),
            Command::Exit => system::exit(params),
        }?;
        info!(command = entry.name, pane = ?result.pane, "command completed");
        Ok(result)
    }
}

/// The main parameter, reported under `name` when missing.
pub(crate) fn required_main<'a>(params: &'a CommandParams, name: &str) -> Result<&'a str> {
    params
        .main_param()
        .ok_or_else(|| DomainError::missing_param(name))
}

/// A secondary parameter the command cannot run without.
pub(crate) fn required_param<'a>(params: &'a CommandParams, name: &str) -> Result<&'a str> {
    if !params.contains_param(name) {
        return Err(DomainError::missing_param(name));
    }
    params.param(name)
}

/// One-based list position typed by the user.
pub(crate) fn parse_position(raw: &str) -> Result<usize> {
    raw.trim()
        .parse()
        .map_err(|_| DomainError::Validation(format!("`{raw}` is not a list position")))
}


#[cfg(test)]
mod tests {
    use super::{test_support::*, *};
    use crate::storage::memory::MemoryStorage;

    #[test]
    fn undeclared_params_are_rejected_before_running() {
        let mut model = model();
        let storage = MemoryStorage::new();
        let err = run("addExpense 5 /due 2024-01-01", &mut model, &storage).unwrap_err();
        assert_eq!(
            err,
            DomainError::from(MalformedCommand::UnexpectedParam("due".into()))
        );
        assert!(model.expenses().is_empty());
    }

    #[test]
    fn every_command_has_a_distinct_entry() {
        for command in Command::ALL {
            assert_eq!(command.entry().command, command);
        }
    }
}
