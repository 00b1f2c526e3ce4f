use std::collections::HashMap;

use once_cell::sync::Lazy;
use tracing::{debug, info};

use crate::{
    errors::{DomainError, Result},
    model::Model,
    storage::Storage,
};

use super::{
    commands::{Command, CommandResult},
    params::CommandParams,
};

/// Name, help text and accepted `/params` of one command.
pub struct CommandEntry {
    pub name: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
    pub params: &'static [&'static str],
    pub command: Command,
}

impl CommandEntry {
    pub const fn new(
        name: &'static str,
        description: &'static str,
        usage: &'static str,
        params: &'static [&'static str],
        command: Command,
    ) -> Self {
        Self {
            name,
            description,
            usage,
            params,
            command,
        }
    }

    pub fn accepts(&self, param: &str) -> bool {
        self.params.contains(&param)
    }
}

pub struct CommandRegistry {
    commands: HashMap<String, &'static CommandEntry>,
    order: Vec<&'static str>,
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

static REGISTRY: Lazy<CommandRegistry> = Lazy::new(|| {
    let mut registry = CommandRegistry::new();
    for command in Command::ALL {
        registry.register(command.entry());
    }
    info!(commands = registry.order.len(), "command registry built");
    registry
});

/// The process-wide registry holding every shipped command.
pub fn global() -> &'static CommandRegistry {
    &REGISTRY
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self {
            commands: HashMap::new(),
            order: Vec::new(),
        }
    }

    pub fn register(&mut self, entry: &'static CommandEntry) {
        let key = entry.name.to_ascii_lowercase();
        if self.commands.insert(key, entry).is_none() {
            self.order.push(entry.name);
        }
    }

    /// Looks a command up ignoring ASCII case.
    pub fn get(&self, name: &str) -> Option<&'static CommandEntry> {
        self.commands.get(&name.to_ascii_lowercase()).copied()
    }

    pub fn list(&self) -> Vec<&'static CommandEntry> {
        self.order.iter().filter_map(|name| self.get(name)).collect()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.order.iter().copied()
    }

    /// Runs the command named by `params`. Failures are returned untouched for the shell to report.
    pub fn dispatch(
        &self,
        params: &CommandParams,
        model: &mut Model,
        storage: &dyn Storage,
    ) -> Result<CommandResult> {
        let entry = self
            .get(params.command())
            .ok_or_else(|| DomainError::UnknownCommand(params.command().to_string()))?;
        debug!(command = entry.name, "dispatching");
        entry.command.execute(params, model, storage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_command_is_registered_once_in_order() {
        let names: Vec<_> = global().names().collect();
        assert_eq!(names.len(), Command::ALL.len());
        assert_eq!(names.first(), Some(&"addExpense"));
        assert!(names.contains(&"viewBudget"));
    }

    #[test]
    fn lookup_ignores_case() {
        let entry = global().get("ADDEXPENSE").unwrap();
        assert_eq!(entry.name, "addExpense");
        assert!(entry.accepts("tentative"));
        assert!(!entry.accepts("due"));
        assert!(global().get("addExpenses").is_none());
    }
}
