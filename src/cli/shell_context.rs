use std::sync::Arc;

use strsim::levenshtein;
use tracing::{info, warn};

use crate::{
    config::{Config, ConfigManager},
    errors::{CliError, DomainError},
    model::{Clock, Model, SystemClock},
    storage::{json_backend::JsonStorage, Storage},
};

use super::{
    commands::DisplayedPane,
    output,
    params::CommandParams,
    registry::{self, CommandRegistry},
    render::{render_pane, RenderOptions},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

/// Everything one shell session owns: the model, where it is saved and how it is shown.
pub struct ShellContext {
    pub registry: &'static CommandRegistry,
    pub model: Model,
    pub storage: Box<dyn Storage>,
    pub options: RenderOptions,
    pub pane: DisplayedPane,
    pub running: bool,
}

impl ShellContext {
    /// Opens the data directory, loads configuration and restores the saved model.
    pub fn new() -> Result<Self, CliError> {
        let config_manager = ConfigManager::new()?;
        let config = config_manager.load().unwrap_or_else(|err| {
            warn!(%err, path = %config_manager.path().display(), "config unreadable, using defaults");
            Config::default()
        });
        let storage = JsonStorage::new(config_manager.base_dir())?;
        info!(root = %storage.root().display(), "using data directory");
        Self::with_parts(Box::new(storage), config, Arc::new(SystemClock))
    }

    pub fn with_parts(
        storage: Box<dyn Storage>,
        config: Config,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, CliError> {
        let mut model = Model::load(storage.as_ref(), clock)?;
        config.apply_to(&mut model);
        output::set_plain(config.plain_output);
        let options = RenderOptions {
            currency_symbol: config.currency_symbol.clone(),
            plain: config.plain_output,
        };
        Ok(Self {
            registry: registry::global(),
            model,
            storage,
            options,
            pane: DisplayedPane::Expense,
            running: true,
        })
    }

    pub fn prompt(&self) -> String {
        let pane = match self.pane {
            DisplayedPane::Expense | DisplayedPane::Unchanged => "expenses",
            DisplayedPane::Payment => "payments",
            DisplayedPane::Budget => "budget",
            DisplayedPane::Plan => "plan",
        };
        format!("finance [{pane}]> ")
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    /// Parses and runs one line, printing the outcome. Command failures never end the session.
    pub(crate) fn handle_line(&mut self, line: &str) -> LoopControl {
        let line = line.trim();
        if line.is_empty() {
            return LoopControl::Continue;
        }

        let outcome = CommandParams::parse(line, self.registry).and_then(|params| {
            self.registry
                .dispatch(&params, &mut self.model, self.storage.as_ref())
        });
        match outcome {
            Ok(result) => {
                if !result.message.is_empty() {
                    output::success(&result.message);
                }
                if result.exit {
                    self.running = false;
                    return LoopControl::Exit;
                }
                if result.pane != DisplayedPane::Unchanged {
                    self.pane = result.pane;
                }
                self.show(result.pane);
            }
            Err(err) => self.report_error(err),
        }
        LoopControl::Continue
    }

    pub fn show(&self, pane: DisplayedPane) {
        if let Some(text) = render_pane(pane, &self.model, &self.options) {
            println!("{text}");
        }
    }

    pub(crate) fn report_error(&self, err: DomainError) {
        match &err {
            DomainError::UnknownCommand(name) if name.is_empty() => {}
            DomainError::UnknownCommand(name) => self.suggest_command(name),
            DomainError::Malformed(_) | DomainError::InvalidCriteria(_) => {
                output::error(&err);
                output::info("Use `help <command>` for usage details.");
            }
            _ => output::error(&err),
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{input}`. Type `help` to see available commands."
        ));
        if let Some(best) = self.closest_command(input) {
            output::info(format!("Did you mean `{best}`?"));
        }
    }

    /// Registered name within edit distance 3 of `input`, ignoring case.
    pub fn closest_command(&self, input: &str) -> Option<&'static str> {
        let needle = input.to_ascii_lowercase();
        self.registry
            .names()
            .map(|name| (levenshtein(&name.to_ascii_lowercase(), &needle), name))
            .filter(|(distance, _)| *distance <= 3)
            .min_by_key(|(distance, _)| *distance)
            .map(|(_, name)| name)
    }
}
