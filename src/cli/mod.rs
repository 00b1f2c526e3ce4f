//! Interactive and scripted shell over the finance model.

pub mod commands;
pub mod help;
pub mod output;
pub mod params;
pub mod registry;
pub mod render;
mod shell;
pub mod shell_context;
pub mod table;

pub use commands::{Command, CommandResult, DisplayedPane};
pub use params::CommandParams;
pub use shell::{run_cli, CliMode, SCRIPT_ENV};
pub use shell_context::ShellContext;
