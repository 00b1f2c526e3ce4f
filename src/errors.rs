use thiserror::Error;

use crate::storage::StorageError;

/// Structural problems with a command line or with the parameters a command received.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedCommand {
    #[error("Parameter `/{0}` was supplied more than once")]
    DuplicateParam(String),
    #[error("Missing required parameter `{0}`")]
    MissingRequiredParam(String),
    #[error("Parameter `{0}` needs a value")]
    MissingValue(String),
    #[error("Command does not accept parameter `/{0}`")]
    UnexpectedParam(String),
}

/// Failures raised while parsing, dispatching or executing a command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("Unknown command `{0}`")]
    UnknownCommand(String),
    #[error(transparent)]
    Malformed(#[from] MalformedCommand),
    #[error("Invalid criteria `{0}`")]
    InvalidCriteria(String),
    #[error("Index {index} is out of range (list has {len} items)")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("Storage failure: {0}")]
    StorageFailure(String),
    #[error("Invalid value: {0}")]
    Validation(String),
}

impl DomainError {
    pub fn missing_value(name: impl Into<String>) -> Self {
        MalformedCommand::MissingValue(name.into()).into()
    }

    pub fn missing_param(name: impl Into<String>) -> Self {
        MalformedCommand::MissingRequiredParam(name.into()).into()
    }

    /// Wraps a persistence failure with a message describing what could not be saved.
    pub fn storage(what: &str, err: StorageError) -> Self {
        DomainError::StorageFailure(format!("could not save {what}: {err}"))
    }
}

pub type Result<T> = std::result::Result<T, DomainError>;

/// Errors that end the shell session rather than a single command.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Readline error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("Configuration error: {0}")]
    Config(String),
}
