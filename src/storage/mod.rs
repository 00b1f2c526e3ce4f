//! Persistence collaborators. Commands write through after mutating the model.

pub mod json_backend;
pub mod memory;

use std::collections::BTreeMap;

use thiserror::Error;

use crate::model::{Budget, Expense, Payment};

pub use json_backend::JsonStorage;
pub use memory::MemoryStorage;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// Abstraction over backends able to store every part of the model.
pub trait Storage {
    fn save_expense_list(&self, expenses: &[Expense]) -> Result<()>;
    fn save_payment_list(&self, payments: &[Payment]) -> Result<()>;
    fn save_budget(&self, budget: &Budget) -> Result<()>;
    fn save_plan_attributes(&self, attributes: &BTreeMap<String, String>) -> Result<()>;

    fn load_expense_list(&self) -> Result<Vec<Expense>>;
    fn load_payment_list(&self) -> Result<Vec<Payment>>;
    fn load_budget(&self) -> Result<Budget>;
    fn load_plan_attributes(&self) -> Result<BTreeMap<String, String>>;
}
