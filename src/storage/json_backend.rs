use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use super::{Result, Storage};
use crate::{
    model::{Budget, Expense, Payment},
    utils::paths::{ensure_dir, write_atomic},
};

const EXPENSES_FILE: &str = "expenses.json";
const PAYMENTS_FILE: &str = "payments.json";
const BUDGET_FILE: &str = "budget.json";
const PLAN_FILE: &str = "plan_attributes.json";

/// Stores each part of the model as a pretty-printed JSON file under one directory.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    root: PathBuf,
}

impl JsonStorage {
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        ensure_dir(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path(&self, file: &str) -> PathBuf {
        self.root.join(file)
    }

    fn write<T: Serialize + ?Sized>(&self, file: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        let path = self.path(file);
        write_atomic(&path, &json)?;
        debug!(path = %path.display(), bytes = json.len(), "saved");
        Ok(())
    }

    /// Missing files read as the type's default.
    fn read<T: DeserializeOwned + Default>(&self, file: &str) -> Result<T> {
        let path = self.path(file);
        if !path.exists() {
            return Ok(T::default());
        }
        let data = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&data)?)
    }
}

impl Storage for JsonStorage {
    fn save_expense_list(&self, expenses: &[Expense]) -> Result<()> {
        self.write(EXPENSES_FILE, expenses)
    }

    fn save_payment_list(&self, payments: &[Payment]) -> Result<()> {
        self.write(PAYMENTS_FILE, payments)
    }

    fn save_budget(&self, budget: &Budget) -> Result<()> {
        self.write(BUDGET_FILE, budget)
    }

    fn save_plan_attributes(&self, attributes: &BTreeMap<String, String>) -> Result<()> {
        self.write(PLAN_FILE, attributes)
    }

    fn load_expense_list(&self) -> Result<Vec<Expense>> {
        self.read(EXPENSES_FILE)
    }

    fn load_payment_list(&self) -> Result<Vec<Payment>> {
        self.read(PAYMENTS_FILE)
    }

    fn load_budget(&self) -> Result<Budget> {
        self.read(BUDGET_FILE)
    }

    fn load_plan_attributes(&self) -> Result<BTreeMap<String, String>> {
        self.read(PLAN_FILE)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use tempfile::TempDir;

    use super::*;
    use crate::storage::StorageError;

    fn storage_with_temp_dir() -> (JsonStorage, TempDir) {
        let temp = TempDir::new().expect("temp dir");
        let storage = JsonStorage::new(temp.path().join("data")).expect("json storage");
        (storage, temp)
    }

    #[test]
    fn empty_directory_loads_defaults() {
        let (storage, _guard) = storage_with_temp_dir();
        assert!(storage.load_expense_list().unwrap().is_empty());
        assert!(storage.load_payment_list().unwrap().is_empty());
        assert_eq!(storage.load_budget().unwrap(), Budget::default());
        assert!(storage.load_plan_attributes().unwrap().is_empty());
    }

    #[test]
    fn save_and_load_expenses() {
        let (storage, _guard) = storage_with_temp_dir();
        let now = NaiveDate::from_ymd_opt(2024, 5, 2)
            .unwrap()
            .and_hms_opt(13, 15, 0)
            .unwrap();
        let expense = Expense::builder(now)
            .amount("0.10")
            .unwrap()
            .description("gum")
            .tags("snack")
            .tentative(true)
            .build()
            .unwrap();
        storage.save_expense_list(&[expense.clone()]).unwrap();
        let loaded = storage.load_expense_list().unwrap();
        assert_eq!(loaded, vec![expense]);
        assert_eq!(loaded[0].amount, Decimal::new(10, 2));
    }

    #[test]
    fn corrupt_file_is_a_serde_error() {
        let (storage, _guard) = storage_with_temp_dir();
        fs::write(storage.root().join(BUDGET_FILE), "not json").unwrap();
        assert!(matches!(storage.load_budget(), Err(StorageError::Serde(_))));
    }
}
