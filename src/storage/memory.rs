use std::{
    cell::{Cell, RefCell},
    collections::BTreeMap,
};

use super::{Result, Storage, StorageError};
use crate::model::{Budget, Expense, Payment};

/// Keeps saved state in memory. `fail_saves` makes every save return an error.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    expenses: RefCell<Vec<Expense>>,
    payments: RefCell<Vec<Payment>>,
    budget: RefCell<Budget>,
    plan_attributes: RefCell<BTreeMap<String, String>>,
    failing: Cell<bool>,
    saves: Cell<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_saves(&self, failing: bool) {
        self.failing.set(failing);
    }

    /// Number of successful saves so far.
    pub fn save_count(&self) -> usize {
        self.saves.get()
    }

    fn guard(&self) -> Result<()> {
        if self.failing.get() {
            return Err(StorageError::Unavailable("disk is read-only".into()));
        }
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}

impl Storage for MemoryStorage {
    fn save_expense_list(&self, expenses: &[Expense]) -> Result<()> {
        self.guard()?;
        *self.expenses.borrow_mut() = expenses.to_vec();
        Ok(())
    }

    fn save_payment_list(&self, payments: &[Payment]) -> Result<()> {
        self.guard()?;
        *self.payments.borrow_mut() = payments.to_vec();
        Ok(())
    }

    fn save_budget(&self, budget: &Budget) -> Result<()> {
        self.guard()?;
        *self.budget.borrow_mut() = budget.clone();
        Ok(())
    }

    fn save_plan_attributes(&self, attributes: &BTreeMap<String, String>) -> Result<()> {
        self.guard()?;
        *self.plan_attributes.borrow_mut() = attributes.clone();
        Ok(())
    }

    fn load_expense_list(&self) -> Result<Vec<Expense>> {
        Ok(self.expenses.borrow().clone())
    }

    fn load_payment_list(&self) -> Result<Vec<Payment>> {
        Ok(self.payments.borrow().clone())
    }

    fn load_budget(&self) -> Result<Budget> {
        Ok(self.budget.borrow().clone())
    }

    fn load_plan_attributes(&self) -> Result<BTreeMap<String, String>> {
        Ok(self.plan_attributes.borrow().clone())
    }
}
