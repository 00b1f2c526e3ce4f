use std::collections::BTreeMap;

use rust_decimal::{prelude::ToPrimitive, Decimal};
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Number of budget panes the presentation layer can show side by side.
pub const BUDGET_PANES: u8 = 6;

/// Per-category spending limits and which category each budget pane tracks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    #[serde(default)]
    pub categories: BTreeMap<String, Decimal>,
    #[serde(default)]
    pub panes: BTreeMap<u8, String>,
}

impl Budget {
    pub fn set_category(&mut self, category: &str, amount: Decimal) {
        if amount.is_zero() {
            self.categories.remove(category);
        } else {
            self.categories.insert(category.to_string(), amount);
        }
    }

    /// The limit for `category`, zero when none is set.
    pub fn category_budget(&self, category: &str) -> Decimal {
        self.categories
            .get(category)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    pub fn set_pane(&mut self, pane: u8, category: &str) -> Result<(), DomainError> {
        if !(1..=BUDGET_PANES).contains(&pane) {
            return Err(DomainError::Validation(format!(
                "budget pane must be between 1 and {BUDGET_PANES}, got {pane}"
            )));
        }
        self.panes.insert(pane, category.to_string());
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetStatus {
    NoBudget,
    Remaining(Decimal),
    Reached,
    Exceeded(Decimal),
}

/// Spending against a category limit, ready for a progress bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetGauge {
    pub category: String,
    pub spent: Decimal,
    pub limit: Decimal,
}

impl BudgetGauge {
    pub fn new(category: impl Into<String>, spent: Decimal, limit: Decimal) -> Self {
        Self {
            category: category.into(),
            spent,
            limit,
        }
    }

    /// Fraction of the limit spent; zero when there is no limit and
    /// infinite when the quotient is too large for a `Decimal`.
    pub fn ratio(&self) -> f64 {
        if self.limit.is_zero() {
            return 0.0;
        }
        match self.spent.checked_div(self.limit) {
            Some(ratio) => ratio.to_f64().unwrap_or(f64::INFINITY),
            None => f64::INFINITY,
        }
    }

    /// Limit left to spend, negative once the budget is exceeded.
    pub fn remaining(&self) -> Decimal {
        self.limit - self.spent
    }

    pub fn status(&self) -> BudgetStatus {
        if self.limit.is_zero() {
            BudgetStatus::NoBudget
        } else if self.spent < self.limit {
            BudgetStatus::Remaining(self.limit - self.spent)
        } else if self.spent == self.limit {
            BudgetStatus::Reached
        } else {
            BudgetStatus::Exceeded(self.spent - self.limit)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(value: i64) -> Decimal {
        Decimal::from(value)
    }

    #[test]
    fn missing_category_has_zero_budget() {
        let mut budget = Budget::default();
        budget.set_category("food", dec(200));
        assert_eq!(budget.category_budget("food"), dec(200));
        assert_eq!(budget.category_budget("rent"), Decimal::ZERO);
        budget.set_category("food", Decimal::ZERO);
        assert!(budget.categories.is_empty());
    }

    #[test]
    fn panes_are_bounded() {
        let mut budget = Budget::default();
        budget.set_pane(6, "food").unwrap();
        assert!(budget.set_pane(0, "food").is_err());
        assert!(budget.set_pane(7, "food").is_err());
        assert_eq!(budget.panes.get(&6).map(String::as_str), Some("food"));
    }

    #[test]
    fn gauge_reports_status() {
        assert_eq!(
            BudgetGauge::new("food", dec(10), Decimal::ZERO).status(),
            BudgetStatus::NoBudget
        );
        assert_eq!(
            BudgetGauge::new("food", dec(30), dec(100)).status(),
            BudgetStatus::Remaining(dec(70))
        );
        assert_eq!(
            BudgetGauge::new("food", dec(100), dec(100)).status(),
            BudgetStatus::Reached
        );
        let over = BudgetGauge::new("food", dec(150), dec(100));
        assert_eq!(over.status(), BudgetStatus::Exceeded(dec(50)));
        assert!((over.ratio() - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn tiny_limit_saturates_the_ratio() {
        let limit = Decimal::new(1, 28);
        let gauge = BudgetGauge::new("food", dec(1_000_000), limit);
        assert_eq!(gauge.ratio(), f64::INFINITY);
        assert_eq!(gauge.status(), BudgetStatus::Exceeded(dec(1_000_000) - limit));
    }
}
