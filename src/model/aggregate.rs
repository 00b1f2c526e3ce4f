//! Read-only reducers over canonical or displayed records.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use super::{expense::Expense, list::ListItem, payment::Payment};

/// A record carrying money that can be summed.
pub trait Spend: ListItem {
    fn amount(&self) -> Decimal;

    /// Tentative records are left out of totals until confirmed.
    fn is_tentative(&self) -> bool {
        false
    }
}

impl Spend for Expense {
    fn amount(&self) -> Decimal {
        self.amount
    }

    fn is_tentative(&self) -> bool {
        self.tentative
    }
}

impl Spend for Payment {
    fn amount(&self) -> Decimal {
        self.amount
    }
}

pub fn total_amount<T: Spend>(records: &[T], exclude_tentative: bool) -> Decimal {
    saturating_sum(
        records
            .iter()
            .filter(|record| !(exclude_tentative && record.is_tentative()))
            .map(Spend::amount),
    )
}

/// Sum of non-tentative records tagged with `tag`.
pub fn tag_amount<T: Spend>(records: &[T], tag: &str) -> Decimal {
    saturating_sum(
        records
            .iter()
            .filter(|record| !record.is_tentative() && record.has_tag(tag))
            .map(Spend::amount),
    )
}

/// Non-tentative spending per tag, for breakdown charts.
pub fn amounts_by_tag(records: &[Expense]) -> BTreeMap<String, Decimal> {
    let mut totals = BTreeMap::new();
    for expense in records.iter().filter(|expense| !expense.tentative) {
        for tag in &expense.tags {
            let total = totals.entry(tag.clone()).or_insert(Decimal::ZERO);
            *total = saturating_add(*total, expense.amount);
        }
    }
    totals
}

/// Sums non-negative amounts, pinning the result at `Decimal::MAX` instead of overflowing.
pub fn saturating_sum(amounts: impl IntoIterator<Item = Decimal>) -> Decimal {
    amounts.into_iter().fold(Decimal::ZERO, saturating_add)
}

pub(crate) fn saturating_add(total: Decimal, amount: Decimal) -> Decimal {
    total.checked_add(amount).unwrap_or(Decimal::MAX)
}
