use std::{cmp::Ordering, collections::BTreeSet, fmt, str::FromStr};

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::list::ListItem;
use crate::errors::DomainError;

const DATE_TIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M"];
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Largest amount a single record may carry.
pub const MAX_AMOUNT: i64 = 1_000_000_000_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    pub id: Uuid,
    pub amount: Decimal,
    pub time: NaiveDateTime,
    pub description: String,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(default)]
    pub tentative: bool,
}

impl Expense {
    pub fn builder(now: NaiveDateTime) -> ExpenseBuilder {
        ExpenseBuilder::new(now)
    }

    pub fn tags_label(&self) -> String {
        self.tags.iter().cloned().collect::<Vec<_>>().join(" ")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExpenseSort {
    Amount,
    #[default]
    Time,
    Description,
}

impl FromStr for ExpenseSort {
    type Err = DomainError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "amount" => Ok(ExpenseSort::Amount),
            "time" => Ok(ExpenseSort::Time),
            "description" => Ok(ExpenseSort::Description),
            _ => Err(DomainError::InvalidCriteria(raw.to_string())),
        }
    }
}

impl fmt::Display for ExpenseSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ExpenseSort::Amount => "amount",
            ExpenseSort::Time => "time",
            ExpenseSort::Description => "description",
        })
    }
}

impl ListItem for Expense {
    type Sort = ExpenseSort;

    fn id(&self) -> Uuid {
        self.id
    }

    fn date(&self) -> NaiveDate {
        self.time.date()
    }

    fn compare(&self, other: &Self, sort: ExpenseSort) -> Ordering {
        match sort {
            ExpenseSort::Amount => self.amount.cmp(&other.amount),
            ExpenseSort::Time => self.time.cmp(&other.time),
            ExpenseSort::Description => self.description.cmp(&other.description),
        }
    }

    fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    fn description(&self) -> &str {
        &self.description
    }
}

/// Collects and validates the fields of an [`Expense`].
#[derive(Debug, Clone)]
pub struct ExpenseBuilder {
    amount: Option<Decimal>,
    time: NaiveDateTime,
    description: String,
    tags: BTreeSet<String>,
    tentative: bool,
}

impl ExpenseBuilder {
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            amount: None,
            time: now,
            description: String::new(),
            tags: BTreeSet::new(),
            tentative: false,
        }
    }

    pub fn amount(mut self, raw: &str) -> Result<Self, DomainError> {
        self.amount = Some(parse_amount(raw)?);
        Ok(self)
    }

    pub fn amount_value(mut self, amount: Decimal) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn time(mut self, raw: &str) -> Result<Self, DomainError> {
        self.time = parse_time(raw)?;
        Ok(self)
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Space separated tags; duplicates collapse.
    pub fn tags(mut self, raw: &str) -> Self {
        self.tags = raw.split_whitespace().map(str::to_string).collect();
        self
    }

    pub fn tentative(mut self, tentative: bool) -> Self {
        self.tentative = tentative;
        self
    }

    pub fn build(self) -> Result<Expense, DomainError> {
        let amount = self
            .amount
            .ok_or_else(|| DomainError::Validation("an expense needs an amount".into()))?;
        Ok(Expense {
            id: Uuid::new_v4(),
            amount,
            time: self.time,
            description: self.description,
            tags: self.tags,
            tentative: self.tentative,
        })
    }
}

/// Parses a non-negative decimal amount such as `2.12`, tolerating a leading `$`.
/// Amounts above [`MAX_AMOUNT`] are rejected.
pub fn parse_amount(raw: &str) -> Result<Decimal, DomainError> {
    let trimmed = raw.trim();
    let digits = trimmed.strip_prefix('$').unwrap_or(trimmed);
    let amount = Decimal::from_str(digits)
        .map_err(|_| DomainError::Validation(format!("`{raw}` is not a valid amount")))?;
    if amount.is_sign_negative() {
        return Err(DomainError::Validation(format!(
            "amount `{raw}` must not be negative"
        )));
    }
    if amount > Decimal::from(MAX_AMOUNT) {
        return Err(DomainError::Validation(format!(
            "amount `{raw}` is larger than {MAX_AMOUNT}"
        )));
    }
    Ok(amount)
}

/// Accepts `YYYY-MM-DD HH:MM[:SS]` or a bare `YYYY-MM-DD` (midnight).
pub fn parse_time(raw: &str) -> Result<NaiveDateTime, DomainError> {
    let trimmed = raw.trim();
    for format in DATE_TIME_FORMATS {
        if let Ok(time) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(time);
        }
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .ok_or_else(|| DomainError::Validation(format!("`{raw}` is not a valid date or time")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(raw: &str) -> Decimal {
        Decimal::from_str(raw).unwrap()
    }

    fn now() -> NaiveDateTime {
        parse_time("2024-05-01 09:30").unwrap()
    }

    #[test]
    fn builds_expense_with_tags_and_default_time() {
        let expense = Expense::builder(now())
            .amount("2.12")
            .unwrap()
            .description("hello")
            .tags("a b c b")
            .build()
            .unwrap();
        assert_eq!(expense.amount, dec("2.12"));
        assert_eq!(expense.time, now());
        assert_eq!(expense.tags_label(), "a b c");
        assert!(!expense.tentative);
    }

    #[test]
    fn rejects_bad_amounts() {
        assert!(matches!(parse_amount("abc"), Err(DomainError::Validation(_))));
        assert!(matches!(parse_amount("-3"), Err(DomainError::Validation(_))));
        assert_eq!(parse_amount("$4.50").unwrap(), dec("4.50"));
        assert_eq!(parse_amount("1000000000000").unwrap(), dec("1000000000000"));
        assert!(matches!(
            parse_amount("1000000000000.01"),
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            parse_amount("79228162514264337593543950335"),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn missing_amount_fails_to_build() {
        let result = Expense::builder(now()).description("lunch").build();
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn parses_dates_and_times() {
        let midnight = parse_time("2024-02-29").unwrap();
        assert_eq!(midnight.to_string(), "2024-02-29 00:00:00");
        assert!(parse_time("yesterday").is_err());
    }

    #[test]
    fn sort_names_are_case_insensitive() {
        assert_eq!("AMOUNT".parse::<ExpenseSort>().unwrap(), ExpenseSort::Amount);
        assert_eq!(
            "colour".parse::<ExpenseSort>(),
            Err(DomainError::InvalidCriteria("colour".into()))
        );
    }
}
