use std::{cmp::Ordering, collections::BTreeSet, fmt, str::FromStr};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{
    expense::{parse_amount, parse_time},
    list::ListItem,
};
use crate::errors::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl FromStr for Priority {
    type Err = DomainError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "high" | "h" => Ok(Priority::High),
            "medium" | "m" => Ok(Priority::Medium),
            "low" | "l" => Ok(Priority::Low),
            _ => Err(DomainError::Validation(format!(
                "`{raw}` is not a priority (high, medium, low)"
            ))),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        })
    }
}

/// A pending payment the user still has to make.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    pub id: Uuid,
    pub amount: Decimal,
    pub due: NaiveDate,
    pub description: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub receiver: Option<String>,
    #[serde(default)]
    pub tags: BTreeSet<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaymentSort {
    Amount,
    #[default]
    Time,
    Description,
    Priority,
}

impl FromStr for PaymentSort {
    type Err = DomainError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "amount" => Ok(PaymentSort::Amount),
            "time" | "due" => Ok(PaymentSort::Time),
            "description" => Ok(PaymentSort::Description),
            "priority" => Ok(PaymentSort::Priority),
            _ => Err(DomainError::InvalidCriteria(raw.to_string())),
        }
    }
}

impl fmt::Display for PaymentSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PaymentSort::Amount => "amount",
            PaymentSort::Time => "time",
            PaymentSort::Description => "description",
            PaymentSort::Priority => "priority",
        })
    }
}

impl ListItem for Payment {
    type Sort = PaymentSort;

    fn id(&self) -> Uuid {
        self.id
    }

    fn date(&self) -> NaiveDate {
        self.due
    }

    fn compare(&self, other: &Self, sort: PaymentSort) -> Ordering {
        match sort {
            PaymentSort::Amount => self.amount.cmp(&other.amount),
            PaymentSort::Time => self.due.cmp(&other.due),
            PaymentSort::Description => self.description.cmp(&other.description),
            PaymentSort::Priority => self.priority.cmp(&other.priority),
        }
    }

    fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    fn description(&self) -> &str {
        &self.description
    }
}

/// Collects and validates the fields of a [`Payment`]. Amount, description and due date are required.
#[derive(Debug, Clone, Default)]
pub struct PaymentBuilder {
    amount: Option<Decimal>,
    due: Option<NaiveDate>,
    description: Option<String>,
    priority: Priority,
    receiver: Option<String>,
    tags: BTreeSet<String>,
}

impl PaymentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn amount(mut self, raw: &str) -> Result<Self, DomainError> {
        self.amount = Some(parse_amount(raw)?);
        Ok(self)
    }

    pub fn due(mut self, raw: &str) -> Result<Self, DomainError> {
        self.due = Some(parse_time(raw)?.date());
        Ok(self)
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn priority(mut self, raw: &str) -> Result<Self, DomainError> {
        self.priority = raw.parse()?;
        Ok(self)
    }

    pub fn receiver(mut self, receiver: impl Into<String>) -> Self {
        self.receiver = Some(receiver.into());
        self
    }

    pub fn tags(mut self, raw: &str) -> Self {
        self.tags = raw.split_whitespace().map(str::to_string).collect();
        self
    }

    pub fn build(self) -> Result<Payment, DomainError> {
        let missing = |field: &str| DomainError::Validation(format!("a payment needs a {field}"));
        Ok(Payment {
            id: Uuid::new_v4(),
            amount: self.amount.ok_or_else(|| missing("amount"))?,
            due: self.due.ok_or_else(|| missing("due date"))?,
            description: self.description.ok_or_else(|| missing("description"))?,
            priority: self.priority,
            receiver: self.receiver,
            tags: self.tags,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_payment_from_raw_fields() {
        let payment = PaymentBuilder::new()
            .amount("120")
            .unwrap()
            .due("2024-07-01")
            .unwrap()
            .description("insurance")
            .priority("HIGH")
            .unwrap()
            .receiver("NTUC")
            .tags("car yearly")
            .build()
            .unwrap();
        assert_eq!(payment.due, NaiveDate::from_ymd_opt(2024, 7, 1).unwrap());
        assert_eq!(payment.priority, Priority::High);
        assert!(payment.has_tag("yearly"));
    }

    #[test]
    fn due_date_is_required() {
        let result = PaymentBuilder::new()
            .amount("5")
            .unwrap()
            .description("phone")
            .build();
        assert!(matches!(result, Err(DomainError::Validation(message)) if message.contains("due")));
    }

    #[test]
    fn priority_orders_high_first() {
        assert!(Priority::High < Priority::Low);
        assert!("urgent".parse::<Priority>().is_err());
    }
}
