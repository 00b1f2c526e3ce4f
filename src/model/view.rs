//! Time windows that select which records of a list are displayed.

use std::{fmt, str::FromStr};

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ViewUnit {
    Day,
    Week,
    Month,
    Year,
    #[default]
    All,
}

impl FromStr for ViewUnit {
    type Err = DomainError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "day" => Ok(ViewUnit::Day),
            "week" => Ok(ViewUnit::Week),
            "month" => Ok(ViewUnit::Month),
            "year" => Ok(ViewUnit::Year),
            "all" => Ok(ViewUnit::All),
            _ => Err(DomainError::InvalidCriteria(raw.to_string())),
        }
    }
}

impl fmt::Display for ViewUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ViewUnit::Day => "day",
            ViewUnit::Week => "week",
            ViewUnit::Month => "month",
            ViewUnit::Year => "year",
            ViewUnit::All => "all",
        };
        f.write_str(label)
    }
}

/// The unit window `offset` units before today. `All` ignores the offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ViewScope {
    pub unit: ViewUnit,
    pub offset: u32,
}

impl ViewScope {
    pub const ALL: ViewScope = ViewScope {
        unit: ViewUnit::All,
        offset: 0,
    };

    pub fn new(unit: ViewUnit, offset: u32) -> Self {
        Self { unit, offset }
    }

    /// Parses a unit name such as `month`, failing with `InvalidCriteria` on anything else.
    pub fn parse(unit: &str, offset: u32) -> Result<Self, DomainError> {
        Ok(Self::new(unit.parse()?, offset))
    }

    /// Whether a record dated `date` falls inside this window as seen from `today`.
    /// A window that lies outside the calendar range matches nothing.
    pub fn contains(&self, date: NaiveDate, today: NaiveDate) -> bool {
        match self.unit {
            ViewUnit::All => true,
            ViewUnit::Day => today.checked_sub_days(Days::new(self.offset.into())) == Some(date),
            ViewUnit::Week => today
                .checked_sub_days(Days::new(7 * u64::from(self.offset)))
                .is_some_and(|target| week_start(date) == week_start(target)),
            ViewUnit::Month => today
                .checked_sub_months(Months::new(self.offset))
                .is_some_and(|target| {
                    date.year() == target.year() && date.month() == target.month()
                }),
            ViewUnit::Year => i32::try_from(self.offset)
                .ok()
                .and_then(|offset| today.year().checked_sub(offset))
                .is_some_and(|year| date.year() == year),
        }
    }

    /// Keeps the items whose date falls in the window, preserving their order.
    pub fn window<'a, T>(
        &self,
        items: &'a [T],
        today: NaiveDate,
        date_of: impl Fn(&T) -> NaiveDate,
    ) -> Vec<&'a T> {
        items
            .iter()
            .filter(|item| self.contains(date_of(item), today))
            .collect()
    }
}

impl fmt::Display for ViewScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.unit, self.offset) {
            (ViewUnit::All, _) => f.write_str("all"),
            (unit, 0) => write!(f, "this {unit}"),
            (unit, 1) => write!(f, "1 {unit} ago"),
            (unit, n) => write!(f, "{n} {unit}s ago"),
        }
    }
}

/// Monday of the ISO week containing `date`.
fn week_start(date: NaiveDate) -> Option<NaiveDate> {
    date.checked_sub_days(Days::new(date.weekday().num_days_from_monday().into()))
}
