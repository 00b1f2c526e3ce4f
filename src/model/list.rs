//! Canonical record lists and the displayed projection derived from them.

use std::{cmp::Ordering, fmt, str::FromStr, sync::Arc};

use chrono::NaiveDate;
use tracing::debug;
use uuid::Uuid;

use super::{clock::Clock, view::ViewScope};
use crate::errors::DomainError;

/// A record that can live in a [`RecordList`].
pub trait ListItem: Clone {
    /// Fields this record can be ordered by.
    type Sort: Copy + Default + PartialEq + fmt::Display + FromStr<Err = DomainError>;

    fn id(&self) -> Uuid;

    /// Date used for view-scope windowing.
    fn date(&self) -> NaiveDate;

    fn compare(&self, other: &Self, sort: Self::Sort) -> Ordering;

    fn has_tag(&self, tag: &str) -> bool;

    fn description(&self) -> &str;
}

/// Predicate applied after sorting.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FilterCriteria {
    #[default]
    All,
    Tag(String),
    Text(String),
}

impl FilterCriteria {
    pub fn matches<T: ListItem>(&self, item: &T) -> bool {
        match self {
            FilterCriteria::All => true,
            FilterCriteria::Tag(tag) => item.has_tag(tag),
            FilterCriteria::Text(needle) => item
                .description()
                .to_lowercase()
                .contains(&needle.to_lowercase()),
        }
    }
}

impl fmt::Display for FilterCriteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterCriteria::All => f.write_str("none"),
            FilterCriteria::Tag(tag) => write!(f, "tag `{tag}`"),
            FilterCriteria::Text(text) => write!(f, "text `{text}`"),
        }
    }
}

/// Source-of-truth list paired with the snapshot consumers are allowed to read.
///
/// Every mutation and every criteria change rebuilds the snapshot before
/// returning, so `displayed()` never reflects an older canonical state.
pub struct RecordList<T: ListItem> {
    label: &'static str,
    items: Vec<T>,
    scope: ViewScope,
    sort: T::Sort,
    filter: FilterCriteria,
    displayed: Arc<[T]>,
    revision: u64,
    clock: Arc<dyn Clock>,
}

impl<T: ListItem> RecordList<T> {
    pub fn new(label: &'static str, items: Vec<T>, clock: Arc<dyn Clock>) -> Self {
        let mut list = Self {
            label,
            items,
            scope: ViewScope::ALL,
            sort: T::Sort::default(),
            filter: FilterCriteria::All,
            displayed: Arc::from(Vec::new()),
            revision: 0,
            clock,
        };
        list.recompute();
        list
    }

    pub fn add(&mut self, item: T) {
        self.items.push(item);
        self.recompute();
    }

    /// Appends every item, then rebuilds the snapshot once.
    pub fn extend(&mut self, items: impl IntoIterator<Item = T>) {
        self.items.extend(items);
        self.recompute();
    }

    /// Removes the canonical record at `index` (zero-based).
    pub fn remove(&mut self, index: usize) -> Result<T, DomainError> {
        if index >= self.items.len() {
            return Err(DomainError::IndexOutOfRange {
                index,
                len: self.items.len(),
            });
        }
        let removed = self.items.remove(index);
        self.recompute();
        Ok(removed)
    }

    /// Removes the record currently shown at `index` (zero-based) of the displayed list.
    pub fn remove_displayed(&mut self, index: usize) -> Result<T, DomainError> {
        let id = self
            .displayed
            .get(index)
            .map(T::id)
            .ok_or(DomainError::IndexOutOfRange {
                index,
                len: self.displayed.len(),
            })?;
        let position = self
            .items
            .iter()
            .position(|item| item.id() == id)
            .ok_or(DomainError::IndexOutOfRange {
                index,
                len: self.displayed.len(),
            })?;
        self.remove(position)
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.recompute();
    }

    pub fn set_view_scope(&mut self, scope: ViewScope) {
        self.scope = scope;
        self.recompute();
    }

    /// Parses and applies a sort criterion; on failure nothing changes.
    pub fn set_sort(&mut self, raw: &str) -> Result<(), DomainError> {
        let sort = raw.parse::<T::Sort>()?;
        self.sort = sort;
        self.recompute();
        Ok(())
    }

    pub fn set_filter(&mut self, filter: FilterCriteria) {
        self.filter = filter;
        self.recompute();
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn displayed(&self) -> &[T] {
        &self.displayed
    }

    /// Shared handle to the current displayed snapshot.
    pub fn snapshot(&self) -> Arc<[T]> {
        Arc::clone(&self.displayed)
    }

    /// Incremented on every recompute.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn view_scope(&self) -> ViewScope {
        self.scope
    }

    pub fn sort(&self) -> T::Sort {
        self.sort
    }

    pub fn filter(&self) -> &FilterCriteria {
        &self.filter
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn recompute(&mut self) {
        let today = self.clock.today();
        let mut visible = self.scope.window(&self.items, today, T::date);
        // `sort_by` is stable, so equal keys keep their windowed order.
        visible.sort_by(|a, b| a.compare(b, self.sort));
        let displayed: Vec<T> = visible
            .into_iter()
            .filter(|item| self.filter.matches(*item))
            .cloned()
            .collect();
        self.displayed = Arc::from(displayed);
        self.revision += 1;
        debug!(
            list = self.label,
            total = self.items.len(),
            displayed = self.displayed.len(),
            scope = %self.scope,
            sort = %self.sort,
            "recomputed displayed list"
        );
    }
}
