use std::{collections::BTreeMap, sync::Arc};

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use tracing::info;

use super::{
    aggregate::{tag_amount, total_amount},
    budget::{Budget, BudgetGauge, BUDGET_PANES},
    clock::Clock,
    expense::Expense,
    list::{FilterCriteria, ListItem, RecordList},
    payment::Payment,
    plan::{BudgetPlan, PlanAdvisor, QuestionnairePlanner},
    view::ViewScope,
};
use crate::{
    errors::DomainError,
    storage::{Storage, StorageError},
};

/// All state owned by one session. Lists are only changed through these methods,
/// each of which leaves the displayed projections recomputed.
pub struct Model {
    expenses: RecordList<Expense>,
    payments: RecordList<Payment>,
    budget: Budget,
    planner: Box<dyn PlanAdvisor>,
    clock: Arc<dyn Clock>,
}

impl Model {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        let planner = QuestionnairePlanner::new(BTreeMap::new(), clock.now());
        Self::from_parts(
            Vec::new(),
            Vec::new(),
            Budget::default(),
            Box::new(planner),
            clock,
        )
    }

    pub fn from_parts(
        expenses: Vec<Expense>,
        payments: Vec<Payment>,
        budget: Budget,
        planner: Box<dyn PlanAdvisor>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            expenses: RecordList::new("expenses", expenses, Arc::clone(&clock)),
            payments: RecordList::new("payments", payments, Arc::clone(&clock)),
            budget,
            planner,
            clock,
        }
    }

    /// Restores a session from whatever the storage backend holds.
    pub fn load(storage: &dyn Storage, clock: Arc<dyn Clock>) -> Result<Self, StorageError> {
        let expenses = storage.load_expense_list()?;
        let payments = storage.load_payment_list()?;
        let budget = storage.load_budget()?;
        let attributes = storage.load_plan_attributes()?;
        info!(
            expenses = expenses.len(),
            payments = payments.len(),
            categories = budget.categories.len(),
            "model loaded from storage"
        );
        let planner = QuestionnairePlanner::new(attributes, clock.now());
        Ok(Self::from_parts(
            expenses,
            payments,
            budget,
            Box::new(planner),
            clock,
        ))
    }

    pub fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn expenses(&self) -> &RecordList<Expense> {
        &self.expenses
    }

    pub fn add_expense(&mut self, expense: Expense) {
        self.expenses.add(expense);
    }

    pub fn add_expenses(&mut self, expenses: impl IntoIterator<Item = Expense>) {
        self.expenses.extend(expenses);
    }

    /// Removes the expense shown at the one-based `position` of the displayed list.
    pub fn remove_expense(&mut self, position: usize) -> Result<Expense, DomainError> {
        remove_at(&mut self.expenses, position)
    }

    pub fn clear_expenses(&mut self) {
        self.expenses.clear();
    }

    pub fn set_expense_sort(&mut self, raw: &str) -> Result<(), DomainError> {
        self.expenses.set_sort(raw)
    }

    pub fn set_expense_view(&mut self, scope: ViewScope) {
        self.expenses.set_view_scope(scope);
    }

    pub fn set_expense_filter(&mut self, filter: FilterCriteria) {
        self.expenses.set_filter(filter);
    }

    pub fn total_expense_amount(&self) -> Decimal {
        total_amount(self.expenses.items(), true)
    }

    pub fn total_displayed_expense_amount(&self) -> Decimal {
        total_amount(self.expenses.displayed(), true)
    }

    pub fn payments(&self) -> &RecordList<Payment> {
        &self.payments
    }

    pub fn add_payment(&mut self, payment: Payment) {
        self.payments.add(payment);
    }

    pub fn remove_payment(&mut self, position: usize) -> Result<Payment, DomainError> {
        remove_at(&mut self.payments, position)
    }

    pub fn set_payment_sort(&mut self, raw: &str) -> Result<(), DomainError> {
        self.payments.set_sort(raw)
    }

    pub fn budget(&self) -> &Budget {
        &self.budget
    }

    pub fn set_category_budget(&mut self, category: &str, amount: Decimal) {
        self.budget.set_category(category, amount);
    }

    pub fn set_budget_view(&mut self, pane: u8, category: &str) -> Result<(), DomainError> {
        self.budget.set_pane(pane, category)
    }

    /// Confirmed spending on `tag` across every expense.
    pub fn tag_amount(&self, tag: &str) -> Decimal {
        tag_amount(self.expenses.items(), tag)
    }

    pub fn budget_tag(&self, category: &str) -> Decimal {
        self.budget.category_budget(category)
    }

    pub fn budget_view_category(&self) -> &BTreeMap<u8, String> {
        &self.budget.panes
    }

    /// One entry per budget pane, `None` for panes not bound to a category.
    pub fn budget_gauges(&self) -> Vec<(u8, Option<BudgetGauge>)> {
        (1..=BUDGET_PANES)
            .map(|pane| {
                let gauge = self.budget.panes.get(&pane).map(|category| {
                    BudgetGauge::new(
                        category.clone(),
                        self.tag_amount(category),
                        self.budget_tag(category),
                    )
                });
                (pane, gauge)
            })
            .collect()
    }

    pub fn process_plan_input(&mut self, text: &str) -> String {
        let now = self.clock.now();
        self.planner.process_input(text, now)
    }

    pub fn recommended_budget_plan(&self) -> Option<&BudgetPlan> {
        self.planner.recommended_budget_plan()
    }

    pub fn known_plan_attributes(&self) -> &BTreeMap<String, String> {
        self.planner.known_attributes()
    }

    pub fn plan_reply(&self) -> &str {
        self.planner.last_reply()
    }
}

/// Translates a one-based position into the list's zero-based removal, reporting errors one-based.
fn remove_at<T: ListItem>(list: &mut RecordList<T>, position: usize) -> Result<T, DomainError> {
    let index = position
        .checked_sub(1)
        .ok_or_else(|| DomainError::Validation("list positions start at 1".into()))?;
    list.remove_displayed(index).map_err(|err| match err {
        DomainError::IndexOutOfRange { len, .. } => DomainError::IndexOutOfRange {
            index: position,
            len,
        },
        other => other,
    })
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::{
        model::{clock::FixedClock, view::ViewUnit},
        storage::memory::MemoryStorage,
    };

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    fn model() -> Model {
        Model::new(Arc::new(FixedClock::on(today())))
    }

    fn expense(amount: i64, description: &str, tags: &str, date: NaiveDate) -> Expense {
        Expense::builder(date.and_hms_opt(9, 0, 0).unwrap())
            .amount_value(Decimal::from(amount))
            .description(description)
            .tags(tags)
            .build()
            .unwrap()
    }

    #[test]
    fn positions_are_one_based() {
        let mut model = model();
        model.add_expense(expense(5, "first", "", today()));
        assert_eq!(
            model.remove_expense(0),
            Err(DomainError::Validation("list positions start at 1".into()))
        );
        assert_eq!(
            model.remove_expense(2),
            Err(DomainError::IndexOutOfRange { index: 2, len: 1 })
        );
        assert_eq!(model.remove_expense(1).unwrap().description, "first");
        assert!(model.expenses().is_empty());
    }

    #[test]
    fn displayed_total_follows_the_view() {
        let mut model = model();
        model.add_expense(expense(10, "now", "food", today()));
        model.add_expense(expense(20, "old", "food", today() - chrono::Duration::days(40)));
        model.set_expense_view(ViewScope::new(ViewUnit::Month, 0));

        assert_eq!(model.total_displayed_expense_amount(), Decimal::from(10));
        assert_eq!(model.total_expense_amount(), Decimal::from(30));
        assert_eq!(model.tag_amount("food"), Decimal::from(30));
    }

    #[test]
    fn gauges_cover_every_pane() {
        let mut model = model();
        model.set_category_budget("food", Decimal::from(50));
        model.set_budget_view(3, "food").unwrap();
        model.add_expense(expense(60, "feast", "food", today()));

        let gauges = model.budget_gauges();
        assert_eq!(gauges.len(), usize::from(BUDGET_PANES));
        let (pane, gauge) = &gauges[2];
        assert_eq!(*pane, 3);
        let gauge = gauge.as_ref().unwrap();
        assert_eq!(gauge.remaining(), Decimal::from(-10));
    }

    #[test]
    fn load_restores_saved_state() {
        let storage = MemoryStorage::new();
        let mut budget = Budget::default();
        budget.set_category("rent", Decimal::from(900));
        storage.save_budget(&budget).unwrap();
        storage
            .save_expense_list(&[expense(3, "tea", "", today())])
            .unwrap();

        let model = Model::load(&storage, Arc::new(FixedClock::on(today()))).unwrap();
        assert_eq!(model.budget_tag("rent"), Decimal::from(900));
        assert_eq!(model.expenses().displayed().len(), 1);
        assert!(model.plan_reply().contains("monthly income"));
    }
}
