//! Records, the lists that own them, and the derived views the shell renders.

pub mod aggregate;
pub mod budget;
pub mod clock;
pub mod expense;
pub mod list;
#[allow(clippy::module_inception)]
pub mod model;
pub mod payment;
pub mod plan;
pub mod view;

pub use aggregate::{amounts_by_tag, tag_amount, total_amount, Spend};
pub use budget::{Budget, BudgetGauge, BudgetStatus, BUDGET_PANES};
pub use clock::{Clock, FixedClock, SystemClock};
pub use expense::{Expense, ExpenseBuilder, ExpenseSort};
pub use list::{FilterCriteria, ListItem, RecordList};
pub use model::Model;
pub use payment::{Payment, PaymentBuilder, PaymentSort, Priority};
pub use plan::{BudgetPlan, PlanAdvisor, QuestionnairePlanner};
pub use view::{ViewScope, ViewUnit};
