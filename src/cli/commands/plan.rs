use tracing::info;
use uuid::Uuid;

use crate::{
    cli::{params::CommandParams, registry::CommandEntry},
    errors::{DomainError, Result},
    model::Model,
    storage::Storage,
};

use super::{required_main, Command, CommandResult, DisplayedPane};

const EXPORT: &str = "export";

pub(crate) static PLAN: CommandEntry = CommandEntry::new(
    "plan",
    "Answer the budget planner, or apply its suggestions with `plan export`",
    "plan REPLY | plan export | plan restart",
    &[],
    Command::Plan,
);

pub(crate) fn plan(
    params: &CommandParams,
    model: &mut Model,
    storage: &dyn Storage,
) -> Result<CommandResult> {
    let reply = required_main(params, "reply")?;
    if reply.eq_ignore_ascii_case(EXPORT) {
        return export(model, storage);
    }

    let answer = model.process_plan_input(reply);
    storage
        .save_plan_attributes(model.known_plan_attributes())
        .map_err(|err| DomainError::storage("plan answers", err))?;
    Ok(CommandResult::new(answer, DisplayedPane::Plan))
}

/// Copies the planner's budgets and suggested expenses into the model.
fn export(model: &mut Model, storage: &dyn Storage) -> Result<CommandResult> {
    let Some(plan) = model.recommended_budget_plan().cloned() else {
        return Ok(CommandResult::new("Nothing to export!", DisplayedPane::Plan));
    };

    for (category, amount) in &plan.plan_budget {
        model.set_category_budget(category, *amount);
    }
    let expenses = plan.recommended_expenses.len();
    model.add_expenses(plan.recommended_expenses.into_iter().map(|mut expense| {
        expense.id = Uuid::new_v4();
        expense
    }));
    info!(
        budgets = plan.plan_budget.len(),
        expenses, "budget plan exported"
    );

    storage
        .save_budget(model.budget())
        .map_err(|err| DomainError::storage("budget", err))?;
    storage
        .save_expense_list(model.expenses().items())
        .map_err(|err| DomainError::storage("expenses", err))?;
    Ok(CommandResult::new(
        format!(
            "Exported {} budget(s) and {expenses} tentative expense(s).",
            plan.plan_budget.len()
        ),
        DisplayedPane::Expense,
    ))
}
