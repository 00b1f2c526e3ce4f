use crate::{
    cli::{params::CommandParams, registry::CommandEntry},
    errors::{DomainError, Result},
    model::{expense::parse_amount, Model, BUDGET_PANES},
    storage::Storage,
};

use super::{required_main, required_param, Command, CommandResult, DisplayedPane};

pub(crate) static SET: CommandEntry = CommandEntry::new(
    "setBudget",
    "Set the monthly budget of a category; 0 removes it",
    "setBudget AMOUNT /tag CATEGORY",
    &["tag"],
    Command::SetBudget,
);

pub(crate) static VIEW: CommandEntry = CommandEntry::new(
    "viewBudget",
    "Show a category in one of the six budget panes",
    "viewBudget PANE /tag CATEGORY",
    &["tag"],
    Command::ViewBudget,
);

pub(crate) fn set(
    params: &CommandParams,
    model: &mut Model,
    storage: &dyn Storage,
) -> Result<CommandResult> {
    let amount = parse_amount(required_main(params, "amount")?)?;
    let category = required_param(params, "tag")?;
    model.set_category_budget(category, amount);
    save(model, storage)?;
    let message = if amount.is_zero() {
        format!("Removed the budget for `{category}`.")
    } else {
        format!("Budget for `{category}` set to ${amount}.")
    };
    Ok(CommandResult::new(message, DisplayedPane::Budget))
}

pub(crate) fn view(
    params: &CommandParams,
    model: &mut Model,
    storage: &dyn Storage,
) -> Result<CommandResult> {
    let raw = required_main(params, "pane")?;
    let pane = raw.parse::<u8>().map_err(|_| {
        DomainError::Validation(format!(
            "budget pane must be between 1 and {BUDGET_PANES}, got `{raw}`"
        ))
    })?;
    let category = required_param(params, "tag")?;
    model.set_budget_view(pane, category)?;
    save(model, storage)?;
    Ok(CommandResult::new(
        format!("Pane {pane} now shows `{category}`."),
        DisplayedPane::Budget,
    ))
}

fn save(model: &Model, storage: &dyn Storage) -> Result<()> {
    storage
        .save_budget(model.budget())
        .map_err(|err| DomainError::storage("budget", err))
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::super::test_support::{model, run, run_all};
    use super::*;
    use crate::{model::BudgetStatus, storage::memory::MemoryStorage};

    #[test]
    fn set_and_view_budget_drive_the_gauges() {
        let mut model = model();
        let storage = MemoryStorage::new();
        run_all(
            &[
                "setBudget 100 /tag food",
                "viewBudget 2 /tag food",
                "addExpense 30 /tag food",
                "addExpense 50 /tag food /tentative",
            ],
            &mut model,
            &storage,
        );

        assert_eq!(model.budget_tag("food"), Decimal::from(100));
        assert_eq!(model.tag_amount("food"), Decimal::from(30));
        assert_eq!(model.budget_view_category()[&2], "food");

        let gauges = model.budget_gauges();
        assert_eq!(gauges.len(), usize::from(BUDGET_PANES));
        assert!(gauges[0].1.is_none());
        let gauge = gauges[1].1.as_ref().unwrap();
        assert_eq!(gauge.status(), BudgetStatus::Remaining(Decimal::from(70)));
        assert_eq!(storage.load_budget().unwrap(), *model.budget());
    }

    #[test]
    fn pane_must_be_in_range() {
        let mut model = model();
        let storage = MemoryStorage::new();
        for line in ["viewBudget 7 /tag food", "viewBudget 0 /tag food", "viewBudget x /tag food"] {
            let err = run(line, &mut model, &storage).unwrap_err();
            assert!(matches!(err, DomainError::Validation(_)), "{line}");
        }
        assert!(model.budget_view_category().is_empty());
        assert_eq!(storage.save_count(), 0);
    }

    #[test]
    fn zero_removes_a_category_budget() {
        let mut model = model();
        let storage = MemoryStorage::new();
        run_all(&["setBudget 40 /tag fun", "setBudget 0 /tag fun"], &mut model, &storage);
        assert!(model.budget().categories.is_empty());
    }
}
