use crate::{
    cli::{params::CommandParams, registry::CommandEntry},
    errors::{DomainError, Result},
    model::{Expense, FilterCriteria, Model, ViewScope},
    storage::Storage,
};

use super::{parse_position, required_main, Command, CommandResult, DisplayedPane};

pub(crate) static ADD: CommandEntry = CommandEntry::new(
    "addExpense",
    "Record an expense",
    "addExpense AMOUNT [/description TEXT] [/tag TAGS] [/time YYYY-MM-DD HH:MM] [/tentative]",
    &["description", "tag", "time", "tentative"],
    Command::AddExpense,
);

pub(crate) static DELETE: CommandEntry = CommandEntry::new(
    "deleteExpense",
    "Delete the expense shown at a list position",
    "deleteExpense POSITION",
    &[],
    Command::DeleteExpense,
);

pub(crate) static CLEAR: CommandEntry = CommandEntry::new(
    "clearExpense",
    "Delete every expense",
    "clearExpense",
    &[],
    Command::ClearExpense,
);

pub(crate) static SORT: CommandEntry = CommandEntry::new(
    "sortExpense",
    "Sort expenses by amount, time or description",
    "sortExpense amount|time|description",
    &[],
    Command::SortExpense,
);

pub(crate) static VIEW: CommandEntry = CommandEntry::new(
    "viewExpense",
    "Show expenses from one day, week, month or year",
    "viewExpense day|week|month|year|all [/offset N]",
    &["offset"],
    Command::ViewExpense,
);

pub(crate) static FILTER: CommandEntry = CommandEntry::new(
    "filterExpense",
    "Show only expenses with a tag or matching text; no parameters shows all",
    "filterExpense [/tag TAG] [/text TEXT]",
    &["tag", "text"],
    Command::FilterExpense,
);

pub(crate) fn add(
    params: &CommandParams,
    model: &mut Model,
    storage: &dyn Storage,
) -> Result<CommandResult> {
    let mut builder = Expense::builder(model.now()).amount(required_main(params, "amount")?)?;
    if let Some(description) = params.optional_param("description")? {
        builder = builder.description(description);
    }
    if let Some(tags) = params.optional_param("tag")? {
        builder = builder.tags(tags);
    }
    if let Some(time) = params.optional_param("time")? {
        builder = builder.time(time)?;
    }
    if let Some(flag) = params.raw_param("tentative") {
        builder = builder.tentative(parse_flag("tentative", flag)?);
    }
    let expense = builder.build()?;

    let message = format!("Added expense: ${} {}", expense.amount, expense.description);
    model.add_expense(expense);
    save(model, storage)?;
    Ok(CommandResult::new(message.trim_end(), DisplayedPane::Expense))
}

pub(crate) fn delete(
    params: &CommandParams,
    model: &mut Model,
    storage: &dyn Storage,
) -> Result<CommandResult> {
    let position = parse_position(required_main(params, "position")?)?;
    let removed = model.remove_expense(position)?;
    save(model, storage)?;
    Ok(CommandResult::new(
        format!("Deleted expense: ${} {}", removed.amount, removed.description)
            .trim_end()
            .to_string(),
        DisplayedPane::Expense,
    ))
}

pub(crate) fn clear(
    _params: &CommandParams,
    model: &mut Model,
    storage: &dyn Storage,
) -> Result<CommandResult> {
    let count = model.expenses().len();
    model.clear_expenses();
    save(model, storage)?;
    Ok(CommandResult::new(
        format!("Cleared {count} expense(s)."),
        DisplayedPane::Expense,
    ))
}

pub(crate) fn sort(params: &CommandParams, model: &mut Model) -> Result<CommandResult> {
    model.set_expense_sort(required_main(params, "criterion")?)?;
    Ok(CommandResult::new(
        format!("Sorting expenses by {}.", model.expenses().sort()),
        DisplayedPane::Expense,
    ))
}

pub(crate) fn view(params: &CommandParams, model: &mut Model) -> Result<CommandResult> {
    let unit = required_main(params, "unit")?;
    let offset = match params.optional_param("offset")? {
        Some(raw) => raw.parse::<u32>().map_err(|_| {
            DomainError::Validation(format!("offset must be a non-negative number, got `{raw}`"))
        })?,
        None => 0,
    };
    let scope = ViewScope::parse(unit, offset)?;
    model.set_expense_view(scope);
    Ok(CommandResult::new(
        format!("Viewing expenses: {scope}."),
        DisplayedPane::Expense,
    ))
}

pub(crate) fn filter(params: &CommandParams, model: &mut Model) -> Result<CommandResult> {
    let tag = params.optional_param("tag")?;
    let text = params.optional_param("text")?;
    let criteria = match (tag, text) {
        (Some(_), Some(_)) => {
            return Err(DomainError::Validation(
                "filter by either /tag or /text, not both".into(),
            ))
        }
        (Some(tag), None) => FilterCriteria::Tag(tag.to_string()),
        (None, Some(text)) => FilterCriteria::Text(text.to_string()),
        (None, None) => FilterCriteria::All,
    };
    let message = match &criteria {
        FilterCriteria::All => "Showing all expenses.".to_string(),
        other => format!("Filtering expenses by {other}."),
    };
    model.set_expense_filter(criteria);
    Ok(CommandResult::new(message, DisplayedPane::Expense))
}

fn save(model: &Model, storage: &dyn Storage) -> Result<()> {
    storage
        .save_expense_list(model.expenses().items())
        .map_err(|err| DomainError::storage("expenses", err))
}

fn parse_flag(name: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "" | "true" | "yes" | "y" => Ok(true),
        "false" | "no" | "n" => Ok(false),
        other => Err(DomainError::Validation(format!(
            "`/{name}` takes yes or no, got `{other}`"
        ))),
    }
}
