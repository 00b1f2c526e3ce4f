use crate::{
    cli::{params::CommandParams, registry::CommandEntry},
    errors::{DomainError, Result},
    model::{Model, PaymentBuilder},
    storage::Storage,
};

use super::{
    parse_position, required_main, required_param, Command, CommandResult, DisplayedPane,
};

pub(crate) static ADD: CommandEntry = CommandEntry::new(
    "addPayment",
    "Record an upcoming payment",
    "addPayment AMOUNT /description TEXT /due YYYY-MM-DD [/priority high|medium|low] [/receiver NAME] [/tag TAGS]",
    &["description", "due", "priority", "receiver", "tag"],
    Command::AddPayment,
);

pub(crate) static DELETE: CommandEntry = CommandEntry::new(
    "deletePayment",
    "Delete the payment shown at a list position",
    "deletePayment POSITION",
    &[],
    Command::DeletePayment,
);

pub(crate) static SORT: CommandEntry = CommandEntry::new(
    "sortPayment",
    "Sort payments by amount, due date, description or priority",
    "sortPayment amount|time|description|priority",
    &[],
    Command::SortPayment,
);

pub(crate) fn add(
    params: &CommandParams,
    model: &mut Model,
    storage: &dyn Storage,
) -> Result<CommandResult> {
    let mut builder = PaymentBuilder::new()
        .amount(required_main(params, "amount")?)?
        .description(required_param(params, "description")?)
        .due(required_param(params, "due")?)?;
    if let Some(priority) = params.optional_param("priority")? {
        builder = builder.priority(priority)?;
    }
    if let Some(receiver) = params.optional_param("receiver")? {
        builder = builder.receiver(receiver);
    }
    if let Some(tags) = params.optional_param("tag")? {
        builder = builder.tags(tags);
    }
    let payment = builder.build()?;

    let message = format!(
        "Added payment: ${} {} due {}",
        payment.amount, payment.description, payment.due
    );
    model.add_payment(payment);
    save(model, storage)?;
    Ok(CommandResult::new(message, DisplayedPane::Payment))
}

pub(crate) fn delete(
    params: &CommandParams,
    model: &mut Model,
    storage: &dyn Storage,
) -> Result<CommandResult> {
    let position = parse_position(required_main(params, "position")?)?;
    let removed = model.remove_payment(position)?;
    save(model, storage)?;
    Ok(CommandResult::new(
        format!("Deleted payment: ${} {}", removed.amount, removed.description),
        DisplayedPane::Payment,
    ))
}

pub(crate) fn sort(params: &CommandParams, model: &mut Model) -> Result<CommandResult> {
    model.set_payment_sort(required_main(params, "criterion")?)?;
    Ok(CommandResult::new(
        format!("Sorting payments by {}.", model.payments().sort()),
        DisplayedPane::Payment,
    ))
}

fn save(model: &Model, storage: &dyn Storage) -> Result<()> {
    storage
        .save_payment_list(model.payments().items())
        .map_err(|err| DomainError::storage("payments", err))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::super::test_support::{model, run, run_all};
    use super::*;
    use crate::{
        errors::MalformedCommand,
        model::{PaymentSort, Priority},
        storage::memory::MemoryStorage,
    };

    #[test]
    fn add_payment_with_optional_fields() {
        let mut model = model();
        let storage = MemoryStorage::new();
        let result = run(
            "addPayment 120 /description insurance /due 2024-04-01 /priority high /receiver NTUC",
            &mut model,
            &storage,
        )
        .unwrap();
        assert_eq!(result.pane, DisplayedPane::Payment);

        let payment = &model.payments().items()[0];
        assert_eq!(payment.due, NaiveDate::from_ymd_opt(2024, 4, 1).unwrap());
        assert_eq!(payment.priority, Priority::High);
        assert_eq!(payment.receiver.as_deref(), Some("NTUC"));
        assert_eq!(storage.load_payment_list().unwrap().len(), 1);
    }

    #[test]
    fn description_and_due_are_required() {
        let mut model = model();
        let storage = MemoryStorage::new();
        let err = run("addPayment 10 /due 2024-04-01", &mut model, &storage).unwrap_err();
        assert_eq!(
            err,
            DomainError::from(MalformedCommand::MissingRequiredParam(
                "description".into()
            ))
        );
        let err = run("addPayment 10 /description gym", &mut model, &storage).unwrap_err();
        assert_eq!(
            err,
            DomainError::from(MalformedCommand::MissingRequiredParam("due".into()))
        );
        let err = run(
            "addPayment 10 /description gym /due soon",
            &mut model,
            &storage,
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert!(model.payments().is_empty());
    }

    #[test]
    fn sort_by_priority_then_delete() {
        let mut model = model();
        let storage = MemoryStorage::new();
        run_all(
            &[
                "addPayment 5 /description magazine /due 2024-04-02 /priority low",
                "addPayment 900 /description rent /due 2024-04-01 /priority high",
                "addPayment 60 /description phone /due 2024-04-05",
                "sortPayment priority",
            ],
            &mut model,
            &storage,
        );
        assert_eq!(model.payments().sort(), PaymentSort::Priority);
        let order: Vec<_> = model
            .payments()
            .displayed()
            .iter()
            .map(|payment| payment.description.as_str())
            .collect();
        assert_eq!(order, ["rent", "phone", "magazine"]);

        run("deletePayment 1", &mut model, &storage).unwrap();
        assert_eq!(model.payments().displayed()[0].description, "phone");
        assert_eq!(storage.load_payment_list().unwrap().len(), 2);
    }
}
