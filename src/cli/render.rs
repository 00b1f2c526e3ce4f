//! Turns the model's displayed lists and budget bindings into text panes.

use colored::Colorize;
use rust_decimal::Decimal;

use crate::model::{amounts_by_tag, total_amount, BudgetGauge, BudgetStatus, Model};

use super::{
    commands::DisplayedPane,
    output::{style, MessageKind},
    table::{Table, TableColumn},
};

const BAR_WIDTH: usize = 20;
const DESCRIPTION_WIDTH: usize = 32;

/// Presentation settings taken from the configuration.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub currency_symbol: String,
    pub plain: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            currency_symbol: "$".into(),
            plain: false,
        }
    }
}

impl RenderOptions {
    fn money(&self, amount: Decimal) -> String {
        if amount.is_sign_negative() {
            format!("-{}{:.2}", self.currency_symbol, amount.abs())
        } else {
            format!("{}{:.2}", self.currency_symbol, amount)
        }
    }
}

/// Renders `pane`, or `None` when the pane should stay as it is.
pub fn render_pane(pane: DisplayedPane, model: &Model, options: &RenderOptions) -> Option<String> {
    match pane {
        DisplayedPane::Expense => Some(expense_pane(model, options)),
        DisplayedPane::Payment => Some(payment_pane(model, options)),
        DisplayedPane::Budget => Some(budget_pane(model, options)),
        DisplayedPane::Plan => Some(plan_pane(model)),
        DisplayedPane::Unchanged => None,
    }
}

pub fn expense_pane(model: &Model, options: &RenderOptions) -> String {
    let list = model.expenses();
    let displayed = list.displayed();
    let mut out = style(MessageKind::Section, "Expenses");
    out.push('\n');

    if displayed.is_empty() {
        out.push_str("No expenses to show.\n");
    } else {
        let mut table = Table::new(
            vec![
                TableColumn::right("No."),
                TableColumn::left("Time"),
                TableColumn::right("Amount"),
                TableColumn::left("Description").max_width(DESCRIPTION_WIDTH),
                TableColumn::left("Tags"),
            ],
            options.plain,
        );
        for (idx, expense) in displayed.iter().enumerate() {
            let mut description = expense.description.clone();
            if expense.tentative && options.plain {
                description.push_str(" (tentative)");
            }
            let row = vec![
                (idx + 1).to_string(),
                expense.time.format("%Y-%m-%d %H:%M").to_string(),
                options.money(expense.amount),
                description,
                expense.tags_label(),
            ];
            let row = if expense.tentative && !options.plain {
                row.into_iter().map(|cell| cell.dimmed().to_string()).collect()
            } else {
                row
            };
            table.push_row(row);
        }
        out.push_str(&table.render());
        out.push('\n');
    }

    let mut footer = vec![
        format!(
            "Shown: {}   Overall: {}",
            options.money(model.total_displayed_expense_amount()),
            options.money(model.total_expense_amount())
        ),
        format!(
            "View: {}   Sort: {}   Filter: {}",
            list.view_scope(),
            list.sort(),
            list.filter()
        ),
    ];
    let by_tag = amounts_by_tag(displayed);
    if !by_tag.is_empty() {
        let parts: Vec<String> = by_tag
            .iter()
            .map(|(tag, amount)| format!("{tag} {}", options.money(*amount)))
            .collect();
        footer.push(format!("By tag: {}", parts.join(", ")));
    }
    out.push_str(&footer.join("\n"));
    out
}

pub fn payment_pane(model: &Model, options: &RenderOptions) -> String {
    let list = model.payments();
    let displayed = list.displayed();
    let mut out = style(MessageKind::Section, "Payments");
    out.push('\n');

    if displayed.is_empty() {
        out.push_str("No payments to show.\n");
    } else {
        let mut table = Table::new(
            vec![
                TableColumn::right("No."),
                TableColumn::left("Due"),
                TableColumn::right("Amount"),
                TableColumn::left("Description").max_width(DESCRIPTION_WIDTH),
                TableColumn::left("Priority"),
                TableColumn::left("Receiver"),
                TableColumn::left("Tags"),
            ],
            options.plain,
        );
        for (idx, payment) in displayed.iter().enumerate() {
            table.push_row(vec![
                (idx + 1).to_string(),
                payment.due.format("%Y-%m-%d").to_string(),
                options.money(payment.amount),
                payment.description.clone(),
                payment.priority.to_string(),
                payment.receiver.clone().unwrap_or_default(),
                payment.tags.iter().cloned().collect::<Vec<_>>().join(" "),
            ]);
        }
        out.push_str(&table.render());
        out.push('\n');
    }

    out.push_str(&format!(
        "Total due: {}   Sort: {}",
        options.money(total_amount(displayed, false)),
        list.sort()
    ));
    out
}

pub fn budget_pane(model: &Model, options: &RenderOptions) -> String {
    let mut lines = vec![style(MessageKind::Section, "Budget")];
    for (pane, gauge) in model.budget_gauges() {
        lines.push(match gauge {
            Some(gauge) => format!("[{pane}] {}", budget_line(&gauge, options)),
            None => format!(
                "[{pane}] (empty) use `viewBudget {pane} /tag CATEGORY` to track a category"
            ),
        });
    }
    lines.join("\n")
}

/// Category, progress bar and status message for one budget pane.
pub fn budget_line(gauge: &BudgetGauge, options: &RenderOptions) -> String {
    let status = match gauge.status() {
        BudgetStatus::NoBudget => "No budget set.".to_string(),
        BudgetStatus::Remaining(left) => format!("Remaining budget: {}", options.money(left)),
        BudgetStatus::Reached => format!("Budget of {} reached!", options.money(gauge.limit)),
        BudgetStatus::Exceeded(over) => format!("Exceeded budget by {}", options.money(over)),
    };
    if gauge.limit.is_zero() {
        return format!(
            "{}: spent {}. {status}",
            gauge.category,
            options.money(gauge.spent)
        );
    }
    format!(
        "{:<12} {} {} / {}  {status}",
        gauge.category,
        progress_bar(gauge.ratio(), options.plain),
        options.money(gauge.spent),
        options.money(gauge.limit)
    )
}

fn progress_bar(ratio: f64, plain: bool) -> String {
    let filled = ((ratio.clamp(0.0, 1.0) * BAR_WIDTH as f64).round()) as usize;
    let bar = format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled));
    if plain {
        return bar;
    }
    if ratio < 0.40 {
        bar.green().to_string()
    } else if ratio < 0.65 {
        bar.yellow().to_string()
    } else if ratio < 0.90 {
        bar.truecolor(255, 165, 0).to_string()
    } else {
        bar.red().to_string()
    }
}

pub fn plan_pane(model: &Model) -> String {
    format!(
        "{}\n{}",
        style(MessageKind::Section, "Budget planner"),
        model.plan_reply()
    )
}
