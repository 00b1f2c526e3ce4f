//! Budget planning conversation. The model only reads what the advisor produces.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use tracing::debug;

use super::{
    aggregate::saturating_add,
    expense::{parse_amount, Expense},
};

/// Budgets and tentative expenses suggested by an advisor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BudgetPlan {
    pub plan_budget: BTreeMap<String, Decimal>,
    pub recommended_expenses: Vec<Expense>,
}

pub trait PlanAdvisor {
    /// Feeds one user reply to the advisor and returns its answer.
    fn process_input(&mut self, text: &str, now: NaiveDateTime) -> String;

    /// The plan on offer, if the conversation has produced one.
    fn recommended_budget_plan(&self) -> Option<&BudgetPlan>;

    /// Everything learned about the user so far, suitable for persisting.
    fn known_attributes(&self) -> &BTreeMap<String, String>;

    fn last_reply(&self) -> &str;
}

const INCOME: &str = "income";
const QUESTIONS: &[(&str, &str)] = &[
    (INCOME, "What is your monthly income?"),
    ("rent", "How much rent do you pay each month? Reply 0 if none."),
    ("phone", "How much is your monthly phone bill?"),
    ("transport", "How much do you spend on transport each month?"),
    ("food", "How much do you spend on food each month?"),
];
const RECURRING: &[(&str, &str)] = &[("rent", "Monthly rent"), ("phone", "Phone bill")];
const SAVINGS: &str = "savings";
const RESTART: &str = "restart";

/// Asks a fixed list of questions and turns the answers into a plan.
pub struct QuestionnairePlanner {
    attributes: BTreeMap<String, String>,
    plan: Option<BudgetPlan>,
    reply: String,
}

impl QuestionnairePlanner {
    /// Resumes a conversation from previously saved attributes.
    pub fn new(attributes: BTreeMap<String, String>, now: NaiveDateTime) -> Self {
        let mut planner = Self {
            attributes,
            plan: None,
            reply: String::new(),
        };
        planner.reply = match planner.pending_question() {
            Some(question) => format!("Hi! Let's plan a budget. {question}"),
            None => planner.finish(now),
        };
        planner
    }

    fn pending_question(&self) -> Option<&'static str> {
        QUESTIONS
            .iter()
            .find(|(key, _)| !self.attributes.contains_key(*key))
            .map(|(_, question)| *question)
    }

    fn answer(&self, key: &str) -> Decimal {
        self.attributes
            .get(key)
            .and_then(|raw| parse_amount(raw).ok())
            .unwrap_or(Decimal::ZERO)
    }

    fn finish(&mut self, now: NaiveDateTime) -> String {
        let mut plan = BudgetPlan::default();
        let mut committed = Decimal::ZERO;
        for (key, _) in QUESTIONS.iter().filter(|(key, _)| *key != INCOME) {
            let amount = self.answer(key);
            committed = saturating_add(committed, amount);
            if !amount.is_zero() {
                plan.plan_budget.insert(key.to_string(), amount);
            }
        }
        let leftover = self.answer(INCOME) - committed;
        if leftover > Decimal::ZERO {
            plan.plan_budget.insert(SAVINGS.to_string(), leftover);
        }
        for (key, description) in RECURRING {
            let amount = self.answer(key);
            if amount.is_zero() {
                continue;
            }
            let expense = Expense::builder(now)
                .amount_value(amount)
                .description(*description)
                .tags(key)
                .tentative(true)
                .build();
            if let Ok(expense) = expense {
                plan.recommended_expenses.push(expense);
            }
        }

        let summary = plan
            .plan_budget
            .iter()
            .map(|(category, amount)| format!("{category}: ${amount}"))
            .collect::<Vec<_>>()
            .join(", ");
        self.plan = Some(plan);
        if leftover < Decimal::ZERO {
            format!(
                "Your spending exceeds your income by ${}. Suggested budget: {summary}. Type `plan export` to apply it.",
                -leftover
            )
        } else {
            format!("Suggested budget: {summary}. Type `plan export` to apply it.")
        }
    }
}

impl PlanAdvisor for QuestionnairePlanner {
    fn process_input(&mut self, text: &str, now: NaiveDateTime) -> String {
        let text = text.trim();
        if text.eq_ignore_ascii_case(RESTART) {
            self.attributes.clear();
            self.plan = None;
        } else if let Some((key, question)) = QUESTIONS
            .iter()
            .find(|(key, _)| !self.attributes.contains_key(*key))
        {
            match parse_amount(text) {
                Ok(amount) => {
                    debug!(attribute = key, %amount, "plan answer recorded");
                    self.attributes.insert(key.to_string(), amount.to_string());
                }
                Err(_) => {
                    self.reply = format!("Sorry, I need an amount. {question}");
                    return self.reply.clone();
                }
            }
        } else {
            self.reply = format!(
                "Your plan is ready. Type `plan export` to apply it or `plan {RESTART}` to start over."
            );
            return self.reply.clone();
        }

        self.reply = match self.pending_question() {
            Some(question) => question.to_string(),
            None => self.finish(now),
        };
        self.reply.clone()
    }

    fn recommended_budget_plan(&self) -> Option<&BudgetPlan> {
        self.plan.as_ref()
    }

    fn known_attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }

    fn last_reply(&self) -> &str {
        &self.reply
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 4, 1)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    }

    fn answered(planner: &mut QuestionnairePlanner, answers: &[&str]) {
        for answer in answers {
            planner.process_input(answer, now());
        }
    }

    #[test]
    fn asks_questions_until_plan_is_ready() {
        let mut planner = QuestionnairePlanner::new(BTreeMap::new(), now());
        assert!(planner.last_reply().contains("monthly income"));
        assert!(planner.recommended_budget_plan().is_none());

        answered(&mut planner, &["3000", "1200", "40", "100"]);
        assert!(planner.recommended_budget_plan().is_none());
        let reply = planner.process_input("400", now());
        assert!(reply.contains("plan export"));

        let plan = planner.recommended_budget_plan().unwrap();
        assert_eq!(plan.plan_budget["rent"], Decimal::from(1200));
        assert_eq!(plan.plan_budget["savings"], Decimal::from(1260));
        assert_eq!(plan.recommended_expenses.len(), 2);
        assert!(plan.recommended_expenses.iter().all(|e| e.tentative));
    }

    #[test]
    fn invalid_answer_repeats_the_question() {
        let mut planner = QuestionnairePlanner::new(BTreeMap::new(), now());
        let reply = planner.process_input("lots", now());
        assert!(reply.starts_with("Sorry"));
        assert!(planner.known_attributes().is_empty());
    }

    #[test]
    fn resumes_from_saved_attributes_and_restarts() {
        let attributes: BTreeMap<String, String> = QUESTIONS
            .iter()
            .map(|(key, _)| (key.to_string(), "100".to_string()))
            .collect();
        let mut planner = QuestionnairePlanner::new(attributes, now());
        assert!(planner.recommended_budget_plan().is_some());

        planner.process_input("restart", now());
        assert!(planner.recommended_budget_plan().is_none());
        assert!(planner.known_attributes().is_empty());
    }
}
