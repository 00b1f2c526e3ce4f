//! Splits a command line into a command name, a main parameter and `/name value` pairs.
//!
//! ```text
//! addExpense 2.12 /description hello /tag a b c
//! ^command   ^main ^secondary         ^secondary
//! ```

use std::collections::HashMap;

use crate::errors::{DomainError, MalformedCommand, Result};

use super::registry::CommandRegistry;

const PARAM_PREFIX: char = '/';

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandParams {
    command: String,
    main: Option<String>,
    secondary: HashMap<String, String>,
}

impl CommandParams {
    /// Tokenises `line`, rejecting unregistered commands and repeated parameters.
    pub fn parse(line: &str, registry: &CommandRegistry) -> Result<Self> {
        let line = line.trim();
        let spans = token_spans(line);
        let Some(&(name_start, name_end)) = spans.first() else {
            return Err(DomainError::UnknownCommand(String::new()));
        };
        let command = &line[name_start..name_end];
        if registry.get(command).is_none() {
            return Err(DomainError::UnknownCommand(command.to_string()));
        }

        let openers: Vec<(usize, usize)> = spans[1..]
            .iter()
            .copied()
            .filter(|&(start, _)| line[start..].starts_with(PARAM_PREFIX))
            .collect();

        let main_end = openers.first().map_or(line.len(), |&(start, _)| start);
        let main = non_empty(&line[name_end..main_end]);

        let mut secondary = HashMap::new();
        for (idx, &(start, end)) in openers.iter().enumerate() {
            let name = &line[start + PARAM_PREFIX.len_utf8()..end];
            let value_end = openers.get(idx + 1).map_or(line.len(), |&(next, _)| next);
            let value = line[end..value_end].trim().to_string();
            if secondary.insert(name.to_string(), value).is_some() {
                return Err(MalformedCommand::DuplicateParam(name.to_string()).into());
            }
        }

        Ok(Self {
            command: command.to_string(),
            main,
            secondary,
        })
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn main_param(&self) -> Option<&str> {
        self.main.as_deref()
    }

    pub fn contains_main_param(&self) -> bool {
        self.main.is_some()
    }

    /// Value of `/name`. Absent and empty values are both reported as missing.
    pub fn param(&self, name: &str) -> Result<&str> {
        match self.secondary.get(name) {
            Some(value) if !value.is_empty() => Ok(value),
            _ => Err(DomainError::missing_value(name)),
        }
    }

    /// `Ok(None)` when `/name` was not given, an error when it was given without a value.
    pub fn optional_param(&self, name: &str) -> Result<Option<&str>> {
        if self.contains_param(name) {
            self.param(name).map(Some)
        } else {
            Ok(None)
        }
    }

    /// Value of `/name` as typed, possibly empty. Used for flags.
    pub fn raw_param(&self, name: &str) -> Option<&str> {
        self.secondary.get(name).map(String::as_str)
    }

    pub fn contains_param(&self, name: &str) -> bool {
        self.secondary.contains_key(name)
    }

    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.secondary.keys().map(String::as_str)
    }
}

/// Byte ranges of the whitespace separated tokens in `text`.
fn token_spans(text: &str) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut start = None;
    for (idx, ch) in text.char_indices() {
        match (ch.is_whitespace(), start) {
            (true, Some(begin)) => {
                spans.push((begin, idx));
                start = None;
            }
            (false, None) => start = Some(idx),
            _ => {}
        }
    }
    if let Some(begin) = start {
        spans.push((begin, text.len()));
    }
    spans
}

fn non_empty(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::registry;

    fn parse(line: &str) -> Result<CommandParams> {
        CommandParams::parse(line, registry::global())
    }

    #[test]
    fn splits_main_and_secondary_params() {
        let params = parse("addExpense 2.12 /description hello /tag a b c").unwrap();
        assert_eq!(params.command(), "addExpense");
        assert_eq!(params.main_param(), Some("2.12"));
        assert_eq!(params.param("description").unwrap(), "hello");
        assert_eq!(params.param("tag").unwrap(), "a b c");
        assert!(!params.contains_param("time"));
    }

    #[test]
    fn empty_values_are_present_but_missing() {
        let params = parse("addExpense /description /tag not null").unwrap();
        assert!(!params.contains_main_param());
        assert!(params.contains_param("description"));
        assert_eq!(
            params.param("description"),
            Err(DomainError::missing_value("description"))
        );
        assert_eq!(params.param("tag").unwrap(), "not null");
        assert_eq!(params.raw_param("description"), Some(""));
    }

    #[test]
    fn absent_param_is_missing_value() {
        let params = parse("addExpense 3").unwrap();
        assert_eq!(params.param("tag"), Err(DomainError::missing_value("tag")));
        assert_eq!(params.optional_param("tag"), Ok(None));
    }

    #[test]
    fn duplicate_param_is_rejected_by_name() {
        assert_eq!(
            parse("addExpense /time /time"),
            Err(DomainError::from(MalformedCommand::DuplicateParam(
                "time".into()
            )))
        );
    }

    #[test]
    fn unknown_and_empty_commands() {
        assert_eq!(
            parse("launchRocket now"),
            Err(DomainError::UnknownCommand("launchRocket".into()))
        );
        assert_eq!(parse("   "), Err(DomainError::UnknownCommand(String::new())));
    }

    #[test]
    fn values_keep_inner_spacing_and_slashes_inside_words() {
        let params = parse("addExpense 5 /description fish  and/or chips").unwrap();
        assert_eq!(params.param("description").unwrap(), "fish  and/or chips");
    }

    #[test]
    fn param_names_are_case_sensitive() {
        let params = parse("addExpense 5 /Tag food").unwrap();
        assert!(params.contains_param("Tag"));
        assert!(!params.contains_param("tag"));
    }
}
