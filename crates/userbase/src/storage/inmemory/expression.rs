//! Minimal evaluation of update and condition expressions.
//!
//! Supports the subset the repository emits: a `set` clause of
//! `attribute=:placeholder` assignments, and `attribute_exists(..)` /
//! `attribute_not_exists(..)` conditions.

use userbase_core::storage::{Item, StoreError, StoreResult};

/// One `attribute=:placeholder` action of a set-clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub attribute: String,
    pub placeholder: String,
}

/// A supported condition expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    AttributeExists(String),
    AttributeNotExists(String),
}

impl Condition {
    /// Evaluates the condition against the current item, if any.
    pub fn holds(&self, item: Option<&Item>) -> bool {
        match self {
            Condition::AttributeExists(attr) => item.is_some_and(|i| i.contains_key(attr)),
            Condition::AttributeNotExists(attr) => !item.is_some_and(|i| i.contains_key(attr)),
        }
    }
}

/// Parses a `set a=:x,b=:y` clause.
pub fn parse_set_clause(expression: &str) -> StoreResult<Vec<Assignment>> {
    let trimmed = expression.trim_start();
    let split_at = trimmed
        .find(char::is_whitespace)
        .unwrap_or(trimmed.len());
    let (keyword, actions) = trimmed.split_at(split_at);

    if !keyword.eq_ignore_ascii_case("set") {
        return Err(StoreError::Validation(format!(
            "Unsupported update expression: {expression:?}"
        )));
    }

    let actions = actions.trim();
    if actions.is_empty() {
        return Err(StoreError::Validation(
            "Update expression has no actions".to_string(),
        ));
    }

    actions.split(',').map(parse_assignment).collect()
}

fn parse_assignment(fragment: &str) -> StoreResult<Assignment> {
    let invalid = || StoreError::Validation(format!("Invalid assignment: {fragment:?}"));

    let (attribute, placeholder) = fragment.split_once('=').ok_or_else(invalid)?;
    let attribute = attribute.trim();
    let placeholder = placeholder.trim();

    if attribute.is_empty() || placeholder.len() < 2 || !placeholder.starts_with(':') {
        return Err(invalid());
    }

    Ok(Assignment {
        attribute: attribute.to_string(),
        placeholder: placeholder.to_string(),
    })
}

/// Parses `attribute_exists(x)` or `attribute_not_exists(x)`.
pub fn parse_condition(expression: &str) -> StoreResult<Condition> {
    let expression = expression.trim();

    if let Some(attr) = call_argument(expression, "attribute_exists") {
        return Ok(Condition::AttributeExists(attr.to_string()));
    }
    if let Some(attr) = call_argument(expression, "attribute_not_exists") {
        return Ok(Condition::AttributeNotExists(attr.to_string()));
    }

    Err(StoreError::Validation(format!(
        "Unsupported condition expression: {expression:?}"
    )))
}

fn call_argument<'a>(expression: &'a str, function: &str) -> Option<&'a str> {
    let argument = expression
        .strip_prefix(function)?
        .trim_start()
        .strip_prefix('(')?
        .strip_suffix(')')?
        .trim();

    (!argument.is_empty()).then_some(argument)
}
