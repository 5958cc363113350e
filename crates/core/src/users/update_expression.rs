//! Partial-update expression builder.
//!
//! Turns a [`UserUpdate`] into a DynamoDB-style `set` clause that names only
//! the non-empty fields, plus the values bound to the placeholders it uses.

use std::collections::BTreeMap;

use super::items::{FIRST_NAME_ATTR, LAST_NAME_ATTR, PHONE_NUMBER_ATTR};
use super::UserUpdate;

pub const FIRST_NAME_PLACEHOLDER: &str = ":fn";
pub const LAST_NAME_PLACEHOLDER: &str = ":ln";
pub const PHONE_NUMBER_PLACEHOLDER: &str = ":pn";

const SET_PREFIX: &str = "set ";

/// A set-clause and the values bound to its placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateExpression {
    pub expression: String,
    pub values: BTreeMap<String, String>,
}

impl UpdateExpression {
    /// True when no field was selected and the clause is the bare `"set "`.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Builds the set-clause for the non-empty fields of `update`.
///
/// Fields are tested in the fixed order first name, last name, phone number
/// and joined with `,`. When every field is empty the clause is exactly
/// `"set "` with no bound values.
///
/// # Examples
///
/// ```
/// use userbase_core::users::{build_update_expression, UserUpdate};
///
/// let update = UserUpdate::new("test@example.com")
///     .with_first_name("first name")
///     .with_phone_number("0987654321");
///
/// let built = build_update_expression(&update);
/// assert_eq!(built.expression, "set first_name=:fn,phone_number=:pn");
/// assert_eq!(built.values.len(), 2);
/// ```
pub fn build_update_expression(update: &UserUpdate) -> UpdateExpression {
    let fields = [
        (FIRST_NAME_ATTR, FIRST_NAME_PLACEHOLDER, &update.first_name),
        (LAST_NAME_ATTR, LAST_NAME_PLACEHOLDER, &update.last_name),
        (
            PHONE_NUMBER_ATTR,
            PHONE_NUMBER_PLACEHOLDER,
            &update.phone_number,
        ),
    ];

    let mut fragments = Vec::with_capacity(fields.len());
    let mut values = BTreeMap::new();

    for (attribute, placeholder, value) in fields {
        if value.is_empty() {
            continue;
        }
        fragments.push(format!("{attribute}={placeholder}"));
        values.insert(placeholder.to_string(), value.clone());
    }

    UpdateExpression {
        expression: format!("{SET_PREFIX}{}", fragments.join(",")),
        values,
    }
}
