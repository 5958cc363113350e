mod items;
mod requests;
mod types;
mod update_expression;
mod validation;

pub use items::{
    item_to_user, user_key, user_to_item, EMAIL_ATTR, FIRST_NAME_ATTR, LAST_NAME_ATTR,
    PHONE_NUMBER_ATTR,
};
pub use requests::{
    ErrorBody, ListUsersQuery, PageError, PageRequest, UserPage, DEFAULT_PAGE_LIMIT,
    MAX_PAGE_LIMIT,
};
pub use types::{User, UserUpdate};
pub use update_expression::{
    build_update_expression, UpdateExpression, FIRST_NAME_PLACEHOLDER, LAST_NAME_PLACEHOLDER,
    PHONE_NUMBER_PLACEHOLDER,
};
pub use validation::is_valid_email;
