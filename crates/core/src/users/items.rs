//! Conversions between [`User`] and store [`Item`]s.
//!
//! Pure functions, testable without a store.

use crate::storage::{Item, Key, RepositoryError};

use super::User;

pub const EMAIL_ATTR: &str = "email";
pub const FIRST_NAME_ATTR: &str = "first_name";
pub const LAST_NAME_ATTR: &str = "last_name";
pub const PHONE_NUMBER_ATTR: &str = "phone_number";

/// Partition key for the user with the given email.
pub fn user_key(email: &str) -> Key {
    Key::new(EMAIL_ATTR, email)
}

/// Convert a User to a store item.
pub fn user_to_item(user: &User) -> Item {
    Item::from([
        (EMAIL_ATTR.to_string(), user.email.clone()),
        (FIRST_NAME_ATTR.to_string(), user.first_name.clone()),
        (LAST_NAME_ATTR.to_string(), user.last_name.clone()),
        (PHONE_NUMBER_ATTR.to_string(), user.phone_number.clone()),
    ])
}

/// Convert a store item to a User.
///
/// The email is required; the other attributes default to empty when the
/// item does not carry them.
pub fn item_to_user(item: &Item) -> Result<User, RepositoryError> {
    let email = item
        .get(EMAIL_ATTR)
        .filter(|email| !email.is_empty())
        .ok_or_else(|| RepositoryError::Decode(format!("Missing or invalid field: {EMAIL_ATTR}")))?;

    Ok(User {
        email: email.clone(),
        first_name: get_optional(item, FIRST_NAME_ATTR),
        last_name: get_optional(item, LAST_NAME_ATTR),
        phone_number: get_optional(item, PHONE_NUMBER_ATTR),
    })
}

fn get_optional(item: &Item, key: &str) -> String {
    item.get(key).cloned().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User::new("ada@example.com")
            .with_first_name("Ada")
            .with_last_name("Lovelace")
            .with_phone_number("0987654321")
    }

    #[test]
    fn test_user_to_item_attributes() {
        let item = user_to_item(&sample_user());

        assert_eq!(item.len(), 4);
        assert_eq!(item["email"], "ada@example.com");
        assert_eq!(item["first_name"], "Ada");
        assert_eq!(item["last_name"], "Lovelace");
        assert_eq!(item["phone_number"], "0987654321");
    }

    #[test]
    fn test_item_to_user() {
        let user = sample_user();
        assert_eq!(item_to_user(&user_to_item(&user)).unwrap(), user);
    }

    #[test]
    fn test_item_without_optional_attributes() {
        let item = Item::from([("email".to_string(), "ada@example.com".to_string())]);

        let user = item_to_user(&item).unwrap();

        assert_eq!(user, User::new("ada@example.com"));
    }

    #[test]
    fn test_item_without_email_is_a_decode_error() {
        let item = Item::from([("first_name".to_string(), "Ada".to_string())]);

        let err = item_to_user(&item).unwrap_err();

        assert_eq!(
            err,
            RepositoryError::Decode("Missing or invalid field: email".to_string())
        );
    }

    #[test]
    fn test_item_with_empty_email_is_a_decode_error() {
        let item = Item::from([("email".to_string(), String::new())]);
        assert!(matches!(item_to_user(&item), Err(RepositoryError::Decode(_))));
    }

    #[test]
    fn test_user_key() {
        let key = user_key("ada@example.com");
        assert_eq!(key.attribute, "email");
        assert_eq!(key.value, "ada@example.com");
    }
}
