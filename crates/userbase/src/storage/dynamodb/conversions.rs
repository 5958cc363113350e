//! DynamoDB attribute conversion functions.
//!
//! Pure functions for converting between DynamoDB `AttributeValue` maps and
//! the string-valued items of `userbase_core::storage`. Testable in
//! isolation without DynamoDB access.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use userbase_core::storage::{Item, Key, StoreError, StoreResult};

/// Convert an item to a DynamoDB attribute map.
pub fn item_to_attributes(item: Item) -> HashMap<String, AttributeValue> {
    item.into_iter()
        .map(|(name, value)| (name, AttributeValue::S(value)))
        .collect()
}

/// Convert a DynamoDB attribute map to an item.
///
/// Every attribute must be a string.
pub fn attributes_to_item(attributes: HashMap<String, AttributeValue>) -> StoreResult<Item> {
    attributes
        .into_iter()
        .map(|(name, value)| match value {
            AttributeValue::S(s) => Ok((name, s)),
            other => Err(StoreError::Decode(format!(
                "Attribute {name} is not a string: {other:?}"
            ))),
        })
        .collect()
}

/// Convert a key to a DynamoDB key map.
pub fn key_to_attributes(key: &Key) -> HashMap<String, AttributeValue> {
    HashMap::from([(key.attribute.clone(), AttributeValue::S(key.value.clone()))])
}

/// Convert a DynamoDB key map (e.g. `LastEvaluatedKey`) to a key.
///
/// The users table has a partition key only, so exactly one string
/// attribute is expected.
pub fn attributes_to_key(attributes: HashMap<String, AttributeValue>) -> StoreResult<Key> {
    let mut item = attributes_to_item(attributes)?;
    if item.len() != 1 {
        return Err(StoreError::Decode(format!(
            "Expected a single key attribute, got {}",
            item.len()
        )));
    }

    item.pop_first()
        .map(|(attribute, value)| Key { attribute, value })
        .ok_or_else(|| StoreError::Decode("Empty key".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_item() -> Item {
        Item::from([
            ("email".to_string(), "ada@example.com".to_string()),
            ("first_name".to_string(), "Ada".to_string()),
        ])
    }

    #[test]
    fn test_item_to_attributes_uses_string_values() {
        let attributes = item_to_attributes(sample_item());

        assert_eq!(attributes.len(), 2);
        assert_eq!(
            attributes.get("email"),
            Some(&AttributeValue::S("ada@example.com".to_string()))
        );
        assert_eq!(
            attributes.get("first_name"),
            Some(&AttributeValue::S("Ada".to_string()))
        );
    }

    #[test]
    fn test_attributes_to_item() {
        let attributes = item_to_attributes(sample_item());
        assert_eq!(attributes_to_item(attributes).unwrap(), sample_item());
    }

    #[test]
    fn test_non_string_attribute_is_a_decode_error() {
        let attributes = HashMap::from([
            (
                "email".to_string(),
                AttributeValue::S("ada@example.com".to_string()),
            ),
            ("age".to_string(), AttributeValue::N("36".to_string())),
        ]);

        let err = attributes_to_item(attributes).unwrap_err();

        assert!(matches!(err, StoreError::Decode(msg) if msg.contains("age")));
    }

    #[test]
    fn test_key_conversions() {
        let key = Key::new("email", "ada@example.com");
        let attributes = key_to_attributes(&key);

        assert_eq!(
            attributes,
            HashMap::from([(
                "email".to_string(),
                AttributeValue::S("ada@example.com".to_string())
            )])
        );
        assert_eq!(attributes_to_key(attributes).unwrap(), key);
    }

    #[test]
    fn test_composite_key_is_rejected() {
        let attributes = HashMap::from([
            ("PK".to_string(), AttributeValue::S("a".to_string())),
            ("SK".to_string(), AttributeValue::S("b".to_string())),
        ]);

        assert!(matches!(
            attributes_to_key(attributes),
            Err(StoreError::Decode(_))
        ));
    }
}
