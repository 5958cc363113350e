use std::collections::BTreeMap;

/// A stored item: attribute name to string value.
///
/// Every attribute of the users table is a plain string, so the store-facing
/// representation carries no type tags. Adapters for typed stores reject
/// attributes that are not strings.
pub type Item = BTreeMap<String, String>;

/// Partition key addressing exactly one item.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Key {
    pub attribute: String,
    pub value: String,
}

impl Key {
    /// Creates a key for the given attribute and value.
    pub fn new(attribute: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            attribute: attribute.into(),
            value: value.into(),
        }
    }
}

/// A conditional partial update of one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateItemRequest {
    pub key: Key,
    /// Set-clause such as `set first_name=:fn,last_name=:ln`.
    pub update_expression: String,
    /// Optional guard such as `attribute_exists(email)`.
    pub condition_expression: Option<String>,
    /// Placeholder to bound value, e.g. `:fn` to `"Ada"`.
    pub values: BTreeMap<String, String>,
}

/// Parameters for one page of a table scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanRequest {
    pub limit: Option<u32>,
    pub exclusive_start_key: Option<Key>,
}

/// One page of scanned items.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanPage {
    pub items: Vec<Item>,
    /// Key of the last item read; `None` once the table is exhausted.
    pub last_evaluated_key: Option<Key>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_new() {
        let key = Key::new("email", "ada@example.com");
        assert_eq!(key.attribute, "email");
        assert_eq!(key.value, "ada@example.com");
    }

    #[test]
    fn test_scan_request_default_is_first_page() {
        let request = ScanRequest::default();
        assert!(request.limit.is_none());
        assert!(request.exclusive_start_key.is_none());
    }
}
