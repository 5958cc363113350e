//! Seed command implementation.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::{AttributeValue, PutRequest, WriteRequest};
use aws_sdk_dynamodb::Client;
use userbase_core::users::{user_to_item, User};

use super::error::{DynamodbError, Result};

/// DynamoDB accepts at most 25 requests per BatchWriteItem call.
const BATCH_SIZE: usize = 25;

const FIRST_NAMES: [&str; 8] = [
    "Ada", "Grace", "Alan", "Edsger", "Barbara", "Donald", "Frances", "Ken",
];
const LAST_NAMES: [&str; 8] = [
    "Lovelace", "Hopper", "Turing", "Dijkstra", "Liskov", "Knuth", "Allen", "Thompson",
];

/// Generate `count` sample users with unique emails.
pub fn generate_seed_users(count: u32) -> Vec<User> {
    (0..count as usize)
        .map(|i| {
            let first = FIRST_NAMES[i % FIRST_NAMES.len()];
            let last = LAST_NAMES[(i / FIRST_NAMES.len()) % LAST_NAMES.len()];
            let email = format!(
                "{}.{}{i}@example.com",
                first.to_lowercase(),
                last.to_lowercase()
            );

            User::new(email)
                .with_first_name(first)
                .with_last_name(last)
                .with_phone_number(format!("555{i:07}"))
        })
        .collect()
}

fn user_to_attributes(user: &User) -> HashMap<String, AttributeValue> {
    user_to_item(user)
        .into_iter()
        .map(|(name, value)| (name, AttributeValue::S(value)))
        .collect()
}

/// Write users in batches, returning how many were accepted.
pub async fn seed_users(client: &Client, table_name: &str, users: &[User]) -> Result<u32> {
    let mut inserted = 0;

    for chunk in users.chunks(BATCH_SIZE) {
        let write_requests = chunk
            .iter()
            .map(|user| {
                let put = PutRequest::builder()
                    .set_item(Some(user_to_attributes(user)))
                    .build()
                    .map_err(|e| DynamodbError::AwsSdk(e.to_string()))?;
                Ok(WriteRequest::builder().put_request(put).build())
            })
            .collect::<Result<Vec<_>>>()?;

        let output = client
            .batch_write_item()
            .request_items(table_name, write_requests)
            .send()
            .await
            .map_err(|e| DynamodbError::AwsSdk(e.to_string()))?;

        let unprocessed = output
            .unprocessed_items()
            .and_then(|items| items.get(table_name))
            .map_or(0, Vec::len);

        inserted += (chunk.len() - unprocessed) as u32;
    }

    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use userbase_core::users::is_valid_email;

    #[test]
    fn test_generates_requested_count() {
        assert_eq!(generate_seed_users(0).len(), 0);
        assert_eq!(generate_seed_users(40).len(), 40);
    }

    #[test]
    fn test_emails_are_unique_and_valid() {
        let users = generate_seed_users(100);
        let emails: HashSet<_> = users.iter().map(|u| u.email.as_str()).collect();

        assert_eq!(emails.len(), 100);
        assert!(users.iter().all(|u| is_valid_email(&u.email)));
    }

    #[test]
    fn test_first_user() {
        let user = &generate_seed_users(1)[0];

        assert_eq!(user.email, "ada.lovelace0@example.com");
        assert_eq!(user.first_name, "Ada");
        assert_eq!(user.last_name, "Lovelace");
        assert_eq!(user.phone_number, "5550000000");
    }

    #[test]
    fn test_attributes_are_strings() {
        let attributes = user_to_attributes(&generate_seed_users(1)[0]);

        assert_eq!(attributes.len(), 4);
        assert_eq!(
            attributes.get("email"),
            Some(&AttributeValue::S("ada.lovelace0@example.com".to_string()))
        );
    }
}
