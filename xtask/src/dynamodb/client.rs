//! DynamoDB client and table inspection (Imperative Shell).

use aws_config::meta::region::RegionProviderChain;
use aws_config::BehaviorVersion;
use aws_sdk_dynamodb::operation::describe_table::DescribeTableError;
use aws_sdk_dynamodb::types::{KeyType, TableStatus as SdkTableStatus};
use aws_sdk_dynamodb::Client;

use super::error::{DynamodbError, Result};
use super::planning::{TableState, TableStatus};

/// Region used when neither the environment nor a profile names one.
const FALLBACK_REGION: &str = "us-east-1";

/// Where the tooling will send its requests, for display only.
#[derive(Debug, Clone)]
pub struct Target {
    endpoint_url: Option<String>,
    region: String,
}

impl Target {
    /// Reads the same variables the SDK resolves the client from.
    pub fn from_env() -> Self {
        Self {
            endpoint_url: std::env::var("AWS_ENDPOINT_URL").ok(),
            region: std::env::var("AWS_REGION").unwrap_or_else(|_| FALLBACK_REGION.to_string()),
        }
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.endpoint_url {
            Some(url) => write!(f, "local DynamoDB at {url}"),
            None => write!(f, "AWS DynamoDB in {}", self.region),
        }
    }
}

/// Builds a client from the SDK's default chains.
///
/// Region, credentials and `AWS_ENDPOINT_URL` are all resolved by
/// `aws-config`; only the region gets a fallback.
pub async fn create_client() -> Client {
    let region = RegionProviderChain::default_provider().or_else(FALLBACK_REGION);
    let sdk_config = aws_config::defaults(BehaviorVersion::latest())
        .region(region)
        .load()
        .await;
    Client::new(&sdk_config)
}

/// Fetches current table state, returns None if table doesn't exist.
pub async fn get_table_state(client: &Client, table_name: &str) -> Result<Option<TableState>> {
    let response = match client.describe_table().table_name(table_name).send().await {
        Ok(response) => response,
        Err(err) => {
            return match err.into_service_error() {
                DescribeTableError::ResourceNotFoundException(_) => Ok(None),
                err => Err(DynamodbError::AwsSdk(err.to_string())),
            };
        }
    };

    let table = response.table().ok_or_else(|| {
        DynamodbError::AwsSdk(format!("DescribeTable returned no table for {table_name}"))
    })?;

    let key_name = |key_type: KeyType| {
        table
            .key_schema()
            .iter()
            .find(|key| *key.key_type() == key_type)
            .map(|key| key.attribute_name().to_string())
    };

    let status = match table.table_status() {
        Some(SdkTableStatus::Creating) => TableStatus::Creating,
        Some(SdkTableStatus::Updating) => TableStatus::Updating,
        Some(SdkTableStatus::Deleting) => TableStatus::Deleting,
        _ => TableStatus::Active,
    };

    Ok(Some(TableState {
        status,
        partition_key: key_name(KeyType::Hash),
        sort_key: key_name(KeyType::Range),
    }))
}
