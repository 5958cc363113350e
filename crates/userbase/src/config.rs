use std::env;

use thiserror::Error;

/// Table used when `TABLE_NAME` is not set.
pub const DEFAULT_TABLE_NAME: &str = "users";

/// Errors raised while loading configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("region environment variable was not found (set AWS_REGION)")]
    MissingRegion,
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// AWS region of the users table (required)
    pub region: String,
    /// DynamoDB table holding the users (default: "users")
    pub table_name: String,
    /// Custom endpoint URL, e.g. a local DynamoDB (default: none)
    /// Note: Only used when the `dynamodb` feature is enabled.
    #[allow(dead_code)]
    pub endpoint_url: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `AWS_REGION` - AWS region (required)
    /// - `TABLE_NAME` - DynamoDB table name (default: "users")
    /// - `AWS_ENDPOINT_URL` - Custom DynamoDB endpoint (default: none)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        Ok(Self {
            region: var("AWS_REGION").ok_or(ConfigError::MissingRegion)?,
            table_name: var("TABLE_NAME").unwrap_or_else(|| DEFAULT_TABLE_NAME.to_string()),
            endpoint_url: var("AWS_ENDPOINT_URL"),
        })
    }
}

/// Returns true when the process was started by the AWS Lambda runtime.
pub fn is_lambda_runtime() -> bool {
    env::var_os("AWS_LAMBDA_RUNTIME_API").is_some()
}
