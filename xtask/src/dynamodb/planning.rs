//! Pure functions for calculating deployment plans (Functional Core).

use super::config::TableConfig;

/// Represents the current state of a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableState {
    pub status: TableStatus,
    /// Name of the HASH key attribute.
    pub partition_key: Option<String>,
    /// Name of the RANGE key attribute, if the table has one.
    pub sort_key: Option<String>,
}

/// Table status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableStatus {
    Active,
    Creating,
    Updating,
    Deleting,
}

/// Planned changes for deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployPlan {
    /// Table doesn't exist, needs to be created.
    CreateTable { config: TableConfig },
    /// Table is up to date, no changes needed.
    NoChanges { table_name: String },
    /// Table exists with a key schema that cannot be changed in place.
    Incompatible { table_name: String, reason: String },
}

/// Plan for destroying a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DestroyPlan {
    /// Table exists and will be deleted.
    DeleteTable { table_name: String },
    /// Table doesn't exist, nothing to do.
    AlreadyGone { table_name: String },
}

/// Pure function: Calculate what changes are needed to reach desired state.
///
/// Key schemas are immutable in DynamoDB, so a mismatch is reported rather
/// than planned.
pub fn calculate_deploy_plan(current: Option<&TableState>, desired: &TableConfig) -> DeployPlan {
    let Some(state) = current else {
        return DeployPlan::CreateTable {
            config: desired.clone(),
        };
    };

    let table_name = desired.table_name.clone();

    if state.partition_key.as_deref() != Some(desired.partition_key.name.as_str()) {
        return DeployPlan::Incompatible {
            table_name,
            reason: format!(
                "partition key is {}, expected {}",
                state.partition_key.as_deref().unwrap_or("<none>"),
                desired.partition_key.name
            ),
        };
    }

    if let Some(sort_key) = &state.sort_key {
        return DeployPlan::Incompatible {
            table_name,
            reason: format!("unexpected sort key {sort_key}"),
        };
    }

    DeployPlan::NoChanges { table_name }
}

/// Pure function: Calculate destroy plan.
pub fn calculate_destroy_plan(current: Option<&TableState>, table_name: &str) -> DestroyPlan {
    match current {
        Some(_) => DestroyPlan::DeleteTable {
            table_name: table_name.to_string(),
        },
        None => DestroyPlan::AlreadyGone {
            table_name: table_name.to_string(),
        },
    }
}

/// Pure function: Format a deploy plan for display.
pub fn format_deploy_plan(plan: &DeployPlan) -> Vec<String> {
    match plan {
        DeployPlan::CreateTable { config } => vec![
            format!("+ Create table: {}", config.table_name),
            format!("  Partition key: {} (S)", config.partition_key.name),
            "  Billing: PAY_PER_REQUEST".to_string(),
        ],
        DeployPlan::NoChanges { table_name } => {
            vec![format!("= Table '{table_name}' is up to date")]
        }
        DeployPlan::Incompatible { table_name, reason } => vec![
            format!("~ Table '{table_name}' cannot be updated in place"),
            format!("  {reason}"),
            "  Run with --destroy first to recreate it".to_string(),
        ],
    }
}

/// Pure function: Format a destroy plan for display.
pub fn format_destroy_plan(plan: &DestroyPlan) -> Vec<String> {
    match plan {
        DestroyPlan::DeleteTable { table_name } => {
            vec![format!("- Delete table: {table_name} (ALL DATA WILL BE LOST)")]
        }
        DestroyPlan::AlreadyGone { table_name } => {
            vec![format!("= Table '{table_name}' does not exist")]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynamodb::config::users_table_config;

    fn state(partition_key: &str, sort_key: Option<&str>) -> TableState {
        TableState {
            status: TableStatus::Active,
            partition_key: Some(partition_key.to_string()),
            sort_key: sort_key.map(str::to_string),
        }
    }

    #[test]
    fn test_missing_table_is_created() {
        let config = users_table_config();

        let plan = calculate_deploy_plan(None, &config);

        assert_eq!(plan, DeployPlan::CreateTable { config });
    }

    #[test]
    fn test_matching_table_needs_no_changes() {
        let plan = calculate_deploy_plan(Some(&state("email", None)), &users_table_config());

        assert_eq!(
            plan,
            DeployPlan::NoChanges {
                table_name: "users".to_string()
            }
        );
    }

    #[test]
    fn test_other_partition_key_is_incompatible() {
        let plan = calculate_deploy_plan(Some(&state("PK", None)), &users_table_config());

        assert!(
            matches!(plan, DeployPlan::Incompatible { ref reason, .. } if reason.contains("PK"))
        );
    }

    #[test]
    fn test_sort_key_is_incompatible() {
        let plan = calculate_deploy_plan(Some(&state("email", Some("SK"))), &users_table_config());

        assert!(matches!(plan, DeployPlan::Incompatible { .. }));
    }

    #[test]
    fn test_custom_table_name_is_planned() {
        let config = users_table_config().with_table_name("people");

        let lines = format_deploy_plan(&calculate_deploy_plan(None, &config));

        assert_eq!(lines[0], "+ Create table: people");
        assert_eq!(lines[1], "  Partition key: email (S)");
    }

    #[test]
    fn test_destroy_plans() {
        assert_eq!(
            calculate_destroy_plan(Some(&state("email", None)), "users"),
            DestroyPlan::DeleteTable {
                table_name: "users".to_string()
            }
        );
        assert_eq!(
            calculate_destroy_plan(None, "users"),
            DestroyPlan::AlreadyGone {
                table_name: "users".to_string()
            }
        );
    }
}
