//! `cargo xtask dynamodb`: manage the table backing the users service.
//!
//! Planning lives in pure modules (`config`, `planning`, parts of `seed`);
//! this module wires them to the SDK calls in `client` and `deploy` and to
//! the terminal.

mod client;
mod config;
mod deploy;
mod error;
mod planning;
mod seed;

pub use error::{DynamodbError, Result};

use dialoguer::Confirm;

use crate::prelude::*;
use planning::{DeployPlan, DestroyPlan};

/// Number of sample users listed before the seed confirmation.
const SEED_PREVIEW: usize = 5;

#[derive(Debug, clap::Parser)]
pub struct DynamodbCommand {
    #[command(subcommand)]
    pub action: DynamodbAction,
}

#[derive(Debug, clap::Subcommand)]
pub enum DynamodbAction {
    /// Create the users table, or delete it with --destroy.
    Deploy(DeployCommand),

    /// Insert generated sample users.
    Seed(SeedCommand),
}

/// Create the users table keyed by `email`, or delete it.
///
/// The target follows the usual AWS variables: `AWS_ENDPOINT_URL` for a
/// local DynamoDB, `AWS_REGION` and `AWS_PROFILE` for a real account.
#[derive(Debug, clap::Parser)]
pub struct DeployCommand {
    /// Do not ask before changing anything.
    #[arg(long)]
    pub force: bool,

    /// Delete the table and every user in it.
    #[arg(long)]
    pub destroy: bool,

    #[arg(long, default_value = config::DEFAULT_TABLE_NAME)]
    pub table_name: String,
}

/// Fill an existing users table with generated users.
#[derive(Debug, clap::Parser)]
pub struct SeedCommand {
    /// How many users to write.
    #[arg(long, default_value = "20")]
    pub count: u32,

    #[arg(long, default_value = config::DEFAULT_TABLE_NAME)]
    pub table_name: String,

    /// Do not ask before writing.
    #[arg(long)]
    pub force: bool,
}

pub async fn run(command: DynamodbCommand, out: &Output) -> Result<()> {
    out.field("Target:", client::Target::from_env());
    out.blank();

    let dynamo = client::create_client().await;

    match command.action {
        DynamodbAction::Deploy(cmd) if cmd.destroy => destroy(&dynamo, cmd, out).await,
        DynamodbAction::Deploy(cmd) => deploy(&dynamo, cmd, out).await,
        DynamodbAction::Seed(cmd) => seed_table(&dynamo, cmd, out).await,
    }
}

/// Asks unless `force` is set; a "no" cancels the command.
fn confirm(force: bool, prompt: impl Into<String>, default: bool) -> Result<()> {
    if force {
        return Ok(());
    }

    let accepted = Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?;

    accepted.then_some(()).ok_or(DynamodbError::UserCancelled)
}

async fn deploy(dynamo: &aws_sdk_dynamodb::Client, cmd: DeployCommand, out: &Output) -> Result<()> {
    let current = client::get_table_state(dynamo, &cmd.table_name).await?;
    let desired = config::users_table_config().with_table_name(&cmd.table_name);
    let plan = planning::calculate_deploy_plan(current.as_ref(), &desired);

    out.line(p_c("Deploy Plan:"));
    for line in planning::format_deploy_plan(&plan) {
        let colored = match line.chars().next() {
            Some('+') => p_g(&line),
            Some('~') => p_y(&line),
            _ => line,
        };
        out.line(format!("  {colored}"));
    }
    out.blank();

    match &plan {
        DeployPlan::NoChanges { .. } => {
            out.line(p_g("Nothing to do."));
            Ok(())
        }
        DeployPlan::Incompatible { .. } => deploy::execute_deploy_plan(dynamo, &plan).await,
        DeployPlan::CreateTable { .. } => {
            confirm(cmd.force, "Create the table?", true)?;
            out.line(p_b("Creating table and waiting for it to become active..."));
            deploy::execute_deploy_plan(dynamo, &plan).await?;
            out.line(p_g("Table is ready."));
            Ok(())
        }
    }
}

async fn destroy(dynamo: &aws_sdk_dynamodb::Client, cmd: DeployCommand, out: &Output) -> Result<()> {
    let current = client::get_table_state(dynamo, &cmd.table_name).await?;
    let plan = planning::calculate_destroy_plan(current.as_ref(), &cmd.table_name);

    out.line(p_y("Destroy Plan:"));
    for line in planning::format_destroy_plan(&plan) {
        out.line(format!("  {}", p_r(&line)));
    }
    out.blank();

    if let DestroyPlan::AlreadyGone { .. } = plan {
        return Ok(());
    }

    confirm(
        cmd.force,
        format!("Delete '{}' and all of its users?", cmd.table_name),
        false,
    )?;
    deploy::execute_destroy_plan(dynamo, &plan).await?;
    out.line(p_g("Table deleted."));
    Ok(())
}

async fn seed_table(dynamo: &aws_sdk_dynamodb::Client, cmd: SeedCommand, out: &Output) -> Result<()> {
    if client::get_table_state(dynamo, &cmd.table_name).await?.is_none() {
        return Err(DynamodbError::TableNotFound {
            table_name: cmd.table_name,
        });
    }

    let users = seed::generate_seed_users(cmd.count);

    out.field("Table:", &cmd.table_name);
    out.line(p_c("Sample:"));
    for user in users.iter().take(SEED_PREVIEW) {
        out.line(format!(
            "  {} ({} {})",
            user.email, user.first_name, user.last_name
        ));
    }
    if users.len() > SEED_PREVIEW {
        out.line(format!("  and {} more", users.len() - SEED_PREVIEW));
    }
    out.blank();

    confirm(cmd.force, format!("Write {} users?", users.len()), true)?;

    let written = seed::seed_users(dynamo, &cmd.table_name, &users).await?;
    out.line(format!("{} wrote {written} users", p_g("Done:")));
    Ok(())
}
