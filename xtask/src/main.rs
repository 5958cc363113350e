//! Developer tooling for userbase, run as `cargo xtask <command>`.

use clap::Parser;

mod dynamodb;
mod prelude;

#[derive(Debug, Parser)]
#[command(name = "xtask", about = "Provision and seed the userbase users table")]
struct Cli {
    /// Print nothing but errors
    #[arg(long, global = true)]
    silent: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, clap::Subcommand)]
enum Command {
    /// Deploy, destroy or seed the users table
    Dynamodb(dynamodb::DynamodbCommand),
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let Cli { silent, command } = Cli::parse();
    let out = prelude::Output::new(silent);

    match command {
        Command::Dynamodb(cmd) => dynamodb::run(cmd, &out).await?,
    }

    Ok(())
}
