mod app;
mod config;
mod handlers;
mod repository;
mod state;
mod storage;

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use listenfd::ListenFd;
use tokio::{net::TcpListener, signal};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use userbase_core::storage::KeyValueStore;

use crate::{
    app::create_app,
    config::{is_lambda_runtime, Config},
    state::AppState,
};

/// Userbase - Create, read, update and delete users stored in DynamoDB
#[derive(Parser, Debug)]
#[command(name = "userbase")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Host address to bind the server to
    #[arg(long, short = 'H', default_value = "0.0.0.0", env = "HOST")]
    host: String,

    /// Port to listen on
    #[arg(long, short, default_value = "3000", env = "PORT")]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let lambda = is_lambda_runtime();
    init_tracing(lambda);

    let config = Config::from_env()?;
    let store = build_store(&config).await;

    tracing::info!(
        region = %config.region,
        table = %config.table_name,
        lambda,
        "Starting userbase"
    );

    let state = AppState::new(store, config.table_name.clone());
    let app = create_app(state);

    if lambda {
        // API Gateway proxy events are translated into HTTP requests.
        return lambda_http::run(app)
            .await
            .map_err(|err| anyhow::anyhow!(err.to_string()));
    }

    // Auto-reload support via listenfd
    let mut listenfd = ListenFd::from_env();
    let listener = match listenfd.take_tcp_listener(0)? {
        Some(listener) => {
            listener.set_nonblocking(true)?;
            TcpListener::from_std(listener)?
        }
        None => {
            let addr = format!("{}:{}", cli.host, cli.port);
            TcpListener::bind(&addr).await?
        }
    };

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

fn init_tracing(lambda: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "userbase=debug,tower_http=debug".into());

    let registry = tracing_subscriber::registry().with(filter);

    // CloudWatch adds its own timestamps and does not render colours.
    if lambda {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .without_time(),
            )
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

#[cfg(feature = "dynamodb")]
async fn build_store(config: &Config) -> Arc<dyn KeyValueStore> {
    let client = storage::dynamodb::create_client(config).await;
    Arc::new(storage::DynamoDbStore::new(client))
}

#[cfg(feature = "inmemory")]
async fn build_store(config: &Config) -> Arc<dyn KeyValueStore> {
    tracing::warn!("Using the in-memory store, users are lost on restart");
    Arc::new(storage::InMemoryStore::with_table(
        config.table_name.clone(),
        userbase_core::users::EMAIL_ATTR,
    ))
}

/// Wait for shutdown signals (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down...");
        }
    }
}
