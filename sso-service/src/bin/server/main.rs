use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use auth::PasswordHasher;
use auth::TokenIssuer;
use clap::Parser;
use sso_service::config::Config;
use sso_service::config::Env;
use sso_service::domain::auth::service::AuthService;
use sso_service::inbound::grpc::AuthGrpcService;
use sso_service::outbound::repositories::SqliteStorage;
use sso_service::proto::auth_server::AuthServer;
use tonic::transport::Server;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser, Debug)]
#[command(name = "sso-service", version, about = "SSO identity provider")]
struct Args {
    /// Path to a config file; takes priority over CONFIG_PATH
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let args = Args::parse();
    let config = Config::load(args.config.as_deref())?;

    init_tracing(config.env);

    tracing::info!(
        service = "sso-service",
        version = env!("CARGO_PKG_VERSION"),
        env = ?config.env,
        "Service starting"
    );

    tracing::info!(
        storage_path = %config.storage.path.display(),
        grpc_port = config.grpc.port,
        grpc_timeout_ms = config.grpc.timeout_ms,
        token_ttl_seconds = config.token.ttl_seconds,
        "Configuration loaded"
    );

    let storage = Arc::new(SqliteStorage::connect(&config.storage.path).await?);
    storage.migrate().await?;
    tracing::info!(database = "sqlite", "Database migrations completed");

    let password_hasher = PasswordHasher::with_params(config.hashing)?;
    let token_issuer = TokenIssuer::new(config.token.ttl());

    let auth_service = Arc::new(AuthService::new(
        Arc::clone(&storage),
        Arc::clone(&storage),
        Arc::clone(&storage),
        password_hasher,
        token_issuer,
    ));

    let grpc_address: SocketAddr = format!("0.0.0.0:{}", config.grpc.port).parse()?;
    let grpc_service = AuthGrpcService::new(auth_service);
    tracing::info!(
        address = %grpc_address,
        port = config.grpc.port,
        protocol = "grpc",
        "gRpc server listening"
    );

    Server::builder()
        .timeout(config.grpc.timeout())
        .add_service(AuthServer::new(grpc_service))
        .serve_with_shutdown(grpc_address, shutdown_signal())
        .await?;

    storage.pool().close().await;
    tracing::info!("Gracefully stopped");

    Ok(())
}

/// Text logs for local runs, JSON everywhere else. `RUST_LOG` overrides the level.
fn init_tracing(env: Env) {
    let default_filter = match env {
        Env::Local | Env::Dev => "sso_service=debug,info",
        Env::Prod => "info",
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    let (text, json) = match env {
        Env::Local => (Some(tracing_subscriber::fmt::layer()), None),
        Env::Dev | Env::Prod => (None, Some(tracing_subscriber::fmt::layer().json())),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(text)
        .with(json)
        .init();
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
