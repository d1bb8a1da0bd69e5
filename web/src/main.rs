//! Stockroom server binary.
//!
//! Wires the live providers (PostgreSQL repositories, the Redis failure
//! ledger, JWT tokens, Argon2 hashing) into the router and serves it
//! with graceful shutdown.

use stockroom_core::providers::{Argon2PasswordHasher, JwtTokenService};
use stockroom_core::stores::postgres::{
    self, PostgresCartStore, PostgresFavoriteStore, PostgresInquiryStore,
    PostgresStockRepository, PostgresUserRepository,
};
use stockroom_core::stores::RedisFailureLedger;
use stockroom_web::{AppConfig, AppEnv, api_router};
use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let config = AppConfig::from_env()?;

    info!("Connecting stores...");
    let pool = postgres::connect(&config.database_url).await?;
    postgres::migrate(&pool).await?;
    let ledger = RedisFailureLedger::new(&config.redis_url).await?;

    let env = AppEnv::new(
        PostgresUserRepository::new(pool.clone()),
        PostgresStockRepository::new(pool.clone()),
        PostgresCartStore::new(pool.clone()),
        PostgresFavoriteStore::new(pool.clone()),
        PostgresInquiryStore::new(pool),
        ledger,
        JwtTokenService::new(&config.token),
        Argon2PasswordHasher::new(),
    );

    let app = api_router(env);

    let address = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutting down");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c().await.expect("Failed to install Ctrl+C handler");

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;

        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
