use kindly::application::UserService;
use kindly::config::{Config, StorageBackend};
use kindly::domain::user::UserRepository;
use kindly::infrastructure::persistence::InMemoryUserRepository;
use kindly::interface::api::{build_router, init_metrics, AppState};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[cfg(feature = "postgres")]
use kindly::infrastructure::persistence::{create_pool, run_migrations, PgUserRepository};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("kindly=info,tower_http=info")),
        )
        .init();

    info!("Starting Kindly user service");

    // Load configuration
    let config = Config::load()?;
    info!(
        "Configuration loaded: bind {}, storage {:?}, allowed origin {}",
        config.bind_address(),
        config.storage.backend,
        config.cors.allowed_origin
    );

    let user_repository = create_repository(&config).await?;
    let user_service = Arc::new(UserService::new(
        user_repository,
        config.security.bcrypt_cost,
    ));
    let state = AppState::new(user_service, config.api.legacy_found_status);

    info!("Initializing Prometheus metrics exporter");
    let prometheus_handle = match init_metrics() {
        Ok(handle) => Some(handle),
        Err(e) => {
            warn!("Metrics exporter unavailable, /metrics disabled: {}", e);
            None
        }
    };

    let app = build_router(state, config.cors.origin_header()?, prometheus_handle);
    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    info!("REST API server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutting down...");
    Ok(())
}

async fn create_repository(config: &Config) -> anyhow::Result<Arc<dyn UserRepository>> {
    match config.storage.backend {
        StorageBackend::Memory => {
            info!("Using in-memory user repository");
            Ok(Arc::new(InMemoryUserRepository::new()))
        }
        #[cfg(feature = "postgres")]
        StorageBackend::Postgres => {
            info!("Initializing database connection...");
            let pool = create_pool(&config.database).await?;
            run_migrations(&pool).await?;
            info!("PostgreSQL user repository initialized");
            Ok(Arc::new(PgUserRepository::new(pool)))
        }
        #[cfg(not(feature = "postgres"))]
        StorageBackend::Postgres => {
            anyhow::bail!("storage.backend = \"postgres\" requires the `postgres` feature")
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
