use std::sync::Arc;

use auth::Authenticator;
use auth_service::config::Config;
use auth_service::config::StorageBackend;
use auth_service::domain::authentication::ports::AuthServicePort;
use auth_service::domain::authentication::service::AuthService;
use auth_service::inbound::http::cookies::CookiePolicy;
use auth_service::inbound::http::router::create_router;
use auth_service::outbound::repositories::InMemorySessionRepository;
use auth_service::outbound::repositories::InMemoryUserRepository;
use auth_service::outbound::repositories::PostgresSessionRepository;
use auth_service::outbound::repositories::PostgresUserRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "auth_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "auth-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        backend = ?config.database.backend,
        access_ttl_seconds = config.jwt.access_ttl_seconds,
        refresh_ttl_seconds = config.jwt.refresh_ttl_seconds,
        cookie_secure = config.cookie.secure,
        "Configuration loaded"
    );

    let authenticator = Arc::new(
        Authenticator::new(
            config.jwt.access_secret.as_bytes(),
            config.jwt.refresh_secret.as_bytes(),
        )
        .with_ttls(config.jwt.access_ttl_seconds, config.jwt.refresh_ttl_seconds),
    );

    let auth_service: Arc<dyn AuthServicePort> = match config.database.backend {
        StorageBackend::Postgres => {
            let pg_pool = PgPoolOptions::new()
                .max_connections(config.database.max_connections)
                .connect(&config.database.url)
                .await?;
            tracing::info!(
                max_connections = config.database.max_connections,
                database = "postgresql",
                "Database connection pool created"
            );

            sqlx::migrate!("./migrations").run(&pg_pool).await?;
            tracing::info!(database = "postgresql", "Database migrations completed");

            Arc::new(AuthService::new(
                Arc::new(PostgresUserRepository::new(pg_pool.clone())),
                Arc::new(PostgresSessionRepository::new(pg_pool)),
                Arc::clone(&authenticator),
            ))
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; accounts and sessions are lost on restart");

            Arc::new(AuthService::new(
                Arc::new(InMemoryUserRepository::new()),
                Arc::new(InMemorySessionRepository::new()),
                Arc::clone(&authenticator),
            ))
        }
    };

    let cookies = CookiePolicy::new(
        &config.cookie,
        authenticator.access_ttl().num_seconds(),
        authenticator.refresh_ttl().num_seconds(),
    );

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    axum::serve(http_listener, create_router(auth_service, cookies)).await?;

    tracing::info!("Server exited successfully");

    Ok(())
}
