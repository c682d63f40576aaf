use std::sync::Arc;

use auth::Authenticator;
use auth::Clock;
use auth::SystemClock;
use chirpy_service::account::service::AccountService;
use chirpy_service::chirp::service::ChirpService;
use chirpy_service::config::Config;
use chirpy_service::inbound::http::router::create_router;
use chirpy_service::inbound::http::router::AppState;
use chirpy_service::outbound::repositories::PostgresAccountRepository;
use chirpy_service::outbound::repositories::PostgresChirpRepository;
use chirpy_service::outbound::repositories::PostgresRefreshTokenRepository;
use chirpy_service::session::service::SessionService;
use chirpy_service::session::store::RefreshTokenStore;
use chrono::Duration;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chirpy_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "chirpy-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        platform = %config.platform,
        jwt_issuer = %config.jwt.issuer,
        access_token_ttl_seconds = config.jwt.access_token_ttl_seconds,
        refresh_token_ttl_days = config.jwt.refresh_token_ttl_days,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = 5,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let authenticator = Arc::new(
        Authenticator::new(
            config.jwt.secret.as_bytes(),
            &config.jwt.issuer,
            Duration::seconds(config.jwt.access_token_ttl_seconds),
        )
        .with_clock(Arc::clone(&clock)),
    );

    let account_repository = Arc::new(PostgresAccountRepository::new(pg_pool.clone()));
    let refresh_token_repository = Arc::new(PostgresRefreshTokenRepository::new(pg_pool.clone()));
    let chirp_repository = Arc::new(PostgresChirpRepository::new(pg_pool));

    let account_service = Arc::new(AccountService::new(
        Arc::clone(&account_repository),
        Arc::clone(&authenticator),
        Arc::clone(&clock),
    ));
    let session_service = Arc::new(SessionService::new(
        account_repository,
        RefreshTokenStore::new(
            refresh_token_repository,
            Arc::clone(&clock),
            Duration::days(config.jwt.refresh_token_ttl_days),
        ),
        authenticator,
        Arc::clone(&clock),
    ));
    let chirp_service = Arc::new(ChirpService::new(chirp_repository, clock));

    let state = AppState::new(
        account_service,
        session_service,
        chirp_service,
        &config.polka.api_key,
        config.is_development(),
    );

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    if let Err(e) = axum::serve(http_listener, create_router(state)).await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    tracing::info!("Server exited successfully");

    Ok(())
}
