use std::sync::Arc;

use account_service::account::service::AccountService;
use account_service::authentication::service::AuthService;
use account_service::config::Config;
use account_service::inbound::http::router::cors_layer;
use account_service::inbound::http::router::create_router;
use account_service::inbound::http::router::AppState;
use account_service::repositories::PostgresAccountRepository;
use auth::Authenticator;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "account_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "account-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        token_ttl_seconds = config.jwt.expiration_seconds,
        cors_allowed_origins = ?config.server.cors_allowed_origins,
        "Configuration loaded"
    );

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

    let authenticator = Arc::new(Authenticator::with_hasher(
        config.jwt.secret.as_bytes(),
        config.jwt.ttl(),
        config.password.hasher()?,
    ));
    let account_repository = Arc::new(PostgresAccountRepository::new(pg_pool));

    let state = AppState {
        account_service: Arc::new(AccountService::new(
            Arc::clone(&account_repository),
            Arc::clone(&authenticator),
        )),
        auth_service: Arc::new(AuthService::new(
            account_repository,
            Arc::clone(&authenticator),
        )),
        authenticator,
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(state, cors_layer(&config.server.cors_allowed_origins)?);
    axum::serve(http_listener, http_application).await?;

    tracing::info!("Server exited");

    Ok(())
}
