use std::sync::Arc;

use auth::Authenticator;
use chrono::Duration;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use user_service::config::Config;
use user_service::domain::user::ports::AuthServicePort;
use user_service::domain::user::service::AuthService;
use user_service::inbound::http::router::create_router;
use user_service::inbound::http::session_cookie::SessionCookieSettings;
use user_service::outbound::repositories::InMemoryUserRepository;
use user_service::outbound::repositories::PostgresUserRepository;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "user_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "user-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        session_ttl_hours = config.session.ttl_hours,
        secure_cookie = config.session.secure_cookie,
        password_cost = config.password.cost,
        "Configuration loaded"
    );

    let session_ttl = Duration::try_hours(config.session.ttl_hours).ok_or_else(|| {
        anyhow::anyhow!(
            "session.ttl_hours out of range: {}",
            config.session.ttl_hours
        )
    })?;
    let authenticator = Arc::new(
        Authenticator::new(
            config.jwt.secret.as_bytes(),
            config.password.cost,
            session_ttl,
        )
        .map_err(|e| anyhow::anyhow!("Invalid authentication settings: {e}"))?,
    );

    let auth_service: Arc<dyn AuthServicePort> = if config.database.url.is_empty() {
        tracing::warn!("database.url is empty, users are kept in memory and lost on restart");
        let store = Arc::new(InMemoryUserRepository::new());
        Arc::new(AuthService::new(store, Arc::clone(&authenticator)))
    } else {
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

        let store = Arc::new(PostgresUserRepository::new(pg_pool));
        Arc::new(AuthService::new(store, Arc::clone(&authenticator)))
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(
        auth_service,
        SessionCookieSettings {
            secure: config.session.secure_cookie,
        },
    );

    if let Err(e) = axum::serve(http_listener, http_application).await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    tracing::info!("Server exited successfully");
    Ok(())
}
