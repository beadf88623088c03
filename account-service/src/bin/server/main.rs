use std::sync::Arc;
use std::time::Duration;

use account_service::config::Config;
use account_service::domain::user::service::UserService;
use account_service::domain::user::tasks::TaskOptions;
use account_service::inbound::http::router::create_router;
use account_service::inbound::http::router::AppState;
use account_service::outbound::repositories::PostgresUserRepository;
use account_service::outbound::tasks::KafkaTaskDistributor;
use auth::Argon2Hasher;
use auth::JwtMaker;
use sqlx::postgres::PgPoolOptions;
use tokio_util::sync::CancellationToken;
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
        kafka_brokers = %config.kafka.brokers,
        task_topic_prefix = %config.kafka.task_topic_prefix,
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

    let token_maker = Arc::new(JwtMaker::new(config.token.symmetric_key.as_bytes())?);
    let password_hasher = Arc::new(Argon2Hasher::with_params(
        config.password.memory_kib,
        config.password.iterations,
        config.password.parallelism,
    )?);
    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool));
    let task_distributor = Arc::new(KafkaTaskDistributor::new(&config)?);

    let user_service = Arc::new(UserService::new(
        user_repository,
        task_distributor,
        password_hasher,
        TaskOptions::from(&config.tasks.verify_email),
    ));

    let shutdown = CancellationToken::new();
    let state = AppState {
        user_service,
        token_maker,
        access_token_duration: config.token.access_token_duration(),
        shutdown: shutdown.clone(),
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
        state,
        Duration::from_secs(config.server.request_timeout_secs),
    );

    axum::serve(http_listener, http_application)
        .with_graceful_shutdown(shutdown_signal(shutdown))
        .await?;

    tracing::info!("Server exited successfully");

    Ok(())
}

async fn shutdown_signal(shutdown: CancellationToken) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutdown signal received, cancelling in-flight requests");
    shutdown.cancel();
}
