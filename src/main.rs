//! Socialite API server.
//!
//! Reads `SOCIALITE__*` configuration, connects to PostgreSQL (or runs on
//! in-memory storage with `--in-memory`) and serves the HTTP API.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use socialite::adapters::auth::{BcryptPasswordHasher, JwtTokenService};
use socialite::adapters::http::{build_router, AppDependencies, CookieSettings, RouterSettings};
use socialite::adapters::memory::InMemoryStore;
use socialite::adapters::postgres::run_migrations;
use socialite::adapters::InMemoryEventBus;
use socialite::config::AppConfig;

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    let registry = tracing_subscriber::registry().with(filter);
    if config.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let in_memory = std::env::args().any(|arg| arg == "--in-memory");

    let config = AppConfig::load().context("Failed to load configuration")?;
    init_tracing(&config);

    let validated = if in_memory {
        config.validate_without_database()
    } else {
        config.validate()
    };
    validated.context("Invalid configuration")?;

    tracing::info!(
        environment = ?config.server.environment,
        in_memory,
        "Starting Socialite API"
    );

    let bus = Arc::new(InMemoryEventBus::new());
    let hasher = Arc::new(BcryptPasswordHasher::new(config.auth.password_hash_cost));
    let tokens = Arc::new(JwtTokenService::from_config(&config.auth));
    let cookies = CookieSettings::new(config.server.secure_cookies());

    let deps = if in_memory {
        tracing::warn!("Using in-memory storage; data is lost on exit");
        AppDependencies::in_memory(Arc::new(InMemoryStore::new()), bus, hasher, tokens, cookies)
    } else {
        tracing::info!("Connecting to database...");
        let pool = config
            .database
            .pool_options()
            .connect(&config.database.url)
            .await
            .context("Failed to connect to database")?;

        if config.database.run_migrations {
            tracing::info!("Running database migrations...");
            run_migrations(&pool)
                .await
                .context("Failed to run migrations")?;
        }

        AppDependencies::postgres(pool, bus, hasher, tokens, cookies)
    };

    let app = build_router(deps, RouterSettings::from_config(&config.server));

    let addr = config.server.socket_addr().context("Invalid listen address")?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    tracing::info!(%addr, "Listening");

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
