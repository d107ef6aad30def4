pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vocab_core::{Scheduler, StageLadder};

use crate::config::Config;
use crate::db::Database;
use crate::services::judge::Judge;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub scheduler: Arc<dyn Scheduler>,
    pub judge: Arc<Judge>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Assemble state from configuration and an open database.
    pub fn new(config: Config, db: Database) -> anyhow::Result<Self> {
        let scheduler = StageLadder::new(config.review_intervals.clone())?;
        tracing::info!(
            "Review intervals {:?} days, mastered after stage {}",
            scheduler.intervals_days(),
            scheduler.graduation_stage()
        );
        let judge = Judge::from_config(&config.judge)?;

        Ok(Self {
            db: Arc::new(db),
            scheduler: Arc::new(scheduler),
            judge: Arc::new(judge),
            config: Arc::new(config),
        })
    }
}

/// Build the API router.
pub fn build_router(state: AppState) -> Router {
    let cors = match state.config.allowed_origin.as_deref() {
        Some(origin) => match origin.parse::<HeaderValue>() {
            Ok(origin) => CorsLayer::new()
                .allow_origin(origin)
                .allow_methods(Any)
                .allow_headers(Any),
            Err(_) => {
                tracing::warn!("Ignoring invalid ALLOWED_ORIGIN {:?}", origin);
                CorsLayer::permissive()
            }
        },
        None => CorsLayer::permissive(),
    };

    Router::new()
        .route("/health", get(health_check))
        // Word routes
        .route("/api/words", get(routes::words::list).post(routes::words::create))
        .route(
            "/api/words/:id",
            get(routes::words::get).delete(routes::words::delete),
        )
        // Review routes
        .route("/api/review/due", get(routes::review::due))
        .route("/api/review/buckets", get(routes::review::buckets))
        .route("/api/review/targets", get(routes::review::targets))
        .route("/api/review/:id/check", post(routes::review::check))
        .route("/api/review/:id/history", get(routes::review::history))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    tracing::debug!("Loaded config: {:?}", config);

    tracing::info!("Connecting to database...");
    let db = Database::connect(&config.database_url).await?;

    tracing::info!("Running migrations...");
    db.run_migrations().await?;

    let state = AppState::new(config, db)?;
    tracing::info!(
        "Scheduling with {}, judge: {}",
        state.scheduler.name(),
        state.judge.name()
    );

    let addr = state.config.bind_addr();
    let app = build_router(state);

    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
