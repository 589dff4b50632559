//! # Lesson Ledger Backend
//!
//! Income ledger for freelance ski and snowboard instructors: lessons and
//! withdrawals per instructor, monthly and running totals, and a shared
//! leaderboard.
//!
//! ## Architecture
//!
//! ```text
//! IO Layer (REST API, bearer auth, summary cache)
//!     ↓
//! Domain Layer (services, aggregation, change events)
//!     ↓
//! Storage Layer (SQLite repositories)
//! ```
//!
//! [`initialize_backend`] wires the layers together and [`create_router`]
//! exposes them over HTTP.

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    http::{header, HeaderValue, Method},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use crate::config::AppConfig;
use crate::domain::{
    AccountService, EventBus, LedgerService, LessonService, ProfileService, RankingService, WithdrawalService,
};
use crate::io::rest::{
    account_apis, ledger_apis, lesson_apis, profile_apis, ranking_apis, withdrawal_apis, SummaryCache, TokenIssuer,
};
use crate::storage::DbConnection;

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub account_service: AccountService<DbConnection>,
    pub profile_service: ProfileService<DbConnection>,
    pub lesson_service: LessonService<DbConnection>,
    pub withdrawal_service: WithdrawalService<DbConnection>,
    pub ledger_service: LedgerService<DbConnection>,
    pub ranking_service: RankingService<DbConnection>,
    pub tokens: TokenIssuer,
    pub summary_cache: Arc<SummaryCache>,
}

/// Initialize the backend with all required services
pub async fn initialize_backend(config: &AppConfig) -> Result<AppState> {
    info!("Setting up database at {}", config.database_url);
    let db = DbConnection::new(&config.database_url).await?;

    info!("Setting up domain model");
    let tokens = TokenIssuer::new(&config.jwt_secret, config.token_ttl_hours);
    Ok(assemble(Arc::new(db), tokens))
}

/// Build the services over an open connection. The summary cache is
/// subscribed to change events before any service is created, so every
/// service publishes to it.
pub fn assemble(db: Arc<DbConnection>, tokens: TokenIssuer) -> AppState {
    let summary_cache = Arc::new(SummaryCache::new());
    let mut events = EventBus::new();
    events.subscribe(summary_cache.clone());

    AppState {
        account_service: AccountService::new(db.clone()),
        profile_service: ProfileService::new(db.clone(), events.clone()),
        lesson_service: LessonService::new(db.clone(), events.clone()),
        withdrawal_service: WithdrawalService::new(db.clone(), events.clone()),
        ledger_service: LedgerService::new(db.clone(), events),
        ranking_service: RankingService::new(db),
        tokens,
        summary_cache,
    }
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, cors_origin: &str) -> Result<Router> {
    let origin = cors_origin
        .parse::<HeaderValue>()
        .with_context(|| format!("invalid CORS origin '{}'", cors_origin))?;

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    let api_routes = Router::new()
        .nest("/auth", account_apis::router())
        .nest("/profile", profile_apis::router())
        .nest("/lessons", lesson_apis::router())
        .nest("/withdrawals", withdrawal_apis::router())
        .nest("/ranking", ranking_apis::router())
        .merge(ledger_apis::router());

    Ok(Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state))
}
