//! # REST API for the Leaderboard

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use shared::{RankingList, RankingMode};
use tracing::{debug, info};

use crate::domain::{calendar, leaderboard, Caller, LedgerError};
use crate::io::rest::mappers::ranking_mapper::RankingMapper;
use crate::AppState;

/// Create a router for ranking related APIs
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(get_ranking))
}

#[derive(Debug, Deserialize)]
pub struct RankingQuery {
    #[serde(default)]
    pub mode: RankingMode,
}

pub async fn get_ranking(
    State(state): State<AppState>,
    caller: Caller,
    query: Result<Query<RankingQuery>, QueryRejection>,
) -> Result<Json<RankingList>, LedgerError> {
    let Query(query) = query?;
    info!("GET /api/ranking - mode: {}", query.mode);

    caller.require()?;
    let today = calendar::local_today();
    let since = leaderboard::lower_bound(query.mode, today);

    let seen = state.summary_cache.ranking_generation();
    if let Some(cached) = state.summary_cache.ranking(query.mode, since) {
        debug!("Serving cached {} ranking", query.mode);
        return Ok(Json(cached));
    }

    let entries = state.ranking_service.ranking_as_of(&caller, query.mode, today).await?;
    let ranking = RankingMapper::to_dto(query.mode, entries);
    state.summary_cache.store_ranking(seen, since, ranking.clone());
    Ok(Json(ranking))
}
