//! # REST API for the Ledger
//!
//! Monthly summary with history, and deletion of single history items.

use std::str::FromStr;

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use serde::Deserialize;
use shared::{ItemKind, LedgerSummary};
use tracing::{debug, info};

use crate::domain::calendar::{self, MonthWindow};
use crate::domain::commands::ledger::DeleteItemCommand;
use crate::domain::{Caller, LedgerError};
use crate::io::rest::mappers::ledger_mapper::LedgerMapper;
use crate::AppState;

/// Create a router for ledger related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/ledger", get(get_ledger))
        .route("/items/:kind/:id", delete(delete_item))
}

#[derive(Debug, Deserialize)]
pub struct LedgerQuery {
    /// `YYYY-MM`; the current local month when absent
    pub month: Option<String>,
}

pub async fn get_ledger(
    State(state): State<AppState>,
    caller: Caller,
    query: Result<Query<LedgerQuery>, QueryRejection>,
) -> Result<Json<LedgerSummary>, LedgerError> {
    let Query(query) = query?;
    info!("GET /api/ledger - month: {:?}", query.month);

    let owner = caller.require()?.to_string();
    let today = calendar::local_today();
    let month = MonthWindow::resolve(query.month.as_deref(), today)?.label();

    // Only the current month is cached; other months are read through
    if month != MonthWindow::containing(today).label() {
        let summary = state.ledger_service.ledger_summary_as_of(&caller, Some(month.as_str()), today).await?;
        return Ok(Json(LedgerMapper::to_dto(summary)));
    }

    let seen = state.summary_cache.ledger_generation(&owner);
    if let Some(cached) = state.summary_cache.ledger(&owner, &month) {
        debug!("Serving cached ledger {} for {}", month, owner);
        return Ok(Json(cached));
    }

    let summary = state.ledger_service.ledger_summary_as_of(&caller, Some(month.as_str()), today).await?;
    let summary = LedgerMapper::to_dto(summary);
    state.summary_cache.store_ledger(&owner, seen, summary.clone());
    Ok(Json(summary))
}

/// Delete a lesson or withdrawal; 204 whether or not anything was removed
pub async fn delete_item(
    State(state): State<AppState>,
    caller: Caller,
    Path((kind, id)): Path<(String, String)>,
) -> Result<StatusCode, LedgerError> {
    info!("DELETE /api/items/{}/{}", kind, id);

    let kind = ItemKind::from_str(&kind).map_err(|e| LedgerError::validation(e.to_string()))?;
    state
        .ledger_service
        .delete_item(&caller, DeleteItemCommand { id, kind })
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
