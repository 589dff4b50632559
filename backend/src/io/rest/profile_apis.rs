//! # REST API for the caller's Profile

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::get,
    Json, Router,
};
use shared::{Profile, UpdateProfileRequest};
use tracing::info;

use crate::domain::{Caller, LedgerError};
use crate::io::rest::mappers::profile_mapper::ProfileMapper;
use crate::AppState;

/// Create a router for profile related APIs
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(get_profile).put(update_profile))
}

pub async fn get_profile(State(state): State<AppState>, caller: Caller) -> Result<Json<Profile>, LedgerError> {
    info!("GET /api/profile");

    let profile = state.profile_service.get_profile(&caller).await?;
    Ok(Json(ProfileMapper::to_dto(profile)))
}

pub async fn update_profile(
    State(state): State<AppState>,
    caller: Caller,
    payload: Result<Json<UpdateProfileRequest>, JsonRejection>,
) -> Result<Json<Profile>, LedgerError> {
    let Json(request) = payload?;
    info!("PUT /api/profile - request: {:?}", request);

    let command = ProfileMapper::to_update_command(request);
    let profile = state.profile_service.update_profile(&caller, command).await?;
    Ok(Json(ProfileMapper::to_dto(profile)))
}
