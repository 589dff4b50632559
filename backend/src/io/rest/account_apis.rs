//! # REST API for Accounts
//!
//! Signup and login; both answer with a fresh session token.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use shared::{LoginRequest, SessionResponse, SignupRequest};
use tracing::{info, warn};

use crate::domain::commands::accounts::{LoginCommand, SignupCommand};
use crate::domain::LedgerError;
use crate::AppState;

/// Create a router for account related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
}

fn session_for(state: &AppState, user_id: String) -> Result<SessionResponse, LedgerError> {
    let (token, expires_at) = state.tokens.issue(&user_id)?;
    Ok(SessionResponse {
        user_id,
        token,
        expires_at,
    })
}

/// Create an account and sign it in
pub async fn signup(
    State(state): State<AppState>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SessionResponse>), LedgerError> {
    let Json(request) = payload?;
    info!("POST /api/auth/signup - login: {}", request.login_id);

    let command = SignupCommand {
        login_id: request.login_id,
        password: request.password,
        name: request.name,
        team_name: request.team_name,
    };

    match state.account_service.signup(command).await {
        Ok(user_id) => Ok((StatusCode::CREATED, Json(session_for(&state, user_id)?))),
        Err(e) => {
            warn!("Signup failed: {}", e);
            Err(e)
        }
    }
}

/// Exchange credentials for a session token
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<SessionResponse>, LedgerError> {
    let Json(request) = payload?;
    info!("POST /api/auth/login - login: {}", request.login_id);

    let command = LoginCommand {
        login_id: request.login_id,
        password: request.password,
    };

    let user_id = state.account_service.login(command).await?;
    Ok(Json(session_for(&state, user_id)?))
}
