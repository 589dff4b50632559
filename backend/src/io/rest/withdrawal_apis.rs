//! # REST API for Withdrawals

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use shared::{CreateWithdrawalRequest, Withdrawal};
use tracing::{info, warn};

use crate::domain::commands::withdrawals::SubmitWithdrawalCommand;
use crate::domain::{Caller, LedgerError};
use crate::io::rest::mappers::withdrawal_mapper::WithdrawalMapper;
use crate::AppState;

/// Create a router for withdrawal related APIs
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(create_withdrawal))
}

pub async fn create_withdrawal(
    State(state): State<AppState>,
    caller: Caller,
    payload: Result<Json<CreateWithdrawalRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Withdrawal>), LedgerError> {
    let Json(request) = payload?;
    info!("POST /api/withdrawals - request: {:?}", request);

    let command = SubmitWithdrawalCommand {
        date: request.date,
        amount: request.amount,
        memo: request.memo,
    };

    match state.withdrawal_service.submit_withdrawal(&caller, command).await {
        Ok(withdrawal) => Ok((StatusCode::CREATED, Json(WithdrawalMapper::to_dto(withdrawal)))),
        Err(e) => {
            warn!("Failed to record withdrawal: {}", e);
            Err(e)
        }
    }
}
