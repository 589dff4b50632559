//! # REST API for Lessons
//!
//! Recording a lesson and listing the caller's latest ones.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use shared::{CreateLessonRequest, Lesson, RecentLessonsResponse};
use tracing::{info, warn};

use crate::domain::commands::lessons::SubmitLessonCommand;
use crate::domain::{Caller, LedgerError};
use crate::io::rest::mappers::lesson_mapper::LessonMapper;
use crate::AppState;

/// Create a router for lesson related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_lesson))
        .route("/recent", get(recent_lessons))
}

#[derive(Debug, Deserialize)]
pub struct RecentLessonsQuery {
    pub limit: Option<u32>,
}

/// Record a lesson; 409 when the slot is already taken
pub async fn create_lesson(
    State(state): State<AppState>,
    caller: Caller,
    payload: Result<Json<CreateLessonRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Lesson>), LedgerError> {
    let Json(request) = payload?;
    info!("POST /api/lessons - request: {:?}", request);

    let command = SubmitLessonCommand {
        date: request.date,
        lesson_type: request.lesson_type,
        time_slot: request.time_slot,
    };

    match state.lesson_service.submit_lesson(&caller, command).await {
        Ok(lesson) => Ok((StatusCode::CREATED, Json(LessonMapper::to_dto(lesson)))),
        Err(e) => {
            warn!("Failed to record lesson: {}", e);
            Err(e)
        }
    }
}

pub async fn recent_lessons(
    State(state): State<AppState>,
    caller: Caller,
    query: Result<Query<RecentLessonsQuery>, QueryRejection>,
) -> Result<Json<RecentLessonsResponse>, LedgerError> {
    let Query(query) = query?;
    info!("GET /api/lessons/recent - limit: {:?}", query.limit);

    let lessons = state.lesson_service.recent_lessons(&caller, query.limit).await?;
    Ok(Json(RecentLessonsResponse {
        lessons: lessons.into_iter().map(LessonMapper::to_dto).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::rest::testing::{bearer, send, test_state};
    use axum::http::Method;
    use serde_json::json;
    use shared::{LessonType, TimeSlot};

    #[tokio::test]
    async fn test_create_lesson_and_duplicate_slot() {
        let state = test_state().await;
        let app = router().with_state(state.clone());
        let token = bearer(&state, "u1");
        let body = json!({"date": "2024-02-01", "type": "SKI", "time_slot": "AM"});

        let (status, created) = send(&app, Method::POST, "/", Some(&token), Some(body.clone())).await;
        assert_eq!(status, StatusCode::CREATED);
        let lesson: Lesson = serde_json::from_value(created).unwrap();
        assert_eq!(lesson.lesson_type, LessonType::Ski);
        assert_eq!(lesson.time_slot, TimeSlot::Am);
        assert_eq!(lesson.income, 0);

        let (status, error) = send(&app, Method::POST, "/", Some(&token), Some(body.clone())).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(error["error"], "a lesson is already registered for this date and time slot");

        // Same slot, different owner
        let (status, _) = send(&app, Method::POST, "/", Some(&bearer(&state, "u2")), Some(body)).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_unknown_lesson_type_is_bad_request() {
        let state = test_state().await;
        let app = router().with_state(state.clone());

        let (status, _) = send(
            &app,
            Method::POST,
            "/",
            Some(&bearer(&state, "u1")),
            Some(json!({"date": "2024-02-01", "type": "SLED", "time_slot": "AM"})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_missing_token_is_unauthorized() {
        let state = test_state().await;
        let app = router().with_state(state);

        let (status, _) = send(
            &app,
            Method::POST,
            "/",
            None,
            Some(json!({"date": "2024-02-01", "type": "SKI", "time_slot": "AM"})),
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_recent_lessons_respects_limit() {
        let state = test_state().await;
        let app = router().with_state(state.clone());
        let token = bearer(&state, "u1");
        for slot in ["AM", "PM", "NIGHT"] {
            send(
                &app,
                Method::POST,
                "/",
                Some(&token),
                Some(json!({"date": "2024-02-01", "type": "BOARD", "time_slot": slot})),
            )
            .await;
        }

        let (status, body) = send(&app, Method::GET, "/recent?limit=2", Some(&token), None).await;

        assert_eq!(status, StatusCode::OK);
        let recent: RecentLessonsResponse = serde_json::from_value(body).unwrap();
        assert_eq!(recent.lessons.len(), 2);
    }
}
