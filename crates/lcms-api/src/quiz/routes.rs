use axum::{
    Json, Router,
    extract::{Query, State},
    routing::{delete, get, post, put},
};
use lcms_store::StoreError;
use serde::Deserialize;
use serde_json::{Map, Value, json};

use super::model::{NewQuiz, check_quiz};
use crate::{ApiState, auth::AdminUser, error::ApiError, normalization};

/// Create the quiz routes
pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/quizzes", get(get_quizzes))
        .route("/quizzes", post(create_quiz))
        .route("/quizzes", put(update_quiz))
        .route("/quizzes", delete(delete_quiz))
}

/// Get all quizzes. Public; a missing or corrupt data file reads as empty.
async fn get_quizzes(State(state): State<ApiState>) -> Json<Value> {
    let quizzes = state.quizzes.list().await;
    Json(json!({ "quizzes": quizzes }))
}

/// Create a new quiz
async fn create_quiz(
    _admin: AdminUser,
    State(state): State<ApiState>,
    Json(payload): Json<NewQuiz>,
) -> Result<Json<Value>, ApiError> {
    payload.validate()?;

    let quiz = state
        .quizzes
        .create(payload.into_record())
        .await
        .map_err(|err| {
            tracing::error!(error = %err, "failed to create quiz");
            ApiError::Internal("Failed to create quiz".to_string())
        })?;

    tracing::info!(id = %quiz.id, "quiz created");
    Ok(Json(json!({ "success": true, "quiz": quiz })))
}

/// Update an existing quiz, matched by the id carried in the patch. The
/// merged record is held to the same rules as a freshly created one.
async fn update_quiz(
    _admin: AdminUser,
    State(state): State<ApiState>,
    Json(mut patch): Json<Map<String, Value>>,
) -> Result<Json<Value>, ApiError> {
    let id = patch
        .get("id")
        .and_then(Value::as_str)
        .map(str::to_owned)
        .ok_or_else(|| ApiError::Validation("id is required".to_string()))?;

    normalization::blank_refs_to_null(&mut patch, &["relatedTopicId"]);

    let result = state
        .quizzes
        .update_checked(&id, patch, |quiz| {
            check_quiz(&quiz.question, &quiz.correct_answer, &quiz.wrong_answers)
        })
        .await;

    match result {
        Ok(quiz) => Ok(Json(json!({ "success": true, "quiz": quiz }))),
        Err(StoreError::NotFound) => Err(ApiError::NotFound("Quiz not found".to_string())),
        Err(StoreError::Constraint(message)) => Err(ApiError::Validation(message)),
        Err(err) => {
            tracing::error!(error = %err, id, "failed to update quiz");
            Err(ApiError::Internal("Failed to update quiz".to_string()))
        }
    }
}

#[derive(Debug, Deserialize)]
struct DeleteQuery {
    id: String,
}

/// Delete a quiz by id. Succeeds even when nothing matched.
async fn delete_quiz(
    _admin: AdminUser,
    State(state): State<ApiState>,
    Query(query): Query<DeleteQuery>,
) -> Result<Json<Value>, ApiError> {
    state.quizzes.delete(&query.id).await.map_err(|err| {
        tracing::error!(error = %err, id = %query.id, "failed to delete quiz");
        ApiError::Internal("Failed to delete quiz".to_string())
    })?;

    Ok(Json(json!({ "success": true })))
}
