use axum::{
    Json, Router,
    extract::{Query, State},
    routing::{delete, get, post, put},
};
use lcms_store::StoreError;
use serde::Deserialize;
use serde_json::{Map, Value, json};

use super::model::{NewTopic, check_topic};
use crate::{ApiState, auth::AdminUser, error::ApiError, normalization};

/// Create the topic routes
pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/topics", get(get_topics))
        .route("/topics", post(create_topic))
        .route("/topics", put(update_topic))
        .route("/topics", delete(delete_topic))
}

/// Get all topics. Public; a missing or corrupt data file reads as empty.
async fn get_topics(State(state): State<ApiState>) -> Json<Value> {
    let topics = state.topics.list().await;
    Json(json!({ "topics": topics }))
}

/// Create a new topic
async fn create_topic(
    _admin: AdminUser,
    State(state): State<ApiState>,
    Json(payload): Json<NewTopic>,
) -> Result<Json<Value>, ApiError> {
    payload.validate()?;

    let topic = state
        .topics
        .create(payload.into_record())
        .await
        .map_err(|err| {
            tracing::error!(error = %err, "failed to create topic");
            ApiError::Internal("Failed to create topic".to_string())
        })?;

    tracing::info!(id = %topic.id, "topic created");
    Ok(Json(json!({ "success": true, "topic": topic })))
}

/// Update an existing topic. The patch must carry the target id; every other
/// key overwrites the stored field. The merged record is held to the same
/// rules as a freshly created one.
async fn update_topic(
    _admin: AdminUser,
    State(state): State<ApiState>,
    Json(mut patch): Json<Map<String, Value>>,
) -> Result<Json<Value>, ApiError> {
    let id = patch
        .get("id")
        .and_then(Value::as_str)
        .map(str::to_owned)
        .ok_or_else(|| ApiError::Validation("id is required".to_string()))?;

    normalization::blank_refs_to_null(&mut patch, &["parentTopicId", "parentTopicTitle"]);

    let result = state
        .topics
        .update_checked(&id, patch, |topic| {
            check_topic(&topic.title, &topic.category)
        })
        .await;

    match result {
        Ok(topic) => Ok(Json(json!({ "success": true, "topic": topic }))),
        Err(StoreError::NotFound) => Err(ApiError::NotFound("Topic not found".to_string())),
        Err(StoreError::Constraint(message)) => Err(ApiError::Validation(message)),
        Err(err) => {
            tracing::error!(error = %err, id, "failed to update topic");
            Err(ApiError::Internal("Failed to update topic".to_string()))
        }
    }
}

#[derive(Debug, Deserialize)]
struct DeleteQuery {
    id: String,
}

/// Delete a topic by id. Succeeds even when nothing matched.
async fn delete_topic(
    _admin: AdminUser,
    State(state): State<ApiState>,
    Query(query): Query<DeleteQuery>,
) -> Result<Json<Value>, ApiError> {
    state.topics.delete(&query.id).await.map_err(|err| {
        tracing::error!(error = %err, id = %query.id, "failed to delete topic");
        ApiError::Internal("Failed to delete topic".to_string())
    })?;

    Ok(Json(json!({ "success": true })))
}
