use axum::{
    Json, Router,
    extract::{Query, State},
    routing::{delete, get, post, put},
};
use lcms_store::StoreError;
use serde::Deserialize;
use serde_json::{Map, Value, json};

use super::model::{NewParentTopic, check_parent_topic};
use crate::{ApiState, auth::AdminUser, error::ApiError};

/// Create the parent-topic routes
pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/parent-topics", get(get_parent_topics))
        .route("/parent-topics", post(create_parent_topic))
        .route("/parent-topics", put(update_parent_topic))
        .route("/parent-topics", delete(delete_parent_topic))
}

/// Get all parent topics. Public; a missing or corrupt data file reads as empty.
async fn get_parent_topics(State(state): State<ApiState>) -> Json<Value> {
    let parent_topics = state.parent_topics.list().await;
    Json(json!({ "parentTopics": parent_topics }))
}

/// Create a new parent topic
async fn create_parent_topic(
    _admin: AdminUser,
    State(state): State<ApiState>,
    Json(payload): Json<NewParentTopic>,
) -> Result<Json<Value>, ApiError> {
    payload.validate()?;

    let parent_topic = state
        .parent_topics
        .create(payload.into_record())
        .await
        .map_err(|err| {
            tracing::error!(error = %err, "failed to create parent topic");
            ApiError::Internal("Failed to create parent topic".to_string())
        })?;

    tracing::info!(id = %parent_topic.id, "parent topic created");
    Ok(Json(json!({ "success": true, "parentTopic": parent_topic })))
}

/// Update an existing parent topic, matched by the id carried in the patch.
/// The merged record is held to the same rules as a freshly created one.
async fn update_parent_topic(
    _admin: AdminUser,
    State(state): State<ApiState>,
    Json(patch): Json<Map<String, Value>>,
) -> Result<Json<Value>, ApiError> {
    let id = patch
        .get("id")
        .and_then(Value::as_str)
        .map(str::to_owned)
        .ok_or_else(|| ApiError::Validation("id is required".to_string()))?;

    let result = state
        .parent_topics
        .update_checked(&id, patch, |parent| {
            check_parent_topic(&parent.title, &parent.category, &parent.description)
        })
        .await;

    match result {
        Ok(parent_topic) => Ok(Json(
            json!({ "success": true, "parentTopic": parent_topic }),
        )),
        Err(StoreError::NotFound) => Err(ApiError::NotFound("Parent topic not found".to_string())),
        Err(StoreError::Constraint(message)) => Err(ApiError::Validation(message)),
        Err(err) => {
            tracing::error!(error = %err, id, "failed to update parent topic");
            Err(ApiError::Internal(
                "Failed to update parent topic".to_string(),
            ))
        }
    }
}

#[derive(Debug, Deserialize)]
struct DeleteQuery {
    id: String,
}

/// Delete a parent topic by id. Succeeds even when nothing matched.
/// Child topics keep their reference; consumers resolve dangling parents
/// as "none".
async fn delete_parent_topic(
    _admin: AdminUser,
    State(state): State<ApiState>,
    Query(query): Query<DeleteQuery>,
) -> Result<Json<Value>, ApiError> {
    state.parent_topics.delete(&query.id).await.map_err(|err| {
        tracing::error!(error = %err, id = %query.id, "failed to delete parent topic");
        ApiError::Internal("Failed to delete parent topic".to_string())
    })?;

    Ok(Json(json!({ "success": true })))
}
