use axum::{Json, Router, extract::State, routing::post};
use axum_extra::extract::CookieJar;
use serde::Deserialize;
use serde_json::{Value, json};

use super::jwt;
use crate::{ApiState, error::ApiError};

pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
}

#[derive(Debug, Deserialize)]
struct LoginRequest {
    password: String,
}

/// Exchange the shared admin password for a signed admin token.
///
/// The token is returned as an HttpOnly cookie; clients that prefer headers
/// can read it from the response body and send it as a bearer token.
async fn login(
    State(state): State<ApiState>,
    jar: CookieJar,
    Json(payload): Json<LoginRequest>,
) -> Result<(CookieJar, Json<Value>), ApiError> {
    if payload.password != state.auth.admin_password {
        tracing::info!("admin login rejected");
        return Err(ApiError::Auth("Invalid password".to_string()));
    }

    let token = jwt::generate_admin_token(&state.auth.jwt_secret, state.auth.token_expiry_days)
        .map_err(|err| {
            tracing::error!(error = %err, "failed to sign admin token");
            ApiError::Internal("Login failed".to_string())
        })?;
    let cookie = jwt::create_admin_cookie(
        token.clone(),
        &state.environment,
        state.auth.token_expiry_days,
    );

    tracing::info!("admin login succeeded");
    Ok((
        jar.add(cookie),
        Json(json!({ "success": true, "token": token })),
    ))
}

async fn logout(State(state): State<ApiState>, jar: CookieJar) -> (CookieJar, Json<Value>) {
    let jar = jar.add(jwt::clear_admin_cookie(&state.environment));
    (jar, Json(json!({ "success": true })))
}
