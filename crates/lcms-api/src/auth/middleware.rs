use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts},
};
use axum_extra::extract::CookieJar;

use super::jwt::{ADMIN_COOKIE, verify_admin_token};
use crate::{error::ApiError, state::AuthConfig};

/// Authenticated admin extractor.
///
/// Use this in route handlers to gate mutating operations. The credential is
/// taken from an `Authorization: Bearer` header or the admin cookie; either
/// must carry a valid admin token. The record store itself never checks
/// authorization, so it stays unit-testable without credential setup.
///
/// # Example
/// ```
/// use axum::extract::State;
/// use lcms_api::{ApiState, auth::AdminUser, error::ApiError};
///
/// async fn protected_route(
///     _admin: AdminUser,
///     State(state): State<ApiState>,
/// ) -> Result<(), ApiError> {
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct AdminUser;

impl<S> FromRequestParts<S> for AdminUser
where
    AuthConfig: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_config = AuthConfig::from_ref(state);

        let token = bearer_token(parts)
            .or_else(|| cookie_token(parts))
            .ok_or_else(|| ApiError::Auth("Unauthorized".to_string()))?;

        verify_admin_token(&token, &auth_config.jwt_secret)?;

        Ok(Self)
    }
}

fn bearer_token(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::to_owned)
}

fn cookie_token(parts: &Parts) -> Option<String> {
    let jar = CookieJar::from_headers(&parts.headers);
    jar.get(ADMIN_COOKIE).map(|c| c.value().to_owned())
}
