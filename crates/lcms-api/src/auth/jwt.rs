use axum_extra::extract::cookie::{Cookie, SameSite};
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::{config::Environment, error::ApiError};

/// Cookie carrying the admin token between requests.
pub const ADMIN_COOKIE: &str = "admin_token";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Claims {
    pub admin: bool,
    pub iat: usize,
    pub exp: usize,
}

/// Generate a signed admin token.
///
/// Signing failure is an internal problem, not an authorization outcome;
/// the caller decides how to surface the raw error.
pub fn generate_admin_token(
    jwt_secret: &str,
    expiry_days: i64,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = Utc::now();
    let claims = Claims {
        admin: true,
        iat: now.timestamp() as usize,
        exp: (now + chrono::Duration::days(expiry_days)).timestamp() as usize,
    };

    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_secret.as_bytes()),
    )
}

/// Verify an admin token and return its claims.
///
/// Rejects expired or tampered tokens, and tokens without the admin claim.
pub fn verify_admin_token(token: &str, jwt_secret: &str) -> Result<Claims, ApiError> {
    let token_data = jsonwebtoken::decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| ApiError::Auth("Unauthorized".to_string()))?;

    if !token_data.claims.admin {
        return Err(ApiError::Auth("Unauthorized".to_string()));
    }

    Ok(token_data.claims)
}

/// Create the admin auth cookie.
///
/// Cookies are secure (HTTPS-only) by default in production.
/// In development mode, cookies can be used over HTTP.
pub fn create_admin_cookie(
    token: String,
    environment: &Environment,
    expiry_days: i64,
) -> Cookie<'static> {
    let is_development = environment.is_development();

    Cookie::build((ADMIN_COOKIE, token))
        .path("/")
        .max_age(time::Duration::days(expiry_days))
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(!is_development)
        .build()
}

/// Create an expired admin cookie that clears the credential on the client.
pub fn clear_admin_cookie(environment: &Environment) -> Cookie<'static> {
    let is_development = environment.is_development();

    Cookie::build((ADMIN_COOKIE, ""))
        .path("/")
        .max_age(time::Duration::ZERO)
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(!is_development)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test_jwt_secret_minimum_32_characters_long";

    #[test]
    fn test_generate_and_verify_admin_token() {
        let token = generate_admin_token(SECRET, 7).expect("Failed to generate token");
        assert!(!token.is_empty(), "Token should not be empty");

        let claims = verify_admin_token(&token, SECRET).expect("Failed to verify token");
        assert!(claims.admin);
        assert!(
            claims.exp > claims.iat,
            "Expiration should be after issued at"
        );
    }

    #[test]
    fn test_verify_admin_token_with_wrong_secret() {
        let token = generate_admin_token(SECRET, 7).expect("Failed to generate token");

        let result = verify_admin_token(&token, "wrong_jwt_secret_minimum_32_characters");
        assert!(
            result.is_err(),
            "Verification should fail with wrong secret"
        );
    }

    #[test]
    fn test_verify_garbage_token() {
        let result = verify_admin_token("invalid.jwt.token", SECRET);
        assert!(
            result.is_err(),
            "Verification should fail for invalid token"
        );
    }

    #[test]
    fn test_admin_token_expiry_is_seven_days() {
        let token = generate_admin_token(SECRET, 7).expect("Failed to generate token");
        let claims = verify_admin_token(&token, SECRET).expect("Failed to verify token");

        let expiration_duration = claims.exp - claims.iat;
        let seven_days = 7 * 24 * 60 * 60;
        assert!(
            expiration_duration >= seven_days - 10 && expiration_duration <= seven_days + 10,
            "Token should expire in approximately 7 days, got {} seconds",
            expiration_duration
        );
    }

    #[test]
    fn test_create_admin_cookie_development() {
        let cookie = create_admin_cookie("token".to_string(), &Environment::Development, 7);

        assert_eq!(cookie.name(), ADMIN_COOKIE);
        assert_eq!(cookie.value(), "token");
        assert_eq!(cookie.path(), Some("/"));
        assert!(cookie.http_only().unwrap_or(false));
        assert!(
            !cookie.secure().unwrap_or(true),
            "Should not be secure in development"
        );
    }

    #[test]
    fn test_create_admin_cookie_production() {
        let cookie = create_admin_cookie("token".to_string(), &Environment::Production, 7);

        assert!(
            cookie.secure().unwrap_or(false),
            "Should be secure in production"
        );
    }

    #[test]
    fn test_clear_admin_cookie_expires_immediately() {
        let cookie = clear_admin_cookie(&Environment::Development);

        assert_eq!(cookie.name(), ADMIN_COOKIE);
        assert!(cookie.value().is_empty());
        assert_eq!(cookie.max_age(), Some(time::Duration::ZERO));
    }
}
