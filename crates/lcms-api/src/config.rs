use std::env;

/// Runtime environment the API is deployed in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub const fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    fn from_env() -> Self {
        match env::var("ENVIRONMENT").as_deref() {
            Ok("production") => Self::Production,
            _ => Self::Development,
        }
    }
}

/// API configuration loaded from environment variables.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Shared admin password checked at login. Required, no fallback.
    pub admin_password: String,
    /// Secret used to sign admin tokens. Required, no fallback.
    pub jwt_secret: String,
    /// Directory holding the JSON collection files.
    pub data_dir: String,
    /// TCP port the server binds to.
    pub port: u16,
    pub env: Environment,
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, env::VarError> {
        Ok(Self {
            admin_password: env::var("ADMIN_PASSWORD")?,
            jwt_secret: env::var("JWT_SECRET")?,
            data_dir: env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            env: Environment::from_env(),
        })
    }
}
