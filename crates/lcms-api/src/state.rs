use axum::extract::FromRef;
use lcms_store::{Collection, ParentTopic, Quiz, Topic};

use crate::config::{ApiConfig, Environment};

/// Authorization settings consumed by the login route and the
/// [`AdminUser`](crate::auth::AdminUser) extractor.
#[derive(Clone, Debug)]
pub struct AuthConfig {
    pub admin_password: String,
    pub jwt_secret: String,
    /// Lifetime of issued admin tokens, in days.
    pub token_expiry_days: i64,
}

/// Shared application state: one collection handle per entity type plus
/// the auth settings.
#[derive(Clone, Debug)]
pub struct ApiState {
    pub topics: Collection<Topic>,
    pub quizzes: Collection<Quiz>,
    pub parent_topics: Collection<ParentTopic>,
    pub auth: AuthConfig,
    pub environment: Environment,
}

impl ApiState {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            topics: Collection::new(&config.data_dir, "topics.json"),
            quizzes: Collection::new(&config.data_dir, "quizzes.json"),
            parent_topics: Collection::new(&config.data_dir, "parent-topics.json"),
            auth: AuthConfig {
                admin_password: config.admin_password,
                jwt_secret: config.jwt_secret,
                token_expiry_days: 7,
            },
            environment: config.env,
        }
    }
}

impl FromRef<ApiState> for AuthConfig {
    fn from_ref(state: &ApiState) -> Self {
        state.auth.clone()
    }
}
