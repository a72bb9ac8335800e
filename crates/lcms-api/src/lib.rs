//! HTTP API for the learning CMS: topics, quizzes, parent topics, and a
//! password-gated admin surface over the flat-file record store.

pub mod auth;
pub mod config;
pub mod error;
pub mod normalization;
pub mod parent_topic;
pub mod quiz;
pub mod router;
pub mod state;
pub mod topic;
pub mod tracing;

pub use config::ApiConfig;
pub use state::{ApiState, AuthConfig};
