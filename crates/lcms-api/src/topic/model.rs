use chrono::Utc;
use lcms_store::{ContentBlock, Topic};
use serde::Deserialize;

use crate::error::ApiError;

/// Payload for creating a topic. The store assigns id and timestamps.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTopic {
    pub title: String,
    pub category: String,
    #[serde(default)]
    pub parent_topic_id: Option<String>,
    #[serde(default)]
    pub parent_topic_title: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub content: Vec<ContentBlock>,
}

/// Field rules shared by the create and update paths.
pub(crate) fn check_topic(title: &str, category: &str) -> Result<(), String> {
    if title.trim().is_empty() {
        return Err("Title cannot be empty".to_string());
    }
    if category.trim().is_empty() {
        return Err("Category cannot be empty".to_string());
    }
    Ok(())
}

impl NewTopic {
    pub fn validate(&self) -> Result<(), ApiError> {
        check_topic(&self.title, &self.category).map_err(ApiError::Validation)
    }

    /// Build the record to store. The admin form submits empty strings for
    /// "no parent"; normalize those to absent.
    pub fn into_record(self) -> Topic {
        let now = Utc::now();
        Topic {
            id: String::new(),
            title: self.title,
            category: self.category,
            parent_topic_id: self.parent_topic_id.filter(|s| !s.is_empty()),
            parent_topic_title: self.parent_topic_title.filter(|s| !s.is_empty()),
            keywords: self.keywords,
            content: self.content,
            created_at: now,
            updated_at: now,
        }
    }
}
