use chrono::Utc;
use lcms_store::ParentTopic;
use serde::Deserialize;

use crate::error::ApiError;

/// Payload for creating a parent topic.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewParentTopic {
    pub title: String,
    pub category: String,
    pub description: String,
}

/// Field rules shared by the create and update paths.
pub(crate) fn check_parent_topic(
    title: &str,
    category: &str,
    description: &str,
) -> Result<(), String> {
    if title.trim().is_empty() {
        return Err("Title cannot be empty".to_string());
    }
    if category.trim().is_empty() {
        return Err("Category cannot be empty".to_string());
    }
    if description.trim().is_empty() {
        return Err("Description cannot be empty".to_string());
    }
    Ok(())
}

impl NewParentTopic {
    pub fn validate(&self) -> Result<(), ApiError> {
        check_parent_topic(&self.title, &self.category, &self.description)
            .map_err(ApiError::Validation)
    }

    pub fn into_record(self) -> ParentTopic {
        ParentTopic {
            id: String::new(),
            title: self.title,
            category: self.category,
            description: self.description,
            created_at: Utc::now(),
        }
    }
}
