//! Entity records persisted by the collection store.
//!
//! All records serialize with camelCase field names to match the JSON
//! documents on disk and the wire format of the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::collection::Record;

/// One block of topic content, either prose or a code sample.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum ContentBlock {
    Text(String),
    Code(String),
}

/// A browsable learning topic.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    pub id: String,
    pub title: String,
    /// Category id, defined externally. Dangling values are tolerated.
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_topic_id: Option<String>,
    /// Denormalized copy of the parent topic title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_topic_title: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub content: Vec<ContentBlock>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Record for Topic {
    const COLLECTION: &'static str = "topics";
    const ID_PREFIX: &'static str = "topic";

    fn id(&self) -> &str {
        &self.id
    }

    fn assign_id(&mut self, id: String) {
        self.id = id;
    }

    fn stamp_created(&mut self, now: DateTime<Utc>) {
        self.created_at = now;
        self.updated_at = now;
    }

    fn stamp_updated(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}

/// Quiz difficulty levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// A multiple-choice quiz question.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    pub id: String,
    pub question: String,
    pub correct_answer: String,
    /// Exactly three distractors, each distinct from the correct answer.
    /// Enforced at the API boundary, not by the store.
    pub wrong_answers: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_topic_id: Option<String>,
    pub difficulty: Difficulty,
    pub created_at: DateTime<Utc>,
    /// Absent until the quiz is first updated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Record for Quiz {
    const COLLECTION: &'static str = "quizzes";
    const ID_PREFIX: &'static str = "quiz";

    fn id(&self) -> &str {
        &self.id
    }

    fn assign_id(&mut self, id: String) {
        self.id = id;
    }

    fn stamp_created(&mut self, now: DateTime<Utc>) {
        self.created_at = now;
        self.updated_at = None;
    }

    fn stamp_updated(&mut self, now: DateTime<Utc>) {
        self.updated_at = Some(now);
    }
}

/// A grouping topic that child topics can reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParentTopic {
    pub id: String,
    pub title: String,
    pub category: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl Record for ParentTopic {
    const COLLECTION: &'static str = "parentTopics";
    const ID_PREFIX: &'static str = "parent";

    fn id(&self) -> &str {
        &self.id
    }

    fn assign_id(&mut self, id: String) {
        self.id = id;
    }

    fn stamp_created(&mut self, now: DateTime<Utc>) {
        self.created_at = now;
    }

    // Parent topics carry no updatedAt field.
    fn stamp_updated(&mut self, _now: DateTime<Utc>) {}
}
