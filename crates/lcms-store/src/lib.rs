//! Flat-file record store for the learning CMS.
//!
//! One JSON document per entity collection, CRUD semantics with in-process
//! single-writer serialization per collection.

pub mod collection;
pub mod models;

pub use collection::{Collection, Record, StoreError};
pub use models::{ContentBlock, Difficulty, ParentTopic, Quiz, Topic};
