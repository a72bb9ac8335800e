//! JSON-file-backed record collections.
//!
//! Each entity type is persisted as one JSON document holding a single
//! top-level array field named after the collection, e.g.
//! `{ "topics": [...] }`. Every operation is a full read-modify-write of
//! that document. A per-collection async mutex serializes the cycle so
//! concurrent in-process mutations cannot lose updates; cross-process
//! writers are out of scope.

use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};
use thiserror::Error;
use tokio::fs;
use tokio::sync::Mutex;
use uuid::Uuid;

/// Errors surfaced by mutating collection operations.
///
/// Read failures are never surfaced: a missing or malformed document is
/// treated as an empty collection.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No record with the requested id exists.
    #[error("record not found")]
    NotFound,
    /// A patch merge produced a record that no longer matches the schema.
    #[error("invalid record data: {0}")]
    InvalidRecord(#[from] serde_json::Error),
    /// The merged record was rejected by a caller-supplied check.
    #[error("{0}")]
    Constraint(String),
    /// The document could not be written back to disk.
    #[error("failed to write collection: {0}")]
    Write(#[from] std::io::Error),
}

/// A persisted entity type.
///
/// Implementors declare the collection field name in the JSON document,
/// the prefix of generated ids, and how creation/update timestamps are
/// stamped onto the record.
pub trait Record: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Top-level array field name in the JSON document, e.g. `"topics"`.
    const COLLECTION: &'static str;
    /// Prefix of generated ids, e.g. `"topic"` for `topic-<uuid>`.
    const ID_PREFIX: &'static str;

    fn id(&self) -> &str;
    fn assign_id(&mut self, id: String);
    fn stamp_created(&mut self, now: DateTime<Utc>);
    fn stamp_updated(&mut self, now: DateTime<Utc>);
}

/// Handle to one JSON-file-backed collection.
///
/// Cheap to clone; clones share the mutation lock.
#[derive(Debug)]
pub struct Collection<T> {
    path: PathBuf,
    lock: Arc<Mutex<()>>,
    _record: PhantomData<fn() -> T>,
}

impl<T> Clone for Collection<T> {
    fn clone(&self) -> Self {
        Self {
            path: self.path.clone(),
            lock: Arc::clone(&self.lock),
            _record: PhantomData,
        }
    }
}

impl<T: Record> Collection<T> {
    /// Create a handle for the collection persisted at `dir/file_name`.
    ///
    /// The file does not need to exist; it is created on first write.
    pub fn new(dir: impl AsRef<Path>, file_name: &str) -> Self {
        Self {
            path: dir.as_ref().join(file_name),
            lock: Arc::new(Mutex::new(())),
            _record: PhantomData,
        }
    }

    /// Path of the backing JSON document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Return all records in insertion order.
    ///
    /// A missing file, unreadable file, or malformed document yields an
    /// empty collection; callers cannot distinguish "file missing" from
    /// "collection empty".
    pub async fn list(&self) -> Vec<T> {
        let _guard = self.lock.lock().await;
        self.read_records().await
    }

    /// Append a new record, assigning it a fresh id and creation timestamp.
    ///
    /// Returns the record as stored. Field validation is a caller contract;
    /// the store only guarantees id uniqueness within the collection.
    pub async fn create(&self, mut record: T) -> Result<T, StoreError> {
        let _guard = self.lock.lock().await;
        let mut records = self.read_records().await;

        // Uuids make collisions vanishingly unlikely, but uniqueness is the
        // invariant the rest of the store leans on, so check anyway.
        let mut id = fresh_id::<T>();
        while records.iter().any(|r| r.id() == id) {
            id = fresh_id::<T>();
        }

        record.assign_id(id);
        record.stamp_created(Utc::now());
        records.push(record.clone());
        self.write_records(&records).await?;
        Ok(record)
    }

    /// Merge `patch` over the first record whose id matches, refreshing its
    /// update timestamp.
    ///
    /// Patch keys win on conflict, except `id`, which is immutable and
    /// ignored. Returns [`StoreError::NotFound`] without writing when no
    /// record matches.
    pub async fn update(&self, id: &str, patch: Map<String, Value>) -> Result<T, StoreError> {
        self.update_checked(id, patch, |_| Ok(())).await
    }

    /// Like [`Self::update`], but runs `check` on the merged record and
    /// aborts with [`StoreError::Constraint`] before writing when it fails.
    ///
    /// The store imposes no rules of its own; `check` is how the boundary
    /// applies its validation to the merge result while still holding the
    /// collection lock.
    pub async fn update_checked<F>(
        &self,
        id: &str,
        patch: Map<String, Value>,
        check: F,
    ) -> Result<T, StoreError>
    where
        F: FnOnce(&T) -> Result<(), String>,
    {
        let _guard = self.lock.lock().await;
        let mut records = self.read_records().await;

        let pos = records
            .iter()
            .position(|r| r.id() == id)
            .ok_or(StoreError::NotFound)?;

        let mut merged = match serde_json::to_value(&records[pos])? {
            Value::Object(fields) => fields,
            _ => Map::new(),
        };
        for (key, value) in patch {
            if key != "id" {
                merged.insert(key, value);
            }
        }

        let mut record: T = serde_json::from_value(Value::Object(merged))?;
        record.stamp_updated(Utc::now());
        check(&record).map_err(StoreError::Constraint)?;
        records[pos] = record.clone();
        self.write_records(&records).await?;
        Ok(record)
    }

    /// Remove every record whose id matches, then write back.
    ///
    /// Deleting an absent id is a successful no-op. With id uniqueness
    /// enforced at create time, "every record" is at most one.
    pub async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        let mut records = self.read_records().await;
        records.retain(|r| r.id() != id);
        self.write_records(&records).await?;
        Ok(())
    }

    async fn read_records(&self) -> Vec<T> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) => {
                tracing::debug!(
                    path = %self.path.display(),
                    error = %err,
                    "collection file unreadable, treating as empty"
                );
                return Vec::new();
            }
        };

        let document: Value = match serde_json::from_slice(&bytes) {
            Ok(document) => document,
            Err(err) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %err,
                    "malformed collection document, treating as empty"
                );
                return Vec::new();
            }
        };

        document
            .get(T::COLLECTION)
            .cloned()
            .and_then(|records| serde_json::from_value(records).ok())
            .unwrap_or_default()
    }

    async fn write_records(&self, records: &[T]) -> Result<(), StoreError> {
        let document = json!({ T::COLLECTION: records });
        let bytes = serde_json::to_vec_pretty(&document)?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(&self.path, bytes).await?;
        Ok(())
    }
}

fn fresh_id<T: Record>() -> String {
    format!("{}-{}", T::ID_PREFIX, Uuid::new_v4().simple())
}
