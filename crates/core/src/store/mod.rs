//! Document store adapter.
//!
//! The store is the only persistence the backend has. It is modelled as a trait so the HTTP
//! layer holds a single process-wide `Arc<dyn DocumentStore>` and tests can swap in doubles.
//!
//! Backends:
//! - [`FileStore`]: one JSON-lines file per collection under `<data_dir>/<database>/`
//! - [`MemoryStore`]: in-process vectors, used for development and tests

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::constants::ID_FIELD;
use crate::StoreResult;
use chrono::Utc;
use serde_json::Value;

/// A stored record: a JSON object keyed by field name.
pub type Document = serde_json::Map<String, Value>;

pub trait DocumentStore: Send + Sync {
    /// Insert `record` into `collection` and return its newly assigned identifier.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` if the collection name is invalid or the write fails.
    fn create_document(&self, collection: &str, record: Document) -> StoreResult<String>;

    /// Return at most `limit` documents from `collection` whose fields equal every entry in
    /// `filter`, in insertion order. A missing collection yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` if the collection name is invalid or the read fails.
    fn get_documents(
        &self,
        collection: &str,
        filter: &Document,
        limit: usize,
    ) -> StoreResult<Vec<Document>>;

    /// Names of collections holding at least one document, sorted.
    fn list_collections(&self) -> StoreResult<Vec<String>>;

    fn database_name(&self) -> &str;
}

/// Assign an identifier and timestamps to a record about to be inserted.
///
/// Any caller-supplied `_id` is overwritten; identifiers are always store-assigned.
pub(crate) fn prepare_document(mut record: Document) -> (String, Document) {
    let id = uuid::Uuid::new_v4().simple().to_string();
    let now = Value::String(Utc::now().to_rfc3339());
    record.insert(ID_FIELD.into(), Value::String(id.clone()));
    record.insert("created_at".into(), now.clone());
    record.insert("updated_at".into(), now);
    (id, record)
}

pub(crate) fn matches_filter(doc: &Document, filter: &Document) -> bool {
    filter.iter().all(|(key, expected)| doc.get(key) == Some(expected))
}

#[cfg(test)]
pub(crate) fn doc_from_json(value: Value) -> Document {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {other}"),
    }
}
