use super::{matches_filter, prepare_document, Document, DocumentStore};
use crate::constants::DEFAULT_DATABASE_NAME;
use crate::validation::validate_collection_name;
use crate::{StoreError, StoreResult};
use std::collections::BTreeMap;
use std::sync::Mutex;

/// In-process document store. Contents are lost when the process exits.
#[derive(Debug)]
pub struct MemoryStore {
    database: String,
    collections: Mutex<BTreeMap<String, Vec<Document>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_database(DEFAULT_DATABASE_NAME)
    }

    pub fn with_database(database: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            collections: Mutex::new(BTreeMap::new()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentStore for MemoryStore {
    fn create_document(&self, collection: &str, record: Document) -> StoreResult<String> {
        validate_collection_name(collection)?;
        let (id, record) = prepare_document(record);

        let mut collections = self
            .collections
            .lock()
            .map_err(|_| StoreError::LockPoisoned)?;
        collections
            .entry(collection.to_string())
            .or_default()
            .push(record);

        Ok(id)
    }

    fn get_documents(
        &self,
        collection: &str,
        filter: &Document,
        limit: usize,
    ) -> StoreResult<Vec<Document>> {
        validate_collection_name(collection)?;
        let collections = self
            .collections
            .lock()
            .map_err(|_| StoreError::LockPoisoned)?;

        Ok(collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .filter(|d| matches_filter(d, filter))
                    .take(limit)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    fn list_collections(&self) -> StoreResult<Vec<String>> {
        let collections = self
            .collections
            .lock()
            .map_err(|_| StoreError::LockPoisoned)?;
        Ok(collections
            .iter()
            .filter(|(_, docs)| !docs.is_empty())
            .map(|(name, _)| name.clone())
            .collect())
    }

    fn database_name(&self) -> &str {
        &self.database
    }
}
