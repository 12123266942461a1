//! JSON-lines document store.
//!
//! Layout:
//!
//! ```text
//! <data_dir>/
//! └── <database>/
//!     ├── comment.jsonl     # one JSON object per line, insertion order
//!     └── <collection>.jsonl
//! ```
//!
//! Appends are serialised through a mutex so concurrent requests never interleave partial
//! lines. Reads do not take the lock; a line that fails to parse (for example a torn write
//! after a crash) is logged and skipped.

use super::{matches_filter, prepare_document, Document, DocumentStore};
use crate::constants::COLLECTION_FILE_EXTENSION;
use crate::validation::{validate_collection_name, validate_database_name};
use crate::{StoreError, StoreResult};
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

#[derive(Debug)]
pub struct FileStore {
    database: String,
    database_dir: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Open (creating if needed) the database directory `<data_dir>/<database>`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InvalidDatabaseName` for unsafe names and
    /// `StoreError::StoreDirCreation` if the directory cannot be created.
    pub fn open(data_dir: &Path, database: &str) -> StoreResult<Self> {
        validate_database_name(database)?;
        let database_dir = data_dir.join(database);
        fs::create_dir_all(&database_dir).map_err(StoreError::StoreDirCreation)?;

        Ok(Self {
            database: database.to_string(),
            database_dir,
            write_lock: Mutex::new(()),
        })
    }

    pub fn database_dir(&self) -> &Path {
        &self.database_dir
    }

    fn collection_path(&self, collection: &str) -> PathBuf {
        self.database_dir
            .join(format!("{collection}.{COLLECTION_FILE_EXTENSION}"))
    }
}

impl DocumentStore for FileStore {
    fn create_document(&self, collection: &str, record: Document) -> StoreResult<String> {
        validate_collection_name(collection)?;
        let (id, record) = prepare_document(record);

        let mut line = serde_json::to_string(&record).map_err(StoreError::Serialization)?;
        line.push('\n');

        let _guard = self.write_lock.lock().map_err(|_| StoreError::LockPoisoned)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.collection_path(collection))
            .map_err(StoreError::FileWrite)?;
        file.write_all(line.as_bytes())
            .map_err(StoreError::FileWrite)?;
        file.flush().map_err(StoreError::FileWrite)?;

        tracing::debug!("stored document {} in {}", id, collection);
        Ok(id)
    }

    fn get_documents(
        &self,
        collection: &str,
        filter: &Document,
        limit: usize,
    ) -> StoreResult<Vec<Document>> {
        validate_collection_name(collection)?;
        let path = self.collection_path(collection);

        let file = match File::open(&path) {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::FileRead(e)),
        };

        let mut docs = Vec::new();
        for (index, line) in BufReader::new(file).lines().enumerate() {
            if docs.len() >= limit {
                break;
            }
            let line = line.map_err(StoreError::FileRead)?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<Document>(&line) {
                Ok(doc) if matches_filter(&doc, filter) => docs.push(doc),
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!(
                        "skipping unreadable line {} in {}: {}",
                        index + 1,
                        path.display(),
                        e
                    );
                }
            }
        }

        Ok(docs)
    }

    fn list_collections(&self) -> StoreResult<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.database_dir).map_err(StoreError::FileRead)? {
            let path = entry.map_err(StoreError::FileRead)?.path();
            if !path.is_file()
                || path.extension().and_then(|e| e.to_str()) != Some(COLLECTION_FILE_EXTENSION)
            {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    fn database_name(&self) -> &str {
        &self.database
    }
}
