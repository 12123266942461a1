//! Input validation utilities.
//!
//! Names used to build on-disk paths (collections, databases) are restricted to a conservative
//! ASCII set so they cannot escape the data directory.

use crate::{StoreError, StoreResult};

const MAX_NAME_LEN: usize = 64;

fn is_safe_name(name: &str) -> bool {
    !name.is_empty()
        && name.len() <= MAX_NAME_LEN
        && name
            .bytes()
            .all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'z' | b'A'..=b'Z' | b'-' | b'_'))
}

/// Validates that a collection name is safe to use as a file stem.
///
/// # Errors
///
/// Returns `StoreError::InvalidCollection` if the name is empty, longer than 64 characters or
/// contains anything other than ASCII alphanumerics, `-` and `_`.
pub fn validate_collection_name(collection: &str) -> StoreResult<()> {
    if is_safe_name(collection) {
        Ok(())
    } else {
        Err(StoreError::InvalidCollection(collection.to_string()))
    }
}

/// Validates that a database name is safe to use as a directory name.
///
/// # Errors
///
/// Returns `StoreError::InvalidDatabaseName` under the same rules as collection names.
pub fn validate_database_name(database: &str) -> StoreResult<()> {
    if is_safe_name(database) {
        Ok(())
    } else {
        Err(StoreError::InvalidDatabaseName(database.to_string()))
    }
}
