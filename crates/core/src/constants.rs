//! Constants used throughout the invite core crate.
//!
//! Collection names, defaults and limits live here so the HTTP layer, the store backends and
//! the forwarder agree on them.

use std::time::Duration;

/// Collection holding guest comments.
pub const COMMENT_COLLECTION: &str = "comment";

/// Default directory for the file-backed document store.
pub const DEFAULT_DATA_DIR: &str = "invite_data";

/// Default database name when none is configured.
pub const DEFAULT_DATABASE_NAME: &str = "wedding";

/// Default listening port.
pub const DEFAULT_PORT: u16 = 8000;

/// Default page size for `GET /api/comments`.
pub const DEFAULT_LIST_LIMIT: usize = 50;

/// Upper bound applied to the `limit` query parameter.
pub const MAX_LIST_LIMIT: usize = 500;

/// Guest count recorded when a submission leaves it unspecified.
pub const DEFAULT_GUESTS: i64 = 1;

/// Timeout for the single spreadsheet webhook attempt.
pub const FORWARD_TIMEOUT: Duration = Duration::from_secs(8);

/// Maximum characters kept from a webhook response body or failure reason.
pub const FORWARD_DETAIL_MAX_CHARS: usize = 200;

/// File extension for per-collection JSON-lines files.
pub const COLLECTION_FILE_EXTENSION: &str = "jsonl";

/// Field name carrying the store-assigned document identifier.
pub const ID_FIELD: &str = "_id";
