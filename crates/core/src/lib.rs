//! # Invite Core
//!
//! Core logic for the wedding invitation backend.
//!
//! This crate contains the comment pipeline and its collaborators:
//! - Comment schema validation (`comment`)
//! - Document store trait with file and in-memory backends (`store`)
//! - Best-effort spreadsheet webhook forwarding (`forwarder`)
//! - The submission/listing service tying them together (`service`)
//!
//! **No API concerns**: HTTP routing, status codes and OpenAPI belong in `api-rest`.

pub mod comment;
pub mod config;
pub mod constants;
pub mod error;
pub mod forwarder;
pub mod service;
pub mod store;
pub mod validation;

pub use api_shared::pb;

pub use comment::{Comment, NewComment};
pub use config::{AppConfig, StoreBackend};
pub use error::{InviteError, InviteResult, StoreError, StoreResult, ValidationError};
pub use forwarder::{ForwardOutcome, SheetForwarder, SheetPayload};
pub use service::{CommentService, Submission};
pub use store::{Document, DocumentStore, FileStore, MemoryStore};
