//! Wire types for the REST surface.
//!
//! `CommentReq` is the single comment input schema. Every field is optional on the wire so
//! that a missing `name` or `message` is reported by domain validation in `invite-core`
//! rather than by the JSON extractor; type mismatches (e.g. `"name": 5`) are still rejected
//! during deserialisation.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Plain `{"message": ...}` payload used by the liveness endpoints.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MessageRes {
    pub message: String,
}

/// Comment submission body.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CommentReq {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub attending: Option<bool>,
    #[serde(default)]
    pub guests: Option<i64>,
    #[serde(default)]
    pub phone: Option<String>,
}

/// A stored comment as returned by the list and create endpoints.
///
/// Optional fields serialise as `null` when absent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CommentRes {
    pub id: String,
    pub name: String,
    pub message: String,
    pub attending: Option<bool>,
    pub guests: Option<i64>,
    pub phone: Option<String>,
}

/// Error body, `{"detail": "..."}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    pub detail: String,
}

/// Store reachability and configuration report served by `GET /test`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DiagnosticsRes {
    pub backend: String,
    pub database: String,
    pub database_name: Option<String>,
    pub connection_status: String,
    pub collections: Vec<String>,
    pub data_dir: String,
    pub database_name_env: String,
    pub apps_script_url: String,
}
