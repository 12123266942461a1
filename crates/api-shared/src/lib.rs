//! # API Shared
//!
//! Shared wire definitions for the wedding invitation APIs.
//!
//! Contains:
//! - Request/response types (`pb` module) with OpenAPI schemas
//! - Shared services like `HealthService`
//!
//! Used by `invite-core` and `api-rest` so the transport shape is defined once.

pub mod pb;

pub mod health;

pub use health::HealthService;
pub use pb::*;
