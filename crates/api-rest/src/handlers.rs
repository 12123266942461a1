use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::error::ApiError;
use crate::AppState;
use api_shared::pb;
use api_shared::HealthService;
use invite_core::{constants::DEFAULT_LIST_LIMIT, ForwardOutcome, NewComment};

const DIAGNOSTIC_ERROR_MAX_CHARS: usize = 50;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    /// Maximum number of comments to return (default 50, clamped to 1..=500).
    pub limit: Option<usize>,
}

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Liveness message", body = pb::MessageRes)
    )
)]
#[axum::debug_handler]
pub async fn root() -> Json<pb::MessageRes> {
    Json(HealthService::root())
}

#[utoipa::path(
    get,
    path = "/api/hello",
    responses(
        (status = 200, description = "Liveness message", body = pb::MessageRes)
    )
)]
#[axum::debug_handler]
pub async fn hello() -> Json<pb::MessageRes> {
    Json(HealthService::hello())
}

#[utoipa::path(
    get,
    path = "/test",
    responses(
        (status = 200, description = "Store reachability report", body = pb::DiagnosticsRes)
    )
)]
/// Report store reachability and which settings are configured.
///
/// Always answers 200; store problems are described in the `database` field.
#[axum::debug_handler]
pub async fn diagnostics(State(state): State<AppState>) -> Json<pb::DiagnosticsRes> {
    let store = state.comments.store();

    let (database, connection_status, collections) = match store.list_collections() {
        Ok(names) => (
            "Connected & Working".to_string(),
            "Connected".to_string(),
            names.into_iter().take(10).collect(),
        ),
        Err(e) => {
            let detail: String = e.to_string().chars().take(DIAGNOSTIC_ERROR_MAX_CHARS).collect();
            (
                format!("Connected but Error: {detail}"),
                "Error".to_string(),
                Vec::new(),
            )
        }
    };

    Json(pb::DiagnosticsRes {
        backend: "Running".into(),
        database,
        database_name: Some(store.database_name().to_string()),
        connection_status,
        collections,
        data_dir: set_flag(state.config.data_dir_set()),
        database_name_env: set_flag(state.config.database_name_set()),
        apps_script_url: set_flag(state.comments.forwarder().is_configured()),
    })
}

fn set_flag(set: bool) -> String {
    let flag = if set { "Set" } else { "Not Set" };
    flag.to_string()
}

#[utoipa::path(
    get,
    path = "/api/comments",
    params(ListParams),
    responses(
        (status = 200, description = "Comments in submission order", body = [pb::CommentRes]),
        (status = 400, description = "Invalid limit", body = pb::ErrorRes),
        (status = 500, description = "Store error", body = pb::ErrorRes)
    )
)]
/// List guest comments
///
/// # Errors
/// Returns `400 Bad Request` if `limit` is not a non-negative integer.
///
/// Returns `500 Internal Server Error` with the store error text if the read fails.
#[axum::debug_handler]
pub async fn list_comments(
    State(state): State<AppState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<Vec<pb::CommentRes>>, ApiError> {
    let Query(params) = params?;
    let comments = state
        .comments
        .list(params.limit.unwrap_or(DEFAULT_LIST_LIMIT))?;
    Ok(Json(comments.into_iter().map(pb::CommentRes::from).collect()))
}

#[utoipa::path(
    post,
    path = "/api/comments",
    request_body = pb::CommentReq,
    responses(
        (status = 201, description = "Comment stored", body = pb::CommentRes),
        (status = 400, description = "Invalid submission", body = pb::ErrorRes),
        (status = 500, description = "Store error", body = pb::ErrorRes)
    )
)]
/// Submit a guest comment / RSVP
///
/// Validates the body, stores it, then makes one attempt to forward it to the spreadsheet
/// webhook. The forward outcome is logged and never changes the response.
///
/// # Errors
/// Returns `400 Bad Request` if:
/// - the body is not valid JSON or a field has the wrong type,
/// - `name` is missing or blank, or `message` is missing.
///
/// Returns `500 Internal Server Error` if the store write fails.
#[axum::debug_handler]
pub async fn create_comment(
    State(state): State<AppState>,
    payload: Result<Json<pb::CommentReq>, JsonRejection>,
) -> Result<(StatusCode, Json<pb::CommentRes>), ApiError> {
    let Json(req) = payload?;
    let comment = NewComment::try_from(req).map_err(invite_core::InviteError::from)?;

    let submission = state.comments.submit(comment).await?;
    let id = &submission.comment.id;

    match &submission.forward {
        ForwardOutcome::Skipped => {
            tracing::debug!("no spreadsheet webhook configured, comment {} not forwarded", id)
        }
        ForwardOutcome::Delivered { status, .. } => {
            tracing::info!("forwarded comment {} to spreadsheet ({})", id, status)
        }
        ForwardOutcome::Rejected { status, response } => {
            tracing::warn!(
                "spreadsheet webhook rejected comment {}: {} {}",
                id,
                status,
                response
            )
        }
        ForwardOutcome::Failed { reason } => {
            tracing::warn!("failed to forward comment {}: {}", id, reason)
        }
    }

    Ok((
        StatusCode::CREATED,
        Json(pb::CommentRes::from(submission.comment)),
    ))
}
