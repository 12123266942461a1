//! Comment submission pipeline: validate → persist → best-effort forward.

use crate::comment::{Comment, NewComment};
use crate::constants::{COMMENT_COLLECTION, MAX_LIST_LIMIT};
use crate::forwarder::{ForwardOutcome, SheetForwarder, SheetPayload};
use crate::store::{Document, DocumentStore};
use crate::InviteResult;
use std::sync::Arc;

/// Comment operations shared by every request handler.
///
/// Holds the process-wide store handle and the forwarder; cloning is cheap.
#[derive(Clone)]
pub struct CommentService {
    store: Arc<dyn DocumentStore>,
    forwarder: SheetForwarder,
}

/// Result of a submission. The comment is the response; the outcome is for logging only.
#[derive(Clone, Debug)]
pub struct Submission {
    pub comment: Comment,
    pub forward: ForwardOutcome,
}

impl CommentService {
    pub fn new(store: Arc<dyn DocumentStore>, forwarder: SheetForwarder) -> Self {
        Self { store, forwarder }
    }

    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }

    pub fn forwarder(&self) -> &SheetForwarder {
        &self.forwarder
    }

    /// Persist a validated comment and then make one forwarding attempt.
    ///
    /// The forward runs only after the store has accepted the record, and its outcome never
    /// turns a successful write into a failure.
    ///
    /// # Errors
    ///
    /// Returns `InviteError::Store` if the write fails; nothing is forwarded in that case.
    pub async fn submit(&self, comment: NewComment) -> InviteResult<Submission> {
        let id = self
            .store
            .create_document(COMMENT_COLLECTION, comment.to_document())?;

        let forward = self
            .forwarder
            .attempt_forward(&SheetPayload::from(&comment))
            .await;

        Ok(Submission {
            comment: comment.into_comment(id),
            forward,
        })
    }

    /// List up to `limit` comments in insertion order. `limit` is clamped to `1..=500`.
    ///
    /// # Errors
    ///
    /// Returns `InviteError::Store` if the read fails.
    pub fn list(&self, limit: usize) -> InviteResult<Vec<Comment>> {
        let docs =
            self.store
                .get_documents(COMMENT_COLLECTION, &Document::new(), clamp_limit(limit))?;
        Ok(docs.iter().map(Comment::from_document).collect())
    }
}

pub fn clamp_limit(limit: usize) -> usize {
    limit.clamp(1, MAX_LIST_LIMIT)
}
