//! Best-effort relay of guest submissions to a spreadsheet webhook.
//!
//! The webhook (typically a Google Apps Script web app) receives a JSON POST and appends a row.
//! Exactly one attempt is made per submission. Every outcome, including transport faults, is
//! returned as a [`ForwardOutcome`] value; nothing here ever returns an error to the caller.

use crate::comment::NewComment;
use crate::constants::{FORWARD_DETAIL_MAX_CHARS, FORWARD_TIMEOUT};
use crate::{InviteError, InviteResult};
use reqwest::StatusCode;
use serde::Serialize;
use std::time::Duration;

/// Row sent to the webhook. All five keys are always present; absent optionals are `null`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SheetPayload {
    pub name: String,
    pub message: String,
    pub attending: Option<bool>,
    pub guests: i64,
    pub phone: Option<String>,
}

impl From<&NewComment> for SheetPayload {
    fn from(c: &NewComment) -> Self {
        Self {
            name: c.name.clone(),
            message: c.message.clone(),
            attending: c.attending,
            guests: c.guests,
            phone: c.phone.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ForwardOutcome {
    /// No webhook URL configured.
    Skipped,
    /// Webhook answered 200 or 201.
    Delivered { status: u16, response: String },
    /// Webhook answered with any other status.
    Rejected { status: u16, response: String },
    /// Request never completed (timeout, DNS, connection refused, ...).
    Failed { reason: String },
}

impl ForwardOutcome {
    pub fn forwarded(&self) -> bool {
        matches!(self, ForwardOutcome::Delivered { .. })
    }
}

#[derive(Clone, Debug)]
pub struct SheetForwarder {
    client: reqwest::Client,
    url: Option<String>,
}

impl SheetForwarder {
    /// Build a forwarder with the standard 8 second timeout.
    ///
    /// # Errors
    ///
    /// Returns `InviteError::Config` if the HTTP client cannot be constructed.
    pub fn new(url: Option<String>) -> InviteResult<Self> {
        Self::with_timeout(url, FORWARD_TIMEOUT)
    }

    pub fn with_timeout(url: Option<String>, timeout: Duration) -> InviteResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| InviteError::Config(format!("failed to build HTTP client: {e}")))?;
        let url = url.filter(|u| !u.trim().is_empty());

        Ok(Self { client, url })
    }

    pub fn is_configured(&self) -> bool {
        self.url.is_some()
    }

    /// Make the single forwarding attempt for `payload`.
    pub async fn attempt_forward(&self, payload: &SheetPayload) -> ForwardOutcome {
        let Some(url) = self.url.as_deref() else {
            return ForwardOutcome::Skipped;
        };

        let resp = match self.client.post(url).json(payload).send().await {
            Ok(resp) => resp,
            Err(e) => {
                return ForwardOutcome::Failed {
                    reason: truncate(&e.to_string()),
                }
            }
        };

        let status = resp.status();
        let response = truncate(&resp.text().await.unwrap_or_default());

        if status == StatusCode::OK || status == StatusCode::CREATED {
            ForwardOutcome::Delivered {
                status: status.as_u16(),
                response,
            }
        } else {
            ForwardOutcome::Rejected {
                status: status.as_u16(),
                response,
            }
        }
    }
}

fn truncate(text: &str) -> String {
    text.chars().take(FORWARD_DETAIL_MAX_CHARS).collect()
}
