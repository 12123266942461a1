//! Guest comment (RSVP) types.
//!
//! [`NewComment`] is the validated form of a submission. It is built exactly once from the wire
//! type [`CommentReq`] and is the only value the store and the forwarder ever see, so there is
//! no second schema to drift from the first.

use crate::constants::{DEFAULT_GUESTS, ID_FIELD};
use crate::store::Document;
use crate::ValidationError;
use api_shared::pb::{CommentReq, CommentRes};
use serde_json::Value;

/// A validated, normalised comment submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewComment {
    pub name: String,
    pub message: String,
    pub attending: Option<bool>,
    pub guests: i64,
    pub phone: Option<String>,
}

impl TryFrom<CommentReq> for NewComment {
    type Error = ValidationError;

    fn try_from(req: CommentReq) -> Result<Self, Self::Error> {
        let name = req.name.ok_or(ValidationError::MissingField("name"))?;
        if name.trim().is_empty() {
            return Err(ValidationError::BlankField("name"));
        }
        let message = req.message.ok_or(ValidationError::MissingField("message"))?;

        Ok(Self {
            name,
            message,
            attending: req.attending,
            guests: req.guests.unwrap_or(DEFAULT_GUESTS),
            phone: req.phone,
        })
    }
}

impl NewComment {
    /// Record persisted to the store (without `_id`, which the store assigns).
    pub fn to_document(&self) -> Document {
        let mut doc = Document::new();
        doc.insert("name".into(), Value::String(self.name.clone()));
        doc.insert("message".into(), Value::String(self.message.clone()));
        doc.insert("attending".into(), self.attending.map_or(Value::Null, Value::Bool));
        doc.insert("guests".into(), Value::from(self.guests));
        doc.insert(
            "phone".into(),
            self.phone.clone().map_or(Value::Null, Value::String),
        );
        doc
    }

    /// Attach the store-assigned identifier.
    pub fn into_comment(self, id: String) -> Comment {
        Comment {
            id,
            name: self.name,
            message: self.message,
            attending: self.attending,
            guests: Some(self.guests),
            phone: self.phone,
        }
    }
}

/// A persisted comment.
///
/// `guests` stays optional because records written by other tools may lack it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Comment {
    pub id: String,
    pub name: String,
    pub message: String,
    pub attending: Option<bool>,
    pub guests: Option<i64>,
    pub phone: Option<String>,
}

impl Comment {
    /// Map a raw stored record into a comment, defaulting anything missing or mistyped.
    pub fn from_document(doc: &Document) -> Self {
        let id = match doc.get(ID_FIELD) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        };
        let text = |key: &str| doc.get(key).and_then(Value::as_str).map(str::to_string);

        Self {
            id,
            name: text("name").unwrap_or_default(),
            message: text("message").unwrap_or_default(),
            attending: doc.get("attending").and_then(Value::as_bool),
            guests: doc.get("guests").and_then(Value::as_i64),
            phone: text("phone"),
        }
    }
}

impl From<Comment> for CommentRes {
    fn from(c: Comment) -> Self {
        Self {
            id: c.id,
            name: c.name,
            message: c.message,
            attending: c.attending,
            guests: c.guests,
            phone: c.phone,
        }
    }
}
