/// Rejections raised while turning a submission into a [`crate::NewComment`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("field required: {0}")]
    MissingField(&'static str),
    #[error("field must not be blank: {0}")]
    BlankField(&'static str),
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("invalid collection name: {0}")]
    InvalidCollection(String),
    #[error("invalid database name: {0}")]
    InvalidDatabaseName(String),
    #[error("failed to create store directory: {0}")]
    StoreDirCreation(std::io::Error),
    #[error("failed to write collection file: {0}")]
    FileWrite(std::io::Error),
    #[error("failed to read collection file: {0}")]
    FileRead(std::io::Error),
    #[error("failed to serialize document: {0}")]
    Serialization(serde_json::Error),
    #[error("store lock poisoned")]
    LockPoisoned,
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, thiserror::Error)]
pub enum InviteError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

pub type InviteResult<T> = std::result::Result<T, InviteError>;
