use thiserror::Error;

use crate::vcard::MalformedRecord;

#[derive(Debug, Error)]
pub enum ContactError {
    #[error("{field} cannot be blank")]
    BlankField { field: String },

    #[error("{field} {reason}")]
    InvalidField { field: String, reason: String },

    #[error("{entity_type} not found: {id}")]
    NotFound { entity_type: String, id: String },

    #[error("{entity_type} already exists: {identifier}")]
    AlreadyExists {
        entity_type: String,
        identifier: String,
    },

    #[error("{0}")]
    MalformedRecord(MalformedRecord),

    #[error("vCard document is not valid UTF-8: {0}")]
    InvalidEncoding(#[from] std::str::Utf8Error),

    #[error("Contacts of user {owner_id} were modified concurrently")]
    ConcurrentModification { owner_id: String },

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl From<MalformedRecord> for ContactError {
    fn from(record: MalformedRecord) -> Self {
        ContactError::MalformedRecord(record)
    }
}

pub type ContactResult<T> = Result<T, ContactError>;
