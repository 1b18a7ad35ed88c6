use serde::{Deserialize, Serialize};

/// How the client came to hold a session id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionSource {
    /// Issued by `POST /chat/session`
    Created,
    /// Supplied by the caller and taken on trust, never checked with the server
    Adopted,
}

/// A server-tracked conversation, as seen by the client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub created_at: String,
    pub source: SessionSource,
}

impl Session {
    pub fn created(id: impl Into<String>, created_at: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            created_at: created_at.into(),
            source: SessionSource::Created,
        }
    }

    /// Adopt an externally supplied id, stamped with the current time.
    pub fn adopted(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            created_at: chrono::Utc::now().to_rfc3339(),
            source: SessionSource::Adopted,
        }
    }

    pub fn is_adopted(&self) -> bool {
        self.source == SessionSource::Adopted
    }
}
