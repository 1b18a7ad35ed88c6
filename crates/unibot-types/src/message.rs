use serde::{Deserialize, Serialize};

/// Who authored a transcript entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    User,
    Bot,
}

/// A single entry in a chat transcript
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Client-generated for user messages, server-issued for bot replies
    pub id: String,
    pub content: String,
    /// RFC 3339
    pub timestamp: String,
    pub origin: Origin,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            content: text.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            origin: Origin::User,
        }
    }

    pub fn bot(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: text.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            origin: Origin::Bot,
        }
    }

    pub fn is_user(&self) -> bool {
        self.origin == Origin::User
    }
}
