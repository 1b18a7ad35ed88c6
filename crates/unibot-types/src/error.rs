use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClientError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Timeout after {0}ms")]
    Timeout(u64),

    #[error("No active session")]
    NoSession,

    #[error("{0}")]
    Validation(UploadRejection),

    /// The view that started the operation was dropped before it finished.
    #[error("View detached before the operation completed")]
    Detached,

    #[error("JS interop error: {0}")]
    JsInterop(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// HTTP status of a non-success response, if this error carries one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        ClientError::Decode(e.to_string())
    }
}

/// Why a file was refused before any upload request was made.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UploadRejection {
    #[error("Only PDF files are allowed.")]
    NotPdf { mime_type: String },

    #[error("File size must be less than 10MB.")]
    TooLarge { size: u64 },

    /// Selection is frozen until the current upload settles.
    #[error("An upload is already in progress.")]
    UploadInProgress,
}
