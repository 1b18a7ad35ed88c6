use serde::{Deserialize, Serialize};

/// Events emitted by the view controllers.
/// UI drains these each frame for side effects (scrolling, refreshes).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ClientEvent {
    /// The chat view now holds a session
    SessionReady { session_id: String },
    /// A message was handed to the server
    ExchangeStarted,
    /// Transcript grew; the UI should scroll it into view
    TranscriptUpdated { len: usize },
    /// A document finished uploading
    DocumentUploaded { document_id: String, filename: String },
    /// A document was removed from the knowledge base
    DocumentDeleted { document_id: String },
    /// A user-facing error was raised by some view
    Error { message: String },
}
