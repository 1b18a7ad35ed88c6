//! Wire shapes of the chatbot HTTP API.

use serde::{Deserialize, Serialize};
use crate::document::Document;

/// `GET /health`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

/// `POST /chat/session`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateSessionResponse {
    pub session_id: String,
    pub created_at: String,
}

/// Body of `POST /chat/session/{session_id}/message`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SendMessageRequest {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatReply {
    #[serde(default)]
    pub confidence_score: f64,
    pub message_id: String,
    pub response: String,
}

/// `POST /upload-document`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub message: String,
    pub document_id: String,
    pub filename: String,
}

/// `GET /documents`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentsResponse {
    pub documents: Vec<Document>,
}

/// `DELETE /documents/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub message: String,
}

/// `GET /vector-stats`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VectorStats {
    pub vector_database: VectorDatabaseStats,
    pub database: DatabaseStats,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VectorDatabaseStats {
    pub total_chunks: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatabaseStats {
    pub total_documents: u64,
    pub processed_documents: u64,
    pub unprocessed_documents: u64,
}
