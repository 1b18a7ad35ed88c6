//! Port traits: the boundary between view logic and the browser.
//!
//! These traits are defined here in `unibot-core` (pure Rust).
//! Implementations live in `unibot-platform` (browser adapters).
//! The core never imports platform code; it only depends on these traits.

use async_trait::async_trait;
use unibot_types::{
    Result,
    api::{ChatReply, CreateSessionResponse, DeleteResponse, HealthResponse, UploadResponse, VectorStats},
    document::{Document, SelectedFile, UploadMetadata},
};

// ─── Chat Port ───────────────────────────────────────────────

#[async_trait(?Send)]
pub trait ChatPort {
    /// `POST /chat/session`
    async fn create_session(&self) -> Result<CreateSessionResponse>;

    /// `POST /chat/session/{session_id}/message`
    async fn send_message(&self, session_id: &str, message: &str) -> Result<ChatReply>;
}

// ─── Document Port ───────────────────────────────────────────

#[async_trait(?Send)]
pub trait DocumentPort {
    /// Multipart upload. Only non-empty metadata fields are sent.
    async fn upload_document(
        &self,
        file: &SelectedFile,
        metadata: &UploadMetadata,
    ) -> Result<UploadResponse>;

    async fn list_documents(&self) -> Result<Vec<Document>>;

    async fn delete_document(&self, document_id: &str) -> Result<DeleteResponse>;

    async fn vector_stats(&self) -> Result<VectorStats>;
}

// ─── Health Port ─────────────────────────────────────────────

#[async_trait(?Send)]
pub trait HealthPort {
    async fn health_check(&self) -> Result<HealthResponse>;
}

// ─── UI Hooks ────────────────────────────────────────────────

/// Asks the user to approve a destructive action.
pub trait ConfirmPort {
    fn confirm(&self, prompt: &str) -> bool;
}
