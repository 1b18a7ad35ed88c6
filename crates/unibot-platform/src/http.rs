//! HTTP adapter for the chatbot API.
//!
//! Implements every core port over browser `fetch()` via gloo-net.
//! The base URL comes from the injected [`ApiConfig`]; nothing is read
//! from globals.

use std::future::Future;

use async_trait::async_trait;
use futures::future::{self, Either};
use gloo_net::http::{Request, Response};
use gloo_timers::future::TimeoutFuture;
use js_sys::{Array, Uint8Array};
use serde::de::DeserializeOwned;
use wasm_bindgen::JsValue;
use web_sys::{Blob, BlobPropertyBag, FormData};

use unibot_core::ports::{ChatPort, DocumentPort, HealthPort};
use unibot_types::{
    ClientError, Result,
    api::{
        ChatReply, CreateSessionResponse, DeleteResponse, DocumentsResponse, HealthResponse,
        SendMessageRequest, UploadResponse, VectorStats,
    },
    config::ApiConfig,
    document::{Document, SelectedFile, UploadMetadata},
};

pub struct HttpApiClient {
    config: ApiConfig,
}

impl HttpApiClient {
    pub fn new(config: ApiConfig) -> Self {
        Self { config }
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    fn url(&self, path: &str) -> String {
        self.config.endpoint(path)
    }

    /// Send, enforce the configured timeout, and decode a JSON body.
    async fn fetch_json<T: DeserializeOwned>(&self, request: Request) -> Result<T> {
        log::debug!("Request {}", request.url());
        let response = self
            .with_timeout(async {
                request
                    .send()
                    .await
                    .map_err(|e| ClientError::Network(e.to_string()))
            })
            .await?;
        decode_response(response).await
    }

    async fn with_timeout<T>(&self, fut: impl Future<Output = Result<T>>) -> Result<T> {
        let timeout_ms = self.config.request_timeout_ms;
        let timeout = TimeoutFuture::new(timeout_ms.min(u32::MAX as u64) as u32);
        futures::pin_mut!(fut);
        futures::pin_mut!(timeout);
        match future::select(fut, timeout).await {
            Either::Left((result, _)) => result,
            Either::Right(((), _)) => Err(ClientError::Timeout(timeout_ms)),
        }
    }
}

#[async_trait(?Send)]
impl HealthPort for HttpApiClient {
    async fn health_check(&self) -> Result<HealthResponse> {
        let request = Request::get(&self.url("/health"))
            .build()
            .map_err(|e| ClientError::Network(e.to_string()))?;
        self.fetch_json(request).await
    }
}

#[async_trait(?Send)]
impl ChatPort for HttpApiClient {
    async fn create_session(&self) -> Result<CreateSessionResponse> {
        let request = Request::post(&self.url("/chat/session"))
            .header("Content-Type", "application/json")
            .build()
            .map_err(|e| ClientError::Network(e.to_string()))?;
        self.fetch_json(request).await
    }

    async fn send_message(&self, session_id: &str, message: &str) -> Result<ChatReply> {
        let url = self.url(&session_message_path(&encode_segment(session_id)));
        let body = SendMessageRequest {
            message: message.to_string(),
        };
        let request = Request::post(&url)
            .header("Content-Type", "application/json")
            .json(&body)
            .map_err(|e| ClientError::Network(e.to_string()))?;
        self.fetch_json(request).await
    }
}

#[async_trait(?Send)]
impl DocumentPort for HttpApiClient {
    async fn upload_document(
        &self,
        file: &SelectedFile,
        metadata: &UploadMetadata,
    ) -> Result<UploadResponse> {
        let form = multipart_form(file, metadata)?;
        // No explicit Content-Type: the browser adds the multipart boundary.
        let request = Request::post(&self.url("/upload-document"))
            .body(form)
            .map_err(|e| ClientError::Network(e.to_string()))?;
        self.fetch_json(request).await
    }

    async fn list_documents(&self) -> Result<Vec<Document>> {
        let request = Request::get(&self.url("/documents"))
            .build()
            .map_err(|e| ClientError::Network(e.to_string()))?;
        let data: DocumentsResponse = self.fetch_json(request).await?;
        Ok(data.documents)
    }

    async fn delete_document(&self, document_id: &str) -> Result<DeleteResponse> {
        let url = self.url(&document_path(&encode_segment(document_id)));
        let request = Request::delete(&url)
            .build()
            .map_err(|e| ClientError::Network(e.to_string()))?;
        self.fetch_json(request).await
    }

    async fn vector_stats(&self) -> Result<VectorStats> {
        let request = Request::get(&self.url("/vector-stats"))
            .build()
            .map_err(|e| ClientError::Network(e.to_string()))?;
        self.fetch_json(request).await
    }
}

// ─── Helpers ─────────────────────────────────────────────────

async fn decode_response<T: DeserializeOwned>(response: Response) -> Result<T> {
    if !response.ok() {
        let status = response.status();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "unknown error".to_string());
        return Err(ClientError::Http { status, body });
    }

    let text = response
        .text()
        .await
        .map_err(|e| ClientError::Network(e.to_string()))?;
    Ok(serde_json::from_str(&text)?)
}

pub fn session_message_path(encoded_session_id: &str) -> String {
    format!("/chat/session/{}/message", encoded_session_id)
}

pub fn document_path(encoded_document_id: &str) -> String {
    format!("/documents/{}", encoded_document_id)
}

/// Percent-encode one path segment.
pub fn encode_segment(segment: &str) -> String {
    String::from(js_sys::encode_uri_component(segment))
}

/// Build the `multipart/form-data` body for `POST /upload-document`.
pub fn multipart_form(file: &SelectedFile, metadata: &UploadMetadata) -> Result<FormData> {
    let form = FormData::new().map_err(js_error)?;

    let bytes = Uint8Array::from(file.bytes.as_slice());
    let parts = Array::of1(&bytes);
    let options = BlobPropertyBag::new();
    options.set_type(&file.mime_type);
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)
        .map_err(js_error)?;
    form.append_with_blob_and_filename("file", &blob, &file.name)
        .map_err(js_error)?;

    for (name, value) in metadata.form_fields() {
        form.append_with_str(name, &value).map_err(js_error)?;
    }
    Ok(form)
}

pub(crate) fn js_error(e: JsValue) -> ClientError {
    ClientError::JsInterop(format!("{:?}", e))
}
