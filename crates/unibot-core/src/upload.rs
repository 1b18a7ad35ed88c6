//! Document upload form.
//!
//! Files are checked locally before anything is sent: PDF only, at most
//! 10 MiB. A rejected file never reaches the network.

use std::cell::Ref;
use std::rc::Rc;

use unibot_types::{
    ClientError, Result, UploadRejection,
    api::UploadResponse,
    document::{SelectedFile, UploadMetadata},
    event::ClientEvent,
};
use crate::event_bus::EventBus;
use crate::ports::DocumentPort;
use crate::view::{ViewRef, ViewState};

pub const PDF_MIME_TYPE: &str = "application/pdf";
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

pub const UPLOADING: &str = "Uploading document...";
pub const UPLOAD_FAILED: &str = "Failed to upload document. Please try again.";

pub fn validate_file(file: &SelectedFile) -> std::result::Result<(), UploadRejection> {
    if file.mime_type != PDF_MIME_TYPE {
        return Err(UploadRejection::NotPdf {
            mime_type: file.mime_type.clone(),
        });
    }
    if file.size() > MAX_UPLOAD_BYTES {
        return Err(UploadRejection::TooLarge { size: file.size() });
    }
    Ok(())
}

/// Default title for a picked file: its name without the `.pdf` extension.
pub fn title_from_filename(name: &str) -> String {
    let stem = match name.len().checked_sub(4) {
        Some(cut) if name.is_char_boundary(cut) && name[cut..].eq_ignore_ascii_case(".pdf") => {
            &name[..cut]
        }
        _ => name,
    };
    stem.to_string()
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum UploadStatus {
    #[default]
    Idle,
    Uploading,
    Success(String),
    Error(String),
}

impl UploadStatus {
    /// Line shown under the form, if any
    pub fn message(&self) -> Option<&str> {
        match self {
            UploadStatus::Idle => None,
            UploadStatus::Uploading => Some(UPLOADING),
            UploadStatus::Success(msg) | UploadStatus::Error(msg) => Some(msg),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UploadForm {
    pub file: Option<SelectedFile>,
    pub metadata: UploadMetadata,
    pub status: UploadStatus,
}

impl UploadForm {
    /// Validate and select a file. A rejected file leaves the previous
    /// selection untouched and puts the form in the error state. While an
    /// upload is in flight nothing changes at all.
    pub fn select_file(&mut self, file: SelectedFile) -> std::result::Result<(), UploadRejection> {
        if self.is_uploading() {
            return Err(UploadRejection::UploadInProgress);
        }
        if let Err(rejection) = validate_file(&file) {
            log::warn!("Rejected {}: {}", file.name, rejection);
            self.status = UploadStatus::Error(rejection.to_string());
            return Err(rejection);
        }
        if self.metadata.title.is_empty() {
            self.metadata.title = title_from_filename(&file.name);
        }
        self.file = Some(file);
        self.status = UploadStatus::Idle;
        Ok(())
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_uploading(&self) -> bool {
        self.status == UploadStatus::Uploading
    }

    pub fn can_upload(&self) -> bool {
        self.file.is_some() && !self.is_uploading()
    }
}

pub struct UploadController {
    form: ViewState<UploadForm>,
    documents: Rc<dyn DocumentPort>,
    event_bus: EventBus,
}

impl UploadController {
    pub fn new(documents: Rc<dyn DocumentPort>, event_bus: EventBus) -> Self {
        Self {
            form: ViewState::default(),
            documents,
            event_bus,
        }
    }

    pub fn form(&self) -> Ref<'_, UploadForm> {
        self.form.borrow()
    }

    /// Mutate the form from the UI (metadata fields, reset).
    pub fn edit<R>(&self, f: impl FnOnce(&mut UploadForm) -> R) -> R {
        self.form.update(f)
    }

    pub fn select_file(&self, file: SelectedFile) -> std::result::Result<(), UploadRejection> {
        self.form.update(|form| form.select_file(file))
    }

    pub fn handle(&self) -> UploadHandle {
        UploadHandle {
            form: self.form.downgrade(),
            documents: self.documents.clone(),
            event_bus: self.event_bus.clone(),
        }
    }
}

#[derive(Clone)]
pub struct UploadHandle {
    form: ViewRef<UploadForm>,
    documents: Rc<dyn DocumentPort>,
    event_bus: EventBus,
}

impl UploadHandle {
    /// Upload the selected file. `Ok(None)` when there was nothing to send.
    pub async fn upload(&self) -> Result<Option<UploadResponse>> {
        let pending = self.form.update(|form| {
            if !form.can_upload() {
                return Ok(None);
            }
            let Some(file) = form.file.clone() else {
                return Ok(None);
            };
            if let Err(rejection) = validate_file(&file) {
                form.status = UploadStatus::Error(rejection.to_string());
                return Err(ClientError::Validation(rejection));
            }
            form.status = UploadStatus::Uploading;
            Ok(Some((file, form.metadata.clone())))
        })??;
        let Some((file, metadata)) = pending else {
            return Ok(None);
        };

        log::debug!("Uploading {} ({} bytes)", file.name, file.size());
        match self.documents.upload_document(&file, &metadata).await {
            Ok(resp) => {
                log::info!("Uploaded {} as document {}", resp.filename, resp.document_id);
                self.form.update(|form| {
                    form.reset();
                    form.status = UploadStatus::Success(format!(
                        "Successfully uploaded: {}",
                        resp.filename
                    ));
                })?;
                self.event_bus.emit(ClientEvent::DocumentUploaded {
                    document_id: resp.document_id.clone(),
                    filename: resp.filename.clone(),
                });
                Ok(Some(resp))
            }
            Err(e) => {
                log::error!("Upload error: {}", e);
                self.form.update(|form| {
                    form.status = UploadStatus::Error(UPLOAD_FAILED.to_string());
                })?;
                self.event_bus.emit(ClientEvent::Error {
                    message: UPLOAD_FAILED.to_string(),
                });
                Err(e)
            }
        }
    }
}
