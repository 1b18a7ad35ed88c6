//! Admin document list: fetch and delete.

use std::cell::Ref;
use std::collections::HashSet;
use std::rc::Rc;

use unibot_types::{Result, document::Document, event::ClientEvent};
use crate::event_bus::EventBus;
use crate::ports::{ConfirmPort, DocumentPort};
use crate::view::{ViewRef, ViewState};

pub const FETCH_DOCUMENTS_FAILED: &str = "Failed to fetch documents";
pub const DELETE_FAILED: &str = "Failed to delete document";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentListState {
    pub documents: Vec<Document>,
    pub loading: bool,
    pub error: Option<String>,
    /// Documents whose delete request is in flight
    pub deleting: HashSet<String>,
}

impl DocumentListState {
    pub fn is_deleting(&self, document_id: &str) -> bool {
        self.deleting.contains(document_id)
    }
}

pub fn delete_prompt(title: &str) -> String {
    format!("Are you sure you want to delete \"{}\"?", title)
}

pub struct DocumentListController {
    state: ViewState<DocumentListState>,
    documents: Rc<dyn DocumentPort>,
    event_bus: EventBus,
}

impl DocumentListController {
    /// Starts in the loading state; the caller is expected to `refresh` on mount.
    pub fn new(documents: Rc<dyn DocumentPort>, event_bus: EventBus) -> Self {
        Self {
            state: ViewState::new(DocumentListState {
                loading: true,
                ..DocumentListState::default()
            }),
            documents,
            event_bus,
        }
    }

    pub fn state(&self) -> Ref<'_, DocumentListState> {
        self.state.borrow()
    }

    pub fn handle(&self) -> DocumentListHandle {
        DocumentListHandle {
            state: self.state.downgrade(),
            documents: self.documents.clone(),
            event_bus: self.event_bus.clone(),
        }
    }
}

#[derive(Clone)]
pub struct DocumentListHandle {
    state: ViewRef<DocumentListState>,
    documents: Rc<dyn DocumentPort>,
    event_bus: EventBus,
}

impl DocumentListHandle {
    pub async fn refresh(&self) -> Result<()> {
        self.state.update(|s| {
            s.loading = true;
            s.error = None;
        })?;

        let result = self.documents.list_documents().await;
        self.state.update(|s| {
            s.loading = false;
            match result {
                Ok(documents) => {
                    log::debug!("Fetched {} documents", documents.len());
                    s.documents = documents;
                    Ok(())
                }
                Err(e) => {
                    log::error!("Error fetching documents: {}", e);
                    s.error = Some(FETCH_DOCUMENTS_FAILED.to_string());
                    Err(e)
                }
            }
        })?
    }

    /// Delete after confirmation. `Ok(false)` when the user declined or a
    /// delete of the same document is already in flight.
    pub async fn delete(
        &self,
        document_id: &str,
        title: &str,
        confirm: &dyn ConfirmPort,
    ) -> Result<bool> {
        if self.state.update(|s| s.is_deleting(document_id))? {
            log::debug!("Delete of {} already in flight", document_id);
            return Ok(false);
        }
        if !confirm.confirm(&delete_prompt(title)) {
            return Ok(false);
        }

        self.state.update(|s| s.deleting.insert(document_id.to_string()))?;

        let result = self.documents.delete_document(document_id).await;
        let outcome = self.state.update(|s| {
            s.deleting.remove(document_id);
            match result {
                Ok(_) => {
                    s.documents.retain(|doc| doc.id != document_id);
                    Ok(true)
                }
                Err(e) => {
                    log::error!("Error deleting document {}: {}", document_id, e);
                    s.error = Some(DELETE_FAILED.to_string());
                    Err(e)
                }
            }
        })?;

        match &outcome {
            Ok(_) => self.event_bus.emit(ClientEvent::DocumentDeleted {
                document_id: document_id.to_string(),
            }),
            Err(_) => self.event_bus.emit(ClientEvent::Error {
                message: DELETE_FAILED.to_string(),
            }),
        }
        outcome
    }
}
