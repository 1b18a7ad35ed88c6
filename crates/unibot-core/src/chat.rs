//! Chat session bootstrap and the message exchange loop.
//!
//! Lifecycle of one chat view:
//! 1. Bootstrap once on mount: adopt the external session id if one was
//!    supplied, otherwise ask the server for a new session.
//! 2. Each submitted message is one exchange: send, then append the user
//!    message and the bot reply together, or nothing on failure.
//! 3. Errors are shown inline. Retry only re-bootstraps when no session
//!    is held.
//!
//! Exchanges are serialized by the UI: the input is disabled while
//! [`ChatState::busy`] is set. The exchange itself takes no lock.

use std::cell::Ref;
use std::rc::Rc;

use unibot_types::{
    ClientError, Result,
    event::ClientEvent,
    message::Message,
    session::Session,
};
use crate::event_bus::EventBus;
use crate::ports::ChatPort;
use crate::view::{ViewRef, ViewState};

pub const SESSION_INIT_FAILED: &str = "Failed to initialize chat session. Please try again.";
pub const SEND_FAILED: &str = "Failed to send message. Please try again.";
pub const NO_SESSION: &str = "No active session. Please refresh the page.";
pub const SESSION_REJECTED: &str =
    "This chat session is no longer valid. Press Retry to start a new one.";

/// Everything the chat view renders
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatState {
    pub session: Option<Session>,
    /// Append-only, in display order
    pub transcript: Vec<Message>,
    /// An exchange is in flight
    pub busy: bool,
    /// A session-creation request is in flight
    pub bootstrapping: bool,
    pub error: Option<String>,
    /// Adopted instead of creating a session. Dropped once the server rejects it.
    external_session_id: Option<String>,
}

impl ChatState {
    pub fn new(external_session_id: Option<String>) -> Self {
        Self {
            external_session_id: external_session_id.filter(|id| !id.trim().is_empty()),
            ..Self::default()
        }
    }

    /// Whether the input should accept a new message.
    pub fn can_submit(&self) -> bool {
        self.session.is_some() && !self.busy
    }

    pub fn external_session_id(&self) -> Option<&str> {
        self.external_session_id.as_deref()
    }
}

/// Owner of one chat view's state. Dropping it discards the session and
/// transcript; in-flight requests then complete as no-ops.
pub struct ChatController {
    state: ViewState<ChatState>,
    chat: Rc<dyn ChatPort>,
    event_bus: EventBus,
}

impl ChatController {
    pub fn new(
        chat: Rc<dyn ChatPort>,
        event_bus: EventBus,
        external_session_id: Option<String>,
    ) -> Self {
        Self {
            state: ViewState::new(ChatState::new(external_session_id)),
            chat,
            event_bus,
        }
    }

    pub fn state(&self) -> Ref<'_, ChatState> {
        self.state.borrow()
    }

    pub fn can_submit(&self) -> bool {
        self.state.borrow().can_submit()
    }

    /// Handle for async work on behalf of this view.
    pub fn handle(&self) -> ChatHandle {
        ChatHandle {
            state: self.state.downgrade(),
            chat: self.chat.clone(),
            event_bus: self.event_bus.clone(),
        }
    }
}

#[derive(Clone)]
pub struct ChatHandle {
    state: ViewRef<ChatState>,
    chat: Rc<dyn ChatPort>,
    event_bus: EventBus,
}

impl ChatHandle {
    /// Obtain a session for the view. One attempt, no automatic retry.
    pub async fn bootstrap(&self) -> Result<()> {
        let external = self.state.update(|s| {
            s.error = None;
            s.external_session_id.clone()
        })?;

        if let Some(id) = external {
            let session = Session::adopted(id);
            log::info!("Adopted external chat session {}", session.id);
            self.establish(session)?;
            return Ok(());
        }

        self.state.update(|s| s.bootstrapping = true)?;
        log::debug!("Creating chat session");

        match self.chat.create_session().await {
            Ok(resp) => {
                let session = Session::created(resp.session_id, resp.created_at);
                log::info!("Chat session {} created", session.id);
                self.establish(session)
            }
            Err(e) => {
                log::error!("Failed to create session: {}", e);
                self.state.update(|s| {
                    s.bootstrapping = false;
                    s.error = Some(SESSION_INIT_FAILED.to_string());
                })?;
                self.event_bus.emit(ClientEvent::Error {
                    message: SESSION_INIT_FAILED.to_string(),
                });
                Err(e)
            }
        }
    }

    /// Dismiss the error; re-bootstrap only when no session is held.
    pub async fn retry(&self) -> Result<()> {
        let needs_session = self.state.update(|s| {
            s.error = None;
            s.session.is_none() && !s.bootstrapping
        })?;
        if needs_session {
            self.bootstrap().await
        } else {
            Ok(())
        }
    }

    /// Run one exchange: send `text`, then append the user message and the
    /// bot reply as a single update.
    pub async fn send_exchange(&self, text: &str) -> Result<()> {
        let session = self.state.update(|s| s.session.clone())?;
        let Some(session) = session else {
            self.state.update(|s| s.error = Some(NO_SESSION.to_string()))?;
            return Err(ClientError::NoSession);
        };

        self.state.update(|s| {
            s.busy = true;
            s.error = None;
        })?;
        self.event_bus.emit(ClientEvent::ExchangeStarted);

        match self.chat.send_message(&session.id, text).await {
            Ok(reply) => {
                let user = Message::user(text);
                let bot = Message::bot(reply.message_id, reply.response);
                let len = self.state.update(|s| {
                    s.transcript.push(user);
                    s.transcript.push(bot);
                    s.busy = false;
                    s.transcript.len()
                })?;
                self.event_bus.emit(ClientEvent::TranscriptUpdated { len });
                Ok(())
            }
            Err(e) => {
                log::error!("Failed to send message: {}", e);
                let rejected = session.is_adopted() && e.status() == Some(404);
                let message = if rejected { SESSION_REJECTED } else { SEND_FAILED };
                self.state.update(|s| {
                    s.busy = false;
                    s.error = Some(message.to_string());
                    if rejected {
                        log::warn!("Server rejected adopted session {}", session.id);
                        s.session = None;
                        s.external_session_id = None;
                    }
                })?;
                self.event_bus.emit(ClientEvent::Error {
                    message: message.to_string(),
                });
                Err(e)
            }
        }
    }

    fn establish(&self, session: Session) -> Result<()> {
        let session_id = session.id.clone();
        self.state.update(|s| {
            s.session = Some(session);
            s.bootstrapping = false;
        })?;
        self.event_bus.emit(ClientEvent::SessionReady { session_id });
        Ok(())
    }
}
