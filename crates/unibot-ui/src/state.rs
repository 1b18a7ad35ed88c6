//! UI-level state that is not owned by any view controller.
//! Updated each frame by draining the EventBus.

use unibot_core::health::ApiStatus;
use unibot_types::event::ClientEvent;

/// Top-level screens, mirrored in the URL fragment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Chat,
    Upload,
    Admin,
}

impl Route {
    pub fn all() -> &'static [Route] {
        &[Route::Chat, Route::Upload, Route::Admin]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Route::Chat => "Chat",
            Route::Upload => "Upload",
            Route::Admin => "Admin",
        }
    }

    pub fn hash(&self) -> &'static str {
        match self {
            Route::Chat => "#/",
            Route::Upload => "#/upload",
            Route::Admin => "#/admin",
        }
    }

    /// Unknown fragments land on the chat screen.
    pub fn from_hash(hash: &str) -> Route {
        match hash.trim_start_matches('#').trim_end_matches('/') {
            "/upload" => Route::Upload,
            "/admin" => Route::Admin,
            _ => Route::Chat,
        }
    }
}

pub struct UiState {
    pub route: Route,
    /// Chat input field content
    pub input_text: String,
    /// Set when the transcript grew; cleared once the view scrolled
    pub scroll_to_bottom: bool,
    /// Files are being dragged over the window
    pub drag_over: bool,
    /// Status line text
    pub status_text: String,
    pub api_status: ApiStatus,
}

impl UiState {
    pub fn new(route: Route) -> Self {
        Self {
            route,
            input_text: String::new(),
            scroll_to_bottom: false,
            drag_over: false,
            status_text: "Ready".to_string(),
            api_status: ApiStatus::Unknown,
        }
    }

    /// Process events from the EventBus and update UI state
    pub fn process_events(&mut self, events: Vec<ClientEvent>) {
        for event in events {
            match event {
                ClientEvent::SessionReady { .. } => {
                    self.status_text = "Ready".to_string();
                }
                ClientEvent::ExchangeStarted => {
                    self.status_text = "Thinking...".to_string();
                }
                ClientEvent::TranscriptUpdated { .. } => {
                    self.scroll_to_bottom = true;
                    self.status_text = "Ready".to_string();
                }
                ClientEvent::DocumentUploaded { filename, .. } => {
                    self.status_text = format!("Uploaded {}", filename);
                }
                ClientEvent::DocumentDeleted { .. } => {
                    self.status_text = "Document deleted".to_string();
                }
                ClientEvent::Error { message } => {
                    self.status_text = format!("Error: {}", message);
                }
            }
        }
    }

    /// Take the trimmed input for sending. Blank input is never submitted.
    pub fn take_input(&mut self) -> Option<String> {
        let text = self.input_text.trim();
        if text.is_empty() {
            return None;
        }
        let text = text.to_string();
        self.input_text.clear();
        Some(text)
    }

    /// Navigate; returns true when the screen actually changed.
    pub fn navigate(&mut self, route: Route) -> bool {
        if self.route == route {
            return false;
        }
        log::debug!("Navigating to {}", route.label());
        self.route = route;
        self.scroll_to_bottom = false;
        true
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new(Route::default())
    }
}
