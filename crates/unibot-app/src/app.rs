//! Main egui application: routes between screens and runs their async work.

use std::future::Future;
use std::rc::Rc;

use egui::{self, CentralPanel, TopBottomPanel};

use unibot_core::chat::ChatController;
use unibot_core::dashboard::StatsController;
use unibot_core::documents::DocumentListController;
use unibot_core::event_bus::EventBus;
use unibot_core::health::{self, ApiStatus};
use unibot_core::ports::{ChatPort, ConfirmPort, DocumentPort, HealthPort};
use unibot_core::upload::UploadController;
use unibot_core::view::ViewState;
use unibot_platform::launch::{current_location_hash, set_location_hash};
use unibot_platform::{BrowserConfirm, FilePicker, HttpApiClient, LaunchParams};
use unibot_types::config::ClientConfig;
use unibot_types::document::SelectedFile;
use unibot_types::{ClientError, Result};
use unibot_ui::panels::chat::{self, ChatAction};
use unibot_ui::panels::dashboard::{self, DashboardAction};
use unibot_ui::panels::header;
use unibot_ui::panels::upload::{self, UploadAction};
use unibot_ui::state::{Route, UiState};
use unibot_ui::theme;

const PDF_ACCEPT: &str = ".pdf,application/pdf";

/// The view mounted for the current route. Replacing it unmounts the
/// previous one; requests it started finish without touching anything.
enum Screen {
    Chat(ChatController),
    Upload(UploadController),
    Admin {
        stats: StatsController,
        documents: DocumentListController,
    },
}

enum Action {
    Chat(ChatAction),
    Upload(UploadAction),
    Dashboard(DashboardAction),
}

pub struct ChatbotApp {
    ui_state: UiState,
    event_bus: EventBus,
    api: Rc<HttpApiClient>,
    confirm: Rc<dyn ConfirmPort>,
    picker: FilePicker,
    /// `?session_id=` handed to each chat mount until the server rejects it
    launch_session_id: Option<String>,
    api_status: ViewState<ApiStatus>,
    screen: Option<Screen>,
    first_frame: bool,
}

impl ChatbotApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let launch = LaunchParams::from_location();
        let config = launch.apply_to(ClientConfig::default());
        log::info!("API base URL: {}", config.api.base_url);

        Self {
            ui_state: UiState::new(Route::from_hash(&launch.hash)),
            event_bus: EventBus::new(),
            api: Rc::new(HttpApiClient::new(config.api)),
            confirm: Rc::new(BrowserConfirm),
            picker: FilePicker::new(),
            launch_session_id: launch.session_id,
            api_status: ViewState::default(),
            screen: None,
            first_frame: true,
        }
    }

    fn probe_health(&self, ctx: &egui::Context) {
        let api: Rc<dyn HealthPort> = self.api.clone();
        let slot = self.api_status.downgrade();
        spawn(ctx, "Health check", async move {
            let status = health::probe(api.as_ref()).await;
            slot.update(|s| *s = status)
        });
    }

    /// Unmount the current screen and mount the one for `route`.
    fn mount(&mut self, route: Route, ctx: &egui::Context) {
        self.screen = None;

        let screen = match route {
            Route::Chat => {
                let port: Rc<dyn ChatPort> = self.api.clone();
                let controller = ChatController::new(
                    port,
                    self.event_bus.clone(),
                    self.launch_session_id.clone(),
                );
                let handle = controller.handle();
                spawn(ctx, "Chat bootstrap", async move { handle.bootstrap().await });
                Screen::Chat(controller)
            }
            Route::Upload => {
                let port: Rc<dyn DocumentPort> = self.api.clone();
                Screen::Upload(UploadController::new(port, self.event_bus.clone()))
            }
            Route::Admin => {
                let port: Rc<dyn DocumentPort> = self.api.clone();
                let stats = StatsController::new(port.clone());
                let documents = DocumentListController::new(port, self.event_bus.clone());
                let stats_handle = stats.handle();
                let documents_handle = documents.handle();
                spawn(ctx, "Stats fetch", async move { stats_handle.refresh().await });
                spawn(ctx, "Document fetch", async move { documents_handle.refresh().await });
                Screen::Admin { stats, documents }
            }
        };

        log::debug!("Mounted {} screen", route.label());
        self.screen = Some(screen);
    }

    fn navigate(&mut self, route: Route, ctx: &egui::Context) {
        if self.ui_state.navigate(route) {
            set_location_hash(route.hash());
            self.mount(route, ctx);
        }
    }

    /// The chat view forgets an adopted id once the server rejects it;
    /// later mounts must not adopt it again.
    fn forget_rejected_session(&mut self) {
        let Some(Screen::Chat(controller)) = &self.screen else {
            return;
        };
        if self.launch_session_id.is_some() && controller.state().external_session_id().is_none() {
            log::info!("Launch session id rejected by the server; creating sessions from now on");
            self.launch_session_id = None;
        }
    }

    /// Route dropped or picked files into the upload form.
    fn collect_files(&mut self, ctx: &egui::Context) {
        self.ui_state.drag_over = ctx.input(|i| !i.raw.hovered_files.is_empty());
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        let picked = self.picker.take();

        let Some(Screen::Upload(controller)) = &self.screen else {
            return;
        };
        let file = dropped
            .into_iter()
            .find_map(selected_from_drop)
            .or(picked);
        if let Some(file) = file {
            if controller.form().is_uploading() {
                log::info!("Ignoring {} while an upload is in progress", file.name);
                return;
            }
            if let Err(rejection) = controller.select_file(file) {
                log::info!("File not accepted: {}", rejection);
            }
        }
    }

    fn dispatch(&self, action: Action, ctx: &egui::Context) {
        match (action, &self.screen) {
            (Action::Chat(ChatAction::Send(text)), Some(Screen::Chat(controller))) => {
                let handle = controller.handle();
                spawn(ctx, "Send message", async move { handle.send_exchange(&text).await });
            }
            (Action::Chat(ChatAction::Retry), Some(Screen::Chat(controller))) => {
                let handle = controller.handle();
                spawn(ctx, "Chat retry", async move { handle.retry().await });
            }
            (Action::Upload(UploadAction::Browse), Some(Screen::Upload(_))) => {
                let repaint = ctx.clone();
                if let Err(e) = self.picker.open(PDF_ACCEPT, move || repaint.request_repaint()) {
                    log::error!("Failed to open file dialog: {}", e);
                }
            }
            (Action::Upload(UploadAction::Upload), Some(Screen::Upload(controller))) => {
                let handle = controller.handle();
                spawn(ctx, "Upload", async move { handle.upload().await });
            }
            (Action::Upload(UploadAction::Clear), Some(Screen::Upload(controller))) => {
                controller.edit(|form| form.reset());
            }
            (Action::Dashboard(DashboardAction::Refresh), Some(Screen::Admin { stats, documents })) => {
                let stats_handle = stats.handle();
                let documents_handle = documents.handle();
                spawn(ctx, "Stats fetch", async move { stats_handle.refresh().await });
                spawn(ctx, "Document fetch", async move { documents_handle.refresh().await });
            }
            (Action::Dashboard(DashboardAction::RefreshStats), Some(Screen::Admin { stats, .. })) => {
                let handle = stats.handle();
                spawn(ctx, "Stats fetch", async move { handle.refresh().await });
            }
            (Action::Dashboard(DashboardAction::RefreshDocuments), Some(Screen::Admin { documents, .. })) => {
                let handle = documents.handle();
                spawn(ctx, "Document fetch", async move { handle.refresh().await });
            }
            (Action::Dashboard(DashboardAction::Delete { id, title }), Some(Screen::Admin { documents, .. })) => {
                let handle = documents.handle();
                let confirm = self.confirm.clone();
                spawn(ctx, "Delete document", async move {
                    handle.delete(&id, &title, confirm.as_ref()).await
                });
            }
            _ => log::debug!("Action for a screen that is no longer mounted"),
        }
    }
}

impl eframe::App for ChatbotApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.first_frame {
            theme::apply_theme(ctx);
            self.probe_health(ctx);
            let route = self.ui_state.route;
            self.mount(route, ctx);
            self.first_frame = false;
        }

        // Back/forward buttons change the fragment under us
        let hash_route = Route::from_hash(&current_location_hash());
        if hash_route != self.ui_state.route {
            self.navigate(hash_route, ctx);
        }

        if let Some(events) = self.event_bus.take_pending() {
            self.ui_state.process_events(events);
            ctx.request_repaint();
        }
        self.ui_state.api_status = self.api_status.borrow().clone();

        self.forget_rejected_session();
        self.collect_files(ctx);

        // ── Top bar ──────────────────────────────────────────
        let mut navigate_to = None;
        TopBottomPanel::top("top_bar").show(ctx, |ui| {
            navigate_to = header::header_bar(ui, &self.ui_state);
        });

        // ── Current screen ───────────────────────────────────
        let mut pending = None;
        CentralPanel::default().show(ctx, |ui| {
            pending = match &self.screen {
                Some(Screen::Chat(controller)) => {
                    let state = controller.state();
                    chat::chat_panel(ui, &mut self.ui_state, &state).map(Action::Chat)
                }
                Some(Screen::Upload(controller)) => {
                    let drag_over = self.ui_state.drag_over;
                    controller
                        .edit(|form| upload::upload_panel(ui, form, drag_over))
                        .map(Action::Upload)
                }
                Some(Screen::Admin { stats, documents }) => {
                    dashboard::dashboard_panel(ui, &stats.state(), &documents.state())
                        .map(Action::Dashboard)
                }
                None => None,
            };
        });

        if let Some(action) = pending {
            self.dispatch(action, ctx);
        }
        if let Some(route) = navigate_to {
            self.navigate(route, ctx);
        }
    }
}

fn selected_from_drop(file: egui::DroppedFile) -> Option<SelectedFile> {
    let bytes = file.bytes?;
    Some(SelectedFile::new(file.name, file.mime, bytes.to_vec()))
}

/// Run a view's async work on the browser event loop and repaint when it
/// settles. Failures are already reflected in view state.
fn spawn<T>(ctx: &egui::Context, label: &'static str, task: impl Future<Output = Result<T>> + 'static) {
    let ctx = ctx.clone();
    wasm_bindgen_futures::spawn_local(async move {
        match task.await {
            Ok(_) => {}
            Err(ClientError::Detached) => log::debug!("{}: view closed before completion", label),
            Err(e) => log::debug!("{} failed: {}", label, e),
        }
        ctx.request_repaint();
    });
}
