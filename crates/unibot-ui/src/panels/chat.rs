//! Chat panel: transcript, inline error with Retry, and the input row.

use egui::{self, Align, Layout, RichText, ScrollArea, Vec2};
use unibot_core::chat::ChatState;
use unibot_types::message::{Message, Origin};
use crate::format::{format_time, short_id};
use crate::state::UiState;
use crate::theme::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatAction {
    Send(String),
    Retry,
}

/// Render the chat panel. Returns the action the user asked for this frame.
pub fn chat_panel(ui: &mut egui::Ui, state: &mut UiState, chat: &ChatState) -> Option<ChatAction> {
    let mut action = None;

    egui::Frame::default()
        .fill(BG_PRIMARY)
        .inner_margin(PANEL_PADDING)
        .show(ui, |ui| {
            ui.vertical(|ui| {
                ui.horizontal(|ui| {
                    ui.heading(RichText::new("Ask about the university").color(TEXT_PRIMARY).strong());
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if chat.bootstrapping {
                            ui.spinner();
                            ui.label(RichText::new("Connecting...").color(WARNING).small());
                        } else if let Some(session) = &chat.session {
                            ui.label(
                                RichText::new(format!("Session {}", short_id(&session.id)))
                                    .color(TEXT_SECONDARY)
                                    .small(),
                            );
                        }
                    });
                });

                ui.separator();

                if let Some(error) = &chat.error {
                    if error_banner(ui, error) {
                        action = Some(ChatAction::Retry);
                    }
                    ui.add_space(4.0);
                }

                let available_height = ui.available_height() - 60.0;
                ScrollArea::vertical()
                    .max_height(available_height)
                    .auto_shrink([false, false])
                    .stick_to_bottom(true)
                    .show(ui, |ui| {
                        if chat.transcript.is_empty() && !chat.busy {
                            ui.add_space(24.0);
                            ui.vertical_centered(|ui| {
                                ui.label(
                                    RichText::new("Ask a question about admissions, courses, policies or campus life.")
                                        .color(TEXT_SECONDARY),
                                );
                            });
                        }

                        for message in &chat.transcript {
                            render_message(ui, message);
                            ui.add_space(4.0);
                        }

                        if chat.busy {
                            ui.horizontal(|ui| {
                                ui.spinner();
                                ui.label(RichText::new("Thinking...").color(TEXT_SECONDARY).italics());
                            });
                        }

                        if state.scroll_to_bottom {
                            ui.scroll_to_cursor(Some(Align::BOTTOM));
                            state.scroll_to_bottom = false;
                        }
                    });

                ui.add_space(8.0);

                ui.horizontal(|ui| {
                    let enabled = chat.can_submit();
                    let hint = if chat.session.is_some() {
                        "Type your question..."
                    } else {
                        "Waiting for a chat session..."
                    };
                    let response = ui.add_enabled(
                        enabled,
                        egui::TextEdit::singleline(&mut state.input_text)
                            .hint_text(hint)
                            .desired_width(ui.available_width() - 70.0)
                            .font(egui::FontId::proportional(14.0)),
                    );

                    let send_enabled = enabled && !state.input_text.trim().is_empty();
                    let send_btn = ui.add_enabled(
                        send_enabled,
                        egui::Button::new(RichText::new("Send").color(TEXT_ON_ACCENT))
                            .fill(if send_enabled { ACCENT } else { BG_SURFACE })
                            .corner_radius(PANEL_ROUNDING)
                            .min_size(Vec2::new(60.0, 0.0)),
                    );

                    let enter = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                    if (enter && enabled) || send_btn.clicked() {
                        if let Some(text) = state.take_input() {
                            action = Some(ChatAction::Send(text));
                        }
                        response.request_focus();
                    }
                });
            });
        });

    action
}

/// Returns true when Retry was clicked.
fn error_banner(ui: &mut egui::Ui, error: &str) -> bool {
    let mut retry = false;
    egui::Frame::default()
        .fill(ERROR_BG)
        .corner_radius(PANEL_ROUNDING)
        .inner_margin(8.0)
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new(error).color(ERROR));
                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    retry = ui.button("Retry").clicked();
                });
            });
        });
    retry
}

fn render_message(ui: &mut egui::Ui, message: &Message) {
    let (layout, fill, text_color, label) = match message.origin {
        Origin::User => (Layout::right_to_left(Align::TOP), USER_BUBBLE, TEXT_ON_ACCENT, "You"),
        Origin::Bot => (Layout::left_to_right(Align::TOP), BOT_BUBBLE, TEXT_PRIMARY, "Assistant"),
    };

    ui.with_layout(layout, |ui| {
        ui.set_max_width(ui.available_width() * 0.75);
        egui::Frame::default()
            .fill(fill)
            .corner_radius(BUBBLE_ROUNDING)
            .inner_margin(10.0)
            .show(ui, |ui| {
                ui.vertical(|ui| {
                    ui.label(RichText::new(label).color(text_color).strong().small());
                    ui.label(RichText::new(&message.content).color(text_color));
                    let time = format_time(&message.timestamp);
                    if !time.is_empty() {
                        ui.label(RichText::new(time).color(text_color).small());
                    }
                });
            });
    });
}
