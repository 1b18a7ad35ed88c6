//! Top bar: title, navigation tabs and API status.

use egui::{self, Align, Layout, RichText};
use unibot_core::health::ApiStatus;
use crate::state::{Route, UiState};
use crate::theme::*;

/// Render the header. Returns the route the user clicked, if it differs
/// from the current one.
pub fn header_bar(ui: &mut egui::Ui, state: &UiState) -> Option<Route> {
    let mut selected = None;

    ui.horizontal(|ui| {
        ui.label(
            RichText::new("University Chatbot")
                .strong()
                .color(ACCENT)
                .size(16.0),
        );
        ui.separator();

        for route in Route::all() {
            if ui
                .selectable_label(state.route == *route, route.label())
                .clicked()
                && state.route != *route
            {
                selected = Some(*route);
            }
        }

        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
            let color = match state.api_status {
                ApiStatus::Online { .. } => SUCCESS,
                ApiStatus::Unreachable => ERROR,
                ApiStatus::Unknown => TEXT_SECONDARY,
            };
            ui.label(RichText::new(state.api_status.label()).color(color).small());
            ui.separator();
            ui.label(
                RichText::new(&state.status_text)
                    .color(TEXT_SECONDARY)
                    .small(),
            );
        });
    });

    selected
}
