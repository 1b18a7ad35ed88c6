//! Upload panel: drop zone, metadata form and upload status.

use egui::{self, RichText, Stroke, Vec2};
use unibot_core::upload::{UploadForm, UploadStatus};
use unibot_types::document::Category;
use crate::format::format_megabytes;
use crate::theme::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadAction {
    /// Open the browser file dialog
    Browse,
    Upload,
    /// Drop the selected file and clear the form
    Clear,
}

/// Render the upload form, editing it in place.
/// `drag_over` highlights the drop zone while files hover the window.
pub fn upload_panel(ui: &mut egui::Ui, form: &mut UploadForm, drag_over: bool) -> Option<UploadAction> {
    let mut action = None;
    let uploading = form.is_uploading();

    egui::Frame::default()
        .fill(BG_PRIMARY)
        .inner_margin(PANEL_PADDING)
        .show(ui, |ui| {
            ui.set_max_width(640.0);
            ui.heading(RichText::new("Upload Document").color(TEXT_PRIMARY).strong());
            ui.label(
                RichText::new("Add PDF documents to the chatbot's knowledge base.")
                    .color(TEXT_SECONDARY),
            );
            ui.add_space(8.0);

            let border = if drag_over { ACCENT } else { BG_SURFACE };
            egui::Frame::default()
                .fill(BG_SECONDARY)
                .stroke(Stroke::new(2.0, border))
                .corner_radius(PANEL_ROUNDING)
                .inner_margin(16.0)
                .show(ui, |ui| {
                    ui.set_min_width(ui.available_width());
                    ui.vertical_centered(|ui| match &form.file {
                        Some(file) => {
                            ui.label(RichText::new(&file.name).color(TEXT_PRIMARY).strong());
                            ui.label(
                                RichText::new(format_megabytes(file.size()))
                                    .color(TEXT_SECONDARY)
                                    .small(),
                            );
                            if ui.add_enabled(!uploading, egui::Button::new("Remove")).clicked() {
                                action = Some(UploadAction::Clear);
                            }
                        }
                        None => {
                            ui.label(RichText::new("Drop a PDF here").color(TEXT_PRIMARY));
                            if ui.add_enabled(!uploading, egui::Button::new("Browse files")).clicked() {
                                action = Some(UploadAction::Browse);
                            }
                            ui.label(RichText::new("PDF files only, up to 10MB").color(TEXT_SECONDARY).small());
                        }
                    });
                });

            ui.add_space(8.0);

            ui.label(RichText::new("Title").color(TEXT_PRIMARY));
            ui.add_enabled(
                !uploading,
                egui::TextEdit::singleline(&mut form.metadata.title)
                    .hint_text("Document title")
                    .desired_width(f32::INFINITY),
            );

            ui.label(RichText::new("Description").color(TEXT_PRIMARY));
            ui.add_enabled(
                !uploading,
                egui::TextEdit::multiline(&mut form.metadata.description)
                    .hint_text("Brief description of the document")
                    .desired_rows(3)
                    .desired_width(f32::INFINITY),
            );

            ui.label(RichText::new("Category").color(TEXT_PRIMARY));
            ui.add_enabled_ui(!uploading, |ui| {
                egui::ComboBox::from_id_salt("upload_category")
                    .selected_text(form.metadata.category.label())
                    .show_ui(ui, |ui| {
                        for category in Category::all() {
                            ui.selectable_value(&mut form.metadata.category, *category, category.label());
                        }
                    });
            });

            ui.add_space(12.0);

            let enabled = form.can_upload();
            let label = if uploading { "Uploading..." } else { "Upload Document" };
            let button = ui.add_enabled(
                enabled,
                egui::Button::new(RichText::new(label).color(TEXT_ON_ACCENT))
                    .fill(if enabled { ACCENT } else { BG_SURFACE })
                    .corner_radius(PANEL_ROUNDING)
                    .min_size(Vec2::new(160.0, 32.0)),
            );
            if button.clicked() {
                action = Some(UploadAction::Upload);
            }

            if let Some(message) = form.status.message() {
                ui.add_space(8.0);
                let color = match form.status {
                    UploadStatus::Success(_) => SUCCESS,
                    UploadStatus::Error(_) => ERROR,
                    _ => TEXT_SECONDARY,
                };
                ui.horizontal(|ui| {
                    if uploading {
                        ui.spinner();
                    }
                    ui.label(RichText::new(message).color(color));
                });
            }
        });

    action
}
