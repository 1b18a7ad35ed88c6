//! Admin dashboard: pipeline statistics and the document list.

use egui::{self, Align, Layout, ProgressBar, RichText, Vec2};
use unibot_core::dashboard::{pipeline_status, processing_fraction, processing_percent, PipelineStatus, StatsState};
use unibot_core::documents::DocumentListState;
use unibot_types::api::VectorStats;
use unibot_types::document::Document;
use crate::format::{format_date, format_file_size};
use crate::theme::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardAction {
    /// Reload stats and the document list
    Refresh,
    RefreshStats,
    RefreshDocuments,
    Delete { id: String, title: String },
}

pub fn dashboard_panel(
    ui: &mut egui::Ui,
    stats: &StatsState,
    documents: &DocumentListState,
) -> Option<DashboardAction> {
    let mut action = None;

    egui::Frame::default()
        .fill(BG_PRIMARY)
        .inner_margin(PANEL_PADDING)
        .show(ui, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.heading(RichText::new("Admin Dashboard").color(TEXT_PRIMARY).strong());
                        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                            let idle = !stats.loading && !documents.loading;
                            if ui.add_enabled(idle, egui::Button::new("Refresh")).clicked() {
                                action = Some(DashboardAction::Refresh);
                            }
                        });
                    });
                    ui.separator();

                    if let Some(a) = stats_section(ui, stats) {
                        action = Some(a);
                    }

                    ui.add_space(16.0);

                    if let Some(a) = documents_section(ui, documents) {
                        action = Some(a);
                    }
                });
        });

    action
}

fn stats_section(ui: &mut egui::Ui, state: &StatsState) -> Option<DashboardAction> {
    if state.loading && state.stats.is_none() {
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label(RichText::new("Loading statistics...").color(TEXT_SECONDARY));
        });
        return None;
    }

    if let Some(error) = &state.error {
        let mut retry = false;
        ui.horizontal(|ui| {
            ui.label(RichText::new(error).color(ERROR));
            retry = ui.button("Retry").clicked();
        });
        if retry {
            return Some(DashboardAction::RefreshStats);
        }
    }

    let Some(stats) = &state.stats else {
        return None;
    };

    ui.horizontal_wrapped(|ui| {
        stat_card(ui, "Total Documents", stats.database.total_documents, TEXT_PRIMARY);
        stat_card(ui, "Processed", stats.database.processed_documents, SUCCESS);
        stat_card(ui, "Processing Queue", stats.database.unprocessed_documents, WARNING);
        stat_card(ui, "Vector Chunks", stats.vector_database.total_chunks, ACCENT);
    });

    ui.add_space(8.0);
    processing_status(ui, stats);
    None
}

fn stat_card(ui: &mut egui::Ui, title: &str, value: u64, color: egui::Color32) {
    egui::Frame::default()
        .fill(BG_SECONDARY)
        .corner_radius(PANEL_ROUNDING)
        .inner_margin(12.0)
        .show(ui, |ui| {
            ui.set_min_size(Vec2::new(140.0, 56.0));
            ui.vertical(|ui| {
                ui.label(RichText::new(title).color(TEXT_SECONDARY).small());
                ui.label(RichText::new(value.to_string()).color(color).strong().size(22.0));
            });
        });
}

fn processing_status(ui: &mut egui::Ui, stats: &VectorStats) {
    let status = pipeline_status(stats);
    egui::Frame::default()
        .fill(BG_SECONDARY)
        .corner_radius(PANEL_ROUNDING)
        .inner_margin(12.0)
        .show(ui, |ui| {
            ui.set_min_width(ui.available_width());
            ui.label(RichText::new("Processing Status").color(TEXT_PRIMARY).strong());
            ui.horizontal(|ui| {
                ui.label(format!("Documents processed: {}%", processing_percent(stats)));
                ui.separator();
                ui.label(format!("Chunks indexed: {}", stats.vector_database.total_chunks));
                ui.separator();
                let color = match status {
                    PipelineStatus::Idle => SUCCESS,
                    PipelineStatus::Active => WARNING,
                };
                ui.label(RichText::new(format!("Pipeline: {}", status.label())).color(color));
            });

            let total = stats.database.total_documents;
            if total > 0 {
                ui.add(
                    ProgressBar::new(processing_fraction(stats))
                        .text(format!("{} / {} processed", stats.database.processed_documents, total)),
                );
            }
        });
}

fn documents_section(ui: &mut egui::Ui, state: &DocumentListState) -> Option<DashboardAction> {
    let mut action = None;

    ui.horizontal(|ui| {
        ui.label(
            RichText::new(format!("Documents ({})", state.documents.len()))
                .color(TEXT_PRIMARY)
                .strong()
                .size(16.0),
        );
        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
            if ui.add_enabled(!state.loading, egui::Button::new("Refresh")).clicked() {
                action = Some(DashboardAction::RefreshDocuments);
            }
        });
    });
    ui.separator();

    if state.loading {
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label(RichText::new("Loading documents...").color(TEXT_SECONDARY));
        });
        return action;
    }

    if let Some(error) = &state.error {
        ui.label(RichText::new(error).color(ERROR));
        ui.add_space(4.0);
    }

    if state.documents.is_empty() {
        ui.label(RichText::new("No documents yet.").color(TEXT_PRIMARY));
        ui.label(RichText::new("Upload your first document to get started.").color(TEXT_SECONDARY));
        return action;
    }

    for document in &state.documents {
        let deleting = state.is_deleting(&document.id);
        if document_row(ui, document, deleting) {
            action = Some(DashboardAction::Delete {
                id: document.id.clone(),
                title: document.title.clone(),
            });
        }
        ui.add_space(4.0);
    }

    action
}

/// Returns true when Delete was clicked.
fn document_row(ui: &mut egui::Ui, document: &Document, deleting: bool) -> bool {
    let mut delete = false;
    let (badge_bg, badge_fg) = category_colors(document.category());

    egui::Frame::default()
        .fill(BG_SECONDARY)
        .corner_radius(PANEL_ROUNDING)
        .inner_margin(10.0)
        .show(ui, |ui| {
            ui.set_min_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    ui.horizontal(|ui| {
                        ui.label(RichText::new(&document.title).color(TEXT_PRIMARY).strong());
                        egui::Frame::default()
                            .fill(badge_bg)
                            .corner_radius(BUBBLE_ROUNDING)
                            .inner_margin(Vec2::new(6.0, 1.0))
                            .show(ui, |ui| {
                                ui.label(RichText::new(document.category().label()).color(badge_fg).small());
                            });
                    });

                    let mut details = vec![
                        document.original_filename.clone(),
                        format_file_size(document.file_size),
                    ];
                    if document.is_processed {
                        details.push(format!("{} chunks", document.chunk_count));
                    }
                    ui.label(RichText::new(details.join(" • ")).color(TEXT_SECONDARY).small());
                    ui.label(
                        RichText::new(format!("Uploaded {}", format_date(&document.uploaded_at)))
                            .color(TEXT_SECONDARY)
                            .small(),
                    );
                });

                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    let label = if deleting { "Deleting..." } else { "Delete" };
                    delete = ui
                        .add_enabled(!deleting, egui::Button::new(RichText::new(label).color(ERROR)))
                        .clicked();

                    let (status, color) = if document.is_processed {
                        ("Processed", SUCCESS)
                    } else {
                        ("Processing", WARNING)
                    };
                    ui.label(RichText::new(status).color(color).small());
                });
            });
        });

    delete
}
