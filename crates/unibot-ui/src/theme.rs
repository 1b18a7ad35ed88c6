//! UI theme constants

use egui::{Color32, CornerRadius, Stroke, Vec2};
use unibot_types::document::Category;

pub const BG_PRIMARY: Color32 = Color32::from_rgb(249, 250, 251);
pub const BG_SECONDARY: Color32 = Color32::from_rgb(255, 255, 255);
pub const BG_SURFACE: Color32 = Color32::from_rgb(229, 231, 235);
pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(17, 24, 39);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(107, 114, 128);
pub const TEXT_ON_ACCENT: Color32 = Color32::WHITE;
pub const ACCENT: Color32 = Color32::from_rgb(37, 99, 235);
pub const SUCCESS: Color32 = Color32::from_rgb(22, 163, 74);
pub const ERROR: Color32 = Color32::from_rgb(220, 38, 38);
pub const ERROR_BG: Color32 = Color32::from_rgb(254, 242, 242);
pub const WARNING: Color32 = Color32::from_rgb(202, 138, 4);
pub const USER_BUBBLE: Color32 = ACCENT;
pub const BOT_BUBBLE: Color32 = Color32::from_rgb(243, 244, 246);

pub const PANEL_ROUNDING: CornerRadius = CornerRadius::same(6);
pub const BUBBLE_ROUNDING: CornerRadius = CornerRadius::same(12);
pub const PANEL_PADDING: Vec2 = Vec2::new(12.0, 8.0);

/// Badge (background, text) colours per document category
pub fn category_colors(category: Category) -> (Color32, Color32) {
    match category {
        Category::General => (Color32::from_rgb(243, 244, 246), Color32::from_rgb(31, 41, 55)),
        Category::Admissions => (Color32::from_rgb(219, 234, 254), Color32::from_rgb(30, 64, 175)),
        Category::Academics => (Color32::from_rgb(220, 252, 231), Color32::from_rgb(22, 101, 52)),
        Category::StudentLife => (Color32::from_rgb(243, 232, 255), Color32::from_rgb(107, 33, 168)),
        Category::Policies => (Color32::from_rgb(254, 226, 226), Color32::from_rgb(153, 27, 27)),
        Category::Financial => (Color32::from_rgb(254, 249, 195), Color32::from_rgb(133, 77, 14)),
    }
}

/// Apply the light theme to an egui context
pub fn apply_theme(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();

    style.visuals = egui::Visuals::light();
    style.visuals.panel_fill = BG_PRIMARY;
    style.visuals.window_fill = BG_SECONDARY;

    style.visuals.widgets.inactive.bg_fill = BG_SURFACE;
    style.visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, TEXT_SECONDARY);
    style.visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, TEXT_PRIMARY);
    style.visuals.widgets.active.bg_fill = ACCENT;
    style.visuals.widgets.active.fg_stroke = Stroke::new(1.0, TEXT_ON_ACCENT);

    style.visuals.selection.bg_fill = ACCENT.linear_multiply(0.3);
    style.visuals.selection.stroke = Stroke::new(1.0, ACCENT);

    style.spacing.item_spacing = Vec2::new(8.0, 6.0);

    ctx.set_style(style);
}
