//! Theme constants and one-time style application for the egui app.

use super::GeoEditApp;
use crate::editor::Tone;
use eframe::egui::{self, Color32, Stroke, Visuals};

pub(super) const COLOR_BG_PRIMARY: Color32 = Color32::from_rgb(0x0d, 0x11, 0x17);
pub(super) const COLOR_BG_SECONDARY: Color32 = Color32::from_rgb(0x16, 0x1b, 0x22);
pub(super) const COLOR_TEXT_PRIMARY: Color32 = Color32::from_rgb(0xc9, 0xd1, 0xd9);
pub(super) const COLOR_TEXT_SECONDARY: Color32 = Color32::from_rgb(0x8b, 0x94, 0x9e);
pub(super) const COLOR_TEXT_MUTED: Color32 = Color32::from_rgb(0x6e, 0x76, 0x81);
pub(super) const COLOR_ACCENT: Color32 = Color32::from_rgb(0xE5, 0x70, 0x00);
pub(super) const COLOR_BORDER: Color32 = Color32::from_rgb(0x30, 0x36, 0x3d);
pub(super) const COLOR_STATUS_INFO: Color32 = Color32::from_rgb(0xe3, 0xb3, 0x41);
pub(super) const COLOR_STATUS_FAILURE: Color32 = Color32::from_rgb(0xf8, 0x51, 0x49);

pub(super) const COLOR_MAP_BG: Color32 = Color32::from_rgb(0xf2, 0xef, 0xe9);
pub(super) const COLOR_TILE_GRID: Color32 = Color32::from_rgb(0xd0, 0xcc, 0xc4);
pub(super) const COLOR_TILE_LABEL: Color32 = Color32::from_rgb(0xa8, 0xa2, 0x98);

/// Feature stroke `#ffcc33`.
pub(super) const COLOR_FEATURE_STROKE: Color32 = Color32::from_rgb(0xff, 0xcc, 0x33);
pub(super) const FEATURE_STROKE_WIDTH: f32 = 5.0;
pub(super) const FEATURE_POINT_RADIUS: f32 = 7.0;
/// Selected feature stroke `rgba(255, 255, 255, 0.7)`.
pub(super) const SELECTED_STROKE_RGBA: [u8; 4] = [0xff, 0xff, 0xff, 0xb3];
pub(super) const COLOR_SELECTED_FILL: Color32 = Color32::from_rgb(0xee, 0xee, 0xee);
pub(super) const COLOR_SKETCH: Color32 = Color32::from_rgb(0x3B, 0x82, 0xF6);

pub(super) fn tone_color(tone: Tone) -> Color32 {
    match tone {
        Tone::Info => COLOR_STATUS_INFO,
        Tone::Failure => COLOR_STATUS_FAILURE,
    }
}

/// Polygon fill `rgba(255, 0, 0, 0.2)`.
pub(super) fn feature_fill_color() -> Color32 {
    Color32::from_rgba_unmultiplied(0xff, 0x00, 0x00, 0x33)
}

pub(super) fn selected_stroke_color() -> Color32 {
    Color32::from_rgba_unmultiplied(
        SELECTED_STROKE_RGBA[0],
        SELECTED_STROKE_RGBA[1],
        SELECTED_STROKE_RGBA[2],
        SELECTED_STROKE_RGBA[3],
    )
}

impl GeoEditApp {
    pub(super) fn ensure_style(&mut self, ctx: &egui::Context) {
        if self.style_applied {
            return;
        }

        let mut style = (*ctx.style()).clone();
        style.visuals = Visuals::dark();
        style.visuals.override_text_color = Some(COLOR_TEXT_PRIMARY);
        style.visuals.window_fill = COLOR_BG_PRIMARY;
        style.visuals.panel_fill = COLOR_BG_SECONDARY;
        style.visuals.extreme_bg_color = COLOR_BG_PRIMARY;
        style.visuals.window_stroke = Stroke::new(1.0, COLOR_BORDER);
        style.visuals.hyperlink_color = COLOR_ACCENT;
        style.visuals.selection.stroke = Stroke::new(1.0, COLOR_ACCENT);
        style.spacing.item_spacing = egui::vec2(8.0, 6.0);
        style.spacing.button_padding = egui::vec2(12.0, 6.0);
        ctx.set_style(style);

        self.style_applied = true;
    }
}
