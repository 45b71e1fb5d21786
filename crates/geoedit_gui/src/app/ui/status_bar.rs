//! Bottom status bar rendering for edit state and server metadata.

use super::super::style::*;
use super::super::GeoEditApp;
use eframe::egui;

impl GeoEditApp {
    /// Renders the bottom status bar with mode, pointer position and server URL.
    pub(crate) fn render_status_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    let mode = self.editor.mode();
                    let mode_label = match mode.draw_type {
                        Some(draw_type) if mode.mode == crate::editor::InteractionMode::Draw => {
                            format!("Draw {}", draw_type.label())
                        }
                        _ => format!("{}", mode.mode),
                    };
                    ui.label(egui::RichText::new(mode_label).color(COLOR_TEXT_SECONDARY));
                    if let Some(status) = self.editor.feedback().status() {
                        ui.separator();
                        ui.label(egui::RichText::new(&status.text).color(tone_color(status.tone)));
                    }
                });
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(
                        egui::RichText::new(format!("WFS: {}", self.server_label))
                            .small()
                            .color(COLOR_TEXT_SECONDARY),
                    );
                    ui.separator();
                    ui.label(
                        egui::RichText::new(format!("z {:.1}", self.editor.view().zoom()))
                            .small()
                            .color(COLOR_TEXT_MUTED),
                    );
                    if let Some(pointer) = self.pointer_map {
                        ui.separator();
                        ui.label(
                            egui::RichText::new(format!("{:.0}, {:.0}", pointer.x, pointer.y))
                                .small()
                                .monospace()
                                .color(COLOR_TEXT_MUTED),
                        );
                    }
                });
            });
    }
}
