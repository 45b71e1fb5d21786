//! Mode form and edit actions.

use super::super::style::*;
use super::super::GeoEditApp;
use crate::editor::{DrawType, InteractionMode};
use eframe::egui;

fn mode_hint(mode: InteractionMode) -> &'static str {
    match mode {
        InteractionMode::Draw => "Click to add vertices, double-click to finish. Esc cancels.",
        InteractionMode::Modify => "Drag a vertex to move it, drag an edge to add one.",
        InteractionMode::Delete => "Click a feature to select it, then delete.",
    }
}

impl GeoEditApp {
    /// Renders the left control panel and applies mode changes.
    pub(crate) fn render_controls(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("controls")
            .resizable(false)
            .default_width(210.0)
            .show(ctx, |ui| {
                ui.add_space(8.0);
                ui.label(egui::RichText::new("Edit mode").strong());

                let before = (self.form_mode, self.form_draw_type);
                ui.radio_value(&mut self.form_mode, InteractionMode::Draw, "Draw");
                ui.radio_value(&mut self.form_mode, InteractionMode::Modify, "Modify");
                ui.radio_value(&mut self.form_mode, InteractionMode::Delete, "Delete");

                ui.add_enabled_ui(self.form_mode == InteractionMode::Draw, |ui| {
                    egui::ComboBox::from_label("Geometry")
                        .selected_text(self.form_draw_type.label())
                        .show_ui(ui, |ui| {
                            for draw_type in DrawType::ALL {
                                ui.selectable_value(
                                    &mut self.form_draw_type,
                                    draw_type,
                                    draw_type.label(),
                                );
                            }
                        });
                });
                let mode_changed = before.0 != self.form_mode;
                let draw_type_changed =
                    self.form_mode == InteractionMode::Draw && before.1 != self.form_draw_type;
                if mode_changed || draw_type_changed {
                    self.apply_mode_form();
                }

                ui.separator();
                let delete_enabled = self.form_mode == InteractionMode::Delete;
                if ui
                    .add_enabled(delete_enabled, egui::Button::new("Delete selected"))
                    .clicked()
                {
                    self.request_delete();
                }
                if ui.button("Import GeoJSON...").clicked() {
                    self.import_from_dialog();
                }

                ui.separator();
                ui.label(
                    egui::RichText::new(format!("{} features", self.editor.layer().len()))
                        .color(COLOR_TEXT_SECONDARY),
                );
                ui.label(
                    egui::RichText::new(mode_hint(self.form_mode))
                        .small()
                        .color(COLOR_TEXT_MUTED),
                );
            });
    }
}
