//! Native egui shell around the headless map editor.

mod import;
mod style;
mod tiles;
mod ui;

use crate::editor::{DrawType, InteractionMode, MapEditor, ModeSelection};
use eframe::egui;
use geoedit_core::Position;
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{info, warn};

pub(crate) use import::read_import_file;
pub(crate) use tiles::TileCache;

#[doc = "Default initial window size for native GUI startup."]
pub(crate) const DEFAULT_WINDOW_SIZE: [f32; 2] = [1200.0, 800.0];
#[doc = "Minimum enforced window size to keep the controls and map usable."]
pub(crate) const MIN_WINDOW_SIZE: [f32; 2] = [720.0, 480.0];
/// Upper bound between frames so backend events are picked up while idle.
const BACKEND_POLL_INTERVAL: Duration = Duration::from_millis(100);
/// Scroll distance (points) per zoom level.
const SCROLL_PER_ZOOM_LEVEL: f32 = 240.0;

/// Native egui application shell.
///
/// Owns the [`MapEditor`], the base map tiles and the mode form state; all
/// network work happens on worker threads so `update` never blocks.
pub(crate) struct GeoEditApp {
    editor: MapEditor,
    tiles: TileCache,
    /// Mode picked in the form; mirrors the editor unless a switch failed.
    form_mode: InteractionMode,
    form_draw_type: DrawType,
    server_label: String,
    /// Current map drag pans the view instead of editing a vertex.
    panning: bool,
    pointer_map: Option<Position>,
    style_applied: bool,
}

impl GeoEditApp {
    pub(crate) fn new(editor: MapEditor, tiles: TileCache, server_label: impl Into<String>) -> Self {
        let form_mode = editor.mode().mode;
        Self {
            editor,
            tiles,
            form_mode,
            form_draw_type: DrawType::LineString,
            server_label: server_label.into(),
            panning: false,
            pointer_map: None,
            style_applied: false,
        }
    }

    /// Push the form's mode and draw type into the editor.
    pub(crate) fn apply_mode_form(&mut self) {
        let selection = match self.form_mode {
            InteractionMode::Draw => ModeSelection::draw(self.form_draw_type),
            InteractionMode::Modify => ModeSelection::modify(),
            InteractionMode::Delete => ModeSelection::delete(),
        };
        info!(mode = %selection.mode, draw_type = ?selection.draw_type, "mode changed");
        if let Err(err) = self.editor.on_mode_change(selection) {
            self.editor.report_error(&err);
        }
    }

    /// Start a map drag. egui reports the drag only after the pointer has
    /// travelled past its threshold, so the press is hit-tested at `press`
    /// and the vertex then follows to `current`.
    pub(crate) fn begin_drag(&mut self, press: Position, current: Position) {
        self.panning = !self.editor.pointer_down(press);
        if !self.panning {
            self.editor.pointer_move(current);
        }
    }

    pub(crate) fn request_delete(&mut self) {
        if let Err(err) = self.editor.on_delete_requested() {
            self.editor.report_error(&err);
        }
    }

    /// Read a GeoJSON file and replace the editable layer with its features.
    pub(crate) fn import_path(&mut self, path: &Path) {
        let text = match read_import_file(path) {
            Ok(text) => text,
            Err(err) => {
                warn!("reading {} failed: {}", path.display(), err);
                self.editor
                    .feedback_mut()
                    .failure(format!("Reading {} failed: {}", path.display(), err));
                return;
            }
        };
        if let Err(err) = self.editor.load_local_file(&text) {
            self.editor.report_error(&err);
        }
    }

    fn import_from_dialog(&mut self) {
        let picked = rfd::FileDialog::new()
            .set_title("Import GeoJSON")
            .add_filter("GeoJSON", &["geojson", "json"])
            .pick_file();
        if let Some(path) = picked {
            self.import_path(&path);
        }
    }
}

impl eframe::App for GeoEditApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ensure_style(ctx);

        self.editor.feedback_mut().expire(Instant::now());
        self.editor.poll_backend();
        self.tiles.poll(ctx);

        self.render_controls(ctx);
        self.render_status_bar(ctx);
        self.render_map(ctx);
        self.render_toasts(ctx);

        let mut repaint_after = BACKEND_POLL_INTERVAL;
        if let Some(toast) = self.editor.feedback().toasts().front() {
            let until = toast.expires_at.saturating_duration_since(Instant::now());
            repaint_after = repaint_after.min(until);
        }
        ctx.request_repaint_after(repaint_after);
    }
}
