//! Map canvas: paints base map tiles and features, routes pointer input.

use super::super::style::*;
use super::super::{GeoEditApp, SCROLL_PER_ZOOM_LEVEL};
use crate::editor::MapView;
use eframe::egui::{self, Pos2, Rect, Sense, Shape, Stroke};
use geo::TriangulateEarcut;
use geoedit_core::{Geometry, Position};

fn to_pos2(view: &MapView, rect: Rect, position: Position) -> Pos2 {
    let [x, y] = view.to_screen(position);
    Pos2::new(rect.min.x + x, rect.min.y + y)
}

fn to_map(view: &MapView, rect: Rect, pos: Pos2) -> Position {
    view.to_map([pos.x - rect.min.x, pos.y - rect.min.y])
}

/// Triangulate a polygon (holes included) into a filled mesh.
fn fill_mesh(
    polygon: &geo::Polygon<f64>,
    fill: egui::Color32,
    project: impl Fn(Position) -> Pos2,
) -> egui::Mesh {
    let raw = polygon.earcut_triangles_raw();
    let mut mesh = egui::Mesh::default();
    for xy in raw.vertices.chunks_exact(2) {
        mesh.colored_vertex(project(Position::new(xy[0], xy[1])), fill);
    }
    for tri in raw.triangle_indices.chunks_exact(3) {
        mesh.add_triangle(tri[0] as u32, tri[1] as u32, tri[2] as u32);
    }
    mesh
}

fn paint_geometry(
    painter: &egui::Painter,
    view: &MapView,
    rect: Rect,
    geometry: &Geometry,
    stroke: Stroke,
    fill: egui::Color32,
) {
    let project = |p: Position| to_pos2(view, rect, p);
    match geo::Geometry::<f64>::from(geometry) {
        geo::Geometry::Polygon(polygon) => {
            painter.add(Shape::mesh(fill_mesh(&polygon, fill, project)));
        }
        geo::Geometry::MultiPolygon(polygons) => {
            for polygon in &polygons {
                painter.add(Shape::mesh(fill_mesh(polygon, fill, project)));
            }
        }
        _ => {}
    }

    for part in geometry.parts() {
        let points: Vec<Pos2> = part.positions.iter().map(|p| project(*p)).collect();
        match points.as_slice() {
            [] => {}
            [single] => {
                painter.circle(*single, FEATURE_POINT_RADIUS, stroke.color, Stroke::NONE);
            }
            _ if part.closed => {
                painter.add(Shape::closed_line(points, stroke));
            }
            _ => {
                painter.add(Shape::line(points, stroke));
            }
        }
    }
}

impl GeoEditApp {
    /// Renders the central map panel and handles pan, zoom and edit gestures.
    pub(crate) fn render_map(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE.fill(COLOR_MAP_BG))
            .show(ctx, |ui| {
                let (response, painter) =
                    ui.allocate_painter(ui.available_size(), Sense::click_and_drag());
                let rect = response.rect;
                self.editor
                    .view_mut()
                    .set_size([rect.width(), rect.height()]);

                self.handle_map_input(ui, &response, rect);
                self.paint_tiles(&painter, rect);
                self.paint_features(&painter, rect);
            });
    }

    fn handle_map_input(&mut self, ui: &egui::Ui, response: &egui::Response, rect: Rect) {
        self.pointer_map = response
            .hover_pos()
            .map(|pos| to_map(self.editor.view(), rect, pos));

        if response.drag_started() {
            let current = response.interact_pointer_pos();
            let press = ui.input(|i| i.pointer.press_origin()).or(current);
            match (press, current) {
                (Some(press), Some(current)) => {
                    let view = self.editor.view();
                    let (press, current) = (to_map(view, rect, press), to_map(view, rect, current));
                    self.begin_drag(press, current);
                }
                _ => self.panning = true,
            }
        }
        if response.dragged() {
            if self.panning {
                let delta = response.drag_delta();
                self.editor.view_mut().pan_by_pixels(delta.x, delta.y);
            } else if let Some(pos) = response.interact_pointer_pos() {
                let map = to_map(self.editor.view(), rect, pos);
                self.editor.pointer_move(map);
            }
        }
        if response.drag_stopped() {
            if !self.panning {
                let map = response
                    .interact_pointer_pos()
                    .map(|pos| to_map(self.editor.view(), rect, pos));
                self.editor
                    .pointer_up(map.unwrap_or_default());
            }
            self.panning = false;
        }

        if let Some(pos) = response.interact_pointer_pos() {
            let map = to_map(self.editor.view(), rect, pos);
            if response.clicked() {
                self.editor.click(map);
            }
            if response.double_clicked() {
                self.editor.double_click(map);
            }
        }

        if response.hovered() {
            let scroll = ui.input(|i| i.smooth_scroll_delta.y);
            if scroll != 0.0 {
                if let Some(pos) = response.hover_pos() {
                    let anchor = [pos.x - rect.min.x, pos.y - rect.min.y];
                    self.editor
                        .view_mut()
                        .zoom_at(f64::from(scroll / SCROLL_PER_ZOOM_LEVEL), anchor);
                }
            }
        }
        if ui.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.editor.cancel_gesture();
        }
    }

    /// Paint loaded tiles; tiles still downloading (or failed) show as a
    /// labelled grid cell.
    fn paint_tiles(&mut self, painter: &egui::Painter, rect: Rect) {
        let view = self.editor.view();
        let raster = self.editor.raster();
        if !raster.visible {
            return;
        }
        let tiles = raster.visible_tiles(&view.visible_extent(), view.resolution());
        self.tiles.request(raster, &tiles);
        self.tiles.evict(&tiles);

        let grid = Stroke::new(1.0, COLOR_TILE_GRID);
        let uv = Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0));
        for tile in tiles {
            let extent = raster.tile_extent(tile);
            let tile_rect = Rect::from_two_pos(
                to_pos2(view, rect, Position::new(extent.min_x(), extent.max_y())),
                to_pos2(view, rect, Position::new(extent.max_x(), extent.min_y())),
            );
            if let Some(texture) = self.tiles.texture(tile) {
                painter.image(texture.id(), tile_rect, uv, egui::Color32::WHITE);
                continue;
            }
            painter.rect_stroke(tile_rect, 0.0, grid, egui::StrokeKind::Inside);
            if tile_rect.width() >= 96.0 {
                painter.text(
                    tile_rect.left_top() + egui::vec2(6.0, 4.0),
                    egui::Align2::LEFT_TOP,
                    format!("{}/{}/{}", tile.z, tile.x, tile.y),
                    egui::FontId::monospace(10.0),
                    COLOR_TILE_LABEL,
                );
            }
        }
        painter.text(
            rect.right_bottom() - egui::vec2(6.0, 4.0),
            egui::Align2::RIGHT_BOTTOM,
            &raster.attribution,
            egui::FontId::proportional(11.0),
            COLOR_TEXT_MUTED,
        );
    }

    fn paint_features(&self, painter: &egui::Painter, rect: Rect) {
        let view = self.editor.view();
        let selection = self.editor.selection();
        let stroke = Stroke::new(FEATURE_STROKE_WIDTH, COLOR_FEATURE_STROKE);
        let selected_stroke = Stroke::new(FEATURE_STROKE_WIDTH, selected_stroke_color());

        for item in self.editor.layer().iter() {
            let Some(geometry) = item.feature.geometry.as_ref() else {
                continue;
            };
            if selection == Some(item.key) {
                paint_geometry(painter, view, rect, geometry, selected_stroke, COLOR_SELECTED_FILL);
            } else {
                paint_geometry(painter, view, rect, geometry, stroke, feature_fill_color());
            }
        }

        if let Some(drag) = self.editor.active_drag() {
            let handle = self
                .editor
                .layer()
                .get(drag.key)
                .and_then(|feature| feature.geometry.as_ref())
                .and_then(|geometry| {
                    let parts = geometry.parts();
                    parts
                        .get(drag.vertex.part)
                        .and_then(|part| part.positions.get(drag.vertex.index))
                        .copied()
                });
            if let Some(handle) = handle {
                painter.circle(
                    to_pos2(view, rect, handle),
                    FEATURE_POINT_RADIUS + 1.0,
                    COLOR_SKETCH,
                    Stroke::new(1.0, COLOR_MAP_BG),
                );
            }
        }

        let sketch: Vec<Pos2> = self
            .editor
            .sketch()
            .iter()
            .map(|p| to_pos2(view, rect, *p))
            .collect();
        let sketch_stroke = Stroke::new(2.0, COLOR_SKETCH);
        if sketch.len() > 1 {
            painter.add(Shape::line(sketch.clone(), sketch_stroke));
        }
        for point in sketch {
            painter.circle_stroke(point, 4.0, sketch_stroke);
        }
        if let Some(pointer) = self.pointer_map.filter(|_| !self.editor.sketch().is_empty()) {
            if let Some(last) = self.editor.sketch().last() {
                painter.line_segment(
                    [to_pos2(view, rect, *last), to_pos2(view, rect, pointer)],
                    Stroke::new(1.0, COLOR_SKETCH),
                );
            }
        }
    }
}
