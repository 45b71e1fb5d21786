//! Map editor controller: routes gestures to interactions and edits to the backend.

use super::feedback::Feedback;
use super::hit::{hit_feature, nearest_segment, nearest_vertex, snap_position, ExcludedPart};
use super::interaction::{
    DrawInteraction, GestureEvent, Interaction, InteractionKind, InteractionMode, InteractionSet,
    ModeSelection, ModifyInteraction, SelectInteraction, SnapInteraction, VertexDrag,
    PIXEL_TOLERANCE,
};
use super::layer::VectorSource;
use super::raster::RasterLayer;
use super::view::MapView;
use crate::backend::{BackendHandle, CoreCmd, CoreEvent, FeatureKey};
use geoedit_core::constants::{DEFAULT_VIEW_CENTER, DEFAULT_VIEW_ZOOM, FIT_PADDING_PX};
use geoedit_core::projection::reproject_collection;
use geoedit_core::{AppError, Feature, FeatureCollection, Position, Projection, VertexRef};
use tracing::{debug, info, warn};

/// Owns the map view, both layers and the installed interactions.
///
/// Everything here runs on the UI thread; network work is delegated to the
/// backend worker through [`BackendHandle`].
pub struct MapEditor {
    backend: BackendHandle,
    view: MapView,
    raster: RasterLayer,
    layer: VectorSource,
    interactions: InteractionSet,
    mode: ModeSelection,
    selection: Option<FeatureKey>,
    feedback: Feedback,
}

impl MapEditor {
    /// Build the map, install the default Modify interaction and request the
    /// initial feature collection.
    pub fn initialize(backend: BackendHandle) -> Self {
        let mut editor = Self {
            backend,
            view: MapView::new(
                Position::from(DEFAULT_VIEW_CENTER),
                DEFAULT_VIEW_ZOOM,
                MapView::default_extent(),
            ),
            raster: RasterLayer::osm(),
            layer: VectorSource::default(),
            interactions: InteractionSet::default(),
            mode: ModeSelection::modify(),
            selection: None,
            feedback: Feedback::default(),
        };
        if let Err(err) = editor.on_mode_change(ModeSelection::modify()) {
            editor.report_error(&err);
        }
        if let Err(err) = editor.send(CoreCmd::FetchCollection) {
            editor.report_error(&err);
        }
        editor
    }

    /// Replace the installed interactions with the ones for `selection`.
    ///
    /// Selection and any in-progress sketch are dropped first.
    ///
    /// # Errors
    /// Returns a precondition error when Draw is requested without a draw
    /// type; no interaction is installed in that case.
    pub fn on_mode_change(&mut self, selection: ModeSelection) -> Result<(), AppError> {
        let removed = self.interactions.remove_all();
        self.selection = None;
        self.mode = selection;
        debug!(?removed, mode = %selection.mode, "interactions removed");

        match selection.mode {
            InteractionMode::Draw => {
                let draw_type = selection
                    .draw_type
                    .ok_or_else(|| AppError::precondition("Choose a geometry type to draw."))?;
                self.interactions
                    .add(Interaction::Draw(DrawInteraction::new(draw_type)))?;
                self.interactions
                    .add(Interaction::Snap(SnapInteraction::default()))?;
            }
            InteractionMode::Modify => {
                self.interactions
                    .add(Interaction::Modify(ModifyInteraction::default()))?;
                self.interactions
                    .add(Interaction::Snap(SnapInteraction::default()))?;
            }
            InteractionMode::Delete => {
                self.interactions
                    .add(Interaction::Select(SelectInteraction::default()))?;
            }
        }
        debug!(installed = ?self.interactions.kinds(), "interactions installed");
        Ok(())
    }

    /// Persist a feature that a finished draw gesture added to the layer.
    ///
    /// Fire-and-forget: the layer is not touched again whatever the outcome.
    pub fn on_draw_complete(&mut self, key: FeatureKey) -> Result<(), AppError> {
        let feature = self
            .layer
            .get(key)
            .cloned()
            .ok_or_else(|| AppError::precondition("Drawn feature is no longer on the map."))?;
        info!(
            geometry = feature.geometry.as_ref().map_or("none", |g| g.type_name()),
            "inserting drawn feature"
        );
        self.send(CoreCmd::InsertFeature { key, feature })
    }

    /// Persist the post-edit geometry of a modified feature.
    ///
    /// # Errors
    /// Features without a server id cannot be addressed by an update and
    /// yield a precondition error without any request.
    pub fn on_modify_complete(&mut self, key: FeatureKey) -> Result<(), AppError> {
        let feature = self
            .layer
            .get(key)
            .cloned()
            .ok_or_else(|| AppError::precondition("Modified feature is no longer on the map."))?;
        let id = feature.id.clone().ok_or_else(|| {
            AppError::precondition("Feature has not been saved with an id yet; reload to edit it.")
        })?;
        info!(%id, "updating modified feature");
        self.send(CoreCmd::UpdateFeature { key, id, feature })
    }

    /// Request deletion of the selected feature. The feature leaves the layer
    /// only when the backend reports success.
    ///
    /// # Errors
    /// A precondition error, and no request, when nothing is selected or the
    /// selected feature has no server id.
    pub fn on_delete_requested(&mut self) -> Result<(), AppError> {
        let key = self
            .selection
            .ok_or_else(|| AppError::precondition("Select a feature to delete first."))?;
        let Some(feature) = self.layer.get(key) else {
            self.selection = None;
            return Err(AppError::precondition("Selected feature is no longer on the map."));
        };
        let id = feature.id.clone().ok_or_else(|| {
            AppError::precondition("Feature has not been saved with an id yet; it cannot be deleted.")
        })?;
        info!(%id, "deleting selected feature");
        self.send(CoreCmd::DeleteFeature { key, id })
    }

    /// Replace the layer with the features of a GeoJSON document and fit the
    /// view to them.
    ///
    /// # Returns
    /// Number of imported features.
    ///
    /// # Errors
    /// Malformed GeoJSON or an unsupported `crs` yields a parse error and
    /// leaves the layer untouched.
    pub fn load_local_file(&mut self, contents: &str) -> Result<usize, AppError> {
        let mut collection = FeatureCollection::from_geojson_str(contents)?;
        let data_projection = match collection.crs_name() {
            Some(name) => name.parse::<Projection>()?,
            None => Projection::Wgs84,
        };
        reproject_collection(&mut collection, data_projection, Projection::WebMercator);

        if let Some(modify) = self.interactions.modify_mut() {
            modify.end_drag();
        }
        self.selection = None;
        self.layer.clear();
        let count = self.layer.add_features(collection.features).len();
        self.view.fit(&self.layer.extent(), [FIT_PADDING_PX; 4]);
        info!(count, from = %data_projection, "imported local GeoJSON");
        self.feedback.info(format!("Imported {} features.", count));
        Ok(count)
    }

    /// Start a vertex drag when Modify is installed and the pointer is near
    /// the layer.
    ///
    /// # Returns
    /// `true` when the press was consumed (the map must not pan).
    pub fn pointer_down(&mut self, position: Position) -> bool {
        if !self.interactions.contains(InteractionKind::Modify) {
            return false;
        }
        let tolerance = self.pixels_to_map(PIXEL_TOLERANCE);
        let drag = if let Some(hit) = nearest_vertex(&self.layer, position, tolerance, None) {
            Some((hit.key, hit.vertex, false))
        } else if let Some(hit) = nearest_segment(&self.layer, position, tolerance, None) {
            let vertex = VertexRef {
                part: hit.vertex.part,
                index: hit.vertex.index + 1,
            };
            let inserted = self
                .layer
                .get_mut(hit.key)
                .and_then(|f| f.geometry.as_mut())
                .is_some_and(|g| g.insert_vertex(vertex, hit.position));
            inserted.then_some((hit.key, vertex, true))
        } else {
            None
        };

        let Some((key, vertex, modified)) = drag else {
            return false;
        };
        if let Some(modify) = self.interactions.modify_mut() {
            modify.start_drag(key, vertex, modified);
        }
        true
    }

    /// Move the dragged vertex, snapped against everything but its own part.
    pub fn pointer_move(&mut self, position: Position) {
        let Some(drag) = self.interactions.modify().and_then(ModifyInteraction::drag) else {
            return;
        };
        let target = self.snap(position, Some((drag.key, drag.vertex.part)));
        let moved = self
            .layer
            .get_mut(drag.key)
            .and_then(|f| f.geometry.as_mut())
            .is_some_and(|g| g.move_vertex(drag.vertex, target));
        if moved {
            if let Some(modify) = self.interactions.modify_mut() {
                modify.mark_modified();
            }
        }
    }

    /// Finish a vertex drag. Emits a modify-end gesture when the geometry changed.
    pub fn pointer_up(&mut self, _position: Position) -> Option<GestureEvent> {
        let drag = self.interactions.modify_mut()?.end_drag()?;
        if !drag.modified {
            return None;
        }
        self.dispatch(GestureEvent::ModifyEnd(drag.key))
    }

    /// Single click: extends the sketch in Draw mode, picks a feature in Delete mode.
    pub fn click(&mut self, position: Position) -> Option<GestureEvent> {
        if self.interactions.contains(InteractionKind::Draw) {
            let snapped = self.snap(position, None);
            let tolerance = self.pixels_to_map(PIXEL_TOLERANCE);
            let geometry = self.interactions.draw_mut()?.click(snapped, tolerance)?;
            let key = self.layer.add(Feature::new(geometry));
            return self.dispatch(GestureEvent::DrawEnd(key));
        }
        if let Some(select) = self.interactions.select() {
            let tolerance = self.pixels_to_map(select.pixel_tolerance);
            let hit = hit_feature(&self.layer, position, tolerance);
            self.selection = hit;
            return self.dispatch(GestureEvent::Select(hit));
        }
        None
    }

    /// Double click finishes a line or polygon sketch.
    pub fn double_click(&mut self, _position: Position) -> Option<GestureEvent> {
        let geometry = self.interactions.draw_mut()?.finish()?;
        let key = self.layer.add(Feature::new(geometry));
        self.dispatch(GestureEvent::DrawEnd(key))
    }

    /// Abort the in-progress sketch.
    pub fn cancel_gesture(&mut self) {
        if let Some(draw) = self.interactions.draw_mut() {
            draw.abort();
        }
    }

    fn dispatch(&mut self, event: GestureEvent) -> Option<GestureEvent> {
        let result = match event {
            GestureEvent::DrawEnd(key) => self.on_draw_complete(key),
            GestureEvent::ModifyEnd(key) => self.on_modify_complete(key),
            GestureEvent::Select(key) => {
                debug!(?key, "selection changed");
                Ok(())
            }
        };
        if let Err(err) = result {
            self.report_error(&err);
        }
        Some(event)
    }

    fn snap(&self, position: Position, exclude: ExcludedPart) -> Position {
        match self.interactions.snap() {
            Some(snap) => snap_position(
                &self.layer,
                position,
                self.pixels_to_map(snap.pixel_tolerance),
                exclude,
            ),
            None => position,
        }
    }

    fn pixels_to_map(&self, pixels: f64) -> f64 {
        pixels * self.view.resolution()
    }

    fn send(&mut self, cmd: CoreCmd) -> Result<(), AppError> {
        self.backend
            .cmd_tx
            .send(cmd)
            .map_err(|_| AppError::precondition("Backend worker is not running."))
    }

    /// Log an error and surface it as status and toast.
    pub fn report_error(&mut self, err: &AppError) {
        warn!(kind = ?err.kind(), "{}", err);
        self.feedback.failure(err.to_string());
    }

    /// Drain and apply every pending backend event.
    pub fn poll_backend(&mut self) {
        while let Ok(event) = self.backend.evt_rx.try_recv() {
            self.apply_event(event);
        }
    }

    pub fn apply_event(&mut self, event: CoreEvent) {
        match event {
            CoreEvent::CollectionLoaded { features } => {
                let count = self.layer.add_features(features).len();
                self.feedback
                    .info(format!("Loaded {} features from the server.", count));
            }
            CoreEvent::FeatureInserted { key } => {
                debug!(?key, "insert acknowledged");
                self.feedback.info("New feature saved.");
            }
            CoreEvent::FeatureUpdated { key, id } => {
                debug!(?key, %id, "update acknowledged");
                self.feedback.info(format!("Feature {} updated.", id));
            }
            CoreEvent::FeatureDeleted { key, id } => {
                if self.layer.remove(key).is_none() {
                    debug!(?key, %id, "deleted feature was already gone locally");
                }
                if self.selection == Some(key) {
                    self.selection = None;
                }
                self.feedback.info(format!("Feature {} deleted.", id));
            }
            CoreEvent::Error {
                source,
                key,
                message,
            } => {
                warn!(?source, ?key, "backend request failed");
                self.feedback.failure(message);
            }
        }
    }

    pub fn view(&self) -> &MapView {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut MapView {
        &mut self.view
    }

    pub fn raster(&self) -> &RasterLayer {
        &self.raster
    }

    pub fn layer(&self) -> &VectorSource {
        &self.layer
    }

    pub fn interactions(&self) -> &InteractionSet {
        &self.interactions
    }

    pub fn mode(&self) -> ModeSelection {
        self.mode
    }

    pub fn selection(&self) -> Option<FeatureKey> {
        self.selection
    }

    pub fn feedback(&self) -> &Feedback {
        &self.feedback
    }

    pub fn feedback_mut(&mut self) -> &mut Feedback {
        &mut self.feedback
    }

    /// Vertices of the in-progress sketch, empty outside Draw mode.
    pub fn sketch(&self) -> &[Position] {
        self.interactions
            .draw()
            .map(DrawInteraction::sketch)
            .unwrap_or_default()
    }

    pub fn active_drag(&self) -> Option<VertexDrag> {
        self.interactions.modify().and_then(ModifyInteraction::drag)
    }
}
