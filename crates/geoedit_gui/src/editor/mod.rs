//! Headless map editor: view, layers, interactions and the controller that
//! ties them to the backend worker.
//!
//! Nothing in here depends on egui; the app layer feeds pointer gestures in
//! map coordinates and renders from the accessors.

mod controller;
mod feedback;
mod hit;
mod interaction;
mod layer;
mod raster;
mod view;

pub use controller::MapEditor;
pub use feedback::{Feedback, Notice, Tone};
pub use interaction::{
    DrawType, GestureEvent, InteractionKind, InteractionMode, ModeSelection, VertexDrag,
    PIXEL_TOLERANCE,
};
pub use layer::{LayerFeature, VectorSource};
pub use raster::{RasterLayer, TileCoord};
pub use view::{MapView, Padding};

#[cfg(test)]
mod tests;
