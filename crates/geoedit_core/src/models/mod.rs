//! Data models shared by the gateway and the editor.

/// Axis-aligned bounding boxes.
pub mod extent;
/// Features, identifiers and collections.
pub mod feature;
/// Geometry types and vertex editing primitives.
pub mod geometry;

pub use extent::Extent;
pub use feature::{Feature, FeatureCollection, FeatureId};
pub use geometry::{Geometry, Position, VertexRef};

#[cfg(test)]
mod tests;
