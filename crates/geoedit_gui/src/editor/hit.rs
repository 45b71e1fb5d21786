//! Hit testing and snapping against the editable layer.

use super::layer::VectorSource;
use crate::backend::FeatureKey;
use geo::{Closest, ClosestPoint, Contains, Line, Point};
use geoedit_core::{Geometry, Position, VertexRef};

/// Vertex or segment found near a pointer position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexHit {
    pub key: FeatureKey,
    /// Vertex address; for segment hits, the segment's start vertex.
    pub vertex: VertexRef,
    /// Closest point on the vertex or segment.
    pub position: Position,
    pub distance: f64,
}

/// Geometry part that must not take part in snapping (the one being edited).
pub type ExcludedPart = Option<(FeatureKey, usize)>;

fn closest_on(target: &impl ClosestPoint<f64>, p: Position) -> Option<Position> {
    match target.closest_point(&Point::from(p)) {
        Closest::Intersection(q) | Closest::SinglePoint(q) => Some(q.into()),
        Closest::Indeterminate => None,
    }
}

/// Closest point to `p` on segment `a`-`b`; a zero-length segment yields `a`.
pub fn closest_point_on_segment(p: Position, a: Position, b: Position) -> Position {
    closest_on(&Line::new(a, b), p).unwrap_or(a)
}

fn is_excluded(exclude: ExcludedPart, key: FeatureKey, part: usize) -> bool {
    exclude == Some((key, part))
}

/// Nearest vertex within `tolerance`, topmost feature first on ties.
pub fn nearest_vertex(
    layer: &VectorSource,
    p: Position,
    tolerance: f64,
    exclude: ExcludedPart,
) -> Option<VertexHit> {
    let mut best: Option<VertexHit> = None;
    for item in layer.iter().rev() {
        let Some(geometry) = item.feature.geometry.as_ref() else {
            continue;
        };
        for (vertex, position) in geometry.vertices() {
            if is_excluded(exclude, item.key, vertex.part) {
                continue;
            }
            let distance = position.distance(p);
            if distance <= tolerance && best.map_or(true, |b| distance < b.distance) {
                best = Some(VertexHit {
                    key: item.key,
                    vertex,
                    position,
                    distance,
                });
            }
        }
    }
    best
}

/// Nearest point on any segment within `tolerance`.
pub fn nearest_segment(
    layer: &VectorSource,
    p: Position,
    tolerance: f64,
    exclude: ExcludedPart,
) -> Option<VertexHit> {
    let mut best: Option<VertexHit> = None;
    for item in layer.iter().rev() {
        let Some(geometry) = item.feature.geometry.as_ref() else {
            continue;
        };
        for (vertex, a, b) in geometry.segments() {
            if is_excluded(exclude, item.key, vertex.part) {
                continue;
            }
            let position = closest_point_on_segment(p, a, b);
            let distance = position.distance(p);
            if distance <= tolerance && best.map_or(true, |h| distance < h.distance) {
                best = Some(VertexHit {
                    key: item.key,
                    vertex,
                    position,
                    distance,
                });
            }
        }
    }
    best
}

/// Snap `p` to the nearest vertex, else the nearest segment point, within `tolerance`.
pub fn snap_position(
    layer: &VectorSource,
    p: Position,
    tolerance: f64,
    exclude: ExcludedPart,
) -> Position {
    nearest_vertex(layer, p, tolerance, exclude)
        .or_else(|| nearest_segment(layer, p, tolerance, exclude))
        .map_or(p, |hit| hit.position)
}

fn geometry_hit(geometry: &Geometry, p: Position, tolerance: f64) -> bool {
    let shape = geo::Geometry::<f64>::from(geometry);
    // Polygon interiors count, holes do not.
    if shape.contains(&Point::from(p)) {
        return true;
    }
    closest_on(&shape, p).is_some_and(|q| q.distance(p) <= tolerance)
}

/// Topmost feature whose geometry is within `tolerance` of `p` or contains it.
pub fn hit_feature(layer: &VectorSource, p: Position, tolerance: f64) -> Option<FeatureKey> {
    layer
        .iter()
        .rev()
        .find(|item| {
            item.feature
                .geometry
                .as_ref()
                .is_some_and(|g| geometry_hit(g, p, tolerance))
        })
        .map(|item| item.key)
}
