use super::geometry::Position;
use geo_types::{coord, Rect};

/// Axis-aligned bounding box in map units, or nothing at all.
///
/// Wraps a [`geo_types::Rect`]; the empty extent has no rectangle, and its
/// bounds read as inverted infinities.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Extent(Option<Rect<f64>>);

impl From<Option<Rect<f64>>> for Extent {
    fn from(rect: Option<Rect<f64>>) -> Self {
        Self(rect)
    }
}

impl Extent {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self(Some(Rect::new(
            coord! { x: min_x, y: min_y },
            coord! { x: max_x, y: max_y },
        )))
    }

    pub const fn empty() -> Self {
        Self(None)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    pub fn min_x(&self) -> f64 {
        self.0.map_or(f64::INFINITY, |r| r.min().x)
    }

    pub fn min_y(&self) -> f64 {
        self.0.map_or(f64::INFINITY, |r| r.min().y)
    }

    pub fn max_x(&self) -> f64 {
        self.0.map_or(f64::NEG_INFINITY, |r| r.max().x)
    }

    pub fn max_y(&self) -> f64 {
        self.0.map_or(f64::NEG_INFINITY, |r| r.max().y)
    }

    /// Grow to cover `other` as well.
    pub fn extend(&mut self, other: &Extent) {
        self.0 = match (self.0, other.0) {
            (Some(a), Some(b)) => Some(Rect::new(
                coord! { x: a.min().x.min(b.min().x), y: a.min().y.min(b.min().y) },
                coord! { x: a.max().x.max(b.max().x), y: a.max().y.max(b.max().y) },
            )),
            (a, b) => a.or(b),
        };
    }

    pub fn width(&self) -> f64 {
        self.0.map_or(0.0, |r| r.width())
    }

    pub fn height(&self) -> f64 {
        self.0.map_or(0.0, |r| r.height())
    }

    pub fn center(&self) -> Option<Position> {
        self.0.map(|r| Position::from(r.center()))
    }

    /// Clamp a position into the extent.
    pub fn clamp(&self, position: Position) -> Position {
        let Some(rect) = self.0 else {
            return position;
        };
        Position::new(
            position.x.clamp(rect.min().x, rect.max().x),
            position.y.clamp(rect.min().y, rect.max().y),
        )
    }
}
