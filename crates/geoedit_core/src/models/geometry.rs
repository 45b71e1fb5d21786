use super::extent::Extent;
use geo::{BoundingRect, Distance, Euclidean};
use geo_types::{coord, Coord, LineString, MultiLineString, MultiPoint, MultiPolygon, Point, Polygon};
use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// A 2D coordinate in the units of its spatial reference.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: Position) -> f64 {
        Euclidean.distance(Point::from(*self), Point::from(other))
    }
}

impl From<Position> for Coord<f64> {
    fn from(p: Position) -> Self {
        coord! { x: p.x, y: p.y }
    }
}

impl From<Coord<f64>> for Position {
    fn from(c: Coord<f64>) -> Self {
        Self::new(c.x, c.y)
    }
}

impl From<Position> for Point<f64> {
    fn from(p: Position) -> Self {
        Point::new(p.x, p.y)
    }
}

impl From<Point<f64>> for Position {
    fn from(p: Point<f64>) -> Self {
        Self::new(p.x(), p.y())
    }
}

impl From<[f64; 2]> for Position {
    fn from(value: [f64; 2]) -> Self {
        Self::new(value[0], value[1])
    }
}

impl Serialize for Position {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        [self.x, self.y].serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Position {
    /// Accepts `[x, y, ...]`; ordinates past the second (z, m) are dropped.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let ordinates = Vec::<f64>::deserialize(deserializer)?;
        if ordinates.len() < 2 {
            return Err(de::Error::invalid_length(
                ordinates.len(),
                &"a position with at least two ordinates",
            ));
        }
        Ok(Self::new(ordinates[0], ordinates[1]))
    }
}

/// GeoJSON geometry. Polygon rings are stored closed (first == last).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "coordinates")]
pub enum Geometry {
    Point(Position),
    LineString(Vec<Position>),
    Polygon(Vec<Vec<Position>>),
    MultiPoint(Vec<Position>),
    MultiLineString(Vec<Vec<Position>>),
    MultiPolygon(Vec<Vec<Vec<Position>>>),
}

/// Address of one vertex: the coordinate sequence (`part`) and the index in it.
///
/// Parts are numbered in document order; every polygon ring is its own part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VertexRef {
    pub part: usize,
    pub index: usize,
}

/// Read-only view of one coordinate sequence.
#[derive(Debug, Clone, Copy)]
pub struct Part<'a> {
    pub positions: &'a [Position],
    pub closed: bool,
}

enum PartMut<'a> {
    Single(&'a mut Position),
    Sequence {
        positions: &'a mut Vec<Position>,
        closed: bool,
    },
}

impl Geometry {
    /// Build a polygon from an open vertex ring, closing it.
    pub fn polygon_from_ring(mut ring: Vec<Position>) -> Self {
        if let (Some(first), Some(last)) = (ring.first().copied(), ring.last().copied()) {
            if first != last {
                ring.push(first);
            }
        }
        Self::Polygon(vec![ring])
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Point(_) => "Point",
            Self::LineString(_) => "LineString",
            Self::Polygon(_) => "Polygon",
            Self::MultiPoint(_) => "MultiPoint",
            Self::MultiLineString(_) => "MultiLineString",
            Self::MultiPolygon(_) => "MultiPolygon",
        }
    }

    pub fn parts(&self) -> Vec<Part<'_>> {
        fn open(positions: &[Position]) -> Part<'_> {
            Part {
                positions,
                closed: false,
            }
        }
        fn ring(positions: &[Position]) -> Part<'_> {
            Part {
                positions,
                closed: true,
            }
        }
        match self {
            Self::Point(point) => vec![open(std::slice::from_ref(point))],
            Self::LineString(line) => vec![open(line)],
            Self::Polygon(rings) => rings.iter().map(|r| ring(r)).collect(),
            Self::MultiPoint(points) => points.iter().map(|p| open(std::slice::from_ref(p))).collect(),
            Self::MultiLineString(lines) => lines.iter().map(|l| open(l)).collect(),
            Self::MultiPolygon(polygons) => polygons
                .iter()
                .flat_map(|rings| rings.iter())
                .map(|r| ring(r))
                .collect(),
        }
    }

    fn part_mut(&mut self, part: usize) -> Option<PartMut<'_>> {
        match self {
            Self::Point(point) => (part == 0).then(|| PartMut::Single(point)),
            Self::LineString(line) => (part == 0).then(|| PartMut::Sequence {
                positions: line,
                closed: false,
            }),
            Self::Polygon(rings) => rings.get_mut(part).map(|positions| PartMut::Sequence {
                positions,
                closed: true,
            }),
            Self::MultiPoint(points) => points.get_mut(part).map(PartMut::Single),
            Self::MultiLineString(lines) => lines.get_mut(part).map(|positions| PartMut::Sequence {
                positions,
                closed: false,
            }),
            Self::MultiPolygon(polygons) => polygons
                .iter_mut()
                .flat_map(|rings| rings.iter_mut())
                .nth(part)
                .map(|positions| PartMut::Sequence {
                    positions,
                    closed: true,
                }),
        }
    }

    /// Every vertex with its address, in document order.
    pub fn vertices(&self) -> Vec<(VertexRef, Position)> {
        self.parts()
            .iter()
            .enumerate()
            .flat_map(|(part, p)| {
                p.positions
                    .iter()
                    .enumerate()
                    .map(move |(index, pos)| (VertexRef { part, index }, *pos))
            })
            .collect()
    }

    /// Every segment as `(start vertex, start, end)`. Closed rings include the closing edge.
    pub fn segments(&self) -> Vec<(VertexRef, Position, Position)> {
        self.parts()
            .iter()
            .enumerate()
            .flat_map(|(part, p)| {
                p.positions
                    .windows(2)
                    .enumerate()
                    .map(move |(index, pair)| (VertexRef { part, index }, pair[0], pair[1]))
            })
            .collect()
    }

    /// Move a vertex in place. Moving the first or last vertex of a ring keeps it closed.
    pub fn move_vertex(&mut self, vertex: VertexRef, to: Position) -> bool {
        match self.part_mut(vertex.part) {
            Some(PartMut::Single(position)) if vertex.index == 0 => {
                *position = to;
                true
            }
            Some(PartMut::Sequence { positions, closed }) => {
                let len = positions.len();
                if vertex.index >= len {
                    return false;
                }
                positions[vertex.index] = to;
                if closed && len > 1 {
                    let last = len - 1;
                    if vertex.index == 0 {
                        positions[last] = to;
                    } else if vertex.index == last {
                        positions[0] = to;
                    }
                }
                true
            }
            _ => false,
        }
    }

    /// Insert a vertex so that it ends up at `vertex.index` in its part.
    ///
    /// Only sequences accept new vertices, and never in front of the first one.
    pub fn insert_vertex(&mut self, vertex: VertexRef, position: Position) -> bool {
        match self.part_mut(vertex.part) {
            Some(PartMut::Sequence { positions, .. })
                if vertex.index >= 1 && vertex.index <= positions.len() =>
            {
                positions.insert(vertex.index, position);
                true
            }
            _ => false,
        }
    }

    /// Apply `f` to every coordinate.
    pub fn transform<F>(&mut self, f: F)
    where
        F: Fn(Position) -> Position,
    {
        match self {
            Self::Point(point) => *point = f(*point),
            Self::LineString(line) | Self::MultiPoint(line) => {
                line.iter_mut().for_each(|p| *p = f(*p));
            }
            Self::Polygon(rings) | Self::MultiLineString(rings) => rings
                .iter_mut()
                .flat_map(|ring| ring.iter_mut())
                .for_each(|p| *p = f(*p)),
            Self::MultiPolygon(polygons) => polygons
                .iter_mut()
                .flat_map(|rings| rings.iter_mut())
                .flat_map(|ring| ring.iter_mut())
                .for_each(|p| *p = f(*p)),
        }
    }

    pub fn extent(&self) -> Extent {
        Extent::from(geo_types::Geometry::<f64>::from(self).bounding_rect())
    }
}

fn to_line_string(positions: &[Position]) -> LineString<f64> {
    positions.iter().copied().map(Coord::<f64>::from).collect()
}

fn to_polygon(rings: &[Vec<Position>]) -> Polygon<f64> {
    let mut rings = rings.iter().map(|ring| to_line_string(ring));
    let exterior = rings.next().unwrap_or_else(|| LineString::new(Vec::new()));
    Polygon::new(exterior, rings.collect())
}

impl From<&Geometry> for geo_types::Geometry<f64> {
    fn from(geometry: &Geometry) -> Self {
        match geometry {
            Geometry::Point(p) => Point::from(*p).into(),
            Geometry::LineString(line) => to_line_string(line).into(),
            Geometry::Polygon(rings) => to_polygon(rings).into(),
            Geometry::MultiPoint(points) => {
                MultiPoint::new(points.iter().copied().map(Point::<f64>::from).collect()).into()
            }
            Geometry::MultiLineString(lines) => {
                MultiLineString::new(lines.iter().map(|l| to_line_string(l)).collect()).into()
            }
            Geometry::MultiPolygon(polygons) => {
                MultiPolygon::new(polygons.iter().map(|rings| to_polygon(rings)).collect()).into()
            }
        }
    }
}
