//! Transforms between geographic WGS 84 and Web Mercator coordinates.

use crate::error::AppError;
use crate::models::{FeatureCollection, Position};
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

const EARTH_RADIUS_M: f64 = 6_378_137.0;
/// Half the width of the Web Mercator square, in meters.
pub const WEB_MERCATOR_HALF_WORLD: f64 = PI * EARTH_RADIUS_M;
const MAX_MERCATOR_LATITUDE: f64 = 85.051_128_779_806_59;

/// Coordinate reference systems GeoEdit can read and render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Projection {
    /// EPSG:4326, longitude/latitude degrees.
    Wgs84,
    /// EPSG:3857, spherical Mercator meters.
    WebMercator,
}

impl Projection {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Wgs84 => "EPSG:4326",
            Self::WebMercator => "EPSG:3857",
        }
    }
}

impl fmt::Display for Projection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Projection {
    type Err = AppError;

    /// Accepts `EPSG:n`, `urn:ogc:def:crs:EPSG::n`, OGC `CRS84` and common aliases.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase();
        if normalized.ends_with("CRS84") {
            return Ok(Self::Wgs84);
        }
        let code = normalized
            .rsplit([':', '/'])
            .next()
            .unwrap_or_default();
        match code {
            "4326" => Ok(Self::Wgs84),
            "3857" | "900913" | "3785" | "102100" | "102113" => Ok(Self::WebMercator),
            _ => Err(AppError::UnsupportedProjection(s.to_string())),
        }
    }
}

pub fn to_web_mercator(position: Position) -> Position {
    let lat = position.y.clamp(-MAX_MERCATOR_LATITUDE, MAX_MERCATOR_LATITUDE);
    let x = EARTH_RADIUS_M * position.x.to_radians();
    let y = EARTH_RADIUS_M * (PI / 4.0 + lat.to_radians() / 2.0).tan().ln();
    Position::new(x, y)
}

pub fn to_wgs84(position: Position) -> Position {
    let lon = (position.x / EARTH_RADIUS_M).to_degrees();
    let lat = (2.0 * (position.y / EARTH_RADIUS_M).exp().atan() - PI / 2.0).to_degrees();
    Position::new(lon, lat)
}

pub fn transform_position(position: Position, from: Projection, to: Projection) -> Position {
    match (from, to) {
        (Projection::Wgs84, Projection::WebMercator) => to_web_mercator(position),
        (Projection::WebMercator, Projection::Wgs84) => to_wgs84(position),
        _ => position,
    }
}

/// Reproject every geometry of `collection` in place.
pub fn reproject_collection(collection: &mut FeatureCollection, from: Projection, to: Projection) {
    if from == to {
        return;
    }
    for geometry in collection
        .features
        .iter_mut()
        .filter_map(|f| f.geometry.as_mut())
    {
        geometry.transform(|p| transform_position(p, from, to));
    }
}
