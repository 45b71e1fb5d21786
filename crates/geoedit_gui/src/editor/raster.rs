//! Base raster layer: an XYZ tile grid over Web Mercator.

use super::view::zoom_for_resolution;
use geoedit_core::projection::WEB_MERCATOR_HALF_WORLD;
use geoedit_core::Extent;

pub const OSM_URL_TEMPLATE: &str = "https://tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const OSM_ATTRIBUTION: &str = "© OpenStreetMap contributors";
pub const OSM_MAX_ZOOM: u8 = 19;
/// Upper bound on tiles enumerated for one frame.
pub const MAX_VISIBLE_TILES: usize = 512;

/// Tile address. `x` is not wrapped so tiles left or right of the
/// antimeridian keep their map position; [`RasterLayer::tile_url`] wraps it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileCoord {
    pub z: u8,
    pub x: i64,
    pub y: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RasterLayer {
    pub url_template: String,
    pub attribution: String,
    pub max_zoom: u8,
    pub visible: bool,
}

impl Default for RasterLayer {
    fn default() -> Self {
        Self::osm()
    }
}

fn tile_span(z: u8) -> f64 {
    2.0 * WEB_MERCATOR_HALF_WORLD / f64::from(1u32 << z)
}

impl RasterLayer {
    pub fn osm() -> Self {
        Self {
            url_template: OSM_URL_TEMPLATE.to_string(),
            attribution: OSM_ATTRIBUTION.to_string(),
            max_zoom: OSM_MAX_ZOOM,
            visible: true,
        }
    }

    /// Tile zoom level matching a view resolution.
    pub fn tile_zoom(&self, resolution: f64) -> u8 {
        let zoom = zoom_for_resolution(resolution).round();
        if !zoom.is_finite() || zoom <= 0.0 {
            return 0;
        }
        (zoom as u8).min(self.max_zoom)
    }

    /// Tiles covering `extent`, row by row from the top.
    pub fn visible_tiles(&self, extent: &Extent, resolution: f64) -> Vec<TileCoord> {
        if extent.is_empty() {
            return Vec::new();
        }
        let z = self.tile_zoom(resolution);
        let span = tile_span(z);
        let rows = 1i64 << z;

        let min_x = ((extent.min_x() + WEB_MERCATOR_HALF_WORLD) / span).floor() as i64;
        let max_x = ((extent.max_x() + WEB_MERCATOR_HALF_WORLD) / span).ceil() as i64 - 1;
        let min_y = (((WEB_MERCATOR_HALF_WORLD - extent.max_y()) / span).floor() as i64).max(0);
        let max_y = (((WEB_MERCATOR_HALF_WORLD - extent.min_y()) / span).ceil() as i64 - 1).min(rows - 1);

        let mut tiles = Vec::new();
        'rows: for y in min_y..=max_y {
            for x in min_x..=max_x {
                if tiles.len() >= MAX_VISIBLE_TILES {
                    break 'rows;
                }
                tiles.push(TileCoord { z, x, y });
            }
        }
        tiles
    }

    /// Map extent of a tile.
    pub fn tile_extent(&self, tile: TileCoord) -> Extent {
        let span = tile_span(tile.z);
        let min_x = -WEB_MERCATOR_HALF_WORLD + tile.x as f64 * span;
        let max_y = WEB_MERCATOR_HALF_WORLD - tile.y as f64 * span;
        Extent::new(min_x, max_y - span, min_x + span, max_y)
    }

    pub fn tile_url(&self, tile: TileCoord) -> String {
        let wrapped_x = tile.x.rem_euclid(1i64 << tile.z);
        self.url_template
            .replace("{z}", &tile.z.to_string())
            .replace("{x}", &wrapped_x.to_string())
            .replace("{y}", &tile.y.to_string())
    }
}
