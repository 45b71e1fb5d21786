//! Map view: center, resolution and the map/screen transform.

use geoedit_core::projection::WEB_MERCATOR_HALF_WORLD;
use geoedit_core::{Extent, Position};

/// Resolution (map units per pixel) of zoom level 0 with 256 px tiles.
pub const ZOOM0_RESOLUTION: f64 = 2.0 * WEB_MERCATOR_HALF_WORLD / 256.0;
pub const MIN_ZOOM: f64 = 0.0;
pub const MAX_ZOOM: f64 = 28.0;

/// Screen-space padding `[top, right, bottom, left]` in pixels.
pub type Padding = [f32; 4];

/// 2D view over a Web Mercator map.
///
/// Screen coordinates are pixels relative to the viewport's top-left corner,
/// y growing downward.
#[derive(Debug, Clone, PartialEq)]
pub struct MapView {
    center: Position,
    resolution: f64,
    size: [f32; 2],
    extent: Extent,
}

pub fn resolution_for_zoom(zoom: f64) -> f64 {
    ZOOM0_RESOLUTION / 2f64.powf(zoom)
}

pub fn zoom_for_resolution(resolution: f64) -> f64 {
    (ZOOM0_RESOLUTION / resolution).log2()
}

impl MapView {
    /// Create a view; the center is kept inside `extent`.
    pub fn new(center: Position, zoom: f64, extent: Extent) -> Self {
        let mut view = Self {
            center,
            resolution: resolution_for_zoom(zoom),
            size: [800.0, 600.0],
            extent,
        };
        view.constrain();
        view
    }

    /// Web Mercator world extent with the x range doubled so the map can be
    /// panned past the antimeridian.
    pub fn default_extent() -> Extent {
        Extent::new(
            -2.0 * WEB_MERCATOR_HALF_WORLD,
            -WEB_MERCATOR_HALF_WORLD,
            2.0 * WEB_MERCATOR_HALF_WORLD,
            WEB_MERCATOR_HALF_WORLD,
        )
    }

    pub fn center(&self) -> Position {
        self.center
    }

    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    pub fn zoom(&self) -> f64 {
        zoom_for_resolution(self.resolution)
    }

    /// Update the viewport size; zero-sized viewports are ignored.
    pub fn set_size(&mut self, size: [f32; 2]) {
        if size[0] > 0.0 && size[1] > 0.0 {
            self.size = size;
        }
    }

    fn constrain(&mut self) {
        let min_res = resolution_for_zoom(MAX_ZOOM);
        let max_res = resolution_for_zoom(MIN_ZOOM);
        if !self.resolution.is_finite() {
            self.resolution = max_res;
        }
        self.resolution = self.resolution.clamp(min_res, max_res);
        self.center = self.extent.clamp(self.center);
    }

    pub fn to_screen(&self, position: Position) -> [f32; 2] {
        let x = (position.x - self.center.x) / self.resolution + f64::from(self.size[0]) / 2.0;
        let y = f64::from(self.size[1]) / 2.0 - (position.y - self.center.y) / self.resolution;
        [x as f32, y as f32]
    }

    pub fn to_map(&self, screen: [f32; 2]) -> Position {
        let x = self.center.x + (f64::from(screen[0]) - f64::from(self.size[0]) / 2.0) * self.resolution;
        let y = self.center.y - (f64::from(screen[1]) - f64::from(self.size[1]) / 2.0) * self.resolution;
        Position::new(x, y)
    }

    /// Map extent currently covered by the viewport.
    pub fn visible_extent(&self) -> Extent {
        let half_w = f64::from(self.size[0]) / 2.0 * self.resolution;
        let half_h = f64::from(self.size[1]) / 2.0 * self.resolution;
        Extent::new(
            self.center.x - half_w,
            self.center.y - half_h,
            self.center.x + half_w,
            self.center.y + half_h,
        )
    }

    /// Move the map content by a screen delta (dragging right moves the map right).
    pub fn pan_by_pixels(&mut self, dx: f32, dy: f32) {
        self.center = Position::new(
            self.center.x - f64::from(dx) * self.resolution,
            self.center.y + f64::from(dy) * self.resolution,
        );
        self.constrain();
    }

    /// Zoom by `delta` levels keeping the map point under `anchor` fixed.
    pub fn zoom_at(&mut self, delta: f64, anchor: [f32; 2]) {
        let before = self.to_map(anchor);
        self.resolution /= 2f64.powf(delta);
        self.constrain();
        let after = self.to_map(anchor);
        self.center = Position::new(
            self.center.x + (before.x - after.x),
            self.center.y + (before.y - after.y),
        );
        self.constrain();
    }

    /// Fit `extent` into the viewport minus `padding`. Empty extents are ignored.
    ///
    /// # Returns
    /// `true` when the view changed.
    pub fn fit(&mut self, extent: &Extent, padding: Padding) -> bool {
        if extent.is_empty() {
            return false;
        }
        let [top, right, bottom, left] = padding.map(f64::from);
        let avail_w = (f64::from(self.size[0]) - left - right).max(1.0);
        let avail_h = (f64::from(self.size[1]) - top - bottom).max(1.0);
        self.resolution = (extent.width() / avail_w).max(extent.height() / avail_h);
        self.constrain();

        let Some(mid) = extent.center() else {
            return false;
        };
        self.center = Position::new(
            mid.x - (left - right) / 2.0 * self.resolution,
            mid.y + (top - bottom) / 2.0 * self.resolution,
        );
        self.constrain();
        true
    }
}
