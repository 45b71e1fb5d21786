//! Texture cache for base map tiles.

use crate::backend::{TileEvent, TileHandle, TileRequest};
use crate::editor::{RasterLayer, TileCoord};
use eframe::egui;
use std::collections::{HashMap, HashSet};
use tracing::warn;

/// Textures kept before tiles outside the view are dropped.
pub(crate) const TILE_CACHE_LIMIT: usize = 256;

/// Uploaded tiles plus the downloads still in flight.
///
/// A tile that failed once is not requested again for the session.
pub(crate) struct TileCache {
    handle: TileHandle,
    textures: HashMap<TileCoord, egui::TextureHandle>,
    pending: HashSet<TileCoord>,
    failed: HashSet<TileCoord>,
}

impl TileCache {
    pub(crate) fn new(handle: TileHandle) -> Self {
        Self {
            handle,
            textures: HashMap::new(),
            pending: HashSet::new(),
            failed: HashSet::new(),
        }
    }

    pub(crate) fn texture(&self, tile: TileCoord) -> Option<&egui::TextureHandle> {
        self.textures.get(&tile)
    }

    /// Queue downloads for tiles that are neither loaded, in flight nor failed.
    pub(crate) fn request(&mut self, raster: &RasterLayer, tiles: &[TileCoord]) {
        for &tile in tiles {
            if self.textures.contains_key(&tile)
                || self.pending.contains(&tile)
                || self.failed.contains(&tile)
            {
                continue;
            }
            let request = TileRequest {
                tile,
                url: raster.tile_url(tile),
            };
            if self.handle.req_tx.send(request).is_err() {
                warn!("tile workers are gone; base map stays blank");
                return;
            }
            self.pending.insert(tile);
        }
    }

    /// Upload finished downloads as textures.
    pub(crate) fn poll(&mut self, ctx: &egui::Context) {
        while let Ok(event) = self.handle.evt_rx.try_recv() {
            match event {
                TileEvent::Loaded { tile, size, rgba } => {
                    self.pending.remove(&tile);
                    let image = egui::ColorImage::from_rgba_unmultiplied(size, &rgba);
                    let texture = ctx.load_texture(
                        format!("tile-{}-{}-{}", tile.z, tile.x, tile.y),
                        image,
                        egui::TextureOptions::LINEAR,
                    );
                    self.textures.insert(tile, texture);
                }
                TileEvent::Failed { tile, .. } => {
                    self.pending.remove(&tile);
                    self.failed.insert(tile);
                }
            }
        }
    }

    /// Once over [`TILE_CACHE_LIMIT`], keep only the textures in `visible`.
    pub(crate) fn evict(&mut self, visible: &[TileCoord]) {
        if self.textures.len() <= TILE_CACHE_LIMIT {
            return;
        }
        let keep: HashSet<TileCoord> = visible.iter().copied().collect();
        self.textures.retain(|tile, _| keep.contains(tile));
    }
}
