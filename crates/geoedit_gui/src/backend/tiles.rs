//! Tile download pool: fetches base map tiles off the UI thread and decodes
//! them to RGBA for upload as textures.

use crate::editor::TileCoord;
use crossbeam_channel::{unbounded, Receiver, Sender};
use geoedit_core::{AppError, TileFetcher};
use std::sync::Arc;
use std::thread;
use tracing::{debug, warn};

/// Concurrent downloads; public tile servers ask clients to stay low.
pub const TILE_WORKERS: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileRequest {
    pub tile: TileCoord,
    pub url: String,
}

#[derive(Debug)]
pub enum TileEvent {
    /// Decoded tile, `rgba` holds `size[0] * size[1]` unpremultiplied pixels.
    Loaded {
        tile: TileCoord,
        size: [usize; 2],
        rgba: Vec<u8>,
    },
    Failed {
        tile: TileCoord,
        message: String,
    },
}

/// Handle for queueing tile downloads and receiving decoded tiles.
pub struct TileHandle {
    pub req_tx: Sender<TileRequest>,
    pub evt_rx: Receiver<TileEvent>,
}

impl TileHandle {
    #[cfg(test)]
    pub(crate) fn from_test_channels(req_tx: Sender<TileRequest>, evt_rx: Receiver<TileEvent>) -> Self {
        Self { req_tx, evt_rx }
    }
}

/// Decode a PNG or JPEG tile into RGBA8 pixels.
///
/// # Errors
/// Returns [`AppError::Parse`] when the bytes are not a supported image.
pub fn decode_tile(bytes: &[u8]) -> Result<([usize; 2], Vec<u8>), AppError> {
    let image = image::load_from_memory(bytes)
        .map_err(|err| AppError::Parse(format!("tile image: {}", err)))?;
    let rgba = image.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    Ok((size, rgba.into_raw()))
}

fn load(fetcher: &dyn TileFetcher, request: &TileRequest) -> TileEvent {
    match fetcher.fetch(&request.url).and_then(|bytes| decode_tile(&bytes)) {
        Ok((size, rgba)) => {
            debug!(url = %request.url, "tile loaded");
            TileEvent::Loaded {
                tile: request.tile,
                size,
                rgba,
            }
        }
        Err(err) => {
            warn!(url = %request.url, "tile failed: {}", err);
            TileEvent::Failed {
                tile: request.tile,
                message: err.to_string(),
            }
        }
    }
}

/// Start `workers` threads sharing one request queue.
pub fn spawn_tile_workers(fetcher: Arc<dyn TileFetcher>, workers: usize) -> TileHandle {
    let (req_tx, req_rx) = unbounded::<TileRequest>();
    let (evt_tx, evt_rx) = unbounded();

    for idx in 0..workers.max(1) {
        let fetcher = Arc::clone(&fetcher);
        let req_rx = req_rx.clone();
        let evt_tx = evt_tx.clone();
        thread::Builder::new()
            .name(format!("geoedit-gui-tiles-{}", idx))
            .spawn(move || {
                for request in req_rx.iter() {
                    if evt_tx.send(load(fetcher.as_ref(), &request)).is_err() {
                        break;
                    }
                }
            })
            .expect("spawn tile worker");
    }

    TileHandle { req_tx, evt_rx }
}
