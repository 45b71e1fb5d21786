//! Backend worker wiring for the map editor.
//!
//! This module exposes the command/event protocol plus the worker spawn helpers
//! (feature server and tile downloads) used by the egui UI thread.

mod protocol;
mod tiles;
mod worker;

pub use protocol::{CoreCmd, CoreErrorSource, CoreEvent, FeatureKey};
pub use tiles::{decode_tile, spawn_tile_workers, TileEvent, TileHandle, TileRequest, TILE_WORKERS};
pub use worker::{spawn_backend, BackendHandle};
