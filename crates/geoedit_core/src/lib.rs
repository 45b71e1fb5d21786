//! Core domain library for GeoEdit (config, feature models, WFS encoding, gateway).

/// Configuration loading and defaults.
pub mod config;
/// Shared constants used across GeoEdit crates.
pub mod constants;
/// Application error types (network/parse/precondition).
pub mod error;
/// Feature server access over HTTP.
pub mod gateway;
/// Feature, geometry and extent models with GeoJSON encoding.
pub mod models;
/// Coordinate reference system transforms.
pub mod projection;
/// Base map tile download.
pub mod tiles;
/// WFS 1.1.0 request building and response decoding.
pub mod wfs;

pub use config::Config;
pub use error::{AppError, ErrorKind};
pub use gateway::{FeatureGateway, TransactionReceipt, WfsGateway};
pub use models::{Extent, Feature, FeatureCollection, FeatureId, Geometry, Position, VertexRef};
pub use projection::Projection;
pub use tiles::{HttpTileFetcher, TileFetcher};
