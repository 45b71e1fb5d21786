//! Root crate facade for the GeoEdit core library and map editor.

pub use geoedit_core::{
    config, constants, error, gateway, models, projection, tiles, wfs, AppError, Config,
    ErrorKind, Feature, FeatureCollection, FeatureGateway, FeatureId, Geometry, HttpTileFetcher,
    Position, Projection, TileFetcher, WfsGateway,
};
pub use geoedit_gui::{backend, editor, failure_message, run};
