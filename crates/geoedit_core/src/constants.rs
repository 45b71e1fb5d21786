//! Shared constants used across GeoEdit crates.

/// Default GeoServer workspace URL.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8080/geoserver/gadm";

/// Default feature type edited by the map.
pub const DEFAULT_FEATURE_TYPE: &str = "my_lines";

/// Default spatial reference for geometries sent to and read from the server.
pub const DEFAULT_SRS_NAME: &str = "EPSG:3857";

/// Default name of the geometry attribute on the feature type.
pub const DEFAULT_GEOMETRY_FIELD: &str = "geom";

/// Default HTTP request timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// WFS protocol version used for every request.
pub const WFS_VERSION: &str = "1.1.0";

pub const WFS_NAMESPACE: &str = "http://www.opengis.net/wfs";
pub const GML_NAMESPACE: &str = "http://www.opengis.net/gml";
pub const OGC_NAMESPACE: &str = "http://www.opengis.net/ogc";
pub const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";
pub const WFS_SCHEMA_LOCATION: &str = "http://schemas.opengis.net/wfs/1.1.0/wfs.xsd";

/// Initial view center in EPSG:3857 meters.
pub const DEFAULT_VIEW_CENTER: [f64; 2] = [-11_000_000.0, 4_600_000.0];

/// Initial view zoom level.
pub const DEFAULT_VIEW_ZOOM: f64 = 4.0;

/// Padding in pixels applied when fitting the view to imported features.
pub const FIT_PADDING_PX: f32 = 20.0;

/// User agent sent with tile requests; public tile servers reject anonymous clients.
pub const TILE_USER_AGENT: &str = concat!("geoedit/", env!("CARGO_PKG_VERSION"));

/// Timeout for a single tile download in seconds.
pub const DEFAULT_TILE_TIMEOUT_SECS: u64 = 15;
