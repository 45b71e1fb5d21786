//! WFS 1.1.0 transaction payloads and GetFeature response decoding.
//!
//! Transactions are rendered from fixed XML templates; only the geometry,
//! the feature id filter and the configured names vary between requests.

mod decode;
mod encode;

pub use decode::decode_feature_collection;
pub use encode::{format_ordinate, gml_geometry, pos_list, xml_escape, TransactionBuilder};
