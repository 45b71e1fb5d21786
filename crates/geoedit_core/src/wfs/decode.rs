use crate::error::AppError;
use crate::models::FeatureCollection;

/// Decode a GetFeature `application/json` body.
///
/// # Errors
/// Returns a parse error when the body is not a GeoJSON FeatureCollection.
pub fn decode_feature_collection(body: &str) -> Result<FeatureCollection, AppError> {
    let value: serde_json::Value = serde_json::from_str(body)?;
    match value.get("type").and_then(|t| t.as_str()) {
        Some("FeatureCollection") => Ok(serde_json::from_value(value)?),
        Some(other) => Err(AppError::parse(format!(
            "expected a FeatureCollection, got \"{}\"",
            other
        ))),
        None => Err(AppError::parse("response is not GeoJSON")),
    }
}

#[cfg(test)]
mod tests {
    use super::decode_feature_collection;
    use crate::models::{FeatureId, Geometry, Position};
    use crate::ErrorKind;

    const GEOSERVER_BODY: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "id": "my_lines.1",
                "geometry": {"type": "LineString", "coordinates": [[0, 0], [10, 10, 3]]},
                "geometry_name": "geom",
                "properties": {"name": "first"}
            },
            {
                "type": "Feature",
                "id": 2,
                "geometry": null,
                "properties": null
            }
        ],
        "totalFeatures": 2,
        "numberMatched": 2,
        "crs": {"type": "name", "properties": {"name": "urn:ogc:def:crs:EPSG::3857"}}
    }"#;

    #[test]
    fn decodes_geoserver_collection() {
        let collection = decode_feature_collection(GEOSERVER_BODY).unwrap();
        assert_eq!(collection.len(), 2);
        assert_eq!(collection.crs_name(), Some("urn:ogc:def:crs:EPSG::3857"));

        let first = &collection.features[0];
        assert_eq!(first.id, Some(FeatureId::new("my_lines.1")));
        assert_eq!(
            first.geometry,
            Some(Geometry::LineString(vec![
                Position::new(0.0, 0.0),
                Position::new(10.0, 10.0)
            ]))
        );
        assert_eq!(first.properties["name"], "first");

        let second = &collection.features[1];
        assert_eq!(second.id, Some(FeatureId::new("2")));
        assert!(second.geometry.is_none());
        assert!(second.properties.is_empty());
    }

    #[test]
    fn rejects_non_collections_and_garbage() {
        let err = decode_feature_collection(r#"{"type":"Feature","geometry":null}"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);

        let err = decode_feature_collection("<ows:ExceptionReport/>").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
    }
}
