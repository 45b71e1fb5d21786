use super::extent::Extent;
use super::geometry::Geometry;
use crate::error::AppError;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Server-assigned feature identifier.
///
/// GeoJSON allows string or numeric ids; both are kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct FeatureId(String);

impl FeatureId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FeatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FeatureId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl<'de> Deserialize<'de> for FeatureId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(serde_json::Number),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(text) => Self(text),
            RawId::Number(number) => Self(number.to_string()),
        })
    }
}

fn null_as_empty_map<'de, D>(deserializer: D) -> Result<Map<String, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Map<String, Value>>::deserialize(deserializer)?.unwrap_or_default())
}

/// A geometry plus free-form properties and an optional server id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "Feature")]
pub struct Feature {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<FeatureId>,
    #[serde(default)]
    pub geometry: Option<Geometry>,
    #[serde(default, deserialize_with = "null_as_empty_map")]
    pub properties: Map<String, Value>,
}

impl Feature {
    /// A fresh, not yet persisted feature.
    pub fn new(geometry: Geometry) -> Self {
        Self {
            id: None,
            geometry: Some(geometry),
            properties: Map::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<FeatureId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn extent(&self) -> Extent {
        self.geometry
            .as_ref()
            .map(Geometry::extent)
            .unwrap_or_else(Extent::empty)
    }
}

impl From<String> for FeatureId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Ordered list of features as exchanged in GeoJSON.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename = "FeatureCollection")]
pub struct FeatureCollection {
    #[serde(default)]
    pub features: Vec<Feature>,
    /// Legacy GeoJSON 2008 named CRS member, e.g. `{"type":"name","properties":{"name":"EPSG:3857"}}`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crs: Option<Value>,
}

impl FeatureCollection {
    pub fn new(features: Vec<Feature>) -> Self {
        Self {
            features,
            crs: None,
        }
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Name of the declared data projection, when the document carries one.
    pub fn crs_name(&self) -> Option<&str> {
        self.crs
            .as_ref()?
            .get("properties")?
            .get("name")?
            .as_str()
    }

    pub fn extent(&self) -> Extent {
        let mut extent = Extent::empty();
        for feature in &self.features {
            extent.extend(&feature.extent());
        }
        extent
    }

    /// Parse any GeoJSON document (FeatureCollection, Feature or bare Geometry)
    /// into a collection.
    ///
    /// # Errors
    /// Returns [`AppError::Json`] for malformed JSON or an invalid member, and
    /// [`AppError::Parse`] when the top-level `type` is missing or unknown.
    pub fn from_geojson_str(text: &str) -> Result<Self, AppError> {
        let value: Value = serde_json::from_str(text)?;
        let kind = value
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| AppError::parse("GeoJSON document has no \"type\" member"))?
            .to_string();
        match kind.as_str() {
            "FeatureCollection" => Ok(serde_json::from_value(value)?),
            "Feature" => {
                let crs = value.get("crs").cloned();
                let feature: Feature = serde_json::from_value(value)?;
                Ok(Self {
                    features: vec![feature],
                    crs,
                })
            }
            "Point" | "LineString" | "Polygon" | "MultiPoint" | "MultiLineString"
            | "MultiPolygon" => {
                let crs = value.get("crs").cloned();
                let geometry: Geometry = serde_json::from_value(value)?;
                Ok(Self {
                    features: vec![Feature::new(geometry)],
                    crs,
                })
            }
            other => Err(AppError::parse(format!(
                "unsupported GeoJSON type \"{}\"",
                other
            ))),
        }
    }
}
