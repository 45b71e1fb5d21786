use crate::config::Config;
use crate::constants::{
    GML_NAMESPACE, OGC_NAMESPACE, WFS_NAMESPACE, WFS_SCHEMA_LOCATION, WFS_VERSION,
    XSI_NAMESPACE,
};
use crate::error::AppError;
use crate::models::{Feature, FeatureId, Geometry, Position};
use std::fmt::Write as _;

/// Format one ordinate in shortest round-trip decimal form (`-11000000`, `4600000.5`).
///
/// # Errors
/// Returns [`AppError::Parse`] for NaN or infinite values.
pub fn format_ordinate(value: f64) -> Result<String, AppError> {
    if !value.is_finite() {
        return Err(AppError::parse(format!("non-finite coordinate {}", value)));
    }
    // Avoid emitting "-0".
    let value = if value == 0.0 { 0.0 } else { value };
    Ok(format!("{}", value))
}

/// Encode positions as `"x1 y1 x2 y2 ... xn yn"`.
pub fn pos_list(positions: &[Position]) -> Result<String, AppError> {
    let mut out = String::new();
    for (i, position) in positions.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push_str(&format_ordinate(position.x)?);
        out.push(' ');
        out.push_str(&format_ordinate(position.y)?);
    }
    Ok(out)
}

pub fn xml_escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
    out
}

fn srs_attr(srs_name: Option<&str>) -> String {
    srs_name
        .map(|srs| format!(" srsName=\"{}\"", xml_escape(srs)))
        .unwrap_or_default()
}

fn point_gml(point: &Position, srs_name: Option<&str>) -> Result<String, AppError> {
    Ok(format!(
        "<gml:Point{}>\n  <gml:pos>{}</gml:pos>\n</gml:Point>",
        srs_attr(srs_name),
        pos_list(std::slice::from_ref(point))?
    ))
}

fn line_string_gml(line: &[Position], srs_name: Option<&str>) -> Result<String, AppError> {
    Ok(format!(
        "<gml:LineString{} decimal=\".\" cs=\",\" ts=\" \">\n  <gml:posList>{}</gml:posList>\n</gml:LineString>",
        srs_attr(srs_name),
        pos_list(line)?
    ))
}

fn ring_gml(tag: &str, ring: &[Position]) -> Result<String, AppError> {
    Ok(format!(
        "<gml:{tag}>\n  <gml:LinearRing>\n    <gml:posList>{}</gml:posList>\n  </gml:LinearRing>\n</gml:{tag}>",
        pos_list(ring)?
    ))
}

fn polygon_gml(rings: &[Vec<Position>], srs_name: Option<&str>) -> Result<String, AppError> {
    let Some((exterior, interiors)) = rings.split_first() else {
        return Err(AppError::parse("polygon has no exterior ring"));
    };
    let mut body = indent(&ring_gml("exterior", exterior)?, 2);
    for interior in interiors {
        body.push('\n');
        body.push_str(&indent(&ring_gml("interior", interior)?, 2));
    }
    Ok(format!(
        "<gml:Polygon{}>\n{}\n</gml:Polygon>",
        srs_attr(srs_name),
        body
    ))
}

fn multi_gml(
    collection: &str,
    member: &str,
    members: Vec<String>,
    srs_name: Option<&str>,
) -> String {
    let mut out = format!("<gml:{}{}>", collection, srs_attr(srs_name));
    for gml in members {
        let _ = write!(
            out,
            "\n  <gml:{member}>\n{}\n  </gml:{member}>",
            indent(&gml, 4)
        );
    }
    let _ = write!(out, "\n</gml:{}>", collection);
    out
}

/// Render a geometry as a GML 3.1 fragment declaring `srs_name`.
pub fn gml_geometry(geometry: &Geometry, srs_name: &str) -> Result<String, AppError> {
    let srs = Some(srs_name);
    match geometry {
        Geometry::Point(point) => point_gml(point, srs),
        Geometry::LineString(line) => line_string_gml(line, srs),
        Geometry::Polygon(rings) => polygon_gml(rings, srs),
        Geometry::MultiPoint(points) => {
            let members = points
                .iter()
                .map(|p| point_gml(p, None))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(multi_gml("MultiPoint", "pointMember", members, srs))
        }
        Geometry::MultiLineString(lines) => {
            let members = lines
                .iter()
                .map(|l| line_string_gml(l, None))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(multi_gml("MultiCurve", "curveMember", members, srs))
        }
        Geometry::MultiPolygon(polygons) => {
            let members = polygons
                .iter()
                .map(|rings| polygon_gml(rings, None))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(multi_gml("MultiSurface", "surfaceMember", members, srs))
        }
    }
}

fn indent(text: &str, spaces: usize) -> String {
    let pad = " ".repeat(spaces);
    text.lines()
        .map(|line| format!("{}{}", pad, line))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Renders WFS Transaction bodies for one configured feature type.
#[derive(Debug, Clone)]
pub struct TransactionBuilder {
    namespace_uri: String,
    feature_type: String,
    geometry_field: String,
    srs_name: String,
}

impl TransactionBuilder {
    pub fn new(config: &Config) -> Self {
        Self {
            namespace_uri: config.server_url.clone(),
            feature_type: config.feature_type.clone(),
            geometry_field: config.geometry_field.clone(),
            srs_name: config.srs_name.clone(),
        }
    }

    fn open_transaction(&self, with_gml: bool, with_ogc: bool) -> String {
        let mut out = format!(
            "<wfs:Transaction service=\"WFS\" version=\"{}\"\n  xmlns:wfs=\"{}\"",
            WFS_VERSION, WFS_NAMESPACE
        );
        if with_gml {
            let _ = write!(out, "\n  xmlns:gml=\"{}\"", GML_NAMESPACE);
        }
        if with_ogc {
            let _ = write!(out, "\n  xmlns:ogc=\"{}\"", OGC_NAMESPACE);
        }
        let _ = write!(
            out,
            "\n  xmlns:ns=\"{}\"\n  xmlns:xsi=\"{}\"\n  xsi:schemaLocation=\"{} {}\">",
            xml_escape(&self.namespace_uri),
            XSI_NAMESPACE,
            WFS_NAMESPACE,
            WFS_SCHEMA_LOCATION
        );
        out
    }

    fn feature_gml(&self, feature: &Feature) -> Result<String, AppError> {
        let geometry = feature
            .geometry
            .as_ref()
            .ok_or_else(|| AppError::precondition("feature has no geometry"))?;
        gml_geometry(geometry, &self.srs_name)
    }

    fn id_filter(id: &FeatureId) -> String {
        format!(
            "<ogc:Filter>\n  <ogc:FeatureId fid=\"{}\"/>\n</ogc:Filter>",
            xml_escape(id.as_str())
        )
    }

    /// Insert transaction carrying the feature's geometry.
    ///
    /// # Errors
    /// Fails when the feature has no geometry or a coordinate is not finite.
    pub fn insert(&self, feature: &Feature) -> Result<String, AppError> {
        let gml = self.feature_gml(feature)?;
        let feature_type = xml_escape(&self.feature_type);
        let field = xml_escape(&self.geometry_field);
        Ok(format!(
            "{}\n  <wfs:Insert>\n    <{feature_type}>\n      <{field}>\n{}\n      </{field}>\n    </{feature_type}>\n  </wfs:Insert>\n</wfs:Transaction>\n",
            self.open_transaction(true, false),
            indent(&gml, 8),
        ))
    }

    /// Update transaction replacing the geometry of the feature with `id`.
    ///
    /// # Errors
    /// Fails when the feature has no geometry or a coordinate is not finite.
    pub fn update(&self, id: &FeatureId, feature: &Feature) -> Result<String, AppError> {
        let gml = self.feature_gml(feature)?;
        Ok(format!(
            "{}\n  <wfs:Update typeName=\"ns:{}\">\n    <wfs:Property>\n      <wfs:Name>{}</wfs:Name>\n      <wfs:Value>\n{}\n      </wfs:Value>\n    </wfs:Property>\n{}\n  </wfs:Update>\n</wfs:Transaction>\n",
            self.open_transaction(true, true),
            xml_escape(&self.feature_type),
            xml_escape(&self.geometry_field),
            indent(&gml, 8),
            indent(&Self::id_filter(id), 4),
        ))
    }

    /// Delete transaction for the feature with `id`.
    pub fn delete(&self, id: &FeatureId) -> String {
        format!(
            "{}\n  <wfs:Delete typeName=\"ns:{}\">\n{}\n  </wfs:Delete>\n</wfs:Transaction>\n",
            self.open_transaction(false, true),
            xml_escape(&self.feature_type),
            indent(&Self::id_filter(id), 4),
        )
    }
}
