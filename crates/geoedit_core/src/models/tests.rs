use super::*;
use serde_json::json;

fn square() -> Geometry {
    Geometry::polygon_from_ring(vec![
        Position::new(0.0, 0.0),
        Position::new(10.0, 0.0),
        Position::new(10.0, 10.0),
        Position::new(0.0, 10.0),
    ])
}

#[test]
fn polygon_from_ring_closes_once() {
    let Geometry::Polygon(rings) = square() else {
        panic!("expected polygon");
    };
    assert_eq!(rings[0].len(), 5);
    assert_eq!(rings[0].first(), rings[0].last());

    let Geometry::Polygon(rings) = Geometry::polygon_from_ring(vec![
        Position::new(0.0, 0.0),
        Position::new(1.0, 0.0),
        Position::new(0.0, 0.0),
    ]) else {
        panic!("expected polygon");
    };
    assert_eq!(rings[0].len(), 3);
}

#[test]
fn moving_ring_start_keeps_ring_closed() {
    let mut polygon = square();
    assert!(polygon.move_vertex(VertexRef { part: 0, index: 0 }, Position::new(-1.0, -1.0)));
    let Geometry::Polygon(rings) = &polygon else {
        panic!("expected polygon");
    };
    assert_eq!(rings[0][0], Position::new(-1.0, -1.0));
    assert_eq!(rings[0][4], Position::new(-1.0, -1.0));
}

#[test]
fn move_and_insert_reject_bad_addresses() {
    let mut point = Geometry::Point(Position::new(1.0, 1.0));
    assert!(!point.move_vertex(VertexRef { part: 0, index: 1 }, Position::default()));
    assert!(!point.insert_vertex(VertexRef { part: 0, index: 1 }, Position::default()));
    assert!(point.move_vertex(VertexRef { part: 0, index: 0 }, Position::new(2.0, 3.0)));
    assert_eq!(point, Geometry::Point(Position::new(2.0, 3.0)));

    let mut line = Geometry::LineString(vec![Position::new(0.0, 0.0), Position::new(2.0, 0.0)]);
    assert!(!line.insert_vertex(VertexRef { part: 0, index: 0 }, Position::default()));
    assert!(!line.move_vertex(VertexRef { part: 1, index: 0 }, Position::default()));
    assert!(line.insert_vertex(VertexRef { part: 0, index: 1 }, Position::new(1.0, 0.5)));
    let vertices = line.vertices();
    assert_eq!(vertices.len(), 3);
    assert_eq!(vertices[1], (VertexRef { part: 0, index: 1 }, Position::new(1.0, 0.5)));
}

#[test]
fn segments_cover_every_part() {
    let multi = Geometry::MultiPolygon(vec![
        match square() {
            Geometry::Polygon(rings) => rings,
            _ => unreachable!(),
        },
        vec![vec![
            Position::new(20.0, 20.0),
            Position::new(21.0, 20.0),
            Position::new(20.0, 21.0),
            Position::new(20.0, 20.0),
        ]],
    ]);
    let segments = multi.segments();
    assert_eq!(segments.len(), 4 + 3);
    assert_eq!(segments[4].0, VertexRef { part: 1, index: 0 });
    assert_eq!(Geometry::Point(Position::default()).segments().len(), 0);
}

#[test]
fn extent_spans_all_vertices() {
    let extent = square().extent();
    assert_eq!(extent, Extent::new(0.0, 0.0, 10.0, 10.0));
    assert_eq!(extent.center(), Some(Position::new(5.0, 5.0)));
    assert!(Extent::empty().is_empty());
    assert_eq!(Extent::empty().center(), None);

    let mut union = Extent::empty();
    union.extend(&Extent::empty());
    assert!(union.is_empty());
    union.extend(&extent);
    union.extend(&Geometry::Point(Position::new(-5.0, 20.0)).extent());
    assert_eq!(union, Extent::new(-5.0, 0.0, 10.0, 20.0));
    assert_eq!(union.width(), 15.0);
    assert_eq!(union.height(), 20.0);
}

#[test]
fn feature_serializes_as_geojson() {
    let feature = Feature::new(Geometry::Point(Position::new(1.0, 2.0))).with_id("my_lines.3");
    let value = serde_json::to_value(&feature).unwrap();
    assert_eq!(
        value,
        json!({
            "type": "Feature",
            "id": "my_lines.3",
            "geometry": {"type": "Point", "coordinates": [1.0, 2.0]},
            "properties": {}
        })
    );

    let unsaved = serde_json::to_value(Feature::new(Geometry::Point(Position::default()))).unwrap();
    assert!(unsaved.get("id").is_none());
}

#[test]
fn position_rejects_short_arrays() {
    assert!(serde_json::from_str::<Position>("[1.0]").is_err());
    assert_eq!(
        serde_json::from_str::<Position>("[1.0, 2.0, 3.0, 4.0]").unwrap(),
        Position::new(1.0, 2.0)
    );
}

#[test]
fn geojson_documents_of_every_shape_become_collections() {
    let collection = FeatureCollection::from_geojson_str(
        r#"{"type":"FeatureCollection","features":[
            {"type":"Feature","geometry":{"type":"Point","coordinates":[0,0]},"properties":{}},
            {"type":"Feature","geometry":{"type":"Point","coordinates":[1,1]},"properties":{}}
        ]}"#,
    )
    .unwrap();
    assert_eq!(collection.len(), 2);

    let single = FeatureCollection::from_geojson_str(
        r#"{"type":"Feature","id":9,"geometry":{"type":"LineString","coordinates":[[0,0],[1,1]]}}"#,
    )
    .unwrap();
    assert_eq!(single.len(), 1);
    assert_eq!(single.features[0].id, Some(FeatureId::new("9")));

    let bare = FeatureCollection::from_geojson_str(
        r#"{"type":"Polygon","coordinates":[[[0,0],[1,0],[1,1],[0,0]]]}"#,
    )
    .unwrap();
    assert_eq!(bare.features[0].geometry.as_ref().map(Geometry::type_name), Some("Polygon"));
}

#[test]
fn unsupported_geojson_is_a_parse_error() {
    for text in [
        "not json",
        r#"{"features":[]}"#,
        r#"{"type":"GeometryCollection","geometries":[]}"#,
        r#"{"type":"Point","coordinates":"nope"}"#,
    ] {
        let err = FeatureCollection::from_geojson_str(text).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::Parse, "input: {}", text);
    }
}

#[test]
fn converts_to_geo_types_keeping_holes() {
    let holed = Geometry::Polygon(vec![
        vec![
            Position::new(0.0, 0.0),
            Position::new(10.0, 0.0),
            Position::new(10.0, 10.0),
            Position::new(0.0, 0.0),
        ],
        vec![
            Position::new(2.0, 1.0),
            Position::new(4.0, 1.0),
            Position::new(4.0, 3.0),
            Position::new(2.0, 1.0),
        ],
    ]);
    let geo_types::Geometry::Polygon(polygon) = geo_types::Geometry::<f64>::from(&holed) else {
        panic!("expected polygon");
    };
    assert_eq!(polygon.exterior().0.len(), 4);
    assert_eq!(polygon.interiors().len(), 1);

    assert_eq!(Position::new(0.0, 0.0).distance(Position::new(3.0, 4.0)), 5.0);
    assert!(Geometry::LineString(Vec::new()).extent().is_empty());
}
