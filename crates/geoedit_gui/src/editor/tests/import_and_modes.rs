//! Mode switching, initial load and local GeoJSON import.

use super::*;

const THREE_FEATURES_3857: &str = r#"{
  "type": "FeatureCollection",
  "crs": { "type": "name", "properties": { "name": "EPSG:3857" } },
  "features": [
    { "type": "Feature", "id": "a", "geometry": { "type": "Point", "coordinates": [0, 0] }, "properties": {} },
    { "type": "Feature", "geometry": { "type": "LineString", "coordinates": [[10000, 5000], [80000, 30000]] }, "properties": { "name": "road" } },
    { "type": "Feature", "geometry": { "type": "Polygon", "coordinates": [[[20000, 10000], [30000, 10000], [30000, 20000], [20000, 10000]]] }, "properties": null }
  ]
}"#;

#[test]
fn initialize_installs_modify_and_snap() {
    let harness = make_editor();
    assert_eq!(
        harness.editor.interactions().kinds(),
        vec![InteractionKind::Modify, InteractionKind::Snap]
    );
    let center = harness.editor.view().center();
    assert_eq!((center.x, center.y), (-11_000_000.0, 4_600_000.0));
    assert!((harness.editor.view().zoom() - 4.0).abs() < 1e-9);
    assert!(harness.editor.layer().is_empty());
}

#[test]
fn draw_to_modify_switch_replaces_interactions_once() {
    let mut harness = make_editor();
    harness
        .editor
        .on_mode_change(ModeSelection::draw(DrawType::LineString))
        .expect("draw mode");
    assert_eq!(
        harness.editor.interactions().kinds(),
        vec![InteractionKind::Draw, InteractionKind::Snap]
    );
    harness.editor.click(p(0.0, 0.0));
    assert_eq!(harness.editor.sketch().len(), 1);

    harness
        .editor
        .on_mode_change(ModeSelection::modify())
        .expect("modify mode");
    assert_eq!(
        harness.editor.interactions().kinds(),
        vec![InteractionKind::Modify, InteractionKind::Snap]
    );
    assert!(harness.editor.sketch().is_empty());

    harness
        .editor
        .on_mode_change(ModeSelection::modify())
        .expect("modify again");
    assert_eq!(
        harness.editor.interactions().kinds(),
        vec![InteractionKind::Modify, InteractionKind::Snap]
    );
}

#[test]
fn delete_mode_installs_select_only_and_clears_on_exit() {
    let (mut harness, keys) = make_editor_with(vec![
        Feature::new(Geometry::Point(p(0.0, 0.0))).with_id("1"),
    ]);
    harness
        .editor
        .on_mode_change(ModeSelection::delete())
        .expect("delete mode");
    assert_eq!(
        harness.editor.interactions().kinds(),
        vec![InteractionKind::Select]
    );
    harness.editor.click(p(0.0, 0.0));
    assert_eq!(harness.editor.selection(), Some(keys[0]));

    harness
        .editor
        .on_mode_change(ModeSelection::modify())
        .expect("modify mode");
    assert!(harness.editor.selection().is_none());
}

#[test]
fn draw_without_type_installs_nothing() {
    let mut harness = make_editor();
    let err = harness
        .editor
        .on_mode_change(ModeSelection {
            mode: InteractionMode::Draw,
            draw_type: None,
        })
        .expect_err("missing draw type");
    assert_eq!(err.kind(), ErrorKind::Precondition);
    assert!(harness.editor.interactions().kinds().is_empty());
    assert!(harness.editor.click(p(0.0, 0.0)).is_none());
    assert!(harness.editor.layer().is_empty());
}

#[test]
fn loaded_collection_is_appended_with_status() {
    let (harness, keys) = make_editor_with(vec![
        Feature::new(Geometry::Point(p(0.0, 0.0))).with_id("1"),
        Feature::new(Geometry::Point(p(5.0, 5.0))).with_id("2"),
    ]);
    assert_eq!(keys.len(), 2);
    assert_eq!(
        harness.editor.feedback().status_text(),
        Some("Loaded 2 features from the server.")
    );
}

#[test]
fn import_replaces_collection_and_fits_view() {
    let (mut harness, old_keys) = make_editor_with(vec![
        Feature::new(Geometry::Point(p(-5_000_000.0, 0.0))).with_id("old"),
    ]);

    let count = harness
        .editor
        .load_local_file(THREE_FEATURES_3857)
        .expect("import");
    assert_eq!(count, 3);
    assert_eq!(harness.editor.layer().len(), 3);
    assert!(!harness.editor.layer().contains(old_keys[0]));

    let bbox = harness.editor.layer().extent();
    assert_eq!(bbox, geoedit_core::Extent::new(0.0, 0.0, 80_000.0, 30_000.0));

    let view = harness.editor.view();
    let center = view.center();
    assert!((center.x - 40_000.0).abs() < 1e-6);
    assert!((center.y - 15_000.0).abs() < 1e-6);
    let visible = view.visible_extent();
    assert!(visible.min_x() <= 0.0 && visible.max_x() >= 80_000.0);
    assert!(visible.min_y() <= 0.0 && visible.max_y() >= 30_000.0);
    // 20 px padding on the limiting axis: 80000 m over 800 - 40 px.
    assert!((view.resolution() - 80_000.0 / 760.0).abs() < 1e-9);
    assert_no_cmd(&harness.cmd_rx);
}

#[test]
fn import_defaults_to_geographic_coordinates() {
    let mut harness = make_editor();
    let geojson = r#"{"type":"Feature","geometry":{"type":"Point","coordinates":[90.0,0.0,12.5]},"properties":{}}"#;
    assert_eq!(harness.editor.load_local_file(geojson).expect("import"), 1);

    let feature = &harness.editor.layer().iter().next().expect("feature").feature;
    let Some(Geometry::Point(point)) = &feature.geometry else {
        panic!("expected point");
    };
    assert!((point.x - 10_018_754.171_394_622).abs() < 1e-3);
    assert!(point.y.abs() < 1e-6);
}

#[test]
fn malformed_import_leaves_layer_untouched() {
    let (mut harness, keys) = make_editor_with(vec![
        Feature::new(Geometry::Point(p(0.0, 0.0))).with_id("1"),
    ]);
    let before = harness.editor.view().clone();

    let err = harness
        .editor
        .load_local_file("{\"type\": \"FeatureCollection\", \"features\": [")
        .expect_err("malformed");
    assert_eq!(err.kind(), ErrorKind::Parse);

    let unsupported = r#"{"type":"FeatureCollection","crs":{"type":"name","properties":{"name":"EPSG:2154"}},"features":[]}"#;
    let err = harness
        .editor
        .load_local_file(unsupported)
        .expect_err("unsupported crs");
    assert_eq!(err.kind(), ErrorKind::Parse);

    assert_eq!(harness.editor.layer().len(), 1);
    assert!(harness.editor.layer().contains(keys[0]));
    assert_eq!(harness.editor.view(), &before);
}

#[test]
fn backend_disconnect_is_reported_not_panicked() {
    let (cmd_tx, cmd_rx) = unbounded();
    let (_evt_tx, evt_rx) = unbounded::<CoreEvent>();
    drop(cmd_rx);
    let mut editor = MapEditor::initialize(BackendHandle::from_test_channels(cmd_tx, evt_rx));
    assert!(editor.feedback().status_text().is_some());

    editor
        .on_mode_change(ModeSelection::draw(DrawType::Point))
        .expect("draw mode");
    editor.click(p(0.0, 0.0));
    assert_eq!(editor.layer().len(), 1);
    assert_eq!(
        editor.feedback().status_text(),
        Some("Precondition failed: Backend worker is not running.")
    );
}
