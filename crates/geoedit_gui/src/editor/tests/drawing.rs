//! Draw gestures: one finished sketch yields one feature and one insert.

use super::*;

fn expect_single_insert(harness: &TestHarness) -> (FeatureKey, Feature) {
    let cmd = recv_cmd(&harness.cmd_rx);
    assert_no_cmd(&harness.cmd_rx);
    match cmd {
        CoreCmd::InsertFeature { key, feature } => (key, feature),
        other => panic!("unexpected command: {:?}", other),
    }
}

#[test]
fn point_draw_inserts_one_feature() {
    let mut harness = make_editor();
    harness
        .editor
        .on_mode_change(ModeSelection::draw(DrawType::Point))
        .expect("draw mode");

    let event = harness.editor.click(p(1_000_000.0, 2_000_000.0));
    assert!(matches!(event, Some(GestureEvent::DrawEnd(_))));
    assert_eq!(harness.editor.layer().len(), 1);

    let (key, feature) = expect_single_insert(&harness);
    assert!(harness.editor.layer().contains(key));
    assert!(feature.id.is_none());
    assert!(insert_xml(&feature).contains("<gml:pos>1000000 2000000</gml:pos>"));
}

#[test]
fn line_draw_finishes_on_double_click() {
    let mut harness = make_editor();
    harness
        .editor
        .on_mode_change(ModeSelection::draw(DrawType::LineString))
        .expect("draw mode");

    assert!(harness.editor.click(p(0.0, 0.0)).is_none());
    assert!(harness.editor.click(p(1_000_000.0, 500_000.0)).is_none());
    assert_eq!(harness.editor.sketch().len(), 2);
    assert_no_cmd(&harness.cmd_rx);

    // A double-click arrives as a second click on the same spot, then the
    // double-click itself.
    let first = harness.editor.click(p(1_000_000.0, 500_000.0));
    let second = harness.editor.double_click(p(1_000_000.0, 500_000.0));
    assert!(matches!(first, Some(GestureEvent::DrawEnd(_))));
    assert!(second.is_none());

    assert_eq!(harness.editor.layer().len(), 1);
    assert!(harness.editor.sketch().is_empty());
    let (_, feature) = expect_single_insert(&harness);
    assert_eq!(feature.geometry, Some(line(&[(0.0, 0.0), (1_000_000.0, 500_000.0)])));
    assert!(insert_xml(&feature).contains("<gml:posList>0 0 1000000 500000</gml:posList>"));
}

#[test]
fn polygon_draw_closes_ring() {
    let mut harness = make_editor();
    harness
        .editor
        .on_mode_change(ModeSelection::draw(DrawType::Polygon))
        .expect("draw mode");

    harness.editor.click(p(0.0, 0.0));
    harness.editor.click(p(1_000_000.0, 0.0));
    harness.editor.click(p(1_000_000.0, 1_000_000.0));
    harness.editor.click(p(1_000_000.0, 1_000_000.0));
    let event = harness.editor.double_click(p(1_000_000.0, 1_000_000.0));
    assert!(matches!(event, Some(GestureEvent::DrawEnd(_))));

    assert_eq!(harness.editor.layer().len(), 1);
    let (_, feature) = expect_single_insert(&harness);
    assert!(insert_xml(&feature).contains(
        "<gml:posList>0 0 1000000 0 1000000 1000000 0 0</gml:posList>"
    ));
}

#[test]
fn double_click_without_enough_vertices_keeps_sketch() {
    let mut harness = make_editor();
    harness
        .editor
        .on_mode_change(ModeSelection::draw(DrawType::LineString))
        .expect("draw mode");

    harness.editor.click(p(0.0, 0.0));
    assert!(harness.editor.double_click(p(0.0, 0.0)).is_none());
    assert_eq!(harness.editor.sketch().len(), 1);
    assert!(harness.editor.layer().is_empty());
    assert_no_cmd(&harness.cmd_rx);

    harness.editor.cancel_gesture();
    assert!(harness.editor.sketch().is_empty());
}

#[test]
fn draw_clicks_snap_to_existing_vertices() {
    let (mut harness, _) = make_editor_with(vec![Feature::new(line(&[
        (1_000_000.0, 1_000_000.0),
        (3_000_000.0, 1_000_000.0),
    ]))
    .with_id("my_lines.1")]);
    harness
        .editor
        .on_mode_change(ModeSelection::draw(DrawType::Point))
        .expect("draw mode");

    let tolerance = PIXEL_TOLERANCE * harness.editor.view().resolution();
    harness
        .editor
        .click(p(1_000_000.0 + tolerance / 2.0, 1_000_000.0));
    let (_, feature) = expect_single_insert(&harness);
    assert_eq!(feature.geometry, Some(Geometry::Point(p(1_000_000.0, 1_000_000.0))));
}

#[test]
fn insert_failure_keeps_feature_and_reports_status() {
    let mut harness = make_editor();
    harness
        .editor
        .on_mode_change(ModeSelection::draw(DrawType::Point))
        .expect("draw mode");
    harness.editor.click(p(0.0, 0.0));
    let (key, _) = expect_single_insert(&harness);

    harness
        .evt_tx
        .send(CoreEvent::Error {
            source: CoreErrorSource::Insert,
            key: Some(key),
            message: "Saving new feature failed: Server responded with 500: boom".to_string(),
        })
        .expect("send error");
    harness.editor.poll_backend();

    assert!(harness.editor.layer().contains(key));
    assert_eq!(
        harness.editor.feedback().status_text(),
        Some("Saving new feature failed: Server responded with 500: boom")
    );
    assert_no_cmd(&harness.cmd_rx);
}
