//! Controller flow tests driven through raw backend channels.

use super::*;
use crate::backend::{BackendHandle, CoreCmd, CoreErrorSource, CoreEvent, FeatureKey};
use crossbeam_channel::{unbounded, Receiver, Sender, TryRecvError};
use geoedit_core::wfs::TransactionBuilder;
use geoedit_core::{Config, ErrorKind, Feature, FeatureId, Geometry, Position};
use std::time::Duration;

struct TestHarness {
    editor: MapEditor,
    cmd_rx: Receiver<CoreCmd>,
    evt_tx: Sender<CoreEvent>,
}

fn make_editor() -> TestHarness {
    let (cmd_tx, cmd_rx) = unbounded();
    let (evt_tx, evt_rx) = unbounded();
    let editor = MapEditor::initialize(BackendHandle::from_test_channels(cmd_tx, evt_rx));
    assert!(matches!(recv_cmd(&cmd_rx), CoreCmd::FetchCollection));
    TestHarness {
        editor,
        cmd_rx,
        evt_tx,
    }
}

/// Editor preloaded with server features, as after the initial fetch.
fn make_editor_with(features: Vec<Feature>) -> (TestHarness, Vec<FeatureKey>) {
    let mut harness = make_editor();
    harness
        .evt_tx
        .send(CoreEvent::CollectionLoaded { features })
        .expect("send loaded");
    harness.editor.poll_backend();
    let keys = harness.editor.layer().iter().map(|f| f.key).collect();
    (harness, keys)
}

fn recv_cmd(rx: &Receiver<CoreCmd>) -> CoreCmd {
    rx.recv_timeout(Duration::from_millis(200))
        .expect("expected outbound command")
}

fn assert_no_cmd(rx: &Receiver<CoreCmd>) {
    match rx.try_recv() {
        Err(TryRecvError::Empty) => {}
        other => panic!("unexpected command: {:?}", other),
    }
}

fn p(x: f64, y: f64) -> Position {
    Position::new(x, y)
}

fn line(points: &[(f64, f64)]) -> Geometry {
    Geometry::LineString(points.iter().map(|&(x, y)| p(x, y)).collect())
}

fn insert_xml(feature: &Feature) -> String {
    TransactionBuilder::new(&Config::default())
        .insert(feature)
        .expect("encode insert")
}

mod drawing;
mod import_and_modes;
