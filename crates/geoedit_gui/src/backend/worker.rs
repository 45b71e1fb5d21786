//! Background worker thread for feature server access.

use crate::backend::{CoreCmd, CoreErrorSource, CoreEvent, FeatureKey};
use crossbeam_channel::{unbounded, Receiver, Sender};
use geoedit_core::{
    config::env_flag_enabled,
    projection::{reproject_collection, transform_position},
    Feature, FeatureGateway, Projection,
};
use std::thread;
use std::time::Instant;
use tracing::{error, info};

/// Handle for sending commands to, and receiving events from, the backend worker.
pub struct BackendHandle {
    pub cmd_tx: Sender<CoreCmd>,
    pub evt_rx: Receiver<CoreEvent>,
}

impl BackendHandle {
    /// Wrap raw channels so tests can observe commands and inject events.
    #[cfg(test)]
    pub(crate) fn from_test_channels(cmd_tx: Sender<CoreCmd>, evt_rx: Receiver<CoreEvent>) -> Self {
        Self { cmd_tx, evt_rx }
    }
}

struct WorkerState {
    gateway: Box<dyn FeatureGateway>,
    evt_tx: Sender<CoreEvent>,
    server_projection: Projection,
    perf_log_enabled: bool,
}

fn send_error(
    evt_tx: &Sender<CoreEvent>,
    source: CoreErrorSource,
    key: Option<FeatureKey>,
    message: String,
) {
    let _ = evt_tx.send(CoreEvent::Error {
        source,
        key,
        message,
    });
}

fn log_request_perf(enabled: bool, op: &str, started: Instant, ok: bool) {
    if !enabled {
        return;
    }
    info!(
        target: "geoedit_gui::backend_perf",
        op = op,
        ok = ok,
        elapsed_ms = started.elapsed().as_secs_f64() * 1000.0,
        "backend request perf"
    );
}

impl WorkerState {
    /// Copy of `feature` with its geometry in the server's projection.
    fn to_server_projection(&self, feature: &Feature) -> Feature {
        let mut outgoing = feature.clone();
        if self.server_projection != Projection::WebMercator {
            if let Some(geometry) = outgoing.geometry.as_mut() {
                let to = self.server_projection;
                geometry.transform(|p| transform_position(p, Projection::WebMercator, to));
            }
        }
        outgoing
    }

    fn handle_fetch(&mut self) {
        let started = Instant::now();
        match self.gateway.fetch_collection() {
            Ok(mut collection) => {
                log_request_perf(self.perf_log_enabled, "fetch", started, true);
                reproject_collection(
                    &mut collection,
                    self.server_projection,
                    Projection::WebMercator,
                );
                info!("loaded {} features from server", collection.len());
                let _ = self.evt_tx.send(CoreEvent::CollectionLoaded {
                    features: collection.features,
                });
            }
            Err(err) => {
                log_request_perf(self.perf_log_enabled, "fetch", started, false);
                error!("backend fetch failed: {}", err);
                send_error(
                    &self.evt_tx,
                    CoreErrorSource::Fetch,
                    None,
                    format!("Loading features failed: {}", err),
                );
            }
        }
    }

    fn handle_insert(&mut self, key: FeatureKey, feature: Feature) {
        let started = Instant::now();
        let outgoing = self.to_server_projection(&feature);
        match self.gateway.insert(&outgoing) {
            Ok(_) => {
                log_request_perf(self.perf_log_enabled, "insert", started, true);
                let _ = self.evt_tx.send(CoreEvent::FeatureInserted { key });
            }
            Err(err) => {
                log_request_perf(self.perf_log_enabled, "insert", started, false);
                error!("backend insert failed: {}", err);
                send_error(
                    &self.evt_tx,
                    CoreErrorSource::Insert,
                    Some(key),
                    format!("Saving new feature failed: {}", err),
                );
            }
        }
    }

    fn handle_update(&mut self, key: FeatureKey, id: geoedit_core::FeatureId, feature: Feature) {
        let started = Instant::now();
        let outgoing = self.to_server_projection(&feature);
        match self.gateway.update(&id, &outgoing) {
            Ok(_) => {
                log_request_perf(self.perf_log_enabled, "update", started, true);
                let _ = self.evt_tx.send(CoreEvent::FeatureUpdated { key, id });
            }
            Err(err) => {
                log_request_perf(self.perf_log_enabled, "update", started, false);
                error!("backend update of {} failed: {}", id, err);
                send_error(
                    &self.evt_tx,
                    CoreErrorSource::Update,
                    Some(key),
                    format!("Updating feature {} failed: {}", id, err),
                );
            }
        }
    }

    fn handle_delete(&mut self, key: FeatureKey, id: geoedit_core::FeatureId) {
        let started = Instant::now();
        match self.gateway.delete(&id) {
            Ok(_) => {
                log_request_perf(self.perf_log_enabled, "delete", started, true);
                let _ = self.evt_tx.send(CoreEvent::FeatureDeleted { key, id });
            }
            Err(err) => {
                log_request_perf(self.perf_log_enabled, "delete", started, false);
                error!("backend delete of {} failed: {}", id, err);
                send_error(
                    &self.evt_tx,
                    CoreErrorSource::Delete,
                    Some(key),
                    format!("Deleting feature {} failed: {}", id, err),
                );
            }
        }
    }
}

/// Spawn the backend worker thread that performs blocking feature server calls.
///
/// All network I/O stays off the UI thread; commands run one at a time in
/// arrival order and the worker replies with [`CoreEvent`] values that are
/// polled each frame. Geometries travel in Web Mercator on the UI side and
/// in `server_projection` on the wire.
///
/// # Returns
/// A [`BackendHandle`] containing the command sender and event receiver.
///
/// # Panics
/// Panics if the worker thread cannot be spawned.
pub fn spawn_backend(
    gateway: Box<dyn FeatureGateway>,
    server_projection: Projection,
) -> BackendHandle {
    let (cmd_tx, cmd_rx) = unbounded();
    let (evt_tx, evt_rx) = unbounded();

    thread::Builder::new()
        .name("geoedit-gui-backend".to_string())
        .spawn(move || {
            let mut state = WorkerState {
                gateway,
                evt_tx,
                server_projection,
                perf_log_enabled: env_flag_enabled("GEOEDIT_BACKEND_PERF_LOG"),
            };
            for cmd in cmd_rx.iter() {
                match cmd {
                    CoreCmd::FetchCollection => state.handle_fetch(),
                    CoreCmd::InsertFeature { key, feature } => state.handle_insert(key, feature),
                    CoreCmd::UpdateFeature { key, id, feature } => {
                        state.handle_update(key, id, feature)
                    }
                    CoreCmd::DeleteFeature { key, id } => state.handle_delete(key, id),
                }
            }
        })
        .expect("spawn backend thread");

    BackendHandle { cmd_tx, evt_rx }
}
