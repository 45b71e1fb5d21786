//! In-process mock WFS server used by gateway and headless editor tests.

#![allow(dead_code)]

use axum::body::Bytes;
use axum::extract::{RawQuery, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::Router;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU16, Ordering};
use std::sync::{mpsc, Arc, Mutex};
use std::thread::{self, JoinHandle};
use tokio::sync::oneshot;

/// One request observed by the mock server.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: &'static str,
    pub path: &'static str,
    pub query: Option<String>,
    pub content_type: Option<String>,
    pub user_agent: Option<String>,
    pub body: String,
}

#[derive(Clone)]
struct MockState {
    collection_body: Arc<Mutex<String>>,
    transaction_status: Arc<AtomicU16>,
    tile_body: Arc<Mutex<Vec<u8>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

/// Mock GeoServer workspace at `http://{addr}/geoserver/gadm`.
pub struct MockWfsServer {
    addr: SocketAddr,
    state: MockState,
    shutdown: Option<oneshot::Sender<()>>,
    thread: Option<JoinHandle<()>>,
}

async fn get_feature(State(state): State<MockState>, RawQuery(query): RawQuery) -> (StatusCode, HeaderMap, String) {
    state.requests.lock().expect("requests lock").push(RecordedRequest {
        method: "GET",
        path: "/geoserver/gadm/ows",
        query,
        content_type: None,
        user_agent: None,
        body: String::new(),
    });
    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        "application/json".parse().expect("content type"),
    );
    let body = state.collection_body.lock().expect("body lock").clone();
    (StatusCode::OK, headers, body)
}

async fn transaction(State(state): State<MockState>, headers: HeaderMap, body: Bytes) -> (StatusCode, String) {
    state.requests.lock().expect("requests lock").push(RecordedRequest {
        method: "POST",
        path: "/geoserver/gadm/wfs",
        query: None,
        content_type: headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string),
        user_agent: None,
        body: String::from_utf8_lossy(&body).to_string(),
    });
    let status = StatusCode::from_u16(state.transaction_status.load(Ordering::SeqCst))
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, "<wfs:TransactionResponse/>".to_string())
}

/// Serves the single tile `0/0/0`; every other tile path is a 404.
async fn tile(State(state): State<MockState>, headers: HeaderMap) -> (StatusCode, HeaderMap, Vec<u8>) {
    state.requests.lock().expect("requests lock").push(RecordedRequest {
        method: "GET",
        path: "/tiles/0/0/0.png",
        query: None,
        content_type: None,
        user_agent: headers
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string),
        body: String::new(),
    });
    let mut reply = HeaderMap::new();
    reply.insert(header::CONTENT_TYPE, "image/png".parse().expect("content type"));
    let body = state.tile_body.lock().expect("tile lock").clone();
    (StatusCode::OK, reply, body)
}

impl MockWfsServer {
    /// Start the server on an ephemeral loopback port.
    ///
    /// # Panics
    /// Panics if the runtime or socket cannot be created.
    pub fn start(collection_body: &str) -> Self {
        let state = MockState {
            collection_body: Arc::new(Mutex::new(collection_body.to_string())),
            transaction_status: Arc::new(AtomicU16::new(200)),
            tile_body: Arc::new(Mutex::new(Vec::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        };
        let router = Router::new()
            .route("/geoserver/gadm/ows", get(get_feature))
            .route("/geoserver/gadm/wfs", post(transaction))
            .route("/tiles/0/0/0.png", get(tile))
            .with_state(state.clone());

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let (ready_tx, ready_rx) = mpsc::channel();
        let thread = thread::Builder::new()
            .name("mock-wfs-server".into())
            .spawn(move || {
                let rt = tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build()
                    .expect("mock runtime");
                rt.block_on(async move {
                    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                        .await
                        .expect("bind mock server");
                    let addr = listener.local_addr().expect("mock addr");
                    ready_tx.send(addr).expect("report addr");
                    axum::serve(listener, router)
                        .with_graceful_shutdown(async {
                            let _ = shutdown_rx.await;
                        })
                        .await
                        .expect("mock server");
                });
            })
            .expect("spawn mock server");

        let addr = ready_rx.recv().expect("mock server address");
        Self {
            addr,
            state,
            shutdown: Some(shutdown_tx),
            thread: Some(thread),
        }
    }

    /// Base URL to use as `Config::server_url`.
    pub fn server_url(&self) -> String {
        format!("http://{}/geoserver/gadm", self.addr)
    }

    /// URL template for the mock tile source.
    pub fn tile_template(&self) -> String {
        format!("http://{}/tiles/{{z}}/{{x}}/{{y}}.png", self.addr)
    }

    /// Bytes served for tile `0/0/0`.
    pub fn set_tile_body(&self, bytes: Vec<u8>) {
        *self.state.tile_body.lock().expect("tile lock") = bytes;
    }

    /// Status code returned by subsequent transaction POSTs.
    pub fn set_transaction_status(&self, status: u16) {
        self.state.transaction_status.store(status, Ordering::SeqCst);
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().expect("requests lock").clone()
    }

    pub fn transactions(&self) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == "POST")
            .collect()
    }
}

impl Drop for MockWfsServer {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}
