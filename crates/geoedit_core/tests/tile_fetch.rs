//! Tile download against the mock server.

mod support;

use geoedit_core::constants::TILE_USER_AGENT;
use geoedit_core::{AppError, ErrorKind, HttpTileFetcher, TileFetcher};
use support::MockWfsServer;

fn tile_url(server: &MockWfsServer, z: u8, x: u32, y: u32) -> String {
    server
        .tile_template()
        .replace("{z}", &z.to_string())
        .replace("{x}", &x.to_string())
        .replace("{y}", &y.to_string())
}

#[test]
fn fetch_returns_tile_bytes_and_identifies_client() {
    let server = MockWfsServer::start("{}");
    server.set_tile_body(vec![0x89, b'P', b'N', b'G', 1, 2, 3]);
    let fetcher = HttpTileFetcher::new().expect("fetcher");

    let bytes = fetcher.fetch(&tile_url(&server, 0, 0, 0)).expect("tile");
    assert_eq!(bytes, vec![0x89, b'P', b'N', b'G', 1, 2, 3]);

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].path, "/tiles/0/0/0.png");
    assert_eq!(requests[0].user_agent.as_deref(), Some(TILE_USER_AGENT));
}

#[test]
fn missing_tile_is_a_network_error() {
    let server = MockWfsServer::start("{}");
    let fetcher = HttpTileFetcher::new().expect("fetcher");

    let err = fetcher.fetch(&tile_url(&server, 3, 1, 2)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Network);
    assert!(matches!(err, AppError::HttpStatus { status: 404, .. }));
}
