//! Native map editor entry point.
//!
//! Exposes a `run` helper so the workspace root can launch the editor
//! without duplicating initialization logic.

mod app;
/// Backend worker + protocol types used by the GUI and headless tests.
pub mod backend;
/// Headless map editor: view, layers, interactions and the controller.
pub mod editor;

use app::{GeoEditApp, TileCache};
use backend::{spawn_backend, spawn_tile_workers, TILE_WORKERS};
use clap::Parser;
use editor::MapEditor;
use eframe::egui;
use geoedit_core::{Config, HttpTileFetcher, Projection, WfsGateway};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "geoedit=info,geoedit_gui=info,geoedit_core=info";

/// Command-line overrides for [`Config`].
///
/// Flags win over `GEOEDIT_*` variables, which only [`Config::from_env`] reads.
#[derive(Parser, Debug, Default)]
#[command(name = "geoedit-gui", about = "Map editor for WFS-T feature servers", version)]
pub struct Args {
    /// Base URL of the WFS workspace (e.g. http://localhost:8080/geoserver/gadm)
    #[arg(long)]
    pub server_url: Option<String>,

    /// Feature type to edit
    #[arg(long)]
    pub feature_type: Option<String>,

    /// SRS name used on the wire
    #[arg(long)]
    pub srs_name: Option<String>,

    /// Name of the geometry attribute
    #[arg(long)]
    pub geometry_field: Option<String>,

    /// HTTP request timeout in seconds
    #[arg(long)]
    pub request_timeout: Option<u64>,
}

impl Args {
    /// Overlay explicitly given values on `config`. Blank strings and a zero
    /// timeout are ignored.
    pub fn apply(self, mut config: Config) -> Config {
        fn non_blank(value: Option<String>) -> Option<String> {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        }
        if let Some(url) = non_blank(self.server_url) {
            config.server_url = url.trim_end_matches('/').to_string();
        }
        if let Some(feature_type) = non_blank(self.feature_type) {
            config.feature_type = feature_type;
        }
        if let Some(srs_name) = non_blank(self.srs_name) {
            config.srs_name = srs_name;
        }
        if let Some(field) = non_blank(self.geometry_field) {
            config.geometry_field = field;
        }
        if let Some(timeout) = self.request_timeout.filter(|t| *t > 0) {
            config.request_timeout_secs = timeout;
        }
        config
    }
}

/// One-line report for a failed [`run`].
///
/// App creation fails before any window opens (bad SRS name, HTTP client);
/// everything else comes from the windowing or GL stack.
pub fn failure_message(err: &eframe::Error) -> String {
    match err {
        eframe::Error::AppCreation(cause) => {
            format!("geoedit: cannot start the map editor: {}", cause)
        }
        other => format!("geoedit: map window failed: {}", other),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

/// Start the map editor with tracing enabled.
///
/// # Returns
/// The result of `eframe::run_native`.
///
/// # Errors
/// Propagates any `eframe` initialization or runtime error, including app
/// creation failures for an unsupported SRS name or an HTTP client that
/// cannot be built (feature or tile).
pub fn run() -> eframe::Result<()> {
    init_tracing();

    let config = Args::parse().apply(Config::from_env());
    let server_projection = config
        .srs_name
        .parse::<Projection>()
        .map_err(|err| eframe::Error::AppCreation(Box::new(err)))?;
    info!(
        server = %config.server_url,
        feature_type = %config.feature_type,
        srs = %server_projection,
        "starting map editor"
    );
    let server_label = config.server_url.clone();
    let gateway =
        WfsGateway::new(config).map_err(|err| eframe::Error::AppCreation(Box::new(err)))?;
    let backend = spawn_backend(Box::new(gateway), server_projection);
    let fetcher = HttpTileFetcher::new().map_err(|err| eframe::Error::AppCreation(Box::new(err)))?;
    let tiles = TileCache::new(spawn_tile_workers(Arc::new(fetcher), TILE_WORKERS));
    let app = GeoEditApp::new(MapEditor::initialize(backend), tiles, server_label);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(app::DEFAULT_WINDOW_SIZE)
            .with_min_inner_size(app::MIN_WINDOW_SIZE)
            .with_title("GeoEdit"),
        ..Default::default()
    };

    eframe::run_native("GeoEdit", options, Box::new(|_cc| Ok(Box::new(app))))
}
