//! Raster tile download for the base map.

use crate::constants::{DEFAULT_TILE_TIMEOUT_SECS, TILE_USER_AGENT};
use crate::error::AppError;
use reqwest::blocking::Client;
use std::time::Duration;
use tracing::debug;

/// Source of encoded tile images, addressed by URL.
pub trait TileFetcher: Send + Sync {
    /// Download one tile and return its encoded bytes (PNG or JPEG).
    fn fetch(&self, url: &str) -> Result<Vec<u8>, AppError>;
}

/// [`TileFetcher`] over `reqwest`, identifying itself with [`TILE_USER_AGENT`].
pub struct HttpTileFetcher {
    client: Client,
}

impl HttpTileFetcher {
    /// # Errors
    /// Returns [`AppError::Network`] if the HTTP client cannot be constructed.
    pub fn new() -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TILE_TIMEOUT_SECS))
            .user_agent(TILE_USER_AGENT)
            .build()?;
        Ok(Self { client })
    }
}

impl TileFetcher for HttpTileFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, AppError> {
        debug!(url = %url, "fetching tile");
        let response = self.client.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(AppError::HttpStatus {
                status: status.as_u16(),
                body: response.text()?,
            });
        }
        Ok(response.bytes()?.to_vec())
    }
}
