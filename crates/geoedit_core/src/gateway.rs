//! HTTP gateway to the WFS feature server.
//!
//! Every call is a single blocking request: no retry, no backoff. Callers run
//! it off the UI thread (see the GUI backend worker).

use crate::config::Config;
use crate::error::AppError;
use crate::models::{Feature, FeatureCollection, FeatureId};
use crate::wfs::{decode_feature_collection, TransactionBuilder};
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use tracing::debug;

/// Opaque server reply to a transaction request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionReceipt {
    pub body: String,
}

/// Remote feature store operations used by the editor.
pub trait FeatureGateway: Send {
    /// Read the full feature collection of the configured feature type.
    fn fetch_collection(&self) -> Result<FeatureCollection, AppError>;
    /// Persist a newly drawn feature.
    fn insert(&self, feature: &Feature) -> Result<TransactionReceipt, AppError>;
    /// Replace the geometry of the feature with `id`.
    fn update(&self, id: &FeatureId, feature: &Feature) -> Result<TransactionReceipt, AppError>;
    /// Delete the feature with `id`.
    fn delete(&self, id: &FeatureId) -> Result<TransactionReceipt, AppError>;
}

/// [`FeatureGateway`] speaking WFS 1.1.0 over `reqwest`.
pub struct WfsGateway {
    client: Client,
    config: Config,
    transactions: TransactionBuilder,
}

impl WfsGateway {
    /// Build a gateway with the configured request timeout.
    ///
    /// # Errors
    /// Returns [`AppError::Network`] if the HTTP client cannot be constructed.
    pub fn new(config: Config) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self::with_client(client, config))
    }

    pub fn with_client(client: Client, config: Config) -> Self {
        let transactions = TransactionBuilder::new(&config);
        Self {
            client,
            config,
            transactions,
        }
    }

    fn read_success_body(response: reqwest::blocking::Response) -> Result<String, AppError> {
        let status = response.status();
        let body = response.text()?;
        if !status.is_success() {
            return Err(AppError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }

    fn post_transaction(&self, xml: String) -> Result<TransactionReceipt, AppError> {
        let url = self.config.transaction_url();
        debug!(url = %url, bytes = xml.len(), "posting WFS transaction");
        let response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/xml")
            .body(xml)
            .send()?;
        let body = Self::read_success_body(response)?;
        Ok(TransactionReceipt { body })
    }
}

impl FeatureGateway for WfsGateway {
    fn fetch_collection(&self) -> Result<FeatureCollection, AppError> {
        let url = self.config.get_feature_url();
        debug!(url = %url, "fetching feature collection");
        let response = self.client.get(&url).send()?;
        let body = Self::read_success_body(response)?;
        decode_feature_collection(&body)
    }

    fn insert(&self, feature: &Feature) -> Result<TransactionReceipt, AppError> {
        let xml = self.transactions.insert(feature)?;
        self.post_transaction(xml)
    }

    fn update(&self, id: &FeatureId, feature: &Feature) -> Result<TransactionReceipt, AppError> {
        let xml = self.transactions.update(id, feature)?;
        self.post_transaction(xml)
    }

    fn delete(&self, id: &FeatureId) -> Result<TransactionReceipt, AppError> {
        let xml = self.transactions.delete(id);
        self.post_transaction(xml)
    }
}
