//! Async facade over `AdsClient` and a `Transport`.
//!
//! Every operation is one build → execute → parse cycle and resolves to
//! exactly one `Ok` or one `Err`. Nothing is retried.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::client::AdsClient;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::{Transport, UreqTransport};
use crate::types::{Advertisement, Category, CreateAdvertisement};

/// Issues requests against the advertisements API.
#[derive(Clone)]
pub struct ApiService {
    client: AdsClient,
    transport: Arc<dyn Transport>,
}

impl ApiService {
    /// Service for the production endpoint over `ureq`.
    pub fn new() -> Self {
        Self::with_config(&ClientConfig::default())
    }

    pub fn with_config(config: &ClientConfig) -> Self {
        Self::with_transport(AdsClient::from_config(config), Arc::new(UreqTransport::new()))
    }

    pub fn with_transport(client: AdsClient, transport: Arc<dyn Transport>) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &AdsClient {
        &self.client
    }

    /// `GET /advertisements/`, yielding the first page's `results`.
    pub async fn fetch_advertisements(&self) -> Result<Vec<Advertisement>, ApiError> {
        let request = self.client.build_list_advertisements();
        let response = self.send(request).await?;
        let ads = self.client.parse_list_advertisements(response).map_err(log_failure)?;
        debug!(count = ads.len(), "advertisements loaded");
        Ok(ads)
    }

    /// `GET /advertisements/featured/`.
    pub async fn fetch_featured_advertisements(&self) -> Result<Vec<Advertisement>, ApiError> {
        let request = self.client.build_list_featured();
        let response = self.send(request).await?;
        self.client.parse_list_advertisements(response).map_err(log_failure)
    }

    /// `GET /advertisements/search/?q=...`.
    pub async fn search_advertisements(&self, query: &str) -> Result<Vec<Advertisement>, ApiError> {
        let request = self.client.build_search_advertisements(query)?;
        let response = self.send(request).await?;
        self.client.parse_list_advertisements(response).map_err(log_failure)
    }

    /// `GET /categories/`.
    pub async fn fetch_categories(&self) -> Result<Vec<Category>, ApiError> {
        let request = self.client.build_list_categories();
        let response = self.send(request).await?;
        self.client.parse_list_categories(response).map_err(log_failure)
    }

    /// `POST /advertisements/`.
    ///
    /// `images` is accepted but not uploaded: the request body carries only
    /// title, description, price and category. The body is serialized before
    /// any I/O, so an encoding failure never reaches the network.
    pub async fn create_advertisement(
        &self,
        title: &str,
        description: &str,
        price: &str,
        category_id: i64,
        images: &[Vec<u8>],
    ) -> Result<Advertisement, ApiError> {
        if !images.is_empty() {
            debug!(count = images.len(), "image upload is not supported, images ignored");
        }
        let input = CreateAdvertisement {
            title: title.to_string(),
            description: description.to_string(),
            price: price.to_string(),
            category_id,
        };
        let request = self.client.build_create_advertisement(&input)?;
        let response = self.send(request).await?;
        self.client.parse_create_advertisement(response).map_err(log_failure)
    }

    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        self.transport.execute(request).await
    }
}

impl Default for ApiService {
    fn default() -> Self {
        Self::new()
    }
}

fn log_failure(err: ApiError) -> ApiError {
    warn!(error = %err, "request did not produce a usable response");
    err
}
