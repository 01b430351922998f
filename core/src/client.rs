//! Stateless HTTP request builder and response parser for the advertisements
//! API.
//!
//! # Design
//! `AdsClient` holds only a `base_url` and carries no mutable state between
//! calls. Each operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! Whoever executes the round-trip in between (`ApiService` with a
//! `Transport`, or a native host through the FFI crate) gets identical
//! request shapes and error semantics.

use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Advertisement, Category, CreateAdvertisement, PaginatedResponse};

/// Synchronous, stateless client for the advertisements API.
#[derive(Debug, Clone)]
pub struct AdsClient {
    base_url: String,
}

impl AdsClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(&config.base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_list_advertisements(&self) -> HttpRequest {
        self.get(format!("{}/advertisements/", self.base_url))
    }

    pub fn build_list_featured(&self) -> HttpRequest {
        self.get(format!("{}/advertisements/featured/", self.base_url))
    }

    pub fn build_search_advertisements(&self, query: &str) -> Result<HttpRequest, ApiError> {
        let qs = serde_urlencoded::to_string([("q", query)])
            .map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(self.get(format!("{}/advertisements/search/?{qs}", self.base_url)))
    }

    pub fn build_list_categories(&self) -> HttpRequest {
        self.get(format!("{}/categories/", self.base_url))
    }

    pub fn build_create_advertisement(
        &self,
        input: &CreateAdvertisement,
    ) -> Result<HttpRequest, ApiError> {
        let body =
            serde_json::to_string(input).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}/advertisements/", self.base_url),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }

    /// Parse any paginated advertisement listing (plain, featured or search)
    /// and keep the envelope.
    pub fn parse_advertisement_page(
        &self,
        response: HttpResponse,
    ) -> Result<PaginatedResponse<Advertisement>, ApiError> {
        decode(response)
    }

    /// Parse any paginated advertisement listing and return only `results`.
    pub fn parse_list_advertisements(
        &self,
        response: HttpResponse,
    ) -> Result<Vec<Advertisement>, ApiError> {
        self.parse_advertisement_page(response).map(|page| page.results)
    }

    pub fn parse_list_categories(&self, response: HttpResponse) -> Result<Vec<Category>, ApiError> {
        decode(response)
    }

    pub fn parse_create_advertisement(
        &self,
        response: HttpResponse,
    ) -> Result<Advertisement, ApiError> {
        decode(response)
    }

    fn get(&self, path: String) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path,
            headers: Vec::new(),
            body: None,
        }
    }
}

/// Reject non-2xx responses, then deserialize the body.
fn decode<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    check_status(&response)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}
