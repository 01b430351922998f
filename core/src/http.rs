//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! These types describe HTTP requests and responses as plain data. `AdsClient`
//! builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network; a `Transport` (or the native host, through the FFI
//! crate) performs the actual round-trip.
//!
//! All fields use owned types (`String`, `Vec`) so values can move into
//! blocking I/O tasks and across the FFI boundary without lifetime concerns.

use crate::error::ApiError;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

/// An HTTP request described as plain data.
///
/// `path` is the absolute URL, query string included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    /// Build a response from a raw body.
    ///
    /// A 2xx body that is not UTF-8 cannot match any schema and is a
    /// `DeserializationError`. On other statuses the body is only carried
    /// into `HttpError`, so invalid bytes are replaced and the status is kept.
    pub fn from_bytes(
        status: u16,
        headers: Vec<(String, String)>,
        body: Vec<u8>,
    ) -> Result<Self, ApiError> {
        let body = match String::from_utf8(body) {
            Ok(text) => text,
            Err(e) if is_success_status(status) => {
                return Err(ApiError::DeserializationError(e.to_string()))
            }
            Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
        };
        Ok(Self {
            status,
            headers,
            body,
        })
    }

    pub fn is_success(&self) -> bool {
        is_success_status(self.status)
    }
}

fn is_success_status(status: u16) -> bool {
    (200..300).contains(&status)
}
