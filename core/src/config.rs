//! Client configuration.

/// Production endpoint of the advertisements API.
pub const DEFAULT_BASE_URL: &str = "https://turkobuv.ru/api";

/// Settings shared by `AdsClient` and `ApiService`.
///
/// Only the origin is configurable; timeouts are left at the transport's
/// defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
}

impl ClientConfig {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}
