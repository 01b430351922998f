//! Error types for the advertisements API client.
//!
//! # Design
//! Every failure ends up as a display string in the presentation layer, so
//! variants carry owned text rather than source errors. Non-2xx responses get
//! their own variant with the raw status and body; the transport never turns
//! a status code into an error by itself.

/// Errors returned by `AdsClient` parse methods, `Transport` implementations
/// and `ApiService` operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response: unreachable host, malformed
    /// URL, or the I/O task itself failed.
    #[error("transport failed: {0}")]
    TransportError(String),

    /// The server answered with a status outside 2xx.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload or query could not be encoded.
    #[error("serialization failed: {0}")]
    SerializationError(String),
}
