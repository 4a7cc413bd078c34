//! Error types for the transport capability.
//!
//! This module defines the [`HttpError`] enum which encompasses all possible
//! failure modes when talking to a single peer's HTTP API. Network and server
//! errors feed the failover path of the retry coordinator; errors raised while
//! assembling the request end it (see [`HttpError::is_peer_failure`]).

use thiserror::Error;

/// Errors that can occur while sending one request to one peer.
///
/// # Error Categories
///
/// - **Network errors**: [`RequestFailed`](HttpError::RequestFailed),
///   [`MiddlewareError`](HttpError::MiddlewareError)
/// - **Server errors**: [`ServerError`](HttpError::ServerError)
/// - **Client errors**: [`UrlError`](HttpError::UrlError),
///   [`UnsupportedMethod`](HttpError::UnsupportedMethod),
///   [`InvalidHeader`](HttpError::InvalidHeader),
///   [`JsonError`](HttpError::JsonError)
///
/// # Example
///
/// ```rust,no_run
/// use lisk_client::http::HttpError;
///
/// fn handle_error(err: HttpError) {
///     match err {
///         HttpError::ServerError { status, body } => {
///             eprintln!("Peer returned {}: {}", status, body);
///         }
///         HttpError::RequestFailed(e) => {
///             eprintln!("Network error: {}", e);
///         }
///         _ => eprintln!("Other error: {}", err),
///     }
/// }
/// ```
#[derive(Debug, Error)]
pub enum HttpError {
    /// The HTTP request failed due to a network or connection error.
    ///
    /// This typically indicates connectivity issues such as:
    /// - Connection refused (node not running)
    /// - Connection timeout
    /// - DNS resolution failure
    /// - TLS/SSL handshake errors
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// An error occurred in the HTTP middleware layer.
    ///
    /// The middleware retries transient failures against the same peer.
    /// This error usually means those retries have been exhausted.
    #[error("Middleware error: {0}")]
    MiddlewareError(#[from] reqwest_middleware::Error),

    /// The peer returned a non-success HTTP status code.
    #[error("Server error {status}: {body}")]
    ServerError {
        /// The HTTP status code returned by the peer.
        status: reqwest::StatusCode,
        /// The response body, which may contain error details.
        body: String,
    },

    /// The request descriptor carried a URL that does not parse.
    #[error("URL parse error: {0}")]
    UrlError(#[from] url::ParseError),

    /// Only `GET`, `POST` and `PUT` are spoken by the node API.
    #[error("Unsupported HTTP method: {0}")]
    UnsupportedMethod(reqwest::Method),

    /// A header name or value could not be put on the wire.
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// Failed to serialize the request body or deserialize the response body.
    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl HttpError {
    /// Whether the attempt reached, or tried to reach, the peer.
    ///
    /// Only these errors say something about the peer's health and justify failing over.
    /// The rest are raised while the request is still being put together locally.
    pub fn is_peer_failure(&self) -> bool {
        match self {
            HttpError::RequestFailed(_) | HttpError::MiddlewareError(_) | HttpError::ServerError { .. } => true,
            HttpError::UrlError(_) |
            HttpError::UnsupportedMethod(_) |
            HttpError::InvalidHeader(_) |
            HttpError::JsonError(_) => false,
        }
    }
}
