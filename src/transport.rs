//! HTTP transport to OCSP responders.
//!
//! The verifier only needs one operation: POST an encoded request to a responder URL and get
//! the status code and body back. Connect and read timeouts belong to the transport.

use std::sync::Arc;

use url::Url;

/// What a responder sent back.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body, `None` when the responder sent no entity.
    pub body: Option<Vec<u8>>,
}

impl TransportResponse {
    /// `200 OK` carrying `body`.
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: 200,
            body: Some(body.into()),
        }
    }

    /// Whether the status code is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Failure to exchange a request with a responder.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The responder did not answer in time.
    #[error("request timed out")]
    Timeout,

    /// The responder answered with a non-success status code.
    #[error("responder answered with HTTP status {0}")]
    Status(u16),

    /// Any other connection or protocol failure.
    #[error("request failed: {0}")]
    Request(String),
}

/// Sends encoded OCSP requests.
pub trait ResponderTransport {
    /// POST `body` to `url` with `Content-Type: application/ocsp-request` and
    /// `Accept: application/ocsp-response`. Exactly one attempt; no retries.
    fn post(&self, url: &Url, body: &[u8]) -> Result<TransportResponse, TransportError>;
}

impl<T: ResponderTransport + ?Sized> ResponderTransport for &T {
    fn post(&self, url: &Url, body: &[u8]) -> Result<TransportResponse, TransportError> {
        (**self).post(url, body)
    }
}

impl<T: ResponderTransport + ?Sized> ResponderTransport for Arc<T> {
    fn post(&self, url: &Url, body: &[u8]) -> Result<TransportResponse, TransportError> {
        (**self).post(url, body)
    }
}

impl<T: ResponderTransport + ?Sized> ResponderTransport for Box<T> {
    fn post(&self, url: &Url, body: &[u8]) -> Result<TransportResponse, TransportError> {
        (**self).post(url, body)
    }
}

#[cfg(feature = "http")]
pub use self::http::HttpTransport;

#[cfg(feature = "http")]
mod http {
    use core::time::Duration;

    use reqwest::blocking::Client;
    use reqwest::header::{ACCEPT, CONTENT_TYPE};
    use url::Url;

    use super::{ResponderTransport, TransportError, TransportResponse};
    use crate::ocsp::{OCSP_REQUEST_CONTENT_TYPE, OCSP_RESPONSE_CONTENT_TYPE};

    /// [`ResponderTransport`] over a blocking `reqwest` client.
    ///
    /// The blocking client runs its own runtime and panics when created or used from within an
    /// async executor. Inside a `tokio` runtime, run checks through
    /// `tokio::task::spawn_blocking` or on a dedicated thread.
    #[derive(Clone, Debug)]
    pub struct HttpTransport {
        client: Client,
    }

    impl HttpTransport {
        /// Timeout used by [`HttpTransport::new`].
        pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

        /// Transport with [`Self::DEFAULT_TIMEOUT`].
        pub fn new() -> Result<Self, TransportError> {
            Self::with_timeout(Self::DEFAULT_TIMEOUT)
        }

        /// Transport whose requests give up after `timeout`.
        pub fn with_timeout(timeout: Duration) -> Result<Self, TransportError> {
            let client = Client::builder()
                .timeout(timeout)
                .build()
                .map_err(|e| TransportError::Request(format!("failed to create HTTP client: {e}")))?;
            Ok(Self { client })
        }

        /// Transport reusing an existing client (and its TLS and proxy settings).
        pub fn from_client(client: Client) -> Self {
            Self { client }
        }
    }

    impl ResponderTransport for HttpTransport {
        fn post(&self, url: &Url, body: &[u8]) -> Result<TransportResponse, TransportError> {
            let response = self
                .client
                .post(url.clone())
                .header(CONTENT_TYPE, OCSP_REQUEST_CONTENT_TYPE)
                .header(ACCEPT, OCSP_RESPONSE_CONTENT_TYPE)
                .body(body.to_vec())
                .send()
                .map_err(map_error)?;

            let status = response.status().as_u16();
            let bytes = response.bytes().map_err(map_error)?;
            Ok(TransportResponse {
                status,
                body: (!bytes.is_empty()).then(|| bytes.to_vec()),
            })
        }
    }

    fn map_error(err: reqwest::Error) -> TransportError {
        if err.is_timeout() {
            TransportError::Timeout
        } else {
            TransportError::Request(err.to_string())
        }
    }
}
