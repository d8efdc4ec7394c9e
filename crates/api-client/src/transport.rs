// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! HTTP transport seam
//!
//! Data source clients describe an outbound GET as an [`HttpRequest`] and hand
//! it to any [`HttpTransport`]. The production transport lives next to the
//! concrete client; [`crate::RetryTransport`] wraps any other transport.

use thiserror::Error;
use tokio_util::sync::CancellationToken;
use url::Url;

/// Description of a single outbound GET request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// Absolute target URL
    pub url: Url,
    /// Request headers in insertion order
    pub headers: Vec<(String, String)>,
}

impl HttpRequest {
    /// Create a GET request for `url` with no headers
    pub fn get(url: Url) -> Self {
        Self {
            url,
            headers: Vec::new(),
        }
    }

    /// Append a header
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// A complete upstream response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// Status code
    pub status: u16,
    /// Raw body bytes
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Create a response from a status and body
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the status is in the 2xx range
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body decoded as UTF-8, replacing invalid sequences
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Failures below the HTTP status level
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[allow(missing_docs)]
pub enum TransportError {
    /// The exchange failed before a response arrived
    #[error("request to {target} failed: {message}")]
    Network { target: String, message: String },

    /// Network failures outlived the retry budget
    #[error("all {retries} retry attempts failed for {target}: {message}")]
    RetriesExhausted {
        target: String,
        retries: u32,
        message: String,
    },

    /// The caller cancelled the operation
    #[error("request cancelled")]
    Cancelled,
}

/// Issues a single HTTP exchange
///
/// Implementations must observe `cancel` while waiting on I/O and return
/// [`TransportError::Cancelled`] once it fires.
pub trait HttpTransport: Send + Sync {
    /// Send `request` and return the full response, whatever its status
    fn send(
        &self,
        request: &HttpRequest,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send;
}

/// Whether an upstream status is worth retrying
///
/// Retryable: 408, 429, 500, 502, 503 and 504. Everything else, including
/// 404 and other 5xx codes, is final.
pub fn is_transient_status(status: u16) -> bool {
    matches!(
        status,
        408 |           // Request timeout
        429 |           // Rate limit
        500 | 502 | 503 | 504
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transient_status_classification() {
        for status in [408, 429, 500, 502, 503, 504] {
            assert!(is_transient_status(status), "{status} should be retryable");
        }
    }

    #[test]
    fn other_statuses_are_final() {
        for status in (200..300).chain(400..500) {
            if status == 408 || status == 429 {
                continue;
            }
            assert!(!is_transient_status(status), "{status} should be final");
        }

        assert!(!is_transient_status(501));
        assert!(!is_transient_status(505));
        assert!(!is_transient_status(301));
    }

    #[test]
    fn request_builder_keeps_header_order() {
        let url = Url::parse("https://rest.uniprot.org/uniprotkb/P04637.json").unwrap();
        let request = HttpRequest::get(url)
            .header("Accept", "application/json")
            .header("User-Agent", "protein-api/test");

        assert_eq!(request.headers[0].0, "Accept");
        assert_eq!(request.headers[1].1, "protein-api/test");
    }

    #[test]
    fn response_helpers() {
        assert!(HttpResponse::new(204, Vec::new()).is_success());
        assert!(!HttpResponse::new(404, "missing").is_success());
        assert_eq!(HttpResponse::new(500, "boom").body_text(), "boom");
    }
}
