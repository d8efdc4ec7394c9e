// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! `reqwest`-backed [`HttpTransport`]

use std::time::Duration;

use api_client::{HttpRequest, HttpResponse, HttpTransport, TransportError};
use reqwest::Client;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Production transport issuing real HTTP requests
///
/// Connection pooling is handled by the underlying [`Client`]; cloning the
/// transport shares the pool.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Build a transport with a per-request timeout and default user agent
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialized
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self { client })
    }

    /// Wrap an existing client
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

impl HttpTransport for ReqwestTransport {
    async fn send(
        &self,
        request: &HttpRequest,
        cancel: &CancellationToken,
    ) -> Result<HttpResponse, TransportError> {
        let mut builder = self.client.get(request.url.clone());
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        let exchange = async {
            let response = builder.send().await?;
            let status = response.status().as_u16();
            let body = response.bytes().await?;
            Ok::<_, reqwest::Error>(HttpResponse::new(status, body.to_vec()))
        };

        tokio::select! {
            biased;
            () = cancel.cancelled() => Err(TransportError::Cancelled),
            result = exchange => result
                .inspect(|response| debug!(url = %request.url, status = response.status, "upstream responded"))
                .map_err(|error| TransportError::Network {
                    target: request.url.to_string(),
                    message: error.to_string(),
                }),
        }
    }
}
