// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! UniProt knowledgebase integration
//!
//! This module provides an implementation of the `ProteinSource` trait for the
//! UniProt REST API. A lookup issues `GET {base_url}/uniprotkb/{accession}.json`
//! through a [`RetryTransport`] and maps the entry with [`map_to_protein`].
//!
//! | Upstream outcome | Result |
//! |---|---|
//! | 2xx with an entry | `Ok(Some(protein))` |
//! | 404 | `Ok(None)` |
//! | any other status after retries | [`UniProtError::Status`] |
//! | network failures after retries | [`UniProtError::Transport`] |
//! | body does not match the schema | [`UniProtError::Json`] |
//! | body is JSON `null` | [`UniProtError::EmptyPayload`] |

use std::{sync::Arc, time::Duration};

use api_client::{
    ApiError, HttpRequest, HttpTransport, ProteinSource, RetryConfig, RetryObserver,
    RetryTransport, TransportError,
};
use protein_model::{DataSource, Protein};
use reqwest::StatusCode;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};
use url::Url;

use crate::{http::ReqwestTransport, non_empty_string::NonEmptyString};

pub mod mapper;
pub mod response;

pub use mapper::map_to_protein;
pub use response::UniProtEntry;

/// Public UniProt REST endpoint
pub const DEFAULT_BASE_URL: &str = "https://rest.uniprot.org";

/// Default user agent sent to UniProt
pub const DEFAULT_USER_AGENT: &str = concat!("protein-api/", env!("CARGO_PKG_VERSION"));

/// Configuration for the UniProt client
#[derive(Debug, Clone)]
pub struct UniProtConfig {
    /// Base URL of the UniProt REST API
    pub base_url: String,
    /// Per-request timeout in seconds
    pub timeout_seconds: u64,
    /// Retries after the first attempt
    pub max_retry_attempts: u32,
    /// Backoff base in milliseconds
    pub retry_delay_ms: u64,
    /// `User-Agent` header value
    pub user_agent: String,
}

impl Default for UniProtConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_seconds: 30,
            max_retry_attempts: 3,
            retry_delay_ms: 1000,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl UniProtConfig {
    /// Retry policy derived from this configuration
    pub fn retry_config(&self) -> RetryConfig {
        RetryConfig {
            max_retries: self.max_retry_attempts,
            base_delay: Duration::from_millis(self.retry_delay_ms),
        }
    }

    /// Validate the configuration and return the parsed base URL
    ///
    /// # Errors
    ///
    /// Returns [`UniProtError::Config`] for a blank or unusable base URL, a
    /// blank user agent or a zero timeout
    pub fn validate(&self) -> Result<Url, UniProtError> {
        let base_url = NonEmptyString::new(self.base_url.as_str())
            .map_err(|_| UniProtError::Config("Base URL cannot be empty".to_string()))?;
        NonEmptyString::new(self.user_agent.as_str())
            .map_err(|_| UniProtError::Config("User agent cannot be empty".to_string()))?;

        if self.timeout_seconds == 0 {
            return Err(UniProtError::Config(
                "Timeout must be greater than zero".to_string(),
            ));
        }

        let url = Url::parse(base_url.as_str()).map_err(|error| {
            UniProtError::Config(format!("Invalid base URL '{base_url}': {error}"))
        })?;
        if url.cannot_be_a_base() {
            return Err(UniProtError::Config(format!(
                "Base URL '{base_url}' cannot carry a path"
            )));
        }

        Ok(url)
    }
}

/// Errors specific to the UniProt client
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum UniProtError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Accession rejected before any request
    #[error("Invalid accession: {0}")]
    InvalidAccession(String),

    /// Transport failed or was cancelled
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// UniProt answered with a status other than success or not found
    #[error("UniProt returned {status} for {target}: {message}")]
    Status {
        target: String,
        status: u16,
        message: String,
    },

    /// Body did not match the entry schema
    #[error("Failed to parse UniProt entry from {target}: {source}")]
    Json {
        target: String,
        #[source]
        source: serde_json::Error,
    },

    /// Body decoded to JSON `null`
    #[error("UniProt returned an empty payload for {target}")]
    EmptyPayload { target: String },
}

impl From<UniProtError> for ApiError {
    fn from(value: UniProtError) -> Self {
        match value {
            UniProtError::Config(message) => ApiError::Configuration { message },
            UniProtError::InvalidAccession(message) => ApiError::InvalidInput { message },
            UniProtError::Transport(error) => error.into(),
            UniProtError::Status {
                target,
                status,
                message,
            } => ApiError::Http {
                target,
                status,
                message,
            },
            UniProtError::Json { target, source } => ApiError::InvalidResponse {
                target,
                message: source.to_string(),
            },
            UniProtError::EmptyPayload { target } => ApiError::Internal {
                message: format!("no entry to map in response from {target}"),
            },
        }
    }
}

/// UniProt API client implementation
#[derive(Debug)]
pub struct UniProtClient<T = RetryTransport<ReqwestTransport>> {
    transport: T,
    config: UniProtConfig,
    base_url: Url,
}

impl UniProtClient {
    /// Create a new UniProt client over HTTP with retries
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be created
    pub fn new(config: UniProtConfig) -> Result<Self, UniProtError> {
        let base_url = config.validate()?;
        let http = ReqwestTransport::new(
            Duration::from_secs(config.timeout_seconds),
            &config.user_agent,
        )
        .map_err(|error| UniProtError::Config(format!("Failed to build HTTP client: {error}")))?;
        let transport = RetryTransport::new(http, config.retry_config());

        Ok(Self {
            transport,
            config,
            base_url,
        })
    }

    /// Create a client that reports retries to `observer`
    ///
    /// # Errors
    ///
    /// Same as [`UniProtClient::new`]
    pub fn with_observer(
        config: UniProtConfig,
        observer: Arc<dyn RetryObserver>,
    ) -> Result<Self, UniProtError> {
        let client = Self::new(config)?;
        Ok(Self {
            transport: client.transport.with_observer(observer),
            ..client
        })
    }
}

impl<T: HttpTransport> UniProtClient<T> {
    /// Create a client over an arbitrary transport
    ///
    /// The transport is used as given; wrap it in a [`RetryTransport`] to
    /// retry transient failures.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid
    pub fn with_transport(config: UniProtConfig, transport: T) -> Result<Self, UniProtError> {
        let base_url = config.validate()?;
        Ok(Self {
            transport,
            config,
            base_url,
        })
    }

    /// The transport in use
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// The configuration in use
    pub fn config(&self) -> &UniProtConfig {
        &self.config
    }

    /// URL of the entry for `accession`; the accession is percent-encoded
    fn entry_url(&self, accession: &NonEmptyString) -> Result<Url, UniProtError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| UniProtError::Config("Base URL cannot carry a path".to_string()))?
            .pop_if_empty()
            .push("uniprotkb")
            .push(&format!("{accession}.json"));
        Ok(url)
    }

    /// Fetch and map a single entry
    ///
    /// # Errors
    ///
    /// Returns an error for a blank accession, a failed or cancelled
    /// exchange, an unexpected status or a body that does not parse
    pub async fn fetch_protein(
        &self,
        accession: &str,
        cancel: &CancellationToken,
    ) -> Result<Option<Protein>, UniProtError> {
        let accession = NonEmptyString::new(accession).map_err(|_| {
            UniProtError::InvalidAccession(
                "accession cannot be empty or whitespace-only".to_string(),
            )
        })?;

        let url = self.entry_url(&accession)?;
        let target = url.to_string();
        info!(%accession, url = %target, "fetching protein from UniProt");

        let request = HttpRequest::get(url)
            .header("Accept", "application/json")
            .header("User-Agent", self.config.user_agent.as_str());

        let response = self.transport.send(&request, cancel).await?;

        if response.is_success() {
            let entry: Option<UniProtEntry> =
                serde_json::from_slice(&response.body).map_err(|source| UniProtError::Json {
                    target: target.clone(),
                    source,
                })?;
            let entry = entry.ok_or(UniProtError::EmptyPayload { target })?;

            let protein = map_to_protein(&entry);
            info!(%accession, name = %protein.name, "fetched protein from UniProt");
            return Ok(Some(protein));
        }

        if response.status == StatusCode::NOT_FOUND.as_u16() {
            warn!(%accession, "protein not found in UniProt");
            return Ok(None);
        }

        let message = response.body_text();
        warn!(
            %accession,
            status = response.status,
            body = %message,
            "UniProt API error"
        );
        Err(UniProtError::Status {
            target,
            status: response.status,
            message,
        })
    }
}

impl<T: HttpTransport> ProteinSource for UniProtClient<T> {
    async fn get_protein(
        &self,
        accession: &str,
        cancel: &CancellationToken,
    ) -> Result<Option<Protein>, ApiError> {
        match self.fetch_protein(accession, cancel).await {
            Ok(protein) => Ok(protein),
            Err(UniProtError::Transport(TransportError::Cancelled)) => {
                debug!(accession, "UniProt lookup cancelled");
                Err(ApiError::Cancelled)
            }
            Err(e) => {
                error!(accession, error = %e, "failed to fetch protein from UniProt");
                Err(e.into())
            }
        }
    }

    fn source(&self) -> DataSource {
        DataSource::UniProt
    }

    fn name(&self) -> &'static str {
        "UniProt"
    }
}
