// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Transport, retry and lookup abstractions for upstream protein sources
//!
//! This crate holds the source-agnostic pieces every protein data source is
//! built from.
//!
//! # Core Abstractions
//!
//! - **`HttpTransport` Trait**: one method that performs a single GET exchange
//! - **`RetryTransport`**: decorator adding bounded exponential backoff to any transport
//! - **`RetryObserver` Trait**: side channel reporting each scheduled retry
//! - **`ProteinSource` Trait**: lookup by accession returning found, not found or a typed failure
//! - **Error Handling**: `ApiError` separates invalid input, upstream status,
//!   exhausted retries, schema drift and cancellation

use protein_model::{DataSource, Protein};
use thiserror::Error;
use tokio_util::sync::CancellationToken;

pub mod retry;
pub mod transport;

pub use retry::{
    NoopRetryObserver, RetryCause, RetryConfig, RetryEvent, RetryObserver, RetryTransport,
};
pub use transport::{
    HttpRequest, HttpResponse, HttpTransport, TransportError, is_transient_status,
};

/// A database that can resolve a protein accession
pub trait ProteinSource: Send + Sync {
    /// Look up a single protein by accession
    ///
    /// # Arguments
    ///
    /// * `accession` - Source-specific accession, e.g. `P04637`; must not be blank
    /// * `cancel` - Aborts the lookup, including any pending retry wait
    ///
    /// # Returns
    ///
    /// * `Ok(Some(protein))` if the source holds a record for the accession
    /// * `Ok(None)` if the source reports the accession as not found
    /// * `Err(error)` for invalid input, upstream failures or cancellation
    fn get_protein(
        &self,
        accession: &str,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Result<Option<Protein>, ApiError>> + Send;

    /// The database this source reads from
    fn source(&self) -> DataSource;

    /// Get the name/identifier of this source
    fn name(&self) -> &'static str;
}

/// Errors surfaced by a protein lookup
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum ApiError {
    /// The accession was rejected before any I/O
    #[error("invalid input: {message}")]
    InvalidInput { message: String },

    /// The upstream answered with a status that is not success or not found
    #[error("upstream {target} returned HTTP {status}: {message}")]
    Http {
        target: String,
        status: u16,
        message: String,
    },

    /// A single exchange failed at the network level with no retry policy
    #[error("request to {target} failed: {message}")]
    Network { target: String, message: String },

    /// Network failures outlived the retry budget
    #[error("all {retries} retry attempts failed for {target}: {message}")]
    RetriesExhausted {
        target: String,
        retries: u32,
        message: String,
    },

    /// The body did not match the expected schema
    #[error("invalid response from {target}: {message}")]
    InvalidResponse { target: String, message: String },

    /// The lookup was cancelled
    #[error("lookup cancelled")]
    Cancelled,

    /// Client construction failed
    #[error("configuration error: {message}")]
    Configuration { message: String },

    /// An internal contract was violated
    #[error("internal error: {message}")]
    Internal { message: String },
}

impl ApiError {
    /// Whether the error came from the upstream service rather than the caller
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            ApiError::Http { .. }
                | ApiError::Network { .. }
                | ApiError::RetriesExhausted { .. }
                | ApiError::InvalidResponse { .. }
        )
    }
}

impl From<TransportError> for ApiError {
    fn from(value: TransportError) -> Self {
        match value {
            TransportError::Network { target, message } => ApiError::Network { target, message },
            TransportError::RetriesExhausted {
                target,
                retries,
                message,
            } => ApiError::RetriesExhausted {
                target,
                retries,
                message,
            },
            TransportError::Cancelled => ApiError::Cancelled,
        }
    }
}
