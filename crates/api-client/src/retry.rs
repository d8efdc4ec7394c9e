// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Retrying transport with exponential backoff
//!
//! [`RetryTransport`] wraps any [`HttpTransport`] and re-issues a request when
//! the inner transport fails at the network level or answers with a transient
//! status (see [`is_transient_status`]). Attempts are strictly sequential.
//!
//! # Backoff
//!
//! The delay before retry `n` (zero-based) is `base_delay * 2^n`, with no
//! jitter. With the defaults (3 retries, 1000 ms) a request is attempted at
//! most four times, waiting 1 s, 2 s and 4 s in between.
//!
//! # Exhaustion
//!
//! The two failure shapes stay distinct once the budget is spent:
//!
//! - a transient status on the last attempt is returned as a normal
//!   [`HttpResponse`] so the caller can branch on the status
//! - a network failure on the last attempt becomes
//!   [`TransportError::RetriesExhausted`]
//!
//! # Cancellation
//!
//! The cancellation token is observed during every attempt and every backoff
//! wait. Once it fires the whole operation resolves to
//! [`TransportError::Cancelled`] and no further attempt is issued.

use std::{fmt, sync::Arc, time::Duration};

use tokio_retry::RetryIf;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::transport::{
    HttpRequest, HttpResponse, HttpTransport, TransportError, is_transient_status,
};

/// Retry budget and backoff base
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryConfig {
    /// Additional attempts after the first one
    pub max_retries: u32,
    /// Delay before the first retry
    pub base_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(1000),
        }
    }
}

impl RetryConfig {
    /// Delay before the retry with zero-based index `index`
    pub fn delay_for(&self, index: u32) -> Duration {
        self.base_delay
            .saturating_mul(2_u32.checked_pow(index).unwrap_or(u32::MAX))
    }

    /// The full backoff schedule, one entry per permitted retry
    pub fn schedule(&self) -> impl Iterator<Item = Duration> + Send + use<> {
        let config = *self;
        (0..config.max_retries).map(move |index| config.delay_for(index))
    }
}

/// Why an attempt is being retried
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryCause {
    /// The upstream answered with a transient status
    Status(u16),
    /// The exchange failed at the network level
    Network(String),
}

impl RetryCause {
    /// Short label for metrics
    pub fn kind(&self) -> &'static str {
        match self {
            RetryCause::Status(_) => "status",
            RetryCause::Network(_) => "network",
        }
    }
}

impl fmt::Display for RetryCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RetryCause::Status(status) => write!(f, "HTTP {status}"),
            RetryCause::Network(message) => f.write_str(message),
        }
    }
}

/// A retry about to be scheduled
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryEvent {
    /// Request target
    pub target: String,
    /// One-based number of the attempt that failed
    pub attempt: u32,
    /// Configured retry budget
    pub max_retries: u32,
    /// Wait before the next attempt
    pub delay: Duration,
    /// What went wrong
    pub cause: RetryCause,
}

/// Receives a notification for every scheduled retry
pub trait RetryObserver: Send + Sync + fmt::Debug {
    /// Called before the backoff wait starts
    fn on_retry(&self, event: &RetryEvent);
}

/// Observer that ignores every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopRetryObserver;

impl RetryObserver for NoopRetryObserver {
    fn on_retry(&self, _event: &RetryEvent) {}
}

/// Outcome of a single failed attempt
#[derive(Debug)]
enum AttemptFailure {
    Status(HttpResponse),
    Network(String),
    Cancelled,
}

impl AttemptFailure {
    fn is_retryable(&self) -> bool {
        !matches!(self, AttemptFailure::Cancelled)
    }
}

/// Transport decorator that retries transient failures
#[derive(Debug)]
pub struct RetryTransport<T> {
    inner: T,
    config: RetryConfig,
    observer: Arc<dyn RetryObserver>,
}

impl<T: HttpTransport> RetryTransport<T> {
    /// Wrap `inner` with the given retry policy and no observer
    pub fn new(inner: T, config: RetryConfig) -> Self {
        Self {
            inner,
            config,
            observer: Arc::new(NoopRetryObserver),
        }
    }

    /// Report retries to `observer`
    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn RetryObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// The wrapped transport
    pub fn inner(&self) -> &T {
        &self.inner
    }

    /// The retry policy in use
    pub fn config(&self) -> RetryConfig {
        self.config
    }

    async fn attempt(
        &self,
        request: &HttpRequest,
        cancel: &CancellationToken,
        index: u32,
    ) -> Result<HttpResponse, AttemptFailure> {
        let attempt = index + 1;
        debug!(url = %request.url, attempt, "sending upstream request");

        let (failure, cause) = match self.inner.send(request, cancel).await {
            Ok(response) if !is_transient_status(response.status) => return Ok(response),
            Ok(response) => {
                let cause = RetryCause::Status(response.status);
                (AttemptFailure::Status(response), cause)
            }
            Err(TransportError::Cancelled) => return Err(AttemptFailure::Cancelled),
            Err(error) => {
                let message = error.to_string();
                (
                    AttemptFailure::Network(message.clone()),
                    RetryCause::Network(message),
                )
            }
        };

        if index < self.config.max_retries {
            let delay = self.config.delay_for(index);
            warn!(
                url = %request.url,
                attempt,
                max_retries = self.config.max_retries,
                delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                cause = %cause,
                "upstream request failed with transient error, will retry"
            );
            self.observer.on_retry(&RetryEvent {
                target: request.url.to_string(),
                attempt,
                max_retries: self.config.max_retries,
                delay,
                cause,
            });
        }

        Err(failure)
    }
}

impl<T: HttpTransport> HttpTransport for RetryTransport<T> {
    async fn send(
        &self,
        request: &HttpRequest,
        cancel: &CancellationToken,
    ) -> Result<HttpResponse, TransportError> {
        let mut index = 0_u32;
        let action = move || {
            let current = index;
            index += 1;
            self.attempt(request, cancel, current)
        };

        let retried = RetryIf::start(
            self.config.schedule(),
            action,
            AttemptFailure::is_retryable,
        );

        let outcome = tokio::select! {
            biased;
            () = cancel.cancelled() => {
                debug!(url = %request.url, "upstream request cancelled");
                return Err(TransportError::Cancelled);
            }
            outcome = retried => outcome,
        };

        match outcome {
            Ok(response) | Err(AttemptFailure::Status(response)) => Ok(response),
            Err(AttemptFailure::Network(message)) => Err(TransportError::RetriesExhausted {
                target: request.url.to_string(),
                retries: self.config.max_retries,
                message,
            }),
            Err(AttemptFailure::Cancelled) => Err(TransportError::Cancelled),
        }
    }
}
