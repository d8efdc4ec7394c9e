// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Prometheus metrics module
//!
//! Provides global metrics using the default Prometheus registry via macros,
//! a [`RetryObserver`] that feeds them, and an Axum-compatible metrics handler.

use std::sync::LazyLock;

use api_client::{RetryEvent, RetryObserver};
use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use prometheus::{
    Encoder, Histogram, HistogramVec, IntCounterVec, TextEncoder, register_histogram,
    register_histogram_vec, register_int_counter_vec,
};
use tracing::error;

/// Upstream retries scheduled, labeled by cause (`status` or `network`).
pub static UPSTREAM_RETRIES: LazyLock<IntCounterVec> = LazyLock::new(|| {
    register_int_counter_vec!(
        "protein_api_upstream_retries_total",
        "Total number of upstream retries, labeled by cause",
        &["cause"]
    )
    .expect("Failed to create protein_api_upstream_retries_total counter vec")
});

/// Backoff waits before upstream retries, in seconds.
pub static UPSTREAM_RETRY_DELAY: LazyLock<Histogram> = LazyLock::new(|| {
    register_histogram!(
        "protein_api_upstream_retry_delay_seconds",
        "Backoff delay before an upstream retry in seconds",
        vec![0.1, 0.25, 0.5, 1.0, 2.0, 4.0, 8.0, 16.0, 32.0]
    )
    .expect("Failed to create upstream retry delay histogram")
});

/// Protein lookups served, labeled by outcome.
pub static LOOKUPS: LazyLock<IntCounterVec> = LazyLock::new(|| {
    register_int_counter_vec!(
        "protein_api_lookups_total",
        "Total number of protein lookups, labeled by outcome",
        &["outcome"]
    )
    .expect("Failed to create protein_api_lookups_total counter vec")
});

/// Protein lookup durations in seconds, retries included.
pub static LOOKUP_DURATION: LazyLock<HistogramVec> = LazyLock::new(|| {
    register_histogram_vec!(
        "protein_api_lookup_duration_seconds",
        "Protein lookup durations in seconds",
        &["outcome"],
        vec![0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]
    )
    .expect("Failed to create lookup duration histogram")
});

/// Outcome label of a lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupOutcome {
    /// The protein was returned
    Found,
    /// The source has no such accession
    NotFound,
    /// The lookup failed or was cancelled
    Error,
}

impl LookupOutcome {
    /// Label value used in metrics
    pub fn as_str(self) -> &'static str {
        match self {
            LookupOutcome::Found => "found",
            LookupOutcome::NotFound => "not_found",
            LookupOutcome::Error => "error",
        }
    }
}

/// Count a finished lookup and record how long it took
pub fn observe_lookup(outcome: LookupOutcome, duration_secs: f64) {
    LOOKUPS.with_label_values(&[outcome.as_str()]).inc();
    LOOKUP_DURATION
        .with_label_values(&[outcome.as_str()])
        .observe(duration_secs);
}

/// Records every upstream retry in the global registry
#[derive(Debug, Default, Clone, Copy)]
pub struct PrometheusRetryObserver;

impl RetryObserver for PrometheusRetryObserver {
    fn on_retry(&self, event: &RetryEvent) {
        UPSTREAM_RETRIES
            .with_label_values(&[event.cause.kind()])
            .inc();
        UPSTREAM_RETRY_DELAY.observe(event.delay.as_secs_f64());
    }
}

/// Axum handler that exports metrics in Prometheus text format
pub async fn metrics_handler() -> Response {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = vec![];

    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        error!(error = %e, "failed to encode metrics");
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }

    (
        [(header::CONTENT_TYPE, encoder.format_type().to_string())],
        buffer,
    )
        .into_response()
}
