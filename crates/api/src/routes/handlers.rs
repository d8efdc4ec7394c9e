// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! HTTP request handlers module
//!
//! Health and protein lookup handlers. Lookups run under a child of the
//! server's cancellation token so shutdown interrupts pending retries.

use std::time::Instant;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use protein_model::Protein;
use tracing::{error, info, warn};

use crate::{
    error::{ErrorBody, ServerError},
    metrics::{LookupOutcome, observe_lookup},
    state::{HealthCheck, HealthStatus, ServerState},
};

/// Health check endpoint handler
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    summary = "Health check endpoint",
    description = "Returns the current health status of the service including version, environment and the name of the protein data source.",
    responses(
        (status = 200, description = "Service is healthy", body = HealthCheck),
        (status = 503, description = "Service is shutting down", body = HealthCheck)
    )
)]
pub async fn health_handler(State(state): State<ServerState>) -> impl IntoResponse {
    let health = state.health_check();
    let status = match health.status {
        HealthStatus::Up => StatusCode::OK,
        HealthStatus::Down { .. } => StatusCode::SERVICE_UNAVAILABLE,
    };
    (status, Json(health))
}

/// Protein lookup
///
/// Resolves a UniProtKB accession to the normalized protein record. Transient
/// upstream failures are retried with exponential backoff before an error is
/// reported.
///
/// # Errors
///
/// Returns `ServerError` when the accession is blank, unknown, or the
/// upstream lookup fails.
#[utoipa::path(
    get,
    path = "/v1/proteins/{accession}",
    tag = "proteins",
    summary = "Look up a protein by accession",
    description = "Fetches a UniProtKB entry and returns it in the normalized protein model, with domain types and subcellular locations mapped to canonical values.",
    params(
        ("accession" = String, Path, description = "UniProtKB accession", example = "P04637")
    ),
    responses(
        (status = 200, description = "Protein found", body = Protein),
        (status = 400, description = "Blank accession", body = ErrorBody),
        (status = 404, description = "No entry for the accession", body = ErrorBody),
        (status = 502, description = "Upstream failure after retries", body = ErrorBody),
        (status = 503, description = "Lookup cancelled by shutdown", body = ErrorBody)
    )
)]
pub async fn protein_handler(
    State(state): State<ServerState>,
    Path(accession): Path<String>,
) -> Result<Json<Protein>, ServerError> {
    let started = Instant::now();
    let result = state.lookup(&accession).await;
    let elapsed = started.elapsed().as_secs_f64();

    match result {
        Ok(Some(protein)) => {
            observe_lookup(LookupOutcome::Found, elapsed);
            info!(
                accession = %accession,
                domains = protein.domains.len(),
                "protein found"
            );
            Ok(Json(protein))
        }
        Ok(None) => {
            observe_lookup(LookupOutcome::NotFound, elapsed);
            Err(ServerError::NotFound { accession })
        }
        Err(e) => {
            observe_lookup(LookupOutcome::Error, elapsed);
            if e.is_upstream() {
                error!(accession = %accession, error = %e, "protein lookup failed");
            } else {
                warn!(accession = %accession, error = %e, "protein lookup rejected");
            }
            Err(e.into())
        }
    }
}
