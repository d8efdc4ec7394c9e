// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Error handling module
//!
//! Server lifecycle errors and lookup failures, with the mapping of each to
//! an HTTP status and JSON body.

use std::net::SocketAddr;

use api_client::ApiError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Error types for server operations
#[derive(Error, Debug)]
pub enum ServerError {
    /// Configuration validation errors
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// Network binding errors
    #[error("Failed to bind to {address}: {source}")]
    Bind {
        /// Socket address that failed to bind
        address: SocketAddr,
        /// Underlying IO error
        source: std::io::Error,
    },

    /// Server startup errors
    #[error("Server startup failed: {source}")]
    Startup {
        /// Underlying IO error
        source: std::io::Error,
    },

    /// Server shutdown errors
    #[error("Server shutdown failed: {source}")]
    Shutdown {
        /// Underlying IO error
        source: std::io::Error,
    },

    /// Task join errors for async operations
    #[error("Task join error: {source}")]
    TaskJoin {
        /// Underlying tokio join error
        #[source]
        source: tokio::task::JoinError,
    },

    /// Graceful shutdown did not finish in time
    #[error("Operation timed out after {timeout_seconds} seconds")]
    Timeout {
        /// Timeout duration in seconds
        timeout_seconds: u64,
    },

    /// The data source has no entry for the accession
    #[error("Protein {accession} not found")]
    NotFound {
        /// Requested accession
        accession: String,
    },

    /// Lookup failure reported by the data source
    #[error(transparent)]
    Lookup(#[from] ApiError),
}

/// Result type for server operations
pub type ServerResult<T> = Result<T, ServerError>;

/// JSON body of every error response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct ErrorBody {
    /// Human-readable description
    pub error: String,
    /// HTTP status code, repeated for clients that only see the body
    pub status: u16,
    /// Accession the request was about, when there was one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accession: Option<String>,
}

impl ServerError {
    /// HTTP status for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServerError::NotFound { .. } => StatusCode::NOT_FOUND,
            ServerError::Timeout { .. } => StatusCode::REQUEST_TIMEOUT,
            ServerError::Lookup(error) => match error {
                ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
                ApiError::Cancelled => StatusCode::SERVICE_UNAVAILABLE,
                error if error.is_upstream() => StatusCode::BAD_GATEWAY,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ServerError::Config { .. }
            | ServerError::Bind { .. }
            | ServerError::Startup { .. }
            | ServerError::Shutdown { .. }
            | ServerError::TaskJoin { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let accession = match &self {
            ServerError::NotFound { accession } => Some(accession.clone()),
            _ => None,
        };
        let body = ErrorBody {
            error: self.to_string(),
            status: status.as_u16(),
            accession,
        };

        (status, Json(body)).into_response()
    }
}

impl From<tokio::task::JoinError> for ServerError {
    fn from(source: tokio::task::JoinError) -> Self {
        Self::TaskJoin { source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upstream_errors() -> Vec<ApiError> {
        vec![
            ApiError::Http {
                target: "https://rest.uniprot.org/uniprotkb/P04637.json".to_string(),
                status: 503,
                message: "Service Unavailable".to_string(),
            },
            ApiError::RetriesExhausted {
                target: "https://rest.uniprot.org/uniprotkb/P04637.json".to_string(),
                retries: 3,
                message: "connection refused".to_string(),
            },
            ApiError::InvalidResponse {
                target: "https://rest.uniprot.org/uniprotkb/P04637.json".to_string(),
                message: "missing field `primaryAccession`".to_string(),
            },
        ]
    }

    #[test]
    fn lookup_errors_map_to_http_statuses() {
        let invalid = ServerError::from(ApiError::InvalidInput {
            message: "accession cannot be blank".to_string(),
        });
        assert_eq!(invalid.status_code(), StatusCode::BAD_REQUEST);

        for error in upstream_errors() {
            assert_eq!(
                ServerError::from(error).status_code(),
                StatusCode::BAD_GATEWAY
            );
        }

        assert_eq!(
            ServerError::from(ApiError::Cancelled).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            ServerError::from(ApiError::Internal {
                message: "empty payload".to_string()
            })
            .status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn not_found_response_names_accession() {
        let response = ServerError::NotFound {
            accession: "Q00000".to_string(),
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn error_body_omits_missing_accession() {
        let body = ErrorBody {
            error: "Service unavailable: shutting down".to_string(),
            status: 503,
            accession: None,
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"error": "Service unavailable: shutting down", "status": 503})
        );
    }
}
