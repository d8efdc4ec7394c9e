// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Server state management module
//!
//! Shared application state: configuration, the protein data source and the
//! cancellation token every lookup derives its own token from.

use std::sync::Arc;

use api_client::{ApiError, ProteinSource};
use external_apis::UniProtClient;
use protein_model::Protein;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use utoipa::ToSchema;

use crate::config::{Environment, ServerConfig};

/// Shared application state with cancellation token support
#[derive(Debug, Clone)]
pub struct ServerState {
    /// Server configuration
    config: ServerConfig,
    /// Protein data source
    source: Arc<UniProtClient>,
    /// Cancellation token for coordinated shutdown
    pub cancellation_token: CancellationToken,
}

impl ServerState {
    /// Create new server state
    ///
    /// # Arguments
    ///
    /// * `config` - Server configuration
    /// * `source` - Protein data source
    /// * `cancellation_token` - Token for coordinated cancellation
    pub fn new(
        config: ServerConfig,
        source: Arc<UniProtClient>,
        cancellation_token: CancellationToken,
    ) -> Self {
        Self {
            config,
            source,
            cancellation_token,
        }
    }

    /// Server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// The protein data source
    pub fn source(&self) -> &Arc<UniProtClient> {
        &self.source
    }

    /// Look up a protein under a child of the server's cancellation token
    ///
    /// Shutdown cancels every in-flight lookup, including pending retry waits.
    pub async fn lookup(&self, accession: &str) -> Result<Option<Protein>, ApiError> {
        let cancel = self.cancellation_token.child_token();
        self.source.get_protein(accession, &cancel).await
    }

    /// Current health of the service
    pub fn health_check(&self) -> HealthCheck {
        let status = if self.cancellation_token.is_cancelled() {
            HealthStatus::Down {
                reason: Box::from("shutting down"),
            }
        } else {
            HealthStatus::Up
        };

        HealthCheck {
            status,
            version: Box::from(env!("CARGO_PKG_VERSION")),
            environment: self.config.environment,
            timestamp: chrono::Utc::now().to_rfc3339(),
            data_source: Box::from(self.source.name()),
        }
    }
}

/// Health status of the service
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub enum HealthStatus {
    /// Service is accepting lookups
    Up,

    /// Service is refusing lookups
    Down {
        /// Human-readable explanation of why the service is down
        reason: Box<str>,
    },
}

/// Health check status
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthCheck {
    /// Service status
    pub status: HealthStatus,
    /// Service version
    pub version: Box<str>,
    /// Environment
    pub environment: Environment,
    /// Timestamp
    pub timestamp: String,
    /// Name of the protein data source
    pub data_source: Box<str>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_state(token: CancellationToken) -> ServerState {
        let config = ServerConfig::for_testing();
        let source = UniProtClient::new(config.uniprot.client_config()).unwrap();
        ServerState::new(config, Arc::new(source), token)
    }

    #[test]
    fn health_reports_data_source() {
        let state = test_state(CancellationToken::new());
        let health = state.health_check();

        assert_eq!(health.status, HealthStatus::Up);
        assert_eq!(health.environment, Environment::Testing);
        assert_eq!(&*health.data_source, "UniProt");
        assert_eq!(&*health.version, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn health_goes_down_with_cancellation() {
        let token = CancellationToken::new();
        let state = test_state(token.clone());

        token.cancel();

        assert!(state.cancellation_token.is_cancelled());
        assert!(matches!(
            state.health_check().status,
            HealthStatus::Down { .. }
        ));
    }

    #[tokio::test]
    async fn lookup_after_shutdown_is_cancelled() {
        let token = CancellationToken::new();
        let state = test_state(token.clone());

        token.cancel();

        let result = state.lookup("P04637").await;
        assert!(matches!(result, Err(ApiError::Cancelled)));
    }
}
