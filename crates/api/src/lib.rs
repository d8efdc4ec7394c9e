// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Protein API Server Implementation
//!
//! This crate provides the HTTP server for the protein lookup service, built with Axum
//! on top of the UniProt client in `external-apis`.
//!
//! # Module Structure
//!
//! - [`config`]: Server and UniProt configuration with hierarchical loading
//! - [`error`]: Error types and HTTP response handling with proper status codes
//! - [`state`]: Shared application state with cancellation token support
//! - [`server`]: Main server implementation, lifecycle, and coordinated shutdown
//! - [`routes`]: Route configuration and HTTP request handlers
//! - [`metrics`]: Prometheus lookup and retry metrics
//! - [`openapi`]: `OpenAPI` specification and Swagger UI endpoints for API documentation
//!
//! # Key Features
//!
//! - **Resilient upstream access**: transient UniProt failures are retried with exponential backoff
//! - **Graceful Shutdown**: shutdown cancels in-flight lookups, including pending retry waits
//! - **Observability**: request tracing with request ids, retry and lookup metrics

pub mod config;
pub mod docs;
pub mod error;
pub mod metrics;
pub mod openapi;
pub mod routes;
pub mod server;
pub mod state;

pub use config::{Environment, ServerConfig, UniProtSettings};
pub use error::{ErrorBody, ServerError, ServerResult};
pub use server::{Server, ShutdownConfig};
pub use state::{HealthCheck, HealthStatus, ServerState};
