// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! External API integrations for protein data sources
//!
//! This crate provides the UniProt implementation of the `ProteinSource`
//! trait together with the HTTP plumbing it runs on.
//!
//! # Architecture
//!
//! - **Client Implementation**: [`uniprot`] - lookup orchestration, wire schema and mapping
//! - **Transport**: [`http::ReqwestTransport`] - production `HttpTransport` over `reqwest`
//! - **Validation Utilities**: [`non_empty_string::NonEmptyString`] - ensures non-empty string constraints
//!
//! # Features
//!
//! - **Retries**: transient upstream failures are retried with exponential backoff
//! - **Cancellation**: every lookup honors a `CancellationToken`, including backoff waits
//! - **Schema Tolerance**: optional upstream fields map to empty or absent values
//! - **Testing Support**: wiremock-based integration tests for every lookup outcome

pub mod http;
pub mod non_empty_string;
pub mod uniprot;

pub use http::ReqwestTransport;
pub use non_empty_string::NonEmptyString;
pub use uniprot::{UniProtClient, UniProtConfig, UniProtError, map_to_protein};
