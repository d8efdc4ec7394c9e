// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Canonical protein model for the protein API service
//!
//! This crate holds the internal representation every data source maps into,
//! insulated from the wire schema of any particular upstream database.
//!
//! - [`protein`]: the [`Protein`] value object and its sub-records
//! - [`canonical`]: ordered rule tables that turn free-text upstream labels
//!   into [`DomainType`] and [`SubcellularLocation`] values

pub mod canonical;
pub mod protein;

pub use canonical::{DomainType, SubcellularLocation};
pub use protein::{
    CrossReference, DataSource, Organism, Protein, ProteinDomain, ProteinSequence, SequenceType,
};
