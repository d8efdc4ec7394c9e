// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! `OpenAPI` document definition

use protein_model::{
    CrossReference, DataSource, DomainType, Organism, Protein, ProteinDomain, ProteinSequence,
    SequenceType, SubcellularLocation,
};
use utoipa::OpenApi;

use crate::{
    config::Environment,
    error::ErrorBody,
    routes::handlers,
    state::{HealthCheck, HealthStatus},
};

/// `OpenAPI` document for the protein API
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "Protein API",
        description = "Protein lookups against the UniProt knowledgebase, normalized to a source-independent model."
    ),
    paths(handlers::health_handler, handlers::protein_handler),
    components(schemas(
        Protein,
        Organism,
        ProteinSequence,
        ProteinDomain,
        CrossReference,
        DomainType,
        SubcellularLocation,
        DataSource,
        SequenceType,
        HealthCheck,
        HealthStatus,
        Environment,
        ErrorBody
    )),
    tags(
        (name = "health", description = "Service health"),
        (name = "proteins", description = "Protein lookups")
    )
)]
pub struct ApiDoc;
