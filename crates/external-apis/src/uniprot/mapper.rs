// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Mapping from the UniProtKB wire schema to the canonical [`Protein`]
//!
//! [`map_to_protein`] is total: missing optional data yields empty or absent
//! fields, never an error.

use std::collections::{BTreeMap, HashSet};

use protein_model::{
    CrossReference, DataSource, DomainType, Organism, Protein, ProteinDomain, ProteinSequence,
    SequenceType, SubcellularLocation,
};

use super::response::{
    Comment, Feature, Gene, Keyword, ProteinDescription, SequenceInfo, TextValue,
    UniProtCrossReference, UniProtEntry, UniProtOrganism,
};

const FUNCTION_COMMENT: &str = "FUNCTION";
const SUBUNIT_COMMENT: &str = "SUBUNIT";
const SUBCELLULAR_LOCATION_COMMENT: &str = "SUBCELLULAR LOCATION";

/// Feature types that qualify as domain annotations, matched case-insensitively
/// as substrings of the feature type
const DOMAIN_FEATURE_TYPES: [&str; 10] = [
    "domain",
    "region",
    "motif",
    "repeat",
    "zinc finger",
    "dna-binding region",
    "coiled coil",
    "compositional bias",
    "transmembrane",
    "signal peptide",
];

/// Convert a UniProtKB entry into a canonical protein
pub fn map_to_protein(entry: &UniProtEntry) -> Protein {
    let description = entry.protein_description.as_ref();
    let full_name = description
        .and_then(|description| description.recommended_name.as_ref())
        .and_then(|name| text(name.full_name.as_ref()))
        .map(str::to_string);
    let audit = entry.entry_audit.as_ref();
    let comments = entry.comments.as_deref().unwrap_or_default();

    Protein {
        id: entry.primary_accession.clone(),
        entry_name: entry.uniprotkb_id.clone(),
        name: full_name
            .clone()
            .or_else(|| entry.uniprotkb_id.clone())
            .unwrap_or_else(|| entry.primary_accession.clone()),
        full_name,
        alternative_names: alternative_names(description),
        short_names: short_names(description),
        organism: map_organism(entry.organism.as_ref()),
        sequence: entry.sequence.as_ref().and_then(map_sequence),
        functions: comment_texts(comments, FUNCTION_COMMENT),
        subunit_structure: comment_texts(comments, SUBUNIT_COMMENT),
        domains: entry
            .features
            .as_deref()
            .unwrap_or_default()
            .iter()
            .filter_map(map_domain)
            .collect(),
        cross_references: cross_references(
            entry.cross_references.as_deref().unwrap_or_default(),
        ),
        subcellular_locations: subcellular_locations(comments),
        keywords: keywords(entry.keywords.as_deref().unwrap_or_default()),
        gene_names: gene_names(entry.genes.as_deref().unwrap_or_default()),
        last_updated: audit.and_then(|audit| audit.last_annotation_update_date),
        sequence_last_updated: audit.and_then(|audit| audit.last_sequence_update_date),
        entry_version: audit.and_then(|audit| audit.entry_version),
        sequence_version: audit.and_then(|audit| audit.sequence_version),
        source: DataSource::UniProt,
    }
}

fn text(value: Option<&TextValue>) -> Option<&str> {
    value.and_then(|value| value.value.as_deref())
}

fn non_blank(value: &str) -> bool {
    !value.trim().is_empty()
}

fn alternative_names(description: Option<&ProteinDescription>) -> Vec<String> {
    description
        .and_then(|description| description.alternative_names.as_deref())
        .unwrap_or_default()
        .iter()
        .filter_map(|name| text(name.full_name.as_ref()))
        .filter(|name| non_blank(name))
        .map(str::to_string)
        .collect()
}

fn short_names(description: Option<&ProteinDescription>) -> Vec<String> {
    description
        .and_then(|description| description.recommended_name.as_ref())
        .and_then(|name| name.short_names.as_deref())
        .unwrap_or_default()
        .iter()
        .filter_map(|name| name.value.as_deref())
        .filter(|name| non_blank(name))
        .map(str::to_string)
        .collect()
}

fn map_organism(organism: Option<&UniProtOrganism>) -> Organism {
    let Some(organism) = organism else {
        return Organism::unknown();
    };
    let Some(scientific_name) = organism.scientific_name.clone() else {
        return Organism::unknown();
    };

    Organism {
        scientific_name,
        common_name: organism.common_name.clone(),
        taxon_id: organism.taxon_id,
        lineage: organism.lineage.clone().unwrap_or_default(),
    }
}

fn map_sequence(sequence: &SequenceInfo) -> Option<ProteinSequence> {
    let value = sequence.value.clone()?;

    Some(ProteinSequence {
        length: sequence.length.unwrap_or_else(|| value.chars().count()),
        value,
        sequence_type: SequenceType::Protein,
        molecular_weight: sequence.mol_weight,
        crc64: sequence.crc64.clone(),
        md5: sequence.md5.clone(),
    })
}

/// Texts of every comment with the given type, in order, blanks dropped
fn comment_texts(comments: &[Comment], comment_type: &str) -> Vec<String> {
    comments
        .iter()
        .filter(|comment| comment.comment_type.as_deref() == Some(comment_type))
        .flat_map(|comment| comment.texts.as_deref().unwrap_or_default())
        .filter_map(|text| text.value.as_deref())
        .filter(|value| non_blank(value))
        .map(str::to_string)
        .collect()
}

fn is_domain_feature(feature_type: &str) -> bool {
    let feature_type = feature_type.to_lowercase();
    DOMAIN_FEATURE_TYPES
        .iter()
        .any(|candidate| feature_type.contains(candidate))
}

fn map_domain(feature: &Feature) -> Option<ProteinDomain> {
    let feature_type = feature.feature_type.as_deref()?;
    if !is_domain_feature(feature_type) {
        return None;
    }

    let location = feature.location.as_ref()?;
    let start = location.start.as_ref()?.value?;
    let end = location.end.as_ref()?.value?;

    // An empty description is still the label; only an absent one falls back.
    let label = feature.description.as_deref().unwrap_or(feature_type);

    Some(ProteinDomain {
        domain_type: DomainType::from_label(label),
        start,
        end,
        description: feature.description.clone(),
        original_name: label.to_string(),
    })
}

/// One cross-reference per database, the first one wins
fn cross_references(references: &[UniProtCrossReference]) -> Vec<CrossReference> {
    let mut seen = HashSet::new();

    references
        .iter()
        .filter_map(|reference| {
            let database = reference.database.as_deref()?;
            let id = reference.id.as_deref()?;
            seen.insert(database).then(|| CrossReference {
                database: database.to_string(),
                id: id.to_string(),
                properties: reference
                    .properties
                    .as_deref()
                    .unwrap_or_default()
                    .iter()
                    .filter_map(|property| {
                        Some((property.key.clone()?, property.value.clone()?))
                    })
                    .collect::<BTreeMap<_, _>>(),
            })
        })
        .collect()
}

/// Distinct canonical locations in first-seen order
fn subcellular_locations(comments: &[Comment]) -> Vec<SubcellularLocation> {
    let mut locations = Vec::new();

    let labels = comments
        .iter()
        .filter(|comment| comment.comment_type.as_deref() == Some(SUBCELLULAR_LOCATION_COMMENT))
        .flat_map(|comment| comment.subcellular_locations.as_deref().unwrap_or_default())
        .filter_map(|entry| text(entry.location.as_ref()))
        .filter(|label| non_blank(label));

    for label in labels {
        let location = SubcellularLocation::from_label(label);
        if !locations.contains(&location) {
            locations.push(location);
        }
    }

    locations
}

fn keywords(keywords: &[Keyword]) -> Vec<String> {
    keywords
        .iter()
        .filter_map(|keyword| keyword.name.as_deref())
        .filter(|name| non_blank(name))
        .map(str::to_string)
        .collect()
}

/// Primary names and synonyms, de-duplicated in first-seen order
fn gene_names(genes: &[Gene]) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();

    let candidates = genes.iter().flat_map(|gene| {
        text(gene.gene_name.as_ref()).into_iter().chain(
            gene.synonyms
                .as_deref()
                .unwrap_or_default()
                .iter()
                .filter_map(|synonym| synonym.value.as_deref()),
        )
    });

    for name in candidates {
        if !names.iter().any(|existing| existing == name) {
            names.push(name.to_string());
        }
    }

    names
}
