// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Wire schema of a UniProtKB entry (`/uniprotkb/{accession}.json`)
//!
//! Only `primaryAccession` is required. Every other field is optional so an
//! absent collection stays distinguishable from an empty one, and unknown
//! fields are ignored.

use chrono::NaiveDate;
use serde::Deserialize;

/// Root of a UniProtKB entry
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UniProtEntry {
    /// Primary accession, e.g. `P04637`
    pub primary_accession: String,
    /// Entry name, e.g. `P53_HUMAN`
    #[serde(rename = "uniProtkbId")]
    pub uniprotkb_id: Option<String>,
    /// Entry type, e.g. `UniProtKB reviewed (Swiss-Prot)`
    pub entry_type: Option<String>,
    /// Audit dates and versions
    pub entry_audit: Option<EntryAudit>,
    /// Source organism
    pub organism: Option<UniProtOrganism>,
    /// Names
    pub protein_description: Option<ProteinDescription>,
    /// Genes encoding the protein
    pub genes: Option<Vec<Gene>>,
    /// Free-text and structured comments
    pub comments: Option<Vec<Comment>>,
    /// Positional sequence features
    pub features: Option<Vec<Feature>>,
    /// Controlled keywords
    pub keywords: Option<Vec<Keyword>>,
    /// Cross-references to other databases
    #[serde(rename = "uniProtKBCrossReferences")]
    pub cross_references: Option<Vec<UniProtCrossReference>>,
    /// Canonical sequence
    pub sequence: Option<SequenceInfo>,
}

/// Audit dates and version counters
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct EntryAudit {
    pub first_public_date: Option<NaiveDate>,
    pub last_annotation_update_date: Option<NaiveDate>,
    pub last_sequence_update_date: Option<NaiveDate>,
    pub entry_version: Option<u32>,
    pub sequence_version: Option<u32>,
}

/// Organism record
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct UniProtOrganism {
    pub scientific_name: Option<String>,
    pub common_name: Option<String>,
    pub taxon_id: Option<u64>,
    pub lineage: Option<Vec<String>>,
}

/// Recommended and alternative names
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct ProteinDescription {
    pub recommended_name: Option<ProteinName>,
    pub alternative_names: Option<Vec<ProteinName>>,
}

/// A full name with optional short forms
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct ProteinName {
    pub full_name: Option<TextValue>,
    pub short_names: Option<Vec<TextValue>>,
}

/// The `{"value": ...}` wrapper UniProt uses for most strings
#[derive(Debug, Clone, Default, Deserialize)]
#[allow(missing_docs)]
pub struct TextValue {
    pub value: Option<String>,
}

/// Gene record
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct Gene {
    pub gene_name: Option<TextValue>,
    pub synonyms: Option<Vec<TextValue>>,
}

/// Comment tagged by `commentType`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct Comment {
    pub comment_type: Option<String>,
    pub texts: Option<Vec<TextValue>>,
    pub subcellular_locations: Option<Vec<SubcellularLocationEntry>>,
}

/// Entry of a `SUBCELLULAR LOCATION` comment
#[derive(Debug, Clone, Default, Deserialize)]
#[allow(missing_docs)]
pub struct SubcellularLocationEntry {
    pub location: Option<TextValue>,
    pub topology: Option<TextValue>,
}

/// Positional feature tagged by `type`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct Feature {
    #[serde(rename = "type")]
    pub feature_type: Option<String>,
    pub location: Option<FeatureLocation>,
    pub description: Option<String>,
    pub feature_id: Option<String>,
}

/// Start and end of a feature
#[derive(Debug, Clone, Default, Deserialize)]
#[allow(missing_docs)]
pub struct FeatureLocation {
    pub start: Option<Position>,
    pub end: Option<Position>,
}

/// A sequence position; `value` is absent for unknown boundaries
#[derive(Debug, Clone, Default, Deserialize)]
#[allow(missing_docs)]
pub struct Position {
    pub value: Option<i64>,
    pub modifier: Option<String>,
}

/// Keyword record
#[derive(Debug, Clone, Default, Deserialize)]
#[allow(missing_docs)]
pub struct Keyword {
    pub id: Option<String>,
    pub category: Option<String>,
    pub name: Option<String>,
}

/// Cross-reference to another database
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct UniProtCrossReference {
    pub database: Option<String>,
    pub id: Option<String>,
    pub properties: Option<Vec<CrossReferenceProperty>>,
    pub isoform_id: Option<String>,
}

/// Key/value property of a cross-reference
#[derive(Debug, Clone, Default, Deserialize)]
#[allow(missing_docs)]
pub struct CrossReferenceProperty {
    pub key: Option<String>,
    pub value: Option<String>,
}

/// Canonical sequence
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct SequenceInfo {
    pub value: Option<String>,
    pub length: Option<usize>,
    pub mol_weight: Option<u64>,
    pub crc64: Option<String>,
    pub md5: Option<String>,
}
