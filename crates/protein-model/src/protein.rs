// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Internal protein representation
//!
//! Values in this module are built once per successful lookup and handed to
//! the caller by value. Collections are always present, possibly empty.

use std::{collections::BTreeMap, fmt};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::canonical::{DomainType, SubcellularLocation};

/// Database a protein record was retrieved from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    /// UniProt knowledgebase
    #[serde(rename = "uniprot")]
    UniProt,
}

impl DataSource {
    /// Human readable name of the source
    pub fn name(self) -> &'static str {
        match self {
            DataSource::UniProt => "UniProt",
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Kind of biological sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SequenceType {
    /// Amino acid sequence
    Protein,
    /// DNA nucleotide sequence
    Dna,
    /// RNA nucleotide sequence
    Rna,
}

/// Source organism of a protein
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Organism {
    /// Scientific (Latin) name
    pub scientific_name: String,
    /// Common name, if the source reports one
    pub common_name: Option<String>,
    /// NCBI taxonomy identifier
    pub taxon_id: Option<u64>,
    /// Taxonomic lineage from the root down
    pub lineage: Vec<String>,
}

impl Organism {
    /// Placeholder used when the source omits the organism
    pub fn unknown() -> Self {
        Self {
            scientific_name: "Unknown".to_string(),
            common_name: None,
            taxon_id: None,
            lineage: Vec::new(),
        }
    }

    /// The common name when present, otherwise the scientific name
    pub fn display_name(&self) -> &str {
        self.common_name.as_deref().unwrap_or(&self.scientific_name)
    }
}

/// Sequence of a protein record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProteinSequence {
    /// Residues in one-letter code
    pub value: String,
    /// Number of residues
    pub length: usize,
    /// Sequence kind
    pub sequence_type: SequenceType,
    /// Molecular weight in daltons
    pub molecular_weight: Option<u64>,
    /// CRC64 checksum as reported upstream
    pub crc64: Option<String>,
    /// MD5 checksum as reported upstream
    pub md5: Option<String>,
}

/// A canonicalized domain or region annotation
///
/// Positions are 1-based and inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProteinDomain {
    /// Canonical classification
    pub domain_type: DomainType,
    /// First residue
    pub start: i64,
    /// Last residue
    pub end: i64,
    /// Free-text description from the source
    pub description: Option<String>,
    /// The source label the classification was derived from
    pub original_name: String,
}

impl ProteinDomain {
    /// Number of residues covered, `end - start + 1`
    pub fn length(&self) -> i64 {
        self.end - self.start + 1
    }
}

/// Pointer from a protein to an entry in another database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CrossReference {
    /// Database name, e.g. `PDB`
    pub database: String,
    /// Identifier within that database
    pub id: String,
    /// Extra properties such as `Method` or `Resolution`
    pub properties: BTreeMap<String, String>,
}

impl CrossReference {
    /// Look up a property by its exact key
    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }
}

impl fmt::Display for CrossReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.database, self.id)
    }
}

/// Canonical protein record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Protein {
    /// Primary accession, e.g. `P04637`
    pub id: String,
    /// Entry name, e.g. `P53_HUMAN`
    pub entry_name: Option<String>,
    /// Display name; never empty
    pub name: String,
    /// Recommended full name
    pub full_name: Option<String>,
    /// Alternative full names
    pub alternative_names: Vec<String>,
    /// Short names of the recommended name
    pub short_names: Vec<String>,
    /// Source organism
    pub organism: Organism,
    /// Sequence, when reported
    pub sequence: Option<ProteinSequence>,
    /// Function descriptions
    pub functions: Vec<String>,
    /// Subunit structure descriptions
    pub subunit_structure: Vec<String>,
    /// Domain and region annotations
    pub domains: Vec<ProteinDomain>,
    /// Cross-references, at most one per database
    pub cross_references: Vec<CrossReference>,
    /// Distinct canonical locations
    pub subcellular_locations: Vec<SubcellularLocation>,
    /// Keyword names
    pub keywords: Vec<String>,
    /// Distinct gene names and synonyms
    pub gene_names: Vec<String>,
    /// Date of the last annotation update
    pub last_updated: Option<NaiveDate>,
    /// Date of the last sequence update
    pub sequence_last_updated: Option<NaiveDate>,
    /// Entry version
    pub entry_version: Option<u32>,
    /// Sequence version
    pub sequence_version: Option<u32>,
    /// Database the record came from
    pub source: DataSource,
}

impl Protein {
    /// Find the cross-reference for a database, ignoring ASCII case
    pub fn get_cross_reference(&self, database: &str) -> Option<&CrossReference> {
        self.cross_references
            .iter()
            .find(|reference| reference.database.eq_ignore_ascii_case(database))
    }

    /// Whether a keyword is present, ignoring ASCII case
    pub fn has_keyword(&self, keyword: &str) -> bool {
        self.keywords
            .iter()
            .any(|candidate| candidate.eq_ignore_ascii_case(keyword))
    }

    /// Whether the protein is annotated with the canonical location
    pub fn is_located_in(&self, location: SubcellularLocation) -> bool {
        self.subcellular_locations.contains(&location)
    }
}
