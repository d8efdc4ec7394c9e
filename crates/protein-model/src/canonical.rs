// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Canonicalization of free-text upstream vocabulary
//!
//! Upstream databases describe features and locations with loosely controlled
//! labels ("DNA-binding region", "Nucleus speckle", "Zinc finger C2H2-type").
//! Each canonical enumeration here owns an ordered rule table that is
//! evaluated top-down against the normalized label; the first match wins.
//!
//! Normalization removes whitespace and hyphens and upper-cases the label, so
//! matching is insensitive to case and separators but not to synonyms.
//!
//! Rule order is part of the contract: a label such as `"DNA-binding region"`
//! matches both the DNA-binding rule and the generic region rule, and must
//! resolve to [`DomainType::DnaBinding`]. Reordering rules changes the output
//! for such labels.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A predicate tested against a normalized label
#[derive(Debug, Clone, Copy)]
enum Pattern {
    /// The label contains the needle
    Contains(&'static str),
    /// The label equals the value
    Exact(&'static str),
}

impl Pattern {
    fn matches(self, normalized: &str) -> bool {
        match self {
            Pattern::Contains(needle) => normalized.contains(needle),
            Pattern::Exact(expected) => normalized == expected,
        }
    }
}

/// Strip whitespace and hyphen separators and upper-case the rest
fn normalize(label: &str) -> String {
    label
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .flat_map(char::to_uppercase)
        .collect()
}

/// Evaluate an ordered rule table, falling back to `unrecognized`
///
/// Blank labels short-circuit to `unrecognized` without touching the table.
fn canonicalize<T: Copy>(label: &str, rules: &[(Pattern, T)], unrecognized: T) -> T {
    if label.trim().is_empty() {
        return unrecognized;
    }

    let normalized = normalize(label);
    rules
        .iter()
        .find(|(pattern, _)| pattern.matches(&normalized))
        .map_or(unrecognized, |(_, value)| *value)
}

/// Canonical classification of a positional sequence feature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DomainType {
    /// DNA-binding domain or region
    DnaBinding,
    /// Protein kinase domain
    Kinase,
    /// Transactivation domain
    Transactivation,
    /// Tetramerization domain
    Tetramerization,
    /// Dimerization domain
    Dimerization,
    /// Transmembrane segment
    Transmembrane,
    /// Signal peptide
    SignalPeptide,
    /// Zinc finger
    ZincFinger,
    /// Immunoglobulin-like domain
    Immunoglobulin,
    /// Src homology 2 domain
    Sh2,
    /// Src homology 3 domain
    Sh3,
    /// Catalytic domain
    Catalytic,
    /// Regulatory domain
    Regulatory,
    /// Short sequence motif
    Motif,
    /// Repeated sequence
    Repeat,
    /// Coiled-coil region
    CoiledCoil,
    /// Generic region of interest
    Region,
    /// Generic domain with no finer classification
    Domain,
    /// Compositionally biased region
    CompositionallyBiased,
    /// Label not recognized by any rule
    Other,
}

const DOMAIN_TYPE_RULES: &[(Pattern, DomainType)] = &[
    (Pattern::Contains("DNABINDING"), DomainType::DnaBinding),
    (Pattern::Contains("KINASE"), DomainType::Kinase),
    (Pattern::Contains("TRANSACTIVATION"), DomainType::Transactivation),
    (Pattern::Contains("TETRAMERIZATION"), DomainType::Tetramerization),
    (Pattern::Contains("DIMERIZATION"), DomainType::Dimerization),
    (Pattern::Contains("TRANSMEMBRANE"), DomainType::Transmembrane),
    (Pattern::Contains("SIGNAL"), DomainType::SignalPeptide),
    (Pattern::Contains("ZINCFINGER"), DomainType::ZincFinger),
    (Pattern::Contains("ZNF"), DomainType::ZincFinger),
    (Pattern::Contains("IMMUNOGLOBULIN"), DomainType::Immunoglobulin),
    (Pattern::Contains("IG"), DomainType::Immunoglobulin),
    (Pattern::Contains("SH2"), DomainType::Sh2),
    (Pattern::Contains("SH3"), DomainType::Sh3),
    (Pattern::Contains("CATALYTIC"), DomainType::Catalytic),
    (Pattern::Contains("REGULATORY"), DomainType::Regulatory),
    (Pattern::Contains("MOTIF"), DomainType::Motif),
    (Pattern::Contains("REPEAT"), DomainType::Repeat),
    (Pattern::Contains("COILEDCOIL"), DomainType::CoiledCoil),
    (Pattern::Contains("REGION"), DomainType::Region),
    (Pattern::Exact("DOMAIN"), DomainType::Domain),
];

impl DomainType {
    /// Canonicalize a free-text feature label
    ///
    /// Returns [`DomainType::Other`] for blank or unrecognized labels.
    ///
    /// ```rust
    /// use protein_model::DomainType;
    ///
    /// assert_eq!(DomainType::from_label("DNA-binding region"), DomainType::DnaBinding);
    /// assert_eq!(DomainType::from_label("Zinc finger C2H2-type 1"), DomainType::ZincFinger);
    /// assert_eq!(DomainType::from_label("Disordered"), DomainType::Other);
    /// ```
    pub fn from_label(label: &str) -> Self {
        canonicalize(label, DOMAIN_TYPE_RULES, DomainType::Other)
    }

    /// Whether the label was recognized by a rule
    pub fn is_recognized(self) -> bool {
        self != DomainType::Other
    }
}

impl fmt::Display for DomainType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Canonical subcellular compartment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SubcellularLocation {
    /// Nucleus
    Nucleus,
    /// Cytoplasm
    Cytoplasm,
    /// Any membrane
    Membrane,
    /// Mitochondrion
    Mitochondrion,
    /// Endoplasmic reticulum
    EndoplasmicReticulum,
    /// Golgi apparatus
    Golgi,
    /// Lysosome
    Lysosome,
    /// Peroxisome
    Peroxisome,
    /// Secreted
    Secreted,
    /// Extracellular matrix or space
    ExtracellularMatrix,
    /// Cytoskeleton
    Cytoskeleton,
    /// Cell projection
    CellProjection,
    /// Several compartments
    Multiple,
    /// Label not recognized by any rule
    Unknown,
}

// "ER" is a bare two-letter substring and shadows every later rule whose
// normalized label contains it, "PEROXISOME" included.
const SUBCELLULAR_LOCATION_RULES: &[(Pattern, SubcellularLocation)] = &[
    (Pattern::Contains("NUCLEUS"), SubcellularLocation::Nucleus),
    (Pattern::Contains("CYTOPLASM"), SubcellularLocation::Cytoplasm),
    (Pattern::Contains("MEMBRANE"), SubcellularLocation::Membrane),
    (Pattern::Contains("MITOCHONDRI"), SubcellularLocation::Mitochondrion),
    (
        Pattern::Contains("ENDOPLASMIC"),
        SubcellularLocation::EndoplasmicReticulum,
    ),
    (Pattern::Contains("ER"), SubcellularLocation::EndoplasmicReticulum),
    (Pattern::Contains("GOLGI"), SubcellularLocation::Golgi),
    (Pattern::Contains("LYSOSOME"), SubcellularLocation::Lysosome),
    (Pattern::Contains("PEROXISOME"), SubcellularLocation::Peroxisome),
    (Pattern::Contains("SECRET"), SubcellularLocation::Secreted),
    (
        Pattern::Contains("EXTRACELLULAR"),
        SubcellularLocation::ExtracellularMatrix,
    ),
    (Pattern::Contains("CYTOSKELETON"), SubcellularLocation::Cytoskeleton),
];

impl SubcellularLocation {
    /// Canonicalize a free-text location label
    ///
    /// Returns [`SubcellularLocation::Unknown`] for blank or unrecognized labels.
    pub fn from_label(label: &str) -> Self {
        canonicalize(
            label,
            SUBCELLULAR_LOCATION_RULES,
            SubcellularLocation::Unknown,
        )
    }

    /// Whether the label was recognized by a rule
    pub fn is_recognized(self) -> bool {
        self != SubcellularLocation::Unknown
    }
}

impl fmt::Display for SubcellularLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_separators_and_uppercases() {
        assert_eq!(normalize("Zinc finger C2H2-type"), "ZINCFINGERC2H2TYPE");
        assert_eq!(normalize(" coiled\tcoil "), "COILEDCOIL");
        assert_eq!(normalize("SH3"), "SH3");
    }

    #[test]
    fn dna_binding_takes_precedence_over_region() {
        assert_eq!(
            DomainType::from_label("DNA-binding region"),
            DomainType::DnaBinding
        );
        assert_eq!(
            DomainType::from_label("dna binding"),
            DomainType::DnaBinding
        );
    }

    #[test]
    fn domain_type_rules_follow_table_order() {
        let cases = [
            ("Protein kinase", DomainType::Kinase),
            ("Transactivation domain 1", DomainType::Transactivation),
            ("Tetramerization motif", DomainType::Tetramerization),
            ("Dimerization", DomainType::Dimerization),
            ("Transmembrane helix", DomainType::Transmembrane),
            ("Signal peptide", DomainType::SignalPeptide),
            ("Zinc finger C4-type", DomainType::ZincFinger),
            ("ZNF domain", DomainType::ZincFinger),
            ("Ig-like C2-type", DomainType::Immunoglobulin),
            ("Immunoglobulin V-set", DomainType::Immunoglobulin),
            ("SH2", DomainType::Sh2),
            ("SH3 domain", DomainType::Sh3),
            ("Catalytic", DomainType::Catalytic),
            ("Regulatory domain", DomainType::Regulatory),
            ("Nuclear localization motif", DomainType::Motif),
            ("WD repeat", DomainType::Repeat),
            ("Coiled-coil", DomainType::CoiledCoil),
            ("Interaction with DNA region", DomainType::Region),
            ("Basic and acidic residues region", DomainType::Region),
            ("domain", DomainType::Domain),
        ];

        for (label, expected) in cases {
            assert_eq!(DomainType::from_label(label), expected, "label {label:?}");
        }
    }

    #[test]
    fn short_ig_token_captures_oligomerization() {
        assert_eq!(
            DomainType::from_label("Oligomerization"),
            DomainType::Immunoglobulin
        );
    }

    #[test]
    fn domain_matches_only_exactly() {
        assert_eq!(DomainType::from_label("Domain"), DomainType::Domain);
        assert_eq!(DomainType::from_label("PDZ domain"), DomainType::Other);
    }

    #[test]
    fn blank_and_unmatched_labels_are_unrecognized() {
        assert_eq!(DomainType::from_label(""), DomainType::Other);
        assert_eq!(DomainType::from_label("  \t "), DomainType::Other);
        assert_eq!(DomainType::from_label("Disordered"), DomainType::Other);
        assert!(!DomainType::from_label("Disordered").is_recognized());

        assert_eq!(
            SubcellularLocation::from_label(""),
            SubcellularLocation::Unknown
        );
        assert_eq!(
            SubcellularLocation::from_label("Chromosome"),
            SubcellularLocation::Unknown
        );
    }

    #[test]
    fn canonical_domain_names_are_stable() {
        let canonical = [
            DomainType::DnaBinding,
            DomainType::Kinase,
            DomainType::Transactivation,
            DomainType::Tetramerization,
            DomainType::Dimerization,
            DomainType::Transmembrane,
            DomainType::SignalPeptide,
            DomainType::ZincFinger,
            DomainType::Immunoglobulin,
            DomainType::Sh2,
            DomainType::Sh3,
            DomainType::Catalytic,
            DomainType::Regulatory,
            DomainType::Motif,
            DomainType::Repeat,
            DomainType::CoiledCoil,
            DomainType::Region,
            DomainType::Domain,
        ];

        for value in canonical {
            let once = DomainType::from_label(&value.to_string());
            assert_eq!(once, value);
            assert_eq!(DomainType::from_label(&once.to_string()), once);
        }
    }

    #[test]
    fn subcellular_rules_follow_table_order() {
        let cases = [
            ("Nucleus", SubcellularLocation::Nucleus),
            ("nucleus speckle", SubcellularLocation::Nucleus),
            ("Cytoplasm", SubcellularLocation::Cytoplasm),
            ("Cell membrane", SubcellularLocation::Membrane),
            (
                "Endoplasmic reticulum membrane",
                SubcellularLocation::Membrane,
            ),
            ("Mitochondrion matrix", SubcellularLocation::Mitochondrion),
            (
                "Endoplasmic reticulum lumen",
                SubcellularLocation::EndoplasmicReticulum,
            ),
            ("Golgi apparatus", SubcellularLocation::Golgi),
            ("Lysosome", SubcellularLocation::Lysosome),
            ("Secreted", SubcellularLocation::Secreted),
            (
                "Extracellular space",
                SubcellularLocation::ExtracellularMatrix,
            ),
            ("Cytoskeleton", SubcellularLocation::Cytoskeleton),
        ];

        for (label, expected) in cases {
            assert_eq!(
                SubcellularLocation::from_label(label),
                expected,
                "label {label:?}"
            );
        }
    }

    #[test]
    fn short_er_token_shadows_peroxisome() {
        assert_eq!(
            SubcellularLocation::from_label("Peroxisome"),
            SubcellularLocation::EndoplasmicReticulum
        );
    }

    #[test]
    fn subcellular_matching_ignores_case_and_separators() {
        assert_eq!(
            SubcellularLocation::from_label("mito-chondrion"),
            SubcellularLocation::Mitochondrion
        );
        assert_eq!(
            SubcellularLocation::from_label("  GOLGI  apparatus "),
            SubcellularLocation::Golgi
        );
    }

    #[test]
    fn serde_serialization() {
        assert_eq!(
            serde_json::to_string(&DomainType::DnaBinding).unwrap(),
            "\"dna_binding\""
        );
        assert_eq!(
            serde_json::to_string(&SubcellularLocation::EndoplasmicReticulum).unwrap(),
            "\"endoplasmic_reticulum\""
        );

        let parsed: DomainType = serde_json::from_str("\"zinc_finger\"").unwrap();
        assert_eq!(parsed, DomainType::ZincFinger);
    }
}
