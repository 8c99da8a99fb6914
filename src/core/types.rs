// src/core/types.rs
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A normalized atomic symptom string, the unit of matching.
/// Lowercase, punctuation stripped, trimmed; see `core::normalize`.
pub type SymptomToken = String;

/// A single condition in the matching universe.
/// Built once at load time and immutable for the process lifetime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiseaseRecord {
    pub name: String,
    /// Normalized symptom set; order-irrelevant, duplicates collapsed.
    pub symptoms: BTreeSet<SymptomToken>,
    /// Free text; a sentinel string when the source had nothing.
    pub treatments: String,
    /// Assigned at load time by first-keyword-match; `Other` otherwise.
    pub category: String,
}

/// Which scoring path produced a result. The merger branches on this tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosisMethod {
    Classification,
    Similarity,
}

/// Named scoring configuration, chosen once at initialization.
///
/// `Simple` is the demo-deployment formula `jaccard * (1 + specificity)`;
/// `Weighted` blends jaccard, coverage, and specificity for catalog-trained
/// deployments where coverage carries its own signal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoringProfile {
    #[default]
    Simple,
    Weighted,
}

/// One ranked candidate condition for a query. Transient: owned by the
/// caller of `diagnose`, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosisResult {
    pub disease_name: String,
    pub score: f64,
    pub matching_symptoms: BTreeSet<SymptomToken>,
    pub all_symptoms: BTreeSet<SymptomToken>,
    pub treatments: String,
    pub category: String,
    pub match_count: usize,
    pub method: DiagnosisMethod,
}
