// src/core/similarity.rs
use crate::core::catalog::DiseaseCatalog;
use crate::core::frequency::FrequencyIndex;
use crate::core::types::{DiagnosisMethod, DiagnosisResult, ScoringProfile, SymptomToken};
use std::collections::BTreeSet;

/// Results scoring at or below this are dropped before merging.
pub const MIN_SCORE: f64 = 0.1;

/// Weighted-profile blend factors.
const JACCARD_WEIGHT: f64 = 0.4;
const COVERAGE_WEIGHT: f64 = 0.3;
const SPECIFICITY_WEIGHT: f64 = 0.3;

/// Scores an input token set against every catalog record.
///
/// Stateless apart from the profile chosen at initialization; shares the
/// catalog and frequency index read-only per call.
#[derive(Debug, Clone, Copy)]
pub struct SimilarityScorer {
    profile: ScoringProfile,
}

impl SimilarityScorer {
    pub fn new(profile: ScoringProfile) -> Self {
        Self { profile }
    }

    pub fn profile(&self) -> ScoringProfile {
        self.profile
    }

    /// Ranked candidates for `input`, best first, at most `top_n`.
    /// Ties keep catalog order (stable sort).
    pub fn search(
        &self,
        catalog: &DiseaseCatalog,
        frequency: &FrequencyIndex,
        input: &BTreeSet<SymptomToken>,
        top_n: usize,
    ) -> Vec<DiagnosisResult> {
        let mut results = Vec::new();

        for record in catalog.iter() {
            if record.symptoms.is_empty() {
                continue;
            }

            let matching: BTreeSet<SymptomToken> =
                input.intersection(&record.symptoms).cloned().collect();
            let score = self.score(input, &record.symptoms, &matching, frequency);
            if score <= MIN_SCORE {
                continue;
            }

            results.push(DiagnosisResult {
                disease_name: record.name.clone(),
                score,
                match_count: matching.len(),
                matching_symptoms: matching,
                all_symptoms: record.symptoms.clone(),
                treatments: record.treatments.clone(),
                category: record.category.clone(),
                method: DiagnosisMethod::Similarity,
            });
        }

        results.sort_by(|a, b| b.score.total_cmp(&a.score));
        results.truncate(top_n);
        results
    }

    fn score(
        &self,
        input: &BTreeSet<SymptomToken>,
        disease: &BTreeSet<SymptomToken>,
        matching: &BTreeSet<SymptomToken>,
        frequency: &FrequencyIndex,
    ) -> f64 {
        let jaccard = jaccard(input, disease);
        let specificity = specificity_weight(matching, frequency);

        match self.profile {
            ScoringProfile::Simple => jaccard * (1.0 + specificity),
            ScoringProfile::Weighted => {
                let coverage = coverage(input.len(), matching.len());
                JACCARD_WEIGHT * jaccard
                    + COVERAGE_WEIGHT * coverage
                    + SPECIFICITY_WEIGHT * specificity
            }
        }
    }
}

/// Intersection over union; 0 when both sets are empty.
pub fn jaccard(a: &BTreeSet<SymptomToken>, b: &BTreeSet<SymptomToken>) -> f64 {
    let intersection = a.intersection(b).count();
    let union = a.len() + b.len() - intersection;
    if union == 0 {
        0.0
    } else {
        intersection as f64 / union as f64
    }
}

/// Fraction of queried symptoms found in the candidate; 0 for empty input.
pub fn coverage(input_len: usize, match_count: usize) -> f64 {
    if input_len == 0 {
        0.0
    } else {
        match_count as f64 / input_len as f64
    }
}

/// Inverse-log-frequency sum over the matched symptoms. Rare symptoms weigh
/// more than generic ones; `frequency` never reports below 1, so the
/// denominator stays at least `ln(2)`.
fn specificity_weight(matching: &BTreeSet<SymptomToken>, frequency: &FrequencyIndex) -> f64 {
    matching
        .iter()
        .map(|symptom| 1.0 / ((frequency.frequency(symptom) + 1) as f64).ln())
        .sum()
}
