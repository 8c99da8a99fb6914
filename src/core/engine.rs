// src/core/engine.rs
use crate::core::catalog::DiseaseCatalog;
use crate::core::classifier::SymptomClassifier;
use crate::core::frequency::FrequencyIndex;
use crate::core::normalize::clean_query_symptoms;
use crate::core::similarity::SimilarityScorer;
use crate::core::types::{
    DiagnosisMethod, DiagnosisResult, DiseaseRecord, ScoringProfile, SymptomToken,
};
use crate::dataset::DiseaseRow;
use crate::error::LoadError;
use crate::persistence::{load_from_disk, save_to_disk};
use log::{debug, info, warn};
use std::collections::{BTreeSet, HashMap};
use std::path::Path;

/// Default number of ranked results returned by `diagnose`.
pub const DEFAULT_TOP_N: usize = 5;
/// Default number of prefix suggestions.
pub const DEFAULT_SUGGESTIONS: usize = 10;

/// The diagnosis engine: catalog, frequency index, similarity scorer, and
/// the optionally trained classifier behind one facade.
///
/// Everything is immutable after `initialize`, so a single engine can serve
/// queries from parallel threads without coordination.
pub struct DiagnosisEngine {
    catalog: DiseaseCatalog,
    frequency: FrequencyIndex,
    scorer: SimilarityScorer,
    classifier: Option<SymptomClassifier>,
}

impl DiagnosisEngine {
    /// Builds catalog and frequency index from raw rows and trains the
    /// classifier when the data carries enough repeated labels.
    pub fn initialize(rows: &[DiseaseRow], profile: ScoringProfile) -> Result<Self, LoadError> {
        let catalog = DiseaseCatalog::from_rows(rows);
        if catalog.is_empty() {
            return Err(LoadError::EmptyDataset);
        }
        let frequency = FrequencyIndex::from_catalog(&catalog);

        let classifier = match SymptomClassifier::train(&catalog) {
            Some((classifier, summary)) => {
                info!(
                    "classifier trained on {} diseases: {:.2} accuracy over {} held-out rows",
                    summary.classes, summary.accuracy, summary.test_rows
                );
                Some(classifier)
            }
            None => {
                info!("not enough repeated diagnoses for classification; similarity search only");
                None
            }
        };

        Ok(Self {
            catalog,
            frequency,
            scorer: SimilarityScorer::new(profile),
            classifier,
        })
    }

    /// Loads the dataset from a CSV file, then initializes.
    pub fn from_csv_path(path: &Path, profile: ScoringProfile) -> Result<Self, LoadError> {
        let rows = crate::dataset::read_csv_file(path)?;
        Self::initialize(&rows, profile)
    }

    /// Restores a previously saved model, or falls back to a fresh build
    /// from `rows` when no usable model file exists.
    pub fn from_model_or_new(
        model_path: &Path,
        rows: &[DiseaseRow],
        profile: ScoringProfile,
    ) -> Result<Self, LoadError> {
        match load_from_disk(model_path) {
            Ok(engine) => Ok(engine),
            Err(err) => {
                if model_path.exists() {
                    warn!("model file {} unusable ({err}); rebuilding", model_path.display());
                }
                Self::initialize(rows, profile)
            }
        }
    }

    pub(crate) fn from_parts(
        catalog: DiseaseCatalog,
        frequency: FrequencyIndex,
        classifier: Option<SymptomClassifier>,
        profile: ScoringProfile,
    ) -> Self {
        Self {
            catalog,
            frequency,
            scorer: SimilarityScorer::new(profile),
            classifier,
        }
    }

    /// Maps free-text symptoms to at most `top_n` ranked candidates.
    /// Empty or garbage input yields an empty list, never an error.
    pub fn diagnose(&self, raw_symptoms: &str, top_n: usize) -> Vec<DiagnosisResult> {
        let input = clean_query_symptoms(raw_symptoms);
        if input.is_empty() {
            return Vec::new();
        }

        let classifier_results = match &self.classifier {
            Some(classifier) => self.hydrate_predictions(classifier.predict(&input), &input),
            None => Vec::new(),
        };
        // Over-fetch so merged-away overlaps still leave top_n candidates.
        let similarity_results =
            self.scorer
                .search(&self.catalog, &self.frequency, &input, top_n * 2);
        debug!(
            "query {:?}: {} classifier + {} similarity candidates",
            input,
            classifier_results.len(),
            similarity_results.len()
        );

        merge_results(classifier_results, similarity_results, top_n)
    }

    /// Known symptom tokens starting with `prefix`, most frequent first.
    pub fn suggest(&self, prefix: &str, max_n: usize) -> Vec<SymptomToken> {
        self.frequency.suggest(prefix, max_n)
    }

    /// Case-insensitive exact-name lookup.
    pub fn lookup(&self, disease_name: &str) -> Option<&DiseaseRecord> {
        self.catalog.lookup(disease_name)
    }

    /// Atomically writes the full engine state to `path`.
    pub fn save_model(&self, path: &Path) -> Result<(), std::io::Error> {
        save_to_disk(self, path)
    }

    /// Restores an engine from a model file written by `save_model`.
    pub fn load_model(path: &Path) -> Result<Self, LoadError> {
        load_from_disk(path)
    }

    pub fn catalog(&self) -> &DiseaseCatalog {
        &self.catalog
    }

    pub fn frequency_index(&self) -> &FrequencyIndex {
        &self.frequency
    }

    pub fn profile(&self) -> ScoringProfile {
        self.scorer.profile()
    }

    pub fn classifier_trained(&self) -> bool {
        self.classifier.is_some()
    }

    pub(crate) fn classifier(&self) -> Option<&SymptomClassifier> {
        self.classifier.as_ref()
    }

    /// Turns bare classifier predictions into full result records by pulling
    /// the first catalog entry with that name.
    fn hydrate_predictions(
        &self,
        predictions: Vec<(String, f64)>,
        input: &BTreeSet<SymptomToken>,
    ) -> Vec<DiagnosisResult> {
        predictions
            .into_iter()
            .filter_map(|(name, probability)| {
                self.catalog.lookup(&name).map(|record| {
                    let matching: BTreeSet<SymptomToken> =
                        input.intersection(&record.symptoms).cloned().collect();
                    DiagnosisResult {
                        disease_name: record.name.clone(),
                        score: probability,
                        match_count: matching.len(),
                        matching_symptoms: matching,
                        all_symptoms: record.symptoms.clone(),
                        treatments: record.treatments.clone(),
                        category: record.category.clone(),
                        method: DiagnosisMethod::Classification,
                    }
                })
            })
            .collect()
    }
}

/// Merges the two scoring paths into one de-duplicated ranking.
///
/// Per disease name the classifier result stands unless similarity scored
/// strictly higher; the winning source keeps its method tag. Names only one
/// path found always survive to the final sort.
pub fn merge_results(
    classifier_results: Vec<DiagnosisResult>,
    similarity_results: Vec<DiagnosisResult>,
    top_n: usize,
) -> Vec<DiagnosisResult> {
    let mut merged: Vec<DiagnosisResult> = Vec::new();
    let mut by_name: HashMap<String, usize> = HashMap::new();

    for result in classifier_results.into_iter().chain(similarity_results) {
        match by_name.get(&result.disease_name) {
            Some(&pos) => {
                if result.score > merged[pos].score {
                    merged[pos] = result;
                }
            }
            None => {
                by_name.insert(result.disease_name.clone(), merged.len());
                merged.push(result);
            }
        }
    }

    merged.sort_by(|a, b| b.score.total_cmp(&a.score));
    merged.truncate(top_n);
    merged
}
