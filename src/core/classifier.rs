// src/core/classifier.rs
use crate::core::catalog::DiseaseCatalog;
use crate::core::types::SymptomToken;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// A disease name must appear this many times as a row to count as a class.
const MIN_ROWS_PER_CLASS: usize = 2;
/// Minimum number of repeated-label classes before training is attempted.
const MIN_DISTINCT_CLASSES: usize = 5;
/// How many labels a prediction returns at most.
const TOP_PREDICTIONS: usize = 3;
/// Predictions at or below this probability are dropped.
const MIN_PROBABILITY: f64 = 0.1;
/// Fixed shuffle seed: training is deterministic across runs.
const SPLIT_SEED: u64 = 42;

/// Bernoulli Naive Bayes over binary symptom-presence features.
///
/// Disease name is the label. Only trained when the catalog carries enough
/// repeated-label rows; otherwise the engine runs similarity-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymptomClassifier {
    /// Known feature tokens in first-seen order.
    vocabulary: Vec<SymptomToken>,
    positions: HashMap<SymptomToken, usize>,
    classes: Vec<ClassModel>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ClassModel {
    name: String,
    log_prior: f64,
    /// Per-feature `ln P(present | class)` with Laplace smoothing.
    present_log_prob: Vec<f64>,
    /// Per-feature `ln P(absent | class)`.
    absent_log_prob: Vec<f64>,
}

/// Held-out evaluation figures reported after a successful training run.
#[derive(Debug, Clone, Copy)]
pub struct TrainingSummary {
    pub classes: usize,
    pub train_rows: usize,
    pub test_rows: usize,
    pub accuracy: f64,
}

impl SymptomClassifier {
    /// Trains on the catalog's repeated-label rows, holding out a stratified
    /// test split for evaluation. `None` when the data is too thin; the
    /// caller treats that as a degraded mode, not an error.
    pub fn train(catalog: &DiseaseCatalog) -> Option<(Self, TrainingSummary)> {
        // Row counts per exact name, in first-seen order.
        let mut counts: HashMap<&str, usize> = HashMap::new();
        let mut name_order: Vec<&str> = Vec::new();
        for record in catalog.iter() {
            let entry = counts.entry(record.name.as_str()).or_insert(0);
            if *entry == 0 {
                name_order.push(record.name.as_str());
            }
            *entry += 1;
        }

        let class_names: Vec<&str> = name_order
            .into_iter()
            .filter(|name| counts[name] >= MIN_ROWS_PER_CLASS)
            .collect();
        if class_names.len() < MIN_DISTINCT_CLASSES {
            return None;
        }
        let class_index: HashMap<&str, usize> = class_names
            .iter()
            .enumerate()
            .map(|(idx, name)| (*name, idx))
            .collect();

        // Vocabulary and feature rows from the eligible records only.
        let mut vocabulary: Vec<SymptomToken> = Vec::new();
        let mut positions: HashMap<SymptomToken, usize> = HashMap::new();
        let mut rows: Vec<(BTreeSet<SymptomToken>, usize)> = Vec::new();
        for record in catalog.iter() {
            let Some(&class) = class_index.get(record.name.as_str()) else {
                continue;
            };
            for symptom in &record.symptoms {
                if !positions.contains_key(symptom) {
                    positions.insert(symptom.clone(), vocabulary.len());
                    vocabulary.push(symptom.clone());
                }
            }
            rows.push((record.symptoms.clone(), class));
        }

        // Stratified split. The test fraction grows with label cardinality so
        // every class can keep at least one held-out row.
        let test_fraction =
            (class_names.len() as f64 / rows.len() as f64).max(0.2);
        let mut rng = StdRng::seed_from_u64(SPLIT_SEED);
        let mut train_rows: Vec<usize> = Vec::new();
        let mut test_rows: Vec<usize> = Vec::new();
        for class in 0..class_names.len() {
            let mut members: Vec<usize> = rows
                .iter()
                .enumerate()
                .filter(|(_, (_, c))| *c == class)
                .map(|(idx, _)| idx)
                .collect();
            members.shuffle(&mut rng);
            let held_out = ((test_fraction * members.len() as f64).ceil() as usize)
                .clamp(1, members.len() - 1);
            test_rows.extend(members.drain(..held_out));
            train_rows.extend(members);
        }

        let classifier = Self::fit(
            vocabulary,
            positions,
            &class_names,
            &rows,
            &train_rows,
        );

        let correct = test_rows
            .iter()
            .filter(|&&idx| {
                classifier
                    .predict(&rows[idx].0)
                    .first()
                    .is_some_and(|(name, _)| *name == class_names[rows[idx].1])
            })
            .count();
        let summary = TrainingSummary {
            classes: class_names.len(),
            train_rows: train_rows.len(),
            test_rows: test_rows.len(),
            accuracy: correct as f64 / test_rows.len() as f64,
        };

        Some((classifier, summary))
    }

    fn fit(
        vocabulary: Vec<SymptomToken>,
        positions: HashMap<SymptomToken, usize>,
        class_names: &[&str],
        rows: &[(BTreeSet<SymptomToken>, usize)],
        train_rows: &[usize],
    ) -> Self {
        let feature_count = vocabulary.len();
        let mut class_rows = vec![0usize; class_names.len()];
        let mut present_counts = vec![vec![0usize; feature_count]; class_names.len()];

        for &idx in train_rows {
            let (symptoms, class) = &rows[idx];
            class_rows[*class] += 1;
            for symptom in symptoms {
                if let Some(&feature) = positions.get(symptom) {
                    present_counts[*class][feature] += 1;
                }
            }
        }

        let total = train_rows.len() as f64;
        let classes = class_names
            .iter()
            .enumerate()
            .map(|(class, name)| {
                let rows_in_class = class_rows[class];
                let mut present_log_prob = Vec::with_capacity(feature_count);
                let mut absent_log_prob = Vec::with_capacity(feature_count);
                for feature in 0..feature_count {
                    // Laplace smoothing keeps both branches off zero.
                    let p = (present_counts[class][feature] + 1) as f64
                        / (rows_in_class + 2) as f64;
                    present_log_prob.push(p.ln());
                    absent_log_prob.push((1.0 - p).ln());
                }
                ClassModel {
                    name: name.to_string(),
                    log_prior: (rows_in_class as f64 / total).ln(),
                    present_log_prob,
                    absent_log_prob,
                }
            })
            .collect();

        Self {
            vocabulary,
            positions,
            classes,
        }
    }

    /// Probability-ranked disease guesses for a query token set: at most
    /// three labels, each above the confidence floor, best first.
    pub fn predict(&self, input: &BTreeSet<SymptomToken>) -> Vec<(String, f64)> {
        if self.classes.is_empty() {
            return Vec::new();
        }

        let present: Vec<bool> = self
            .vocabulary
            .iter()
            .map(|token| input.contains(token))
            .collect();

        let log_scores: Vec<f64> = self
            .classes
            .iter()
            .map(|class| {
                let mut score = class.log_prior;
                for (feature, &is_present) in present.iter().enumerate() {
                    score += if is_present {
                        class.present_log_prob[feature]
                    } else {
                        class.absent_log_prob[feature]
                    };
                }
                score
            })
            .collect();

        // Normalize in log space to recover a probability distribution.
        let max_score = log_scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let exp_scores: Vec<f64> = log_scores.iter().map(|s| (s - max_score).exp()).collect();
        let norm: f64 = exp_scores.iter().sum();

        let mut ranked: Vec<(String, f64)> = self
            .classes
            .iter()
            .zip(&exp_scores)
            .map(|(class, &e)| (class.name.clone(), e / norm))
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked
            .into_iter()
            .take(TOP_PREDICTIONS)
            .filter(|(_, probability)| *probability > MIN_PROBABILITY)
            .collect()
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }
}
