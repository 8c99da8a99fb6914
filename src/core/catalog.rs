// src/core/catalog.rs
use crate::core::normalize::clean_training_symptoms;
use crate::core::types::{DiseaseRecord, SymptomToken};
use crate::dataset::DiseaseRow;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

/// Filled in when the source row has no treatment text.
pub const NO_TREATMENT_INFO: &str = "No treatment information available";

/// Category assigned when no keyword matches.
pub const FALLBACK_CATEGORY: &str = "Other";

/// Ordered category table. The first category with any keyword occurring as
/// a substring of the joined symptom text wins.
const CATEGORY_KEYWORDS: [(&str, &[&str]); 8] = [
    ("Infectious", &["fever", "infection", "viral", "bacterial", "fungal"]),
    ("Cardiovascular", &["chest pain", "heart", "blood pressure", "palpitations"]),
    ("Neurological", &["headache", "seizure", "numbness", "tingling", "confusion"]),
    ("Gastrointestinal", &["abdominal pain", "nausea", "vomiting", "diarrhea"]),
    ("Respiratory", &["cough", "shortness of breath", "wheezing", "chest congestion"]),
    ("Musculoskeletal", &["joint pain", "muscle pain", "stiffness", "swelling"]),
    ("Dermatological", &["rash", "itching", "skin", "redness"]),
    ("Endocrine", &["fatigue", "weight", "thirst", "urination"]),
];

/// The in-memory matching universe: every condition record, in load order.
///
/// Exact duplicate rows are dropped; duplicate names are allowed and all of
/// them get scored. Immutable once built.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiseaseCatalog {
    records: Vec<DiseaseRecord>,
}

impl DiseaseCatalog {
    pub fn from_rows(rows: &[DiseaseRow]) -> Self {
        let mut seen: HashSet<&DiseaseRow> = HashSet::new();
        let mut records = Vec::new();

        for row in rows {
            if !seen.insert(row) {
                continue;
            }
            let symptoms = clean_training_symptoms(&row.symptoms);
            let category = assign_category(&symptoms);
            let treatments = match &row.treatments {
                Some(text) if !text.trim().is_empty() => text.clone(),
                _ => NO_TREATMENT_INFO.to_string(),
            };
            records.push(DiseaseRecord {
                name: row.name.clone(),
                symptoms,
                treatments,
                category,
            });
        }

        Self { records }
    }

    pub fn iter(&self) -> impl Iterator<Item = &DiseaseRecord> {
        self.records.iter()
    }

    /// First record whose name matches, ignoring ASCII case.
    pub fn lookup(&self, name: &str) -> Option<&DiseaseRecord> {
        self.records
            .iter()
            .find(|record| record.name.eq_ignore_ascii_case(name))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn assign_category(symptoms: &BTreeSet<SymptomToken>) -> String {
    let joined = symptoms.iter().cloned().collect::<Vec<_>>().join(" ");
    for (category, keywords) in CATEGORY_KEYWORDS {
        if keywords.iter().any(|keyword| joined.contains(keyword)) {
            return category.to_string();
        }
    }
    FALLBACK_CATEGORY.to_string()
}
