// src/dataset.rs
use crate::error::LoadError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One raw tabular row: `Name, Symptoms (comma-separated text), Treatments
/// (optional)`. Normalization happens later, in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DiseaseRow {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Symptoms")]
    pub symptoms: String,
    #[serde(rename = "Treatments", default)]
    pub treatments: Option<String>,
}

/// Reads a headered CSV dataset. Rows with an empty name are skipped;
/// a file with no usable rows at all is a load failure.
pub fn read_csv_file(path: &Path) -> Result<Vec<DiseaseRow>, LoadError> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut rows = Vec::new();
    for row in reader.deserialize::<DiseaseRow>() {
        let row = row?;
        if row.name.trim().is_empty() {
            continue;
        }
        rows.push(row);
    }
    if rows.is_empty() {
        return Err(LoadError::EmptyDataset);
    }
    Ok(rows)
}

/// The built-in demo catalog: six everyday conditions with treatments.
/// Keeps the CLI (and tests) functional with no dataset on disk.
pub fn demo_rows() -> Vec<DiseaseRow> {
    let rows = [
        (
            "Common Cold",
            "cough, runny nose, sneezing, sore throat, fatigue, mild fever",
            "Rest, hydration, over-the-counter cold medication, vitamin C",
        ),
        (
            "Influenza",
            "fever, body aches, fatigue, cough, headache, chills, sore throat",
            "Rest, fluids, antiviral medication if early, pain relievers",
        ),
        (
            "Migraine",
            "headache, nausea, light sensitivity, vision changes, dizziness",
            "Rest in dark room, pain medication, migraine-specific drugs, hydration",
        ),
        (
            "Food Poisoning",
            "nausea, vomiting, diarrhea, stomach cramps, fever, loss of appetite",
            "Hydration, rest, bland diet, avoid dairy and fatty foods, electrolyte solutions",
        ),
        (
            "Allergic Rhinitis",
            "sneezing, runny nose, itchy eyes, nasal congestion, postnasal drip",
            "Antihistamines, nasal sprays, allergen avoidance, decongestants",
        ),
        (
            "Bronchitis",
            "persistent cough, chest congestion, fatigue, shortness of breath, fever",
            "Rest, hydration, cough medicine, inhalers if needed, avoid irritants",
        ),
    ];
    rows.into_iter()
        .map(|(name, symptoms, treatments)| DiseaseRow {
            name: name.to_string(),
            symptoms: symptoms.to_string(),
            treatments: Some(treatments.to_string()),
        })
        .collect()
}
