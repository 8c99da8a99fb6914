// src/persistence.rs
use crate::core::catalog::DiseaseCatalog;
use crate::core::classifier::SymptomClassifier;
use crate::core::engine::DiagnosisEngine;
use crate::core::frequency::FrequencyIndex;
use crate::core::types::ScoringProfile;
use crate::error::LoadError;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Error};
use std::path::Path;
use tempfile::NamedTempFile;

/// The serializable state of the engine: everything `diagnose` reads.
/// The trained classifier travels with the catalog so a restart skips
/// retraining.
#[derive(serde::Serialize, serde::Deserialize)]
struct SerializableState {
    catalog: DiseaseCatalog,
    frequency: FrequencyIndex,
    classifier: Option<SymptomClassifier>,
    profile: ScoringProfile,
}

/// Writes the engine state to `path` via a temp file in the same directory,
/// so readers never observe a half-written model.
pub fn save_to_disk(engine: &DiagnosisEngine, path: &Path) -> Result<(), Error> {
    let parent_dir = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent_dir)?;

    let state = SerializableState {
        catalog: engine.catalog().clone(),
        frequency: engine.frequency_index().clone(),
        classifier: engine.classifier().cloned(),
        profile: engine.profile(),
    };

    let temp_file = NamedTempFile::new_in(parent_dir)?;
    let writer = BufWriter::new(&temp_file);
    bincode::serialize_into(writer, &state)
        .map_err(|e| Error::new(std::io::ErrorKind::Other, e))?;

    temp_file.persist(path)?;
    Ok(())
}

pub fn load_from_disk(path: &Path) -> Result<DiagnosisEngine, LoadError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let state: SerializableState = bincode::deserialize_from(reader)?;

    Ok(DiagnosisEngine::from_parts(
        state.catalog,
        state.frequency,
        state.classifier,
        state.profile,
    ))
}
