// src/core/normalize.rs
use crate::core::types::SymptomToken;
use std::collections::BTreeSet;

/// Stop words removed from dataset symptom fields at load time.
/// The live-query path deliberately does not apply this list; that
/// asymmetry is pinned by tests below.
const STOP_WORDS: [&str; 11] = [
    "and", "or", "the", "of", "in", "to", "with", "without", "due", "such", "as",
];

/// Cleans a dataset symptom field into a canonical token set.
/// Splits on commas, lowercases, strips punctuation, drops short pieces
/// and stop words.
pub fn clean_training_symptoms(raw: &str) -> BTreeSet<SymptomToken> {
    clean(raw, true)
}

/// Cleans live query text. Same pipeline as the training path except that
/// stop words are retained.
pub fn clean_query_symptoms(raw: &str) -> BTreeSet<SymptomToken> {
    clean(raw, false)
}

fn clean(raw: &str, strip_stop_words: bool) -> BTreeSet<SymptomToken> {
    raw.split(',')
        .map(clean_piece)
        .filter(|s| s.chars().count() > 2)
        .filter(|s| !strip_stop_words || !STOP_WORDS.contains(&s.as_str()))
        .collect()
}

/// Lowercase, keep only word characters and internal spaces, trim.
/// Multi-word symptoms ("runny nose") stay a single token.
fn clean_piece(piece: &str) -> String {
    piece
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || *c == '_')
        .collect::<String>()
        .trim()
        .to_string()
}
