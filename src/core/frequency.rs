// src/core/frequency.rs
use crate::core::catalog::DiseaseCatalog;
use crate::core::types::SymptomToken;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Corpus occurrence counts for every known symptom token.
///
/// Built once from the catalog and read-only afterwards. Insertion order is
/// remembered so frequency ties resolve deterministically (first-seen wins).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FrequencyIndex {
    /// (token, count) in first-seen order.
    entries: Vec<(SymptomToken, u64)>,
    /// token -> position in `entries`.
    positions: HashMap<SymptomToken, usize>,
}

impl FrequencyIndex {
    /// Counts every record's symptoms in catalog order.
    pub fn from_catalog(catalog: &DiseaseCatalog) -> Self {
        let mut index = Self::default();
        for record in catalog.iter() {
            for symptom in &record.symptoms {
                index.bump(symptom);
            }
        }
        index
    }

    /// Builds an index from an externally supplied frequency table.
    pub fn from_counts<I>(counts: I) -> Self
    where
        I: IntoIterator<Item = (SymptomToken, u64)>,
    {
        let mut index = Self::default();
        for (token, count) in counts {
            match index.positions.get(&token) {
                Some(&pos) => index.entries[pos].1 += count,
                None => {
                    index.positions.insert(token.clone(), index.entries.len());
                    index.entries.push((token, count));
                }
            }
        }
        index
    }

    fn bump(&mut self, token: &str) {
        match self.positions.get(token) {
            Some(&pos) => self.entries[pos].1 += 1,
            None => {
                self.positions.insert(token.to_string(), self.entries.len());
                self.entries.push((token.to_string(), 1));
            }
        }
    }

    /// Occurrence count for a token. Unseen tokens count as 1 so the
    /// inverse-log weighting never divides by `ln(1) = 0`.
    pub fn frequency(&self, token: &str) -> u64 {
        self.positions
            .get(token)
            .map(|&pos| self.entries[pos].1.max(1))
            .unwrap_or(1)
    }

    /// All tokens starting with `prefix` (case-insensitive), most frequent
    /// first, ties in first-seen order, truncated to `max_n`. Prefixes
    /// shorter than two characters return nothing.
    pub fn suggest(&self, prefix: &str, max_n: usize) -> Vec<SymptomToken> {
        let prefix = prefix.trim().to_lowercase();
        if prefix.chars().count() < 2 {
            return Vec::new();
        }

        let mut matches: Vec<&(SymptomToken, u64)> = self
            .entries
            .iter()
            .filter(|(token, _)| token.starts_with(prefix.as_str()))
            .collect();
        // Stable sort keeps insertion order within equal counts.
        matches.sort_by(|a, b| b.1.cmp(&a.1));
        matches
            .into_iter()
            .take(max_n)
            .map(|(token, _)| token.clone())
            .collect()
    }

    /// Tokens appearing in more than one catalog record.
    pub fn common_symptoms(&self) -> Vec<SymptomToken> {
        self.entries
            .iter()
            .filter(|(_, count)| *count > 1)
            .map(|(token, _)| token.clone())
            .collect()
    }

    /// The `n` most frequent tokens with their counts.
    pub fn top_symptoms(&self, n: usize) -> Vec<(SymptomToken, u64)> {
        let mut all = self.entries.clone();
        all.sort_by(|a, b| b.1.cmp(&a.1));
        all.truncate(n);
        all
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index() -> FrequencyIndex {
        FrequencyIndex::from_counts([
            ("headache".to_string(), 180),
            ("fever".to_string(), 160),
            ("fatigue".to_string(), 250),
            ("feeling faint".to_string(), 160),
        ])
    }

    #[test]
    fn unseen_token_counts_as_one() {
        assert_eq!(index().frequency("no such symptom"), 1);
        assert_eq!(index().frequency("fever"), 160);
    }

    #[test]
    fn suggestions_sorted_by_descending_frequency() {
        // fatigue (250) outranks fever (160) even though fever is older.
        assert_eq!(
            index().suggest("fe", 10),
            vec!["fatigue".to_string(), "fever".to_string(), "feeling faint".to_string()]
        );
    }

    #[test]
    fn suggestion_ties_keep_first_seen_order() {
        // fever and "feeling faint" are both 160; fever was inserted first.
        let got = index().suggest("fe", 10);
        let fever_pos = got.iter().position(|s| s == "fever").unwrap();
        let faint_pos = got.iter().position(|s| s == "feeling faint").unwrap();
        assert!(fever_pos < faint_pos);
    }

    #[test]
    fn short_prefix_returns_nothing() {
        assert!(index().suggest("f", 10).is_empty());
        assert!(index().suggest("", 10).is_empty());
        assert!(index().suggest(" f ", 10).is_empty());
    }

    #[test]
    fn suggestions_truncate_and_ignore_case() {
        assert_eq!(index().suggest("FE", 1), vec!["fatigue".to_string()]);
    }

    #[test]
    fn common_symptoms_need_multiple_occurrences() {
        let index = FrequencyIndex::from_counts([
            ("cough".to_string(), 2),
            ("rash".to_string(), 1),
        ]);
        assert_eq!(index.common_symptoms(), vec!["cough".to_string()]);
    }

    #[test]
    fn top_symptoms_ranked() {
        let top = index().top_symptoms(2);
        assert_eq!(top[0].0, "fatigue");
        assert_eq!(top[1].0, "headache");
    }
}
