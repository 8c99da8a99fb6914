// tests/engine_scenarios.rs
//
// End-to-end checks of the diagnosis pipeline: normalization, scoring,
// merging, suggestions, and model persistence.

use diagnostics_core::dataset::{demo_rows, DiseaseRow};
use diagnostics_core::{DiagnosisEngine, DiagnosisMethod, ScoringProfile};

fn row(name: &str, symptoms: &str, treatments: Option<&str>) -> DiseaseRow {
    DiseaseRow {
        name: name.to_string(),
        symptoms: symptoms.to_string(),
        treatments: treatments.map(|t| t.to_string()),
    }
}

fn two_disease_engine() -> DiagnosisEngine {
    let rows = vec![
        row(
            "Common Cold",
            "cough, runny nose, sneezing, sore throat, fatigue, mild fever",
            Some("Rest, hydration, over-the-counter cold medication"),
        ),
        row(
            "Influenza",
            "fever, body aches, fatigue, cough, headache, chills, sore throat",
            Some("Rest, fluids, antiviral medication if early"),
        ),
    ];
    DiagnosisEngine::initialize(&rows, ScoringProfile::Simple).unwrap()
}

#[test]
fn cold_symptoms_rank_common_cold_first() {
    let engine = two_disease_engine();
    let results = engine.diagnose("cough, runny nose, sneezing", 5);

    assert!(!results.is_empty());
    assert_eq!(results[0].disease_name, "Common Cold");
    assert_eq!(results[0].match_count, 3);
    assert_eq!(results[0].method, DiagnosisMethod::Similarity);
    assert!(results[0]
        .matching_symptoms
        .iter()
        .all(|s| ["cough", "runny nose", "sneezing"].contains(&s.as_str())));
}

#[test]
fn empty_query_returns_empty_results() {
    let engine = two_disease_engine();
    assert!(engine.diagnose("", 5).is_empty());
    assert!(engine.diagnose("   ", 5).is_empty());
    assert!(engine.diagnose(",,,", 5).is_empty());
}

#[test]
fn unknown_symptoms_return_empty_results() {
    let engine = two_disease_engine();
    assert!(engine.diagnose("xyz, qwerty", 5).is_empty());
}

#[test]
fn no_result_scores_at_or_below_threshold() {
    let engine = DiagnosisEngine::initialize(&demo_rows(), ScoringProfile::Weighted).unwrap();
    for query in ["cough", "fever, headache", "nausea, vomiting, diarrhea"] {
        for result in engine.diagnose(query, 10) {
            assert!(result.score > 0.1, "{query}: {result:?}");
        }
    }
}

#[test]
fn results_are_non_increasing_in_score() {
    let engine = DiagnosisEngine::initialize(&demo_rows(), ScoringProfile::Simple).unwrap();
    let results = engine.diagnose("fever, cough, fatigue, headache", 10);
    assert!(results.len() > 1);
    assert!(results.windows(2).all(|w| w[0].score >= w[1].score));
}

#[test]
fn diagnose_respects_top_n() {
    let engine = DiagnosisEngine::initialize(&demo_rows(), ScoringProfile::Simple).unwrap();
    assert!(engine.diagnose("fever, cough, fatigue", 2).len() <= 2);
}

#[test]
fn suggestions_ranked_by_corpus_frequency() {
    let engine = DiagnosisEngine::initialize(&demo_rows(), ScoringProfile::Simple).unwrap();
    // fatigue and fever both occur three times in the demo catalog; fatigue
    // is seen first (Common Cold precedes Influenza).
    let suggestions = engine.suggest("fe", 10);
    assert_eq!(suggestions, vec!["fatigue".to_string(), "fever".to_string()]);
}

#[test]
fn short_prefix_yields_no_suggestions() {
    let engine = DiagnosisEngine::initialize(&demo_rows(), ScoringProfile::Simple).unwrap();
    assert!(engine.suggest("f", 10).is_empty());
}

#[test]
fn lookup_finds_records_case_insensitively() {
    let engine = DiagnosisEngine::initialize(&demo_rows(), ScoringProfile::Simple).unwrap();
    let record = engine.lookup("common cold").expect("demo disease");
    assert_eq!(record.name, "Common Cold");
    assert!(record.symptoms.contains("sneezing"));
    assert!(engine.lookup("Dragon Pox").is_none());
}

#[test]
fn empty_dataset_fails_initialization() {
    assert!(DiagnosisEngine::initialize(&[], ScoringProfile::Simple).is_err());
}

#[test]
fn stop_words_are_kept_in_live_queries() {
    // A record whose only symptom is the stop word "the" never exists
    // (training cleanup removes it), so a query of "the" alone matches
    // nothing; but the token must survive query cleaning and count toward
    // the union, diluting jaccard rather than vanishing.
    let rows = vec![
        row("A", "cough, fever", None),
        row("B", "cough, fever, the", None),
    ];
    let engine = DiagnosisEngine::initialize(&rows, ScoringProfile::Simple).unwrap();
    // Both records normalize to the same symptom set at load time.
    assert_eq!(
        engine.lookup("A").unwrap().symptoms,
        engine.lookup("B").unwrap().symptoms
    );

    let with_stop = engine.diagnose("cough, fever, the", 5);
    let without_stop = engine.diagnose("cough, fever", 5);
    assert!(!with_stop.is_empty() && !without_stop.is_empty());
    // "the" stays in the query set, so the union grows and the score drops.
    assert!(with_stop[0].score < without_stop[0].score);
}

#[test]
fn classifier_trains_only_with_enough_repeated_labels() {
    let specs = [
        ("Common Cold", "cough, runny nose, sneezing"),
        ("Influenza", "fever, body aches, chills"),
        ("Migraine", "headache, nausea, light sensitivity"),
        ("Food Poisoning", "vomiting, diarrhea, stomach cramps"),
        ("Allergic Rhinitis", "itchy eyes, nasal congestion, postnasal drip"),
    ];

    let mut rows: Vec<DiseaseRow> = Vec::new();
    for (name, symptoms) in &specs[..4] {
        rows.push(row(name, symptoms, None));
        rows.push(row(name, symptoms, Some("rest")));
    }
    let engine = DiagnosisEngine::initialize(&rows, ScoringProfile::Simple).unwrap();
    assert!(!engine.classifier_trained());

    let mut rows: Vec<DiseaseRow> = Vec::new();
    for (name, symptoms) in &specs {
        rows.push(row(name, symptoms, None));
        rows.push(row(name, symptoms, Some("rest")));
    }
    let engine = DiagnosisEngine::initialize(&rows, ScoringProfile::Simple).unwrap();
    assert!(engine.classifier_trained());

    // Classification results surface through diagnose with the right tag.
    let results = engine.diagnose("fever, body aches, chills", 5);
    assert_eq!(results[0].disease_name, "Influenza");
    let flu = &results[0];
    assert!(flu.score > 0.1);
    assert_eq!(flu.match_count, 3);
}

#[test]
fn model_round_trip_preserves_diagnosis_output() {
    let dir = tempfile::tempdir().unwrap();
    let model_path = dir.path().join("model.bin");

    let engine = DiagnosisEngine::initialize(&demo_rows(), ScoringProfile::Weighted).unwrap();
    engine.save_model(&model_path).unwrap();

    let restored = DiagnosisEngine::load_model(&model_path).unwrap();
    assert_eq!(restored.profile(), ScoringProfile::Weighted);
    assert_eq!(restored.catalog().len(), engine.catalog().len());

    for query in ["fever, cough", "headache, nausea", "sneezing, itchy eyes"] {
        assert_eq!(engine.diagnose(query, 5), restored.diagnose(query, 5));
    }
}

#[test]
fn from_model_or_new_falls_back_to_rows() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nothing_here.bin");
    let engine =
        DiagnosisEngine::from_model_or_new(&missing, &demo_rows(), ScoringProfile::Simple)
            .unwrap();
    assert_eq!(engine.catalog().len(), 6);
}
