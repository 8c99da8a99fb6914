use diagnostics_core::dataset;
use diagnostics_core::{DiagnosisEngine, DiagnosisMethod, DiagnosisResult, ScoringProfile};
use std::io::{stdin, stdout, Write};
use std::path::Path;

const MODEL_PATH: &str = "diagnosis_model.bin";

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let profile = if args.iter().any(|a| a == "--weighted") {
        ScoringProfile::Weighted
    } else {
        ScoringProfile::Simple
    };
    let csv_path = args.iter().find(|a| !a.starts_with("--"));

    let rows = match csv_path {
        Some(path) => match dataset::read_csv_file(Path::new(path)) {
            Ok(rows) => rows,
            Err(e) => {
                eprintln!("[ERROR] Could not load dataset '{}': {}", path, e);
                std::process::exit(1);
            }
        },
        None => dataset::demo_rows(),
    };

    let engine = match DiagnosisEngine::from_model_or_new(Path::new(MODEL_PATH), &rows, profile) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("[ERROR] Could not initialize engine: {}", e);
            std::process::exit(1);
        }
    };

    println!("Symptom Diagnostics. Type 'exit' to save the model and quit.");
    println!("---------------------------------------------------------------");
    println!(
        "{} diseases, {} known symptoms, classifier {}.",
        engine.catalog().len(),
        engine.frequency_index().len(),
        if engine.classifier_trained() { "trained" } else { "inactive" }
    );
    let top = engine.frequency_index().top_symptoms(10);
    if !top.is_empty() {
        let names: Vec<&str> = top.iter().map(|(token, _)| token.as_str()).collect();
        println!("Most reported symptoms: {}", names.join(", "));
    }
    println!("Enter symptoms separated by commas, e.g. 'headache, fever, fatigue'.");
    println!("Commands: ':s <prefix>' suggestions, ':i <disease>' record info,");
    println!("          ':j <symptoms>' JSON output, 'exit' to quit.\n");

    loop {
        print!("> ");
        if stdout().flush().is_err() {
            break;
        }
        let mut input = String::new();
        if stdin().read_line(&mut input).is_err() {
            break;
        }
        let cmd = input.trim();

        match cmd {
            "exit" => break,
            "" => continue,
            s if s.starts_with(":s ") => {
                let suggestions = engine.suggest(&s[3..], 10);
                if suggestions.is_empty() {
                    println!("No matching symptoms.");
                } else {
                    println!("Suggestions: {}", suggestions.join(", "));
                }
            }
            s if s.starts_with(":i ") => match engine.lookup(s[3..].trim()) {
                Some(record) => {
                    println!("{} [{}]", record.name, record.category);
                    println!(
                        "  Symptoms ({}): {}",
                        record.symptoms.len(),
                        record.symptoms.iter().cloned().collect::<Vec<_>>().join(", ")
                    );
                    println!("  Treatments: {}", record.treatments);
                }
                None => println!("Disease not found."),
            },
            s if s.starts_with(":j ") => {
                let results = engine.diagnose(&s[3..], 5);
                match serde_json::to_string_pretty(&results) {
                    Ok(json) => println!("{}", json),
                    Err(e) => eprintln!("[ERROR] Could not encode results: {}", e),
                }
            }
            s => print_results(&engine.diagnose(s, 5)),
        }
    }

    println!("\nSaving model...");
    if let Err(e) = engine.save_model(Path::new(MODEL_PATH)) {
        eprintln!("[ERROR] Could not save model: {}", e);
    } else {
        println!("Model saved to '{}'", MODEL_PATH);
    }
}

fn print_results(results: &[DiagnosisResult]) {
    if results.is_empty() {
        println!("No matching diseases found. Try different symptoms or check spelling.");
        return;
    }

    for (i, result) in results.iter().enumerate() {
        let confidence = (result.score * 100.0).min(100.0);
        let method = match result.method {
            DiagnosisMethod::Classification => "classifier",
            DiagnosisMethod::Similarity => "similarity",
        };
        println!(
            "\n{}. {} [{}] - confidence {:.1}% ({})",
            i + 1,
            result.disease_name,
            result.category,
            confidence,
            method
        );
        println!(
            "   Matched {} symptom(s): {}",
            result.match_count,
            result
                .matching_symptoms
                .iter()
                .cloned()
                .collect::<Vec<_>>()
                .join(", ")
        );
        println!("   Treatments: {}", result.treatments);
    }
    println!();
}
