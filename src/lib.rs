// src/lib.rs

pub mod core;
pub mod dataset;
pub mod error;
pub mod persistence;

pub use crate::core::engine::DiagnosisEngine;
pub use crate::core::types::{DiagnosisMethod, DiagnosisResult, ScoringProfile};
pub use crate::error::LoadError;
