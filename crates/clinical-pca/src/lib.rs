//! Clinical Covariate Components
//!
//! Reduces routine clinical measurements to a few principal components
//! for use alongside EEG rhythm features.

mod pca;
mod records;

pub use pca::Pca;
pub use records::{load_records, ClinicalRecord};

use thiserror::Error;

/// Errors during component extraction
#[derive(Debug, Error)]
pub enum ClinicalError {
    /// No input rows to fit on
    #[error("No input rows")]
    EmptyInput,

    /// A row whose width differs from the fitted dimension
    #[error("Row has {actual} values, expected {expected}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// More components requested than covariates available
    #[error("{requested} components requested, only {available} available")]
    TooManyComponents { requested: usize, available: usize },

    /// File read error
    #[error("Failed to read {path}: {message}")]
    Io { path: String, message: String },

    /// Malformed records file
    #[error("Failed to parse {path}: {message}")]
    Parse { path: String, message: String },
}
