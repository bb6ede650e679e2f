//! Rhythm Feature Matrix Assembly
//!
//! Builds the per-recording rhythm feature matrix consumed by the
//! downstream apnoea models.

mod augment;
mod builder;
mod config;
mod matrix;

pub use augment::{augment_with_clinical, DesignMatrix};
pub use builder::FeatureMatrixBuilder;
pub use config::{FilterSpec, PipelineConfig};
pub use matrix::{FeatureMatrix, FeatureRow};

use clinical_pca::ClinicalError;
use eeg_dataset::DatasetError;
use rhythm_engine::SignalError;
use thiserror::Error;

/// Errors during matrix assembly
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A dataset key with no backing recording. The build aborts: skipping
    /// a row would desynchronize the matrix from any row-aligned table.
    #[error("Missing recording for patient {patient} recording {recording} channel O{channel}")]
    MissingRecording {
        patient: u32,
        recording: u32,
        channel: u32,
    },

    /// Clinical table not aligned 1:1 with the matrix rows
    #[error("{records} clinical records for {rows} matrix rows")]
    ClinicalRowMismatch { rows: usize, records: usize },

    /// Configuration that cannot produce a matrix
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Filtering or spectral analysis failure
    #[error("Signal processing error: {0}")]
    Signal(SignalError),

    /// Dataset failure other than a missing recording
    #[error("Dataset error: {0}")]
    Dataset(DatasetError),

    /// Clinical component extraction failure
    #[error("Clinical covariate error: {0}")]
    Clinical(ClinicalError),
}

impl From<SignalError> for PipelineError {
    fn from(err: SignalError) -> Self {
        PipelineError::Signal(err)
    }
}

impl From<DatasetError> for PipelineError {
    fn from(err: DatasetError) -> Self {
        match err {
            DatasetError::NotFound {
                patient,
                recording,
                channel,
            } => PipelineError::MissingRecording {
                patient,
                recording,
                channel,
            },
            other => PipelineError::Dataset(other),
        }
    }
}

impl From<ClinicalError> for PipelineError {
    fn from(err: ClinicalError) -> Self {
        PipelineError::Clinical(err)
    }
}
