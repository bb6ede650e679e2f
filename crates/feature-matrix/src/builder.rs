//! Feature Matrix Builder

use crate::config::PipelineConfig;
use crate::matrix::{FeatureMatrix, FeatureRow};
use crate::PipelineError;
use eeg_dataset::{RecordKey, SignalStore};
use rhythm_engine::{apply, SpectralAnalyzer};
use tracing::{debug, info};

/// Assembles one feature row per (patient, recording) pair
pub struct FeatureMatrixBuilder {
    config: PipelineConfig,
    analyzer: SpectralAnalyzer,
}

impl FeatureMatrixBuilder {
    /// Create a builder for the given configuration
    pub fn new(config: PipelineConfig) -> Self {
        let analyzer = SpectralAnalyzer::new(config.sample_rate_hz);
        Self { config, analyzer }
    }

    /// Build the full matrix from a signal store.
    ///
    /// Rows come out in ascending (patient, recording) order with the
    /// channel rhythm vectors concatenated O1 first. A missing recording
    /// aborts the build: skipping rows would desynchronize the matrix
    /// from the label partition and any row-aligned clinical table.
    pub fn build(&mut self, store: &impl SignalStore) -> Result<FeatureMatrix, PipelineError> {
        self.config.validate()?;
        let coef = self.config.design_filter()?;
        let bands = self.config.bands();

        info!(
            "Building rhythm matrix: {} patients x {} recordings x {} channels",
            self.config.patients, self.config.recordings, self.config.channels
        );

        let row_count = (self.config.patients * self.config.recordings) as usize;
        let mut rows = Vec::with_capacity(row_count);
        for patient in 1..=self.config.patients {
            for recording in 1..=self.config.recordings {
                let mut rhythms =
                    Vec::with_capacity(self.config.channels as usize * bands.len());
                for channel in 1..=self.config.channels {
                    let key = RecordKey::new(patient, recording, channel);
                    let raw = store.load(key)?;
                    let filtered = apply(&raw, &coef)?;
                    let fractions = self.analyzer.analyze(&filtered, &bands)?;
                    rhythms.extend(fractions);
                }
                debug!("Assembled row for patient {patient} recording {recording}");
                rows.push(FeatureRow {
                    patient,
                    recording,
                    rhythms,
                    apnoe: self.config.label(patient),
                });
            }
        }

        info!("Assembled {} feature rows", rows.len());
        Ok(FeatureMatrix::new(rows, &bands, self.config.channels))
    }
}
