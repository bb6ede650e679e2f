//! Pipeline Configuration

use crate::PipelineError;
use rhythm_engine::{design_bandpass, RhythmBands, SignalError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Bandpass filter parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterSpec {
    /// Number of filter taps
    pub taps: usize,
    /// Lower passband edge (Hz)
    pub low_hz: f64,
    /// Upper passband edge (Hz)
    pub high_hz: f64,
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self {
            taps: 10,
            low_hz: 5.0,
            high_hz: 40.0,
        }
    }
}

/// Configuration for one feature-matrix build.
///
/// Every tunable the pipeline depends on lives here, so the same build
/// can run under different band definitions or patient partitions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Sample rate shared by every recording (Hz)
    pub sample_rate_hz: f64,
    /// Bandpass filter applied before spectral analysis
    pub filter: FilterSpec,
    /// Number of patients; identifiers run from 1
    pub patients: u32,
    /// Recordings per patient
    pub recordings: u32,
    /// EEG channels per recording (O1, O2)
    pub channels: u32,
    /// Patients without apnoea; everyone else is labeled ill
    pub healthy: BTreeSet<u32>,
    /// Keep the gamma band separate instead of folding it into beta
    pub include_gamma: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            sample_rate_hz: 200.0,
            filter: FilterSpec::default(),
            patients: 40,
            recordings: 2,
            channels: 2,
            healthy: (1..=15).chain(26..=30).collect(),
            include_gamma: true,
        }
    }
}

impl PipelineConfig {
    /// Band layout selected by `include_gamma`
    pub fn bands(&self) -> RhythmBands {
        if self.include_gamma {
            RhythmBands::standard()
        } else {
            RhythmBands::without_gamma()
        }
    }

    /// Filter coefficients for the configured design
    pub fn design_filter(&self) -> Result<Vec<f64>, SignalError> {
        design_bandpass(
            self.filter.taps,
            self.filter.low_hz,
            self.filter.high_hz,
            self.sample_rate_hz,
        )
    }

    /// Apnoea label for a patient: 0 healthy, 1 ill
    pub fn label(&self, patient: u32) -> u8 {
        if self.healthy.contains(&patient) {
            0
        } else {
            1
        }
    }

    /// Check counts, the filter design and band coverage up to Nyquist
    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.patients == 0 || self.recordings == 0 || self.channels == 0 {
            return Err(PipelineError::InvalidConfig(format!(
                "counts must be non-zero: {} patients, {} recordings, {} channels",
                self.patients, self.recordings, self.channels
            )));
        }
        self.design_filter()?;
        let nyquist = self.sample_rate_hz / 2.0;
        let bands = self.bands();
        if !bands.covers(nyquist) {
            return Err(PipelineError::InvalidConfig(format!(
                "bands end at {} Hz, below the {} Hz Nyquist frequency",
                bands.upper_bound(),
                nyquist
            )));
        }
        Ok(())
    }
}
