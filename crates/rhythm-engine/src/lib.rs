//! Rhythm Extraction Engine
//!
//! Provides FIR bandpass filtering and spectral decomposition of EEG
//! signals into physiological rhythm bands.

mod bands;
mod fir;
mod spectrum;

pub use bands::{RhythmBand, RhythmBands};
pub use fir::{apply, design_bandpass};
pub use spectrum::SpectralAnalyzer;

use thiserror::Error;

/// Errors during filter design, filtering and spectral analysis
#[derive(Debug, Clone, Error)]
pub enum SignalError {
    /// Cutoffs outside the Nyquist range or non-monotonic
    #[error(
        "Invalid filter spec: {taps} taps, passband [{low_hz}, {high_hz}] Hz at {sample_rate_hz} Hz"
    )]
    InvalidFilterSpec {
        taps: usize,
        low_hz: f64,
        high_hz: f64,
        sample_rate_hz: f64,
    },

    /// Signal shorter than the filter support
    #[error("Signal of {signal_len} samples is shorter than the {taps}-tap filter")]
    InsufficientSignalLength { signal_len: usize, taps: usize },

    /// Zero-length input to spectral analysis
    #[error("Cannot analyze an empty signal")]
    EmptySignal,

    /// A spectral bin above the last defined band
    #[error("Frequency {freq_hz} Hz is above the last band bound {limit_hz} Hz")]
    FrequencyOutOfBands { freq_hz: f64, limit_hz: f64 },

    /// Band layout that is empty or not strictly ascending
    #[error("Invalid band layout: {0}")]
    InvalidBands(String),
}
