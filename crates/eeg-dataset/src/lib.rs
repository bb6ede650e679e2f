//! EEG Dataset Access
//!
//! Provides keyed access to raw per-channel EEG recordings.

mod store;

pub use store::{AsciiDataset, MemoryStore, RecordKey, SignalStore};

use thiserror::Error;

/// Errors during dataset access
#[derive(Debug, Error)]
pub enum DatasetError {
    /// No backing file for the requested key
    #[error("No recording for patient {patient} recording {recording} channel O{channel}")]
    NotFound {
        patient: u32,
        recording: u32,
        channel: u32,
    },

    /// File read error
    #[error("Failed to read {path}: {message}")]
    Io { path: String, message: String },

    /// A line that is not a valid integer sample
    #[error("Invalid sample at {path}:{line}")]
    Parse { path: String, line: usize },
}
