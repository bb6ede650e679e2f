//! Signal Store Implementations

use crate::DatasetError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::PathBuf;
use tracing::debug;

/// Identifies one raw trace by patient, recording and occipital channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordKey {
    pub patient: u32,
    pub recording: u32,
    pub channel: u32,
}

impl RecordKey {
    /// Create a new record key
    pub fn new(patient: u32, recording: u32, channel: u32) -> Self {
        Self {
            patient,
            recording,
            channel,
        }
    }

    /// Electrode label for the channel (O1, O2)
    pub fn channel_label(&self) -> String {
        format!("O{}", self.channel)
    }

    /// File stem used by the ascii dataset layout
    pub fn file_stem(&self) -> String {
        format!("{}-{}-O{}", self.patient, self.recording, self.channel)
    }
}

/// Read access to raw signals keyed by patient/recording/channel
pub trait SignalStore {
    /// Load the raw integer samples for a key
    fn load(&self, key: RecordKey) -> Result<Vec<i32>, DatasetError>;
}

/// File-backed store reading one integer sample per line.
///
/// Expects the flat layout `<root>/<pat>-<rec>-O<ch>.ascii`. Reads are
/// synchronous and a missing file is a hard failure, not a transient one.
pub struct AsciiDataset {
    root: PathBuf,
}

impl AsciiDataset {
    /// Create a store rooted at the given directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, key: RecordKey) -> PathBuf {
        self.root.join(format!("{}.ascii", key.file_stem()))
    }
}

impl SignalStore for AsciiDataset {
    fn load(&self, key: RecordKey) -> Result<Vec<i32>, DatasetError> {
        let path = self.path_for(key);
        let file = File::open(&path).map_err(|err| {
            if err.kind() == ErrorKind::NotFound {
                DatasetError::NotFound {
                    patient: key.patient,
                    recording: key.recording,
                    channel: key.channel,
                }
            } else {
                DatasetError::Io {
                    path: path.display().to_string(),
                    message: err.to_string(),
                }
            }
        })?;

        let reader = BufReader::new(file);
        let mut samples = Vec::new();
        for (idx, line) in reader.lines().enumerate() {
            let line = line.map_err(|err| DatasetError::Io {
                path: path.display().to_string(),
                message: err.to_string(),
            })?;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            let value = trimmed.parse::<i32>().map_err(|_| DatasetError::Parse {
                path: path.display().to_string(),
                line: idx + 1,
            })?;
            samples.push(value);
        }

        debug!("Loaded {} samples for {}", samples.len(), key.file_stem());
        Ok(samples)
    }
}

/// In-memory store for tests and pre-loaded corpora
#[derive(Debug, Default)]
pub struct MemoryStore {
    signals: HashMap<RecordKey, Vec<i32>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the samples for a key, replacing any previous entry
    pub fn insert(&mut self, key: RecordKey, samples: Vec<i32>) {
        self.signals.insert(key, samples);
    }

    /// Number of stored signals
    pub fn len(&self) -> usize {
        self.signals.len()
    }

    /// Whether the store holds no signals
    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }
}

impl SignalStore for MemoryStore {
    fn load(&self, key: RecordKey) -> Result<Vec<i32>, DatasetError> {
        self.signals
            .get(&key)
            .cloned()
            .ok_or(DatasetError::NotFound {
                patient: key.patient,
                recording: key.recording,
                channel: key.channel,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_channel_label() {
        let key = RecordKey::new(7, 1, 2);
        assert_eq!(key.channel_label(), "O2");
        assert_eq!(key.file_stem(), "7-1-O2");
    }

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        let key = RecordKey::new(1, 2, 1);
        store.insert(key, vec![5, -3, 12]);

        let samples = store.load(key).unwrap();
        assert_eq!(samples, vec![5, -3, 12]);
    }

    #[test]
    fn test_memory_store_missing_key() {
        let store = MemoryStore::new();
        let err = store.load(RecordKey::new(9, 1, 1)).unwrap_err();
        match err {
            DatasetError::NotFound {
                patient,
                recording,
                channel,
            } => {
                assert_eq!(patient, 9);
                assert_eq!(recording, 1);
                assert_eq!(channel, 1);
            }
            other => panic!("Expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_ascii_dataset_missing_file() {
        let store = AsciiDataset::new("/nonexistent/dataset/root");
        let err = store.load(RecordKey::new(3, 2, 1)).unwrap_err();
        assert!(matches!(err, DatasetError::NotFound { patient: 3, .. }));
    }

    #[test]
    fn test_ascii_dataset_reads_samples() {
        let dir = std::env::temp_dir().join("eeg-dataset-test-read");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("1-1-O1.ascii"), "12\n-7\n\n42\n").unwrap();

        let store = AsciiDataset::new(&dir);
        let samples = store.load(RecordKey::new(1, 1, 1)).unwrap();
        assert_eq!(samples, vec![12, -7, 42]);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_ascii_dataset_rejects_garbage() {
        let dir = std::env::temp_dir().join("eeg-dataset-test-garbage");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("2-1-O1.ascii"), "10\nnot-a-number\n").unwrap();

        let store = AsciiDataset::new(&dir);
        let err = store.load(RecordKey::new(2, 1, 1)).unwrap_err();
        assert!(matches!(err, DatasetError::Parse { line: 2, .. }));

        fs::remove_dir_all(&dir).unwrap();
    }
}
