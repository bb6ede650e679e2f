//! Feature Matrix and Tabular Export

use rhythm_engine::RhythmBands;
use serde::{Deserialize, Serialize};
use std::io::{self, Write};

/// One (patient, recording) row of the matrix
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRow {
    pub patient: u32,
    pub recording: u32,
    /// Rhythm fractions, channel-major: all O1 bands, then all O2 bands
    pub rhythms: Vec<f64>,
    /// 0 healthy, 1 apnoea
    pub apnoe: u8,
}

/// The terminal artifact of the pipeline: one row per (patient, recording),
/// in ascending (patient, recording) order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureMatrix {
    rows: Vec<FeatureRow>,
    band_names: Vec<String>,
    channels: u32,
}

impl FeatureMatrix {
    pub(crate) fn new(rows: Vec<FeatureRow>, bands: &RhythmBands, channels: u32) -> Self {
        Self {
            rows,
            band_names: bands.names().iter().map(|s| s.to_string()).collect(),
            channels,
        }
    }

    /// Rows in emission order
    pub fn rows(&self) -> &[FeatureRow] {
        &self.rows
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the matrix holds no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of rhythm columns per row
    pub fn width(&self) -> usize {
        self.band_names.len() * self.channels as usize
    }

    /// Rhythm column names, channel-major: `delta_O1` .. `gamma_O1`,
    /// `delta_O2` .. `gamma_O2`
    pub fn rhythm_columns(&self) -> Vec<String> {
        let mut names = Vec::with_capacity(self.width());
        for channel in 1..=self.channels {
            for band in &self.band_names {
                names.push(format!("{band}_O{channel}"));
            }
        }
        names
    }

    /// Column names in file order: `pat`, `rec`, the rhythm columns,
    /// `apnoe`. Downstream consumers join on this exact layout.
    pub fn column_names(&self) -> Vec<String> {
        let mut names = vec!["pat".to_string(), "rec".to_string()];
        names.extend(self.rhythm_columns());
        names.push("apnoe".to_string());
        names
    }

    /// Write the matrix as CSV with the contract header
    pub fn write_csv(&self, mut out: impl Write) -> io::Result<()> {
        writeln!(out, "{}", self.column_names().join(","))?;
        for row in &self.rows {
            write!(out, "{},{}", row.patient, row.recording)?;
            for value in &row.rhythms {
                write!(out, ",{value}")?;
            }
            writeln!(out, ",{}", row.apnoe)?;
        }
        Ok(())
    }
}
