//! Clinical Component Augmentation

use crate::matrix::FeatureMatrix;
use crate::PipelineError;
use clinical_pca::{ClinicalRecord, Pca};
use tracing::info;

/// Model-ready table: rhythm fractions joined with clinical principal
/// components, plus the label vector
#[derive(Debug, Clone)]
pub struct DesignMatrix {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<f64>>,
    pub labels: Vec<u8>,
}

/// Join the rhythm matrix with the top principal components of the
/// clinical covariates.
///
/// Clinical records must align positionally with the matrix rows, one per
/// (patient, recording). A length mismatch is an error, never a silent
/// truncation.
pub fn augment_with_clinical(
    matrix: &FeatureMatrix,
    records: &[ClinicalRecord],
    n_components: usize,
) -> Result<DesignMatrix, PipelineError> {
    if records.len() != matrix.len() {
        return Err(PipelineError::ClinicalRowMismatch {
            rows: matrix.len(),
            records: records.len(),
        });
    }

    let data: Vec<Vec<f64>> = records.iter().map(|r| r.to_vector()).collect();
    let pca = Pca::fit(&data, n_components)?;

    let mut columns = matrix.rhythm_columns();
    for i in 1..=n_components {
        columns.push(format!("pc{i}"));
    }

    let mut rows = Vec::with_capacity(matrix.len());
    let mut labels = Vec::with_capacity(matrix.len());
    for (row, values) in matrix.rows().iter().zip(&data) {
        let mut features = row.rhythms.clone();
        features.extend(pca.transform(values)?);
        rows.push(features);
        labels.push(row.apnoe);
    }

    info!(
        "Assembled design matrix: {} rows x {} columns",
        rows.len(),
        columns.len()
    );
    Ok(DesignMatrix {
        columns,
        rows,
        labels,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::FeatureMatrixBuilder;
    use crate::config::PipelineConfig;
    use eeg_dataset::{MemoryStore, RecordKey};
    use std::f64::consts::PI;

    fn record(seed: f64) -> ClinicalRecord {
        ClinicalRecord {
            age: 40.0 + seed,
            sex: seed % 2.0,
            height: 170.0 + seed,
            weight: 80.0 + 2.0 * seed,
            pulse: 60.0 + seed,
            bp_sys: 120.0 + seed,
            bp_dia: 80.0 + seed / 2.0,
            odi: seed,
        }
    }

    fn small_matrix() -> FeatureMatrix {
        let config = PipelineConfig {
            patients: 3,
            ..Default::default()
        };
        let mut store = MemoryStore::new();
        for patient in 1..=config.patients {
            for recording in 1..=config.recordings {
                for channel in 1..=config.channels {
                    let samples: Vec<i32> = (0..256)
                        .map(|i| {
                            (1000.0
                                * (2.0 * PI * (5.0 + patient as f64) * i as f64 / 200.0).sin())
                                as i32
                        })
                        .collect();
                    store.insert(RecordKey::new(patient, recording, channel), samples);
                }
            }
        }
        FeatureMatrixBuilder::new(config).build(&store).unwrap()
    }

    #[test]
    fn test_design_matrix_shape() {
        let matrix = small_matrix();
        let records: Vec<ClinicalRecord> =
            (0..matrix.len()).map(|i| record(i as f64)).collect();

        let design = augment_with_clinical(&matrix, &records, 3).unwrap();
        assert_eq!(design.rows.len(), 6);
        assert_eq!(design.columns.len(), 13);
        assert_eq!(design.columns[10], "pc1");
        assert_eq!(design.columns[12], "pc3");
        for row in &design.rows {
            assert_eq!(row.len(), 13);
        }
    }

    #[test]
    fn test_labels_carry_over() {
        let matrix = small_matrix();
        let records: Vec<ClinicalRecord> =
            (0..matrix.len()).map(|i| record(i as f64)).collect();

        let design = augment_with_clinical(&matrix, &records, 2).unwrap();
        let expected: Vec<u8> = matrix.rows().iter().map(|r| r.apnoe).collect();
        assert_eq!(design.labels, expected);
    }

    #[test]
    fn test_row_mismatch_is_an_error() {
        let matrix = small_matrix();
        let records = vec![record(1.0), record(2.0)];

        let err = augment_with_clinical(&matrix, &records, 3).unwrap_err();
        match err {
            PipelineError::ClinicalRowMismatch { rows, records } => {
                assert_eq!(rows, 6);
                assert_eq!(records, 2);
            }
            other => panic!("Expected ClinicalRowMismatch, got {other:?}"),
        }
    }
}
