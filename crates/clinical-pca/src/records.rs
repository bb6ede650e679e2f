//! Clinical Covariate Records

use crate::ClinicalError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Routine clinical measurements accompanying one overnight recording
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClinicalRecord {
    pub age: f64,
    pub sex: f64,
    pub height: f64,
    pub weight: f64,
    pub pulse: f64,
    #[serde(rename = "BPsys")]
    pub bp_sys: f64,
    #[serde(rename = "BPdia")]
    pub bp_dia: f64,
    #[serde(rename = "ODI")]
    pub odi: f64,
}

impl ClinicalRecord {
    /// Covariate names in vector order
    pub const FIELDS: [&'static str; 8] = [
        "age", "sex", "height", "weight", "pulse", "BPsys", "BPdia", "ODI",
    ];

    /// Covariates as a vector in `FIELDS` order
    pub fn to_vector(&self) -> Vec<f64> {
        vec![
            self.age,
            self.sex,
            self.height,
            self.weight,
            self.pulse,
            self.bp_sys,
            self.bp_dia,
            self.odi,
        ]
    }
}

/// Read a JSON array of clinical records
pub fn load_records(path: impl AsRef<Path>) -> Result<Vec<ClinicalRecord>, ClinicalError> {
    let path = path.as_ref();
    let data = fs::read_to_string(path).map_err(|err| ClinicalError::Io {
        path: path.display().to_string(),
        message: err.to_string(),
    })?;
    serde_json::from_str(&data).map_err(|err| ClinicalError::Parse {
        path: path.display().to_string(),
        message: err.to_string(),
    })
}
