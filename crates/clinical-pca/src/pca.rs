//! Principal Component Analysis

use crate::ClinicalError;
use std::f64::consts::PI;

/// Principal component projection fitted over clinical covariates.
///
/// Rows are mean-centered and projected onto the top variance directions
/// of the covariance matrix. Projections are not whitened.
#[derive(Debug, Clone)]
pub struct Pca {
    /// Column means of the fitted data
    mean: Vec<f64>,
    /// Retained components, one row per component
    components: Vec<Vec<f64>>,
}

impl Pca {
    /// Fit a projection onto the top `n_components` variance directions
    pub fn fit(data: &[Vec<f64>], n_components: usize) -> Result<Self, ClinicalError> {
        let dim = match data.first() {
            Some(row) if !row.is_empty() => row.len(),
            _ => return Err(ClinicalError::EmptyInput),
        };
        if n_components == 0 || n_components > dim {
            return Err(ClinicalError::TooManyComponents {
                requested: n_components,
                available: dim,
            });
        }
        for row in data {
            if row.len() != dim {
                return Err(ClinicalError::DimensionMismatch {
                    expected: dim,
                    actual: row.len(),
                });
            }
        }

        let n = data.len() as f64;
        let mut mean = vec![0.0; dim];
        for row in data {
            for (m, &v) in mean.iter_mut().zip(row) {
                *m += v;
            }
        }
        for m in mean.iter_mut() {
            *m /= n;
        }

        // Sample covariance of the centered rows
        let mut cov = vec![vec![0.0; dim]; dim];
        for row in data {
            for i in 0..dim {
                let di = row[i] - mean[i];
                for j in i..dim {
                    cov[i][j] += di * (row[j] - mean[j]);
                }
            }
        }
        let denom = if data.len() > 1 {
            (data.len() - 1) as f64
        } else {
            1.0
        };
        for i in 0..dim {
            for j in i..dim {
                cov[i][j] /= denom;
                cov[j][i] = cov[i][j];
            }
        }

        let (eigenvalues, eigenvectors) = symmetric_eigen(&cov);

        // Components in descending order of explained variance
        let mut order: Vec<usize> = (0..dim).collect();
        order.sort_by(|&a, &b| {
            eigenvalues[b]
                .partial_cmp(&eigenvalues[a])
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let components = order
            .iter()
            .take(n_components)
            .map(|&e| (0..dim).map(|row| eigenvectors[row][e]).collect())
            .collect();

        Ok(Self { mean, components })
    }

    /// Number of retained components
    pub fn n_components(&self) -> usize {
        self.components.len()
    }

    /// Project one row onto the retained components
    pub fn transform(&self, row: &[f64]) -> Result<Vec<f64>, ClinicalError> {
        if row.len() != self.mean.len() {
            return Err(ClinicalError::DimensionMismatch {
                expected: self.mean.len(),
                actual: row.len(),
            });
        }
        Ok(self
            .components
            .iter()
            .map(|component| {
                component
                    .iter()
                    .zip(row)
                    .zip(&self.mean)
                    .map(|((&c, &v), &m)| c * (v - m))
                    .sum()
            })
            .collect())
    }

    /// Project a batch of rows
    pub fn transform_all(&self, data: &[Vec<f64>]) -> Result<Vec<Vec<f64>>, ClinicalError> {
        data.iter().map(|row| self.transform(row)).collect()
    }
}

/// Symmetric eigendecomposition by Jacobi rotation.
///
/// Returns eigenvalues and the eigenvector matrix with eigenvectors stored
/// as columns: `eigenvectors[row][col]` is component `row` of eigenvector
/// `col`. Deterministic: pivots on the largest off-diagonal element.
fn symmetric_eigen(mat: &[Vec<f64>]) -> (Vec<f64>, Vec<Vec<f64>>) {
    let dim = mat.len();
    let mut a: Vec<Vec<f64>> = mat.to_vec();
    let mut vectors = vec![vec![0.0; dim]; dim];
    for (i, row) in vectors.iter_mut().enumerate() {
        row[i] = 1.0;
    }
    if dim < 2 {
        return ((0..dim).map(|i| a[i][i]).collect(), vectors);
    }

    for _sweep in 0..100 {
        // Largest off-diagonal element is the next pivot
        let mut max_val = 0.0;
        let mut p = 0;
        let mut q = 1;
        for i in 0..dim {
            for j in (i + 1)..dim {
                if a[i][j].abs() > max_val {
                    max_val = a[i][j].abs();
                    p = i;
                    q = j;
                }
            }
        }
        if max_val < 1e-12 {
            break;
        }

        let theta = if (a[p][p] - a[q][q]).abs() < 1e-30 {
            PI / 4.0
        } else {
            0.5 * ((2.0 * a[p][q]) / (a[p][p] - a[q][q])).atan()
        };
        let c = theta.cos();
        let s = theta.sin();

        // Givens rotation of rows/columns p and q
        let mut rotated = a.clone();
        for i in 0..dim {
            if i != p && i != q {
                rotated[i][p] = c * a[i][p] + s * a[i][q];
                rotated[p][i] = rotated[i][p];
                rotated[i][q] = -s * a[i][p] + c * a[i][q];
                rotated[q][i] = rotated[i][q];
            }
        }
        rotated[p][p] = c * c * a[p][p] + 2.0 * s * c * a[p][q] + s * s * a[q][q];
        rotated[q][q] = s * s * a[p][p] - 2.0 * s * c * a[p][q] + c * c * a[q][q];
        rotated[p][q] = 0.0;
        rotated[q][p] = 0.0;
        a = rotated;

        for row in vectors.iter_mut() {
            let vp = row[p];
            let vq = row[q];
            row[p] = c * vp + s * vq;
            row[q] = -s * vp + c * vq;
        }
    }

    ((0..dim).map(|i| a[i][i]).collect(), vectors)
}
