use crate::error::{ApiError, Result};
use nalgebra::{DMatrix, SymmetricEigen};
use ndarray::{Array1, Array2, ArrayView1, Axis};
use std::cmp::Ordering;

/// Principal component projection fitted once over the standardized catalog.
///
/// Components come from the eigendecomposition of the covariance matrix,
/// sorted by descending eigenvalue. Each component is oriented so that its
/// largest-magnitude loading is positive, which keeps refits of the same
/// data bit-for-bit identical.
#[derive(Debug, Clone, PartialEq)]
pub struct Pca {
    mean: Array1<f64>,
    /// Shape (n_components, n_features)
    components: Array2<f64>,
    explained_variance_ratio: Vec<f64>,
}

impl Pca {
    pub fn fit(x: &Array2<f64>, n_components: usize) -> Result<Self> {
        let (n_samples, n_features) = x.dim();

        if n_components == 0 || n_components > n_features {
            return Err(ApiError::Embedding(format!(
                "n_components must be between 1 and {}, got {}",
                n_features, n_components
            )));
        }

        let mean = x
            .mean_axis(Axis(0))
            .ok_or_else(|| ApiError::Embedding("cannot fit PCA on an empty matrix".into()))?;

        // Covariance: (X - mean)^T (X - mean) / (n - 1)
        let centered = x - &mean;
        let denominator = n_samples.saturating_sub(1).max(1) as f64;
        let cov = centered.t().dot(&centered) / denominator;

        let cov_matrix = DMatrix::from_fn(n_features, n_features, |i, j| cov[[i, j]]);
        let eigen = SymmetricEigen::new(cov_matrix);
        let eigenvalues = eigen.eigenvalues;
        let eigenvectors = eigen.eigenvectors;

        let mut order: Vec<usize> = (0..n_features).collect();
        order.sort_by(|&a, &b| {
            eigenvalues[b]
                .partial_cmp(&eigenvalues[a])
                .unwrap_or(Ordering::Equal)
        });

        let mut components = Array2::zeros((n_components, n_features));
        for (row, &idx) in order.iter().take(n_components).enumerate() {
            let column = eigenvectors.column(idx);
            let pivot = (0..n_features)
                .max_by(|&a, &b| {
                    column[a]
                        .abs()
                        .partial_cmp(&column[b].abs())
                        .unwrap_or(Ordering::Equal)
                })
                .unwrap_or(0);
            let sign = if column[pivot] < 0.0 { -1.0 } else { 1.0 };

            for j in 0..n_features {
                components[[row, j]] = sign * column[j];
            }
        }

        let total_variance: f64 = eigenvalues.iter().map(|v| v.max(0.0)).sum();
        let explained_variance_ratio = order
            .iter()
            .take(n_components)
            .map(|&idx| {
                if total_variance > 0.0 {
                    eigenvalues[idx].max(0.0) / total_variance
                } else {
                    0.0
                }
            })
            .collect();

        Ok(Self {
            mean,
            components,
            explained_variance_ratio,
        })
    }

    pub fn transform(&self, x: &Array2<f64>) -> Array2<f64> {
        (x - &self.mean).dot(&self.components.t())
    }

    pub fn transform_row(&self, row: ArrayView1<f64>) -> Array1<f64> {
        self.components.dot(&(&row - &self.mean))
    }

    pub fn n_components(&self) -> usize {
        self.components.nrows()
    }

    pub fn components(&self) -> &Array2<f64> {
        &self.components
    }

    pub fn explained_variance_ratio(&self) -> &[f64] {
        &self.explained_variance_ratio
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_first_component_follows_dominant_direction() {
        // points on the line y = 2x
        let x = array![[-2.0, -4.0], [-1.0, -2.0], [0.0, 0.0], [1.0, 2.0], [2.0, 4.0]];
        let pca = Pca::fit(&x, 1).unwrap();

        let component = pca.components().row(0);
        let norm = 5.0f64.sqrt();
        assert!((component[0] - 1.0 / norm).abs() < 1e-9);
        assert!((component[1] - 2.0 / norm).abs() < 1e-9);
        assert!((pca.explained_variance_ratio()[0] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_transform_row_matches_matrix_transform() {
        let x = array![
            [1.0, 0.5, 3.0],
            [2.0, 1.5, 1.0],
            [0.0, 2.5, 2.0],
            [4.0, 0.0, 0.5]
        ];
        let pca = Pca::fit(&x, 2).unwrap();
        let projected = pca.transform(&x);

        assert_eq!(projected.dim(), (4, 2));
        for i in 0..x.nrows() {
            let row = pca.transform_row(x.row(i));
            for j in 0..2 {
                assert!((row[j] - projected[[i, j]]).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_refit_is_identical() {
        let x = array![[1.0, 2.0, 0.0], [3.0, 1.0, 1.0], [0.5, 4.0, 2.0], [2.0, 2.0, 5.0]];
        assert_eq!(Pca::fit(&x, 2).unwrap(), Pca::fit(&x, 2).unwrap());
    }

    #[test]
    fn test_too_many_components_is_rejected() {
        let x = array![[1.0, 2.0], [3.0, 4.0]];
        assert!(Pca::fit(&x, 3).is_err());
        assert!(Pca::fit(&x, 0).is_err());
    }
}
