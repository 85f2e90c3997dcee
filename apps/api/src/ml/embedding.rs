use crate::{
    error::{ApiError, Result},
    ml::{KMeans, KMeansSettings, Pca, StandardScaler},
    models::NutrientVector,
};
use ndarray::{Array1, Array2, ArrayView1};
use std::collections::HashSet;
use tracing::info;

/// Knobs of the catalog-wide embedding
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddingSettings {
    pub n_components: usize,
    pub n_clusters: usize,
    pub max_iter: usize,
    pub n_init: usize,
    pub tolerance: f64,
    pub random_seed: u64,
}

impl Default for EmbeddingSettings {
    fn default() -> Self {
        Self {
            n_components: 5,
            n_clusters: 10,
            max_iter: 300,
            n_init: 1,
            tolerance: 1e-4,
            random_seed: 42,
        }
    }
}

impl EmbeddingSettings {
    fn kmeans(&self) -> KMeansSettings {
        KMeansSettings {
            n_clusters: self.n_clusters,
            max_iter: self.max_iter,
            n_init: self.n_init,
            tolerance: self.tolerance,
            seed: self.random_seed,
        }
    }
}

/// Standardization, projection and cluster centroids fitted once over the
/// whole catalog. Never refit per request: queries must go through exactly
/// the transform the catalog labels were computed with.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddingModel {
    scaler: StandardScaler,
    pca: Pca,
    kmeans: KMeans,
}

/// Output of [`EmbeddingModel::fit`]
#[derive(Debug, Clone)]
pub struct FittedEmbedding {
    pub model: EmbeddingModel,
    /// Cluster label per input row
    pub labels: Vec<usize>,
    /// Standardized input rows, reused by the ranker
    pub standardized: Array2<f64>,
}

impl EmbeddingModel {
    pub fn fit(x: &Array2<f64>, settings: &EmbeddingSettings) -> Result<FittedEmbedding> {
        if x.nrows() == 0 {
            return Err(ApiError::Embedding("catalog is empty".into()));
        }

        let distinct = distinct_rows(x);
        if distinct < settings.n_clusters {
            return Err(ApiError::Embedding(format!(
                "catalog has {} distinct nutrient rows, fewer than the {} clusters requested",
                distinct, settings.n_clusters
            )));
        }

        let scaler = StandardScaler::fit(x)?;
        let standardized = scaler.transform(x);

        let pca = Pca::fit(&standardized, settings.n_components)?;
        let projected = pca.transform(&standardized);
        info!(
            "Fitted {}-component projection, explained variance ratio {:?}",
            pca.n_components(),
            pca.explained_variance_ratio()
        );

        let (kmeans, labels) = KMeans::fit(projected.view(), &settings.kmeans())?;
        info!(
            "Fitted {} clusters in {} iterations (inertia {:.4})",
            kmeans.n_clusters(),
            kmeans.n_iter(),
            kmeans.inertia()
        );

        Ok(FittedEmbedding {
            model: Self {
                scaler,
                pca,
                kmeans,
            },
            labels,
            standardized,
        })
    }

    /// Standardize a raw nutrient vector with the catalog's mean and scale
    pub fn standardize(&self, nutrients: &NutrientVector) -> Array1<f64> {
        self.scaler.transform_row(nutrients.to_array().view())
    }

    pub fn project(&self, standardized: ArrayView1<f64>) -> Array1<f64> {
        self.pca.transform_row(standardized)
    }

    /// Nearest centroid, in projected space, of an already standardized vector
    pub fn assign_cluster(&self, standardized: ArrayView1<f64>) -> usize {
        let projected = self.project(standardized);
        self.kmeans.predict_row(projected.view())
    }

    pub fn n_clusters(&self) -> usize {
        self.kmeans.n_clusters()
    }

    pub fn scaler(&self) -> &StandardScaler {
        &self.scaler
    }

    pub fn pca(&self) -> &Pca {
        &self.pca
    }

    pub fn kmeans(&self) -> &KMeans {
        &self.kmeans
    }
}

fn distinct_rows(x: &Array2<f64>) -> usize {
    x.outer_iter()
        .map(|row| row.iter().map(|v| v.to_bits()).collect::<Vec<u64>>())
        .collect::<HashSet<_>>()
        .len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NUTRIENT_COUNT;

    fn catalog_matrix(n: usize) -> Array2<f64> {
        Array2::from_shape_fn((n, NUTRIENT_COUNT), |(i, j)| {
            let group = (i % 3) as f64;
            let step = (i / 3) as f64;
            (group + 1.0) * 50.0 * (j as f64 + 1.0) + step * (j as f64 % 4.0 + 0.5)
        })
    }

    fn small_settings() -> EmbeddingSettings {
        EmbeddingSettings {
            n_components: 3,
            n_clusters: 3,
            ..EmbeddingSettings::default()
        }
    }

    #[test]
    fn test_rebuild_reproduces_labels_and_model() {
        let x = catalog_matrix(30);
        let first = EmbeddingModel::fit(&x, &small_settings()).unwrap();
        let second = EmbeddingModel::fit(&x, &small_settings()).unwrap();

        assert_eq!(first.labels, second.labels);
        assert_eq!(first.model, second.model);
        assert_eq!(first.labels.len(), 30);
        assert!(first.labels.iter().all(|&l| l < 3));
    }

    #[test]
    fn test_catalog_rows_are_assigned_their_own_label() {
        let x = catalog_matrix(30);
        let fitted = EmbeddingModel::fit(&x, &small_settings()).unwrap();

        for (i, &label) in fitted.labels.iter().enumerate() {
            let row: [f64; NUTRIENT_COUNT] = std::array::from_fn(|j| x[[i, j]]);
            let standardized = fitted.model.standardize(&NutrientVector::new(row));
            assert_eq!(fitted.model.assign_cluster(standardized.view()), label);
        }
    }

    #[test]
    fn test_empty_catalog_is_fatal() {
        let x = Array2::<f64>::zeros((0, NUTRIENT_COUNT));
        assert!(matches!(
            EmbeddingModel::fit(&x, &small_settings()),
            Err(ApiError::Embedding(_))
        ));
    }

    #[test]
    fn test_too_few_distinct_rows_is_fatal() {
        let mut x = Array2::<f64>::ones((10, NUTRIENT_COUNT));
        x[[0, 0]] = 2.0;
        // only two distinct rows for three clusters
        assert!(matches!(
            EmbeddingModel::fit(&x, &small_settings()),
            Err(ApiError::Embedding(_))
        ));
    }
}
