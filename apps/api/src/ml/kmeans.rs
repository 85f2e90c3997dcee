//! K-Means clustering in the projected nutrient space.
//!
//! Lloyd's algorithm with k-means++ seeding. All randomness comes from a
//! ChaCha8 generator seeded from [`KMeansSettings::seed`], so a fit over the
//! same data always yields the same centroids and labels.

use crate::error::{ApiError, Result};
use ndarray::{Array2, ArrayView1, ArrayView2};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub struct KMeansSettings {
    pub n_clusters: usize,
    pub max_iter: usize,
    /// Number of seeded restarts; the run with the lowest inertia wins
    pub n_init: usize,
    /// Convergence threshold on the total squared centroid shift
    pub tolerance: f64,
    pub seed: u64,
}

impl Default for KMeansSettings {
    fn default() -> Self {
        Self {
            n_clusters: 10,
            max_iter: 300,
            n_init: 1,
            tolerance: 1e-4,
            seed: 42,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct KMeans {
    /// Shape (n_clusters, n_features)
    centroids: Array2<f64>,
    inertia: f64,
    n_iter: usize,
}

struct Run {
    centroids: Array2<f64>,
    labels: Vec<usize>,
    inertia: f64,
    n_iter: usize,
}

impl KMeans {
    /// Fit the model and return it along with the label of every row of `x`
    pub fn fit(x: ArrayView2<f64>, settings: &KMeansSettings) -> Result<(Self, Vec<usize>)> {
        let n_samples = x.nrows();

        if settings.n_clusters == 0 {
            return Err(ApiError::Embedding("n_clusters must be at least 1".into()));
        }
        if n_samples < settings.n_clusters {
            return Err(ApiError::Embedding(format!(
                "cannot form {} clusters from {} samples",
                settings.n_clusters, n_samples
            )));
        }

        let mut rng = ChaCha8Rng::seed_from_u64(settings.seed);
        let mut best: Option<Run> = None;

        for attempt in 0..settings.n_init.max(1) {
            let initial = init_plus_plus(x, settings.n_clusters, &mut rng);
            let run = lloyd(x, initial, settings);
            debug!(
                "k-means attempt {} finished after {} iterations, inertia {:.4}",
                attempt + 1,
                run.n_iter,
                run.inertia
            );

            if best.as_ref().map_or(true, |b| run.inertia < b.inertia) {
                best = Some(run);
            }
        }

        let best = best.ok_or_else(|| ApiError::Embedding("k-means produced no run".into()))?;
        Ok((
            Self {
                centroids: best.centroids,
                inertia: best.inertia,
                n_iter: best.n_iter,
            },
            best.labels,
        ))
    }

    /// Index of the nearest centroid; ties go to the lowest index
    pub fn predict_row(&self, row: ArrayView1<f64>) -> usize {
        nearest(self.centroids.view(), row).0
    }

    pub fn centroids(&self) -> &Array2<f64> {
        &self.centroids
    }

    pub fn n_clusters(&self) -> usize {
        self.centroids.nrows()
    }

    pub fn inertia(&self) -> f64 {
        self.inertia
    }

    pub fn n_iter(&self) -> usize {
        self.n_iter
    }
}

fn squared_distance(a: ArrayView1<f64>, b: ArrayView1<f64>) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| (x - y) * (x - y)).sum()
}

fn nearest(centroids: ArrayView2<f64>, row: ArrayView1<f64>) -> (usize, f64) {
    let mut best = (0, f64::INFINITY);
    for (idx, centroid) in centroids.outer_iter().enumerate() {
        let d = squared_distance(centroid, row);
        if d < best.1 {
            best = (idx, d);
        }
    }
    best
}

/// k-means++: the first centroid is uniform, each next one is drawn with
/// probability proportional to its squared distance from the chosen set.
fn init_plus_plus(x: ArrayView2<f64>, k: usize, rng: &mut ChaCha8Rng) -> Array2<f64> {
    let n_samples = x.nrows();
    let mut centroids = Array2::zeros((k, x.ncols()));

    let first = rng.gen_range(0..n_samples);
    centroids.row_mut(0).assign(&x.row(first));

    let mut closest: Vec<f64> = x
        .outer_iter()
        .map(|row| squared_distance(row, x.row(first)))
        .collect();

    for c in 1..k {
        let total: f64 = closest.iter().sum();
        let chosen = if total > 0.0 {
            let target = rng.gen::<f64>() * total;
            let mut cumulative = 0.0;
            closest
                .iter()
                .position(|d| {
                    cumulative += d;
                    cumulative > target
                })
                .unwrap_or(n_samples - 1)
        } else {
            // every remaining point coincides with a centroid
            rng.gen_range(0..n_samples)
        };

        centroids.row_mut(c).assign(&x.row(chosen));
        for (i, row) in x.outer_iter().enumerate() {
            let d = squared_distance(row, x.row(chosen));
            if d < closest[i] {
                closest[i] = d;
            }
        }
    }

    centroids
}

fn assign(x: ArrayView2<f64>, centroids: &Array2<f64>) -> (Vec<usize>, f64) {
    let mut inertia = 0.0;
    let labels = x
        .outer_iter()
        .map(|row| {
            let (label, d) = nearest(centroids.view(), row);
            inertia += d;
            label
        })
        .collect();
    (labels, inertia)
}

fn lloyd(x: ArrayView2<f64>, mut centroids: Array2<f64>, settings: &KMeansSettings) -> Run {
    let k = centroids.nrows();
    let mut n_iter = 0;

    for _ in 0..settings.max_iter {
        n_iter += 1;
        let (labels, _) = assign(x, &centroids);

        let mut sums = Array2::<f64>::zeros(centroids.dim());
        let mut counts = vec![0usize; k];
        for (row, &label) in x.outer_iter().zip(labels.iter()) {
            let mut sum = sums.row_mut(label);
            sum += &row;
            counts[label] += 1;
        }

        let mut updated = centroids.clone();
        for (c, &count) in counts.iter().enumerate() {
            // empty clusters keep their previous centroid
            if count > 0 {
                let mean = &sums.row(c) / count as f64;
                updated.row_mut(c).assign(&mean);
            }
        }

        let shift: f64 = updated
            .outer_iter()
            .zip(centroids.outer_iter())
            .map(|(a, b)| squared_distance(a, b))
            .sum();
        centroids = updated;

        if shift <= settings.tolerance {
            break;
        }
    }

    let (labels, inertia) = assign(x, &centroids);
    Run {
        centroids,
        labels,
        inertia,
        n_iter,
    }
}
