use crate::services::catalog::CatalogEntry;
use ndarray::ArrayView1;
use std::cmp::Ordering;

/// Result cap used when a request does not ask for one
pub const DEFAULT_TOP_K: usize = 12;

#[derive(Debug, Clone)]
pub struct RankedCandidate<'a> {
    pub entry: &'a CatalogEntry,
    /// Cosine distance to the user vector; only used for ordering
    pub distance: f64,
}

/// 1 - cosine similarity. A zero vector has similarity 0 with everything.
pub fn cosine_distance(a: ArrayView1<f64>, b: ArrayView1<f64>) -> f64 {
    let norm_a = a.dot(&a).sqrt();
    let norm_b = b.dot(&b).sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 1.0;
    }

    let similarity = a.dot(&b) / (norm_a * norm_b);
    (1.0 - similarity).clamp(0.0, 2.0)
}

/// Exact nearest neighbours of `user` among `candidates` by cosine distance.
///
/// Returns `min(k, candidates.len())` entries in non-decreasing distance
/// order; equal distances keep catalog order.
pub fn rank_nearest<'a>(
    user: ArrayView1<f64>,
    candidates: &[&'a CatalogEntry],
    k: usize,
) -> Vec<RankedCandidate<'a>> {
    let mut scored: Vec<RankedCandidate<'a>> = candidates
        .iter()
        .map(|&entry| RankedCandidate {
            entry,
            distance: cosine_distance(user, entry.standardized()),
        })
        .collect();

    scored.sort_by(|a, b| {
        a.distance
            .partial_cmp(&b.distance)
            .unwrap_or(Ordering::Equal)
    });
    scored.truncate(k.min(candidates.len()));
    scored
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Diet, NutrientVector, Recipe};
    use ndarray::{array, Array1};

    fn entry(id: &str, standardized: Array1<f64>) -> CatalogEntry {
        let recipe = Recipe {
            id: id.into(),
            name: id.into(),
            category: None,
            diet: Diet::Vegan,
            nutrients: NutrientVector::new([1.0; 9]),
            ingredient_parts: None,
            ingredient_quantities: None,
            instructions: None,
            images: Some("img".into()),
            servings: None,
        };
        CatalogEntry::new(recipe, 0, standardized)
    }

    #[test]
    fn test_cosine_distance_basics() {
        let a = array![1.0, 0.0];
        assert!(cosine_distance(a.view(), array![2.0, 0.0].view()).abs() < 1e-12);
        assert!((cosine_distance(a.view(), array![0.0, 3.0].view()) - 1.0).abs() < 1e-12);
        assert!((cosine_distance(a.view(), array![-1.0, 0.0].view()) - 2.0).abs() < 1e-12);
        assert_eq!(cosine_distance(a.view(), array![0.0, 0.0].view()), 1.0);
    }

    #[test]
    fn test_orders_by_distance_and_caps_k() {
        let entries = vec![
            entry("orthogonal", array![0.0, 1.0]),
            entry("same", array![3.0, 0.0]),
            entry("opposite", array![-1.0, 0.0]),
            entry("diagonal", array![1.0, 1.0]),
        ];
        let candidates: Vec<&CatalogEntry> = entries.iter().collect();
        let user = array![1.0, 0.0];

        let ranked = rank_nearest(user.view(), &candidates, 3);
        let ids: Vec<&str> = ranked.iter().map(|r| r.entry.recipe().id.as_str()).collect();
        assert_eq!(ids, ["same", "diagonal", "orthogonal"]);
        assert!(ranked.windows(2).all(|w| w[0].distance <= w[1].distance));
    }

    #[test]
    fn test_k_degrades_to_candidate_count() {
        let entries = vec![entry("only", array![1.0, 2.0])];
        let candidates: Vec<&CatalogEntry> = entries.iter().collect();

        let ranked = rank_nearest(array![0.5, 0.5].view(), &candidates, DEFAULT_TOP_K);
        assert_eq!(ranked.len(), 1);
        assert!(rank_nearest(array![0.5, 0.5].view(), &[], DEFAULT_TOP_K).is_empty());
    }

    #[test]
    fn test_ties_keep_catalog_order() {
        let entries = vec![
            entry("first", array![2.0, 0.0]),
            entry("second", array![1.0, 0.0]),
            entry("third", array![5.0, 0.0]),
        ];
        let candidates: Vec<&CatalogEntry> = entries.iter().collect();

        let ranked = rank_nearest(array![1.0, 0.0].view(), &candidates, 3);
        let ids: Vec<&str> = ranked.iter().map(|r| r.entry.recipe().id.as_str()).collect();
        assert_eq!(ids, ["first", "second", "third"]);
    }
}
