use crate::{
    ml::EmbeddingModel, models::NutrientVector, services::catalog::CatalogEntry,
};
use ndarray::Array1;
use tracing::debug;

/// Candidates restricted to the user's cluster
#[derive(Debug, Clone)]
pub struct ClusterScope<'a> {
    pub candidates: Vec<&'a CatalogEntry>,
    /// The user's targets after catalog standardization
    pub user_vector: Array1<f64>,
    pub cluster: usize,
    /// True when the cluster held no candidates and the whole filtered set
    /// was kept instead
    pub fell_back: bool,
}

#[derive(Debug, Clone)]
pub enum Retrieval<'a> {
    /// The constraint filter left nothing; no cluster was assigned
    NoCandidates,
    Scoped(ClusterScope<'a>),
}

/// Place the user in the catalog's cluster space and keep only candidates
/// from the same cluster, falling back to all candidates when that cluster
/// has none of them.
pub fn scope_to_cluster<'a>(
    model: &EmbeddingModel,
    candidates: Vec<&'a CatalogEntry>,
    targets: &NutrientVector,
) -> Retrieval<'a> {
    if candidates.is_empty() {
        return Retrieval::NoCandidates;
    }

    let user_vector = model.standardize(targets);
    let cluster = model.assign_cluster(user_vector.view());

    let in_cluster: Vec<&CatalogEntry> = candidates
        .iter()
        .copied()
        .filter(|entry| entry.cluster() == cluster)
        .collect();

    let fell_back = in_cluster.is_empty();
    debug!(
        "User assigned to cluster {}: {} of {} candidates share it{}",
        cluster,
        in_cluster.len(),
        candidates.len(),
        if fell_back { ", falling back to all" } else { "" }
    );

    Retrieval::Scoped(ClusterScope {
        candidates: if fell_back { candidates } else { in_cluster },
        user_vector,
        cluster,
        fell_back,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::fixtures;

    #[test]
    fn test_empty_candidates_skip_assignment() {
        let engine = fixtures::engine();
        let targets = engine.catalog().entries()[0].recipe().nutrients;
        assert!(matches!(
            scope_to_cluster(engine.model(), Vec::new(), &targets),
            Retrieval::NoCandidates
        ));
    }

    #[test]
    fn test_restricts_to_user_cluster() {
        let engine = fixtures::engine();
        let candidates: Vec<&CatalogEntry> = engine.catalog().entries().iter().collect();
        let targets = engine.catalog().entries()[0].recipe().nutrients;

        match scope_to_cluster(engine.model(), candidates, &targets) {
            Retrieval::Scoped(scope) => {
                assert!(!scope.fell_back);
                // a catalog row always shares its own cluster
                assert_eq!(scope.cluster, engine.catalog().entries()[0].cluster());
                assert!(scope.candidates.iter().all(|e| e.cluster() == scope.cluster));
            }
            Retrieval::NoCandidates => panic!("expected a scoped result"),
        }
    }

    #[test]
    fn test_falls_back_when_cluster_has_no_candidates() {
        let engine = fixtures::engine();
        let targets = engine.catalog().entries()[0].recipe().nutrients;
        let user_cluster = engine
            .model()
            .assign_cluster(engine.model().standardize(&targets).view());

        let elsewhere: Vec<&CatalogEntry> = engine
            .catalog()
            .entries()
            .iter()
            .filter(|e| e.cluster() != user_cluster)
            .collect();
        assert!(!elsewhere.is_empty());
        let expected: Vec<String> = elsewhere.iter().map(|e| e.recipe().id.clone()).collect();

        match scope_to_cluster(engine.model(), elsewhere, &targets) {
            Retrieval::Scoped(scope) => {
                assert!(scope.fell_back);
                let ids: Vec<String> =
                    scope.candidates.iter().map(|e| e.recipe().id.clone()).collect();
                assert_eq!(ids, expected);
            }
            Retrieval::NoCandidates => panic!("fallback must not return empty"),
        }
    }
}
