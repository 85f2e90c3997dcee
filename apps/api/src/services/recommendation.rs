use crate::{
    error::{ApiError, Result},
    models::{RecommendedRecipe, RegionalQuery, RegionalRecommendation, UserQuery},
    services::{
        catalog::RecommendationEngine,
        filter::ConstraintFilter,
        normalizer::normalize,
        ranker::{rank_nearest, DEFAULT_TOP_K},
        regional::{RegionalCatalog, DEFAULT_REGIONAL_LIMIT},
        retriever::{scope_to_cluster, Retrieval},
    },
};
use std::{sync::Arc, time::Instant};
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecommendationSettings {
    /// Result cap when the request does not carry one
    pub top_k: usize,
    pub regional_limit: usize,
}

impl Default for RecommendationSettings {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            regional_limit: DEFAULT_REGIONAL_LIMIT,
        }
    }
}

/// Request-facing entry point. Both catalogs are immutable after startup and
/// shared between workers, so every call is read-only.
#[derive(Clone)]
pub struct RecommendationService {
    engine: Arc<RecommendationEngine>,
    regional: Arc<RegionalCatalog>,
    settings: RecommendationSettings,
}

impl RecommendationService {
    pub fn new(
        engine: RecommendationEngine,
        regional: RegionalCatalog,
        settings: RecommendationSettings,
    ) -> Self {
        Self {
            engine: Arc::new(engine),
            regional: Arc::new(regional),
            settings,
        }
    }

    pub fn settings(&self) -> RecommendationSettings {
        self.settings
    }

    pub fn engine(&self) -> &RecommendationEngine {
        &self.engine
    }

    pub fn recipe_count(&self) -> usize {
        self.engine.catalog().len()
    }

    pub fn regional_recipe_count(&self) -> usize {
        self.regional.len()
    }

    /// Filter, scope to the user's cluster, rank by cosine distance and
    /// normalize. An empty list means no recipe satisfied the constraints.
    pub fn recommend(&self, query: &UserQuery) -> Result<Vec<RecommendedRecipe>> {
        if !query.targets.is_finite() {
            return Err(ApiError::InvalidInput(
                "nutrient targets must be finite numbers".into(),
            ));
        }
        if query.top_k == 0 {
            return Err(ApiError::InvalidInput("top_k must be at least 1".into()));
        }

        let start = Instant::now();
        let filter = ConstraintFilter::from_query(query);
        let candidates = filter.apply(self.engine.catalog().entries());

        let scope = match scope_to_cluster(self.engine.model(), candidates, &query.targets) {
            Retrieval::NoCandidates => {
                info!("No recipes satisfy the request constraints");
                return Ok(Vec::new());
            }
            Retrieval::Scoped(scope) => scope,
        };

        let recommendations: Vec<RecommendedRecipe> =
            rank_nearest(scope.user_vector.view(), &scope.candidates, query.top_k)
                .iter()
                .enumerate()
                .map(|(i, ranked)| normalize(ranked.entry.recipe(), i + 1))
                .collect();

        info!(
            "Returning {} recommendations from cluster {} ({}) in {:?}",
            recommendations.len(),
            scope.cluster,
            if scope.fell_back { "fallback" } else { "scoped" },
            start.elapsed()
        );

        Ok(recommendations)
    }

    pub fn recommend_regional(&self, query: &RegionalQuery) -> Result<Vec<RegionalRecommendation>> {
        if !query.calories_per_meal.is_finite() {
            return Err(ApiError::InvalidInput(
                "calories per meal must be a finite number".into(),
            ));
        }

        let recommendations = self.regional.recommend(query, self.settings.regional_limit);
        info!(
            "Returning {} regional recommendations under {:.2} kcal",
            recommendations.len(),
            query.calories_per_meal
        );
        Ok(recommendations)
    }
}
