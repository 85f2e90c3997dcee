pub mod catalog;
pub mod filter;
pub mod list_literal;
pub mod normalizer;
pub mod nutrition;
pub mod ranker;
pub mod recommendation;
pub mod regional;
pub mod retriever;

#[cfg(test)]
pub(crate) mod fixtures;

// Re-export public types
pub use catalog::{
    load_catalog, load_regional_catalog, CatalogEntry, LabeledCatalog, RecommendationEngine,
};
pub use filter::ConstraintFilter;
pub use nutrition::{calculate_bmi, calculate_calories, ActivityLevel, Gender, PersonalProfile};
pub use recommendation::{RecommendationService, RecommendationSettings};
pub use regional::RegionalCatalog;
pub use retriever::{ClusterScope, Retrieval};
