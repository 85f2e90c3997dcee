use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub use diet::{Diet, DietPreference};
pub use nutrient::{Nutrient, NutrientVector, NUTRIENT_COUNT};
pub use query::{
    category_filter, personal_limits, split_terms, NutritionRequest, PersonalInfoRequest,
    RegionalQuery, UserQuery, DEFAULT_NUTRIENT_TARGETS, PERSONAL_NUTRIENT_LIMITS,
};
pub use recipe::{Recipe, RecommendedRecipe, RegionalRecipe, RegionalRecommendation};

mod diet;
mod nutrient;
mod query;
mod recipe;

/// Response structure for main-catalog recommendations
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RecommendationResponse {
    /// Recipes in similarity order; empty when nothing matched the constraints
    #[serde(rename = "Recommendations")]
    pub recommendations: Vec<RecommendedRecipe>,
}

/// Response structure for regional recommendations
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RegionalRecommendationResponse {
    /// Recipes ordered by descending calories
    #[serde(rename = "Recommendations")]
    pub recommendations: Vec<RegionalRecommendation>,
}

/// Derived energy figures for a personal profile
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CalorieResponse {
    #[schema(example = 22.86)]
    pub bmi: f64,
    #[schema(example = 2555.56)]
    pub daily_calories: f64,
    #[schema(example = 851.85)]
    pub calories_per_meal: f64,
    /// Activity level actually applied, after fallback
    #[schema(example = "moderately active")]
    pub activity_level: String,
}

/// Health check response structure
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "ok")]
    pub status: String,
    /// Number of recipes in the main catalog
    pub recipes: usize,
    /// Number of recipes in the regional catalog
    pub regional_recipes: usize,
    /// Current timestamp in RFC3339 format
    #[schema(example = "2024-01-15T10:30:00Z")]
    pub timestamp: String,
}

/// Error response structure
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "Invalid input: weight is required")]
    pub error: String,
}
