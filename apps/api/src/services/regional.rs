use crate::models::{RegionalQuery, RegionalRecipe, RegionalRecommendation};
use std::cmp::Ordering;
use tracing::debug;

/// Number of regional recipes returned per request
pub const DEFAULT_REGIONAL_LIMIT: usize = 9;

/// The regional catalog. It lacks the full nutrient schema, so it is served
/// by plain filtering and a calorie sort instead of the embedding.
#[derive(Debug, Clone, Default)]
pub struct RegionalCatalog {
    recipes: Vec<RegionalRecipe>,
}

impl RegionalCatalog {
    pub fn new(recipes: Vec<RegionalRecipe>) -> Self {
        Self { recipes }
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// Recipes matching the diet and ingredient rules with numeric calories
    /// at or below the per-meal bound and an image, highest calories first.
    pub fn recommend(&self, query: &RegionalQuery, limit: usize) -> Vec<RegionalRecommendation> {
        let include = lowercase_terms(&query.include);
        let exclude = lowercase_terms(&query.exclude);

        let mut matches: Vec<(f64, &RegionalRecipe)> = self
            .recipes
            .iter()
            .filter(|recipe| query.diet.matches_label(recipe.diet.as_deref()))
            .filter(|recipe| matches_ingredients(recipe, &include, &exclude))
            .filter_map(|recipe| {
                coerce_calories(recipe.calories.as_deref())
                    .filter(|calories| *calories <= query.calories_per_meal)
                    .map(|calories| (calories, recipe))
            })
            .filter(|(_, recipe)| recipe.has_image())
            .collect();

        debug!(
            "Regional filter kept {} of {} recipes",
            matches.len(),
            self.recipes.len()
        );

        // stable: equal calories keep catalog order
        matches.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));

        matches
            .into_iter()
            .take(limit)
            .map(|(calories, recipe)| to_recommendation(recipe, calories))
            .collect()
    }
}

/// Numeric calories, or `None` for anything that does not parse
pub fn coerce_calories(raw: Option<&str>) -> Option<f64> {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|c| c.is_finite())
}

fn lowercase_terms(terms: &[String]) -> Vec<String> {
    terms
        .iter()
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}

fn matches_ingredients(recipe: &RegionalRecipe, include: &[String], exclude: &[String]) -> bool {
    match recipe.ingredients.as_deref() {
        None => include.is_empty(),
        Some(text) => {
            let text = text.to_lowercase();
            include.iter().all(|term| text.contains(term.as_str()))
                && !exclude.iter().any(|term| text.contains(term.as_str()))
        }
    }
}

fn to_recommendation(recipe: &RegionalRecipe, calories: f64) -> RegionalRecommendation {
    let text = |value: &Option<String>| value.clone().unwrap_or_default();

    RegionalRecommendation {
        name: text(&recipe.name),
        ingredients: text(&recipe.ingredients),
        instructions: text(&recipe.instructions),
        calories,
        diet: text(&recipe.diet),
        images: text(&recipe.images),
        cuisine: text(&recipe.cuisine),
        course: text(&recipe.course),
    }
}
