use crate::{
    models::{DietPreference, NutrientVector, Recipe, UserQuery},
    services::catalog::CatalogEntry,
};
use tracing::debug;

/// Hard constraints a recipe must satisfy before it can be ranked.
///
/// Every predicate only removes recipes, so adding a constraint can never
/// grow the candidate set. Recipes without an image are always removed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConstraintFilter {
    /// Exact category; `None` admits every category
    pub category: Option<String>,
    pub diet: DietPreference,
    /// Keep a recipe only if every nutrient is at or below its maximum
    pub max_nutrients: Option<NutrientVector>,
    /// Case-insensitive substrings that must all appear in the ingredients
    pub include: Vec<String>,
    /// Case-insensitive substrings none of which may appear in the ingredients
    pub exclude: Vec<String>,
}

impl ConstraintFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_query(query: &UserQuery) -> Self {
        Self {
            category: query.category.clone(),
            diet: query.diet.clone(),
            max_nutrients: Some(query.max_nutrients),
            include: normalize_terms(&query.include),
            exclude: normalize_terms(&query.exclude),
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_diet(mut self, diet: DietPreference) -> Self {
        self.diet = diet;
        self
    }

    pub fn with_max_nutrients(mut self, limits: NutrientVector) -> Self {
        self.max_nutrients = Some(limits);
        self
    }

    pub fn with_include(mut self, terms: &[String]) -> Self {
        self.include.extend(normalize_terms(terms));
        self
    }

    pub fn with_exclude(mut self, terms: &[String]) -> Self {
        self.exclude.extend(normalize_terms(terms));
        self
    }

    pub fn matches(&self, recipe: &Recipe) -> bool {
        recipe.has_image()
            && self.matches_category(recipe)
            && self.diet.matches(recipe.diet)
            && self.within_limits(recipe)
            && self.matches_ingredients(recipe)
    }

    /// Candidates that satisfy every constraint, in catalog order
    pub fn apply<'a>(&self, entries: &'a [CatalogEntry]) -> Vec<&'a CatalogEntry> {
        let candidates: Vec<&CatalogEntry> = entries
            .iter()
            .filter(|entry| self.matches(entry.recipe()))
            .collect();

        debug!(
            "Constraint filter kept {} of {} recipes",
            candidates.len(),
            entries.len()
        );
        candidates
    }

    fn matches_category(&self, recipe: &Recipe) -> bool {
        match &self.category {
            None => true,
            Some(wanted) => recipe.category.as_deref() == Some(wanted.as_str()),
        }
    }

    fn within_limits(&self, recipe: &Recipe) -> bool {
        match &self.max_nutrients {
            None => true,
            Some(limits) => recipe
                .nutrients
                .iter()
                .all(|(nutrient, value)| value <= limits[nutrient]),
        }
    }

    fn matches_ingredients(&self, recipe: &Recipe) -> bool {
        if self.include.is_empty() && self.exclude.is_empty() {
            return true;
        }

        match recipe.ingredient_parts.as_deref() {
            // nothing to search: required terms are absent, forbidden ones too
            None => self.include.is_empty(),
            Some(text) => {
                let text = text.to_lowercase();
                self.include.iter().all(|term| text.contains(term.as_str()))
                    && !self.exclude.iter().any(|term| text.contains(term.as_str()))
            }
        }
    }
}

fn normalize_terms(terms: &[String]) -> Vec<String> {
    terms
        .iter()
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}
