use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{Diet, NutrientVector};

/// A row of the main recipe catalog
#[derive(Debug, Clone, PartialEq)]
pub struct Recipe {
    pub id: String,
    pub name: String,
    pub category: Option<String>,
    pub diet: Diet,
    pub nutrients: NutrientVector,
    /// Ingredient names in the bracketed `c("...")` list encoding
    pub ingredient_parts: Option<String>,
    /// Ingredient quantities, parallel to `ingredient_parts`
    pub ingredient_quantities: Option<String>,
    pub instructions: Option<String>,
    pub images: Option<String>,
    pub servings: Option<f64>,
}

impl Recipe {
    pub fn has_image(&self) -> bool {
        has_text(self.images.as_deref())
    }
}

/// A row of the regional catalog. Every column is optional and `Calories`
/// is free text that only becomes a number at query time.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RegionalRecipe {
    #[serde(rename = "RecipeName", default)]
    pub name: Option<String>,
    #[serde(rename = "Ingredients", default)]
    pub ingredients: Option<String>,
    #[serde(rename = "Instructions", default)]
    pub instructions: Option<String>,
    #[serde(rename = "Calories", default)]
    pub calories: Option<String>,
    #[serde(rename = "Diet", default)]
    pub diet: Option<String>,
    #[serde(rename = "Images", default)]
    pub images: Option<String>,
    #[serde(rename = "Cuisine", default)]
    pub cuisine: Option<String>,
    #[serde(rename = "Course", default)]
    pub course: Option<String>,
}

impl RegionalRecipe {
    pub fn has_image(&self) -> bool {
        has_text(self.images.as_deref())
    }
}

pub(crate) fn has_text(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

/// Display-ready recommendation from the main catalog.
///
/// Field names follow the catalog's columns so existing clients keep working.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RecommendedRecipe {
    /// 1-based position in similarity order
    #[serde(rename = "Rank")]
    #[schema(example = 1)]
    pub rank: usize,
    #[serde(rename = "RecipeId")]
    pub recipe_id: String,
    #[serde(rename = "Name")]
    #[schema(example = "Low-Fat Berry Blue Frozen Dessert")]
    pub name: String,
    #[serde(rename = "Images")]
    pub images: String,
    #[serde(rename = "Calories")]
    pub calories: f64,
    #[serde(rename = "RecipeServings")]
    pub servings: f64,
    #[serde(rename = "RecipeInstructions")]
    pub instructions: String,
    #[serde(rename = "IngredientsWithCounts")]
    #[schema(example = "1 salt, 2 pepper")]
    pub ingredients_with_counts: String,
}

/// Regional recommendation; missing columns are rendered as empty strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RegionalRecommendation {
    #[serde(rename = "RecipeName")]
    pub name: String,
    #[serde(rename = "Ingredients")]
    pub ingredients: String,
    #[serde(rename = "Instructions")]
    pub instructions: String,
    #[serde(rename = "Calories")]
    pub calories: f64,
    #[serde(rename = "Diet")]
    pub diet: String,
    #[serde(rename = "Images")]
    pub images: String,
    #[serde(rename = "Cuisine")]
    pub cuisine: String,
    #[serde(rename = "Course")]
    pub course: String,
}
