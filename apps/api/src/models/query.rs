use serde::{Deserialize, Deserializer};
use utoipa::ToSchema;

use super::{DietPreference, Nutrient, NutrientVector};

/// Targets used by the nutrition endpoint when a field is missing or unusable.
/// Order: calories, fat, saturated fat, cholesterol, sodium, carbohydrates,
/// fiber, sugar, protein.
pub const DEFAULT_NUTRIENT_TARGETS: NutrientVector =
    NutrientVector::new([500.0, 30.0, 10.0, 50.0, 2000.0, 100.0, 10.0, 30.0, 50.0]);

/// Fixed per-nutrient maxima for the profile-driven endpoints. The calories
/// slot is always replaced by the caller's per-meal calorie target.
pub const PERSONAL_NUTRIENT_LIMITS: NutrientVector =
    NutrientVector::new([0.0, 20.0, 8.0, 60.0, 700.0, 100.0, 10.0, 20.0, 25.0]);

/// Limits for a profile-driven request with the given per-meal calories
pub fn personal_limits(calories_per_meal: f64) -> NutrientVector {
    PERSONAL_NUTRIENT_LIMITS.with(Nutrient::Calories, calories_per_meal)
}

/// Everything the recommendation pipeline needs for one request
#[derive(Debug, Clone, PartialEq)]
pub struct UserQuery {
    pub targets: NutrientVector,
    pub max_nutrients: NutrientVector,
    pub diet: DietPreference,
    /// `None` means every category
    pub category: Option<String>,
    pub include: Vec<String>,
    pub exclude: Vec<String>,
    pub top_k: usize,
}

/// Query against the regional catalog
#[derive(Debug, Clone, PartialEq)]
pub struct RegionalQuery {
    pub calories_per_meal: f64,
    pub diet: DietPreference,
    pub include: Vec<String>,
    pub exclude: Vec<String>,
}

/// Split a comma-separated ingredient list, dropping blank terms
pub fn split_terms(raw: Option<&str>) -> Vec<String> {
    raw.unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .map(str::to_string)
        .collect()
}

/// Category filter value; "All" (or nothing) disables the filter
pub fn category_filter(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|c| !c.is_empty() && *c != "All")
        .map(str::to_string)
}

/// Accepts a JSON number or a numeric string. Anything else (including
/// non-finite values) becomes `None` so the caller's default applies.
pub(crate) fn deserialize_lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(f64),
        String(String),
        Other(serde_json::Value),
    }

    let value = match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => Some(n),
        NumberOrString::String(s) => s.trim().parse::<f64>().ok(),
        NumberOrString::Other(_) => None,
    };

    Ok(value.filter(|v| v.is_finite()))
}

fn deserialize_lenient_count<'de, D>(deserializer: D) -> Result<Option<usize>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(deserialize_lenient_f64(deserializer)?
        .filter(|v| *v >= 1.0)
        .map(|v| v as usize))
}

/// Request body for nutrient-target recommendations
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct NutritionRequest {
    #[serde(default, deserialize_with = "deserialize_lenient_f64")]
    #[schema(example = 500.0)]
    pub calories: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_lenient_f64")]
    #[schema(example = 30.0)]
    pub fat: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_lenient_f64")]
    #[schema(example = 10.0)]
    pub saturated_fat: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_lenient_f64")]
    #[schema(example = 50.0)]
    pub cholesterol: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_lenient_f64")]
    #[schema(example = 2000.0)]
    pub sodium: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_lenient_f64")]
    #[schema(example = 100.0)]
    pub carbohydrates: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_lenient_f64")]
    #[schema(example = 10.0)]
    pub fiber: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_lenient_f64")]
    #[schema(example = 30.0)]
    pub sugar: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_lenient_f64")]
    #[schema(example = 50.0)]
    pub protein: Option<f64>,
    /// Comma-separated substrings that must all appear in the ingredients
    #[serde(default)]
    #[schema(example = "tomato, basil")]
    pub include_ingredients: Option<String>,
    /// Comma-separated substrings that must not appear in the ingredients
    #[serde(default)]
    #[schema(example = "peanut")]
    pub exclude_ingredients: Option<String>,
    #[serde(default)]
    #[schema(example = "Veg")]
    pub diet: Option<String>,
    #[serde(default)]
    #[schema(example = "All")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "deserialize_lenient_count")]
    #[schema(example = 12, minimum = 1)]
    pub top_k: Option<usize>,
}

impl NutritionRequest {
    /// Requested targets, falling back to [`DEFAULT_NUTRIENT_TARGETS`] per field
    pub fn targets(&self) -> NutrientVector {
        let supplied = [
            self.calories,
            self.fat,
            self.saturated_fat,
            self.cholesterol,
            self.sodium,
            self.carbohydrates,
            self.fiber,
            self.sugar,
            self.protein,
        ];

        Nutrient::ALL
            .iter()
            .zip(supplied)
            .fold(DEFAULT_NUTRIENT_TARGETS, |targets, (&nutrient, value)| {
                match value {
                    Some(v) => targets.with(nutrient, v),
                    None => targets,
                }
            })
    }

    /// The targets double as the per-nutrient maxima on this path
    pub fn to_query(&self, default_top_k: usize) -> UserQuery {
        let targets = self.targets();
        UserQuery {
            targets,
            max_nutrients: targets,
            diet: DietPreference::parse(self.diet.as_deref().unwrap_or("All")),
            category: category_filter(self.category.as_deref()),
            include: split_terms(self.include_ingredients.as_deref()),
            exclude: split_terms(self.exclude_ingredients.as_deref()),
            top_k: self.top_k.unwrap_or(default_top_k),
        }
    }
}

/// Request body for the profile-driven endpoints
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct PersonalInfoRequest {
    /// Body weight in kilograms
    #[serde(default, deserialize_with = "deserialize_lenient_f64")]
    #[schema(example = 70.0)]
    pub weight: Option<f64>,
    /// Height in centimetres
    #[serde(default, deserialize_with = "deserialize_lenient_f64")]
    #[schema(example = 175.0)]
    pub height: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_lenient_f64")]
    #[schema(example = 30)]
    pub age: Option<f64>,
    #[serde(default)]
    #[schema(example = "Male")]
    pub gender: Option<String>,
    #[serde(default)]
    #[schema(example = "moderately active")]
    pub activity_level: Option<String>,
    /// Target weekly weight loss; each unit removes 500 kcal per day
    #[serde(default, deserialize_with = "deserialize_lenient_f64")]
    #[schema(example = 0.5)]
    pub weight_loss: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_lenient_f64")]
    #[schema(example = 3)]
    pub meals_per_day: Option<f64>,
    #[serde(default)]
    pub include_ingredients: Option<String>,
    #[serde(default)]
    pub exclude_ingredients: Option<String>,
    #[serde(default)]
    #[schema(example = "Non-Veg")]
    pub diet: Option<String>,
    #[serde(default, deserialize_with = "deserialize_lenient_count")]
    #[schema(example = 12, minimum = 1)]
    pub top_k: Option<usize>,
}

impl PersonalInfoRequest {
    /// Main-catalog query for a profile whose per-meal calories are known
    pub fn to_query(&self, calories_per_meal: f64, default_top_k: usize) -> UserQuery {
        let limits = personal_limits(calories_per_meal);
        UserQuery {
            targets: limits,
            max_nutrients: limits,
            diet: DietPreference::parse(self.diet.as_deref().unwrap_or("All")),
            category: None,
            include: split_terms(self.include_ingredients.as_deref()),
            exclude: split_terms(self.exclude_ingredients.as_deref()),
            top_k: self.top_k.unwrap_or(default_top_k),
        }
    }

    pub fn to_regional_query(&self, calories_per_meal: f64) -> RegionalQuery {
        RegionalQuery {
            calories_per_meal,
            diet: DietPreference::parse(self.diet.as_deref().unwrap_or("All")),
            include: split_terms(self.include_ingredients.as_deref()),
            exclude: split_terms(self.exclude_ingredients.as_deref()),
        }
    }
}
