use crate::{
    models::{Nutrient, Recipe, RecommendedRecipe},
    services::list_literal,
};

/// Serving count used when the catalog has none
pub const DEFAULT_SERVINGS: f64 = 1.0;

/// Turn a ranked catalog recipe into its display record
pub fn normalize(recipe: &Recipe, rank: usize) -> RecommendedRecipe {
    RecommendedRecipe {
        rank,
        recipe_id: recipe.id.clone(),
        name: recipe.name.clone(),
        images: recipe.images.clone().unwrap_or_default(),
        calories: recipe.nutrients[Nutrient::Calories],
        servings: recipe.servings.unwrap_or(DEFAULT_SERVINGS),
        instructions: instructions_text(recipe.instructions.as_deref()),
        ingredients_with_counts: ingredients_with_counts(
            recipe.ingredient_parts.as_deref(),
            recipe.ingredient_quantities.as_deref(),
        ),
    }
}

/// Pair ingredient names with quantities as `"<quantity> <name>"`, joined
/// by commas. Pairing stops at the shorter of the two lists.
pub fn ingredients_with_counts(parts: Option<&str>, quantities: Option<&str>) -> String {
    let names = list_literal::parse_field(parts);
    let counts = list_literal::parse_field(quantities);

    names
        .iter()
        .zip(counts.iter())
        .map(|(name, count)| format!("{} {}", count, name))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Flatten a list-encoded instructions field into one comma-joined string.
/// Plain text that is not list-encoded is passed through trimmed.
pub fn instructions_text(raw: Option<&str>) -> String {
    let Some(raw) = raw else {
        return String::new();
    };

    let steps = list_literal::parse(raw);
    if steps.is_empty() {
        raw.trim().to_string()
    } else {
        steps.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Diet, NutrientVector};
    use crate::services::list_literal::encode;

    fn recipe() -> Recipe {
        Recipe {
            id: "38".into(),
            name: "Low-Fat Berry Blue Frozen Dessert".into(),
            category: Some("Frozen Desserts".into()),
            diet: Diet::Veg,
            nutrients: NutrientVector::new([170.9, 2.5, 1.3, 8.0, 29.8, 37.1, 3.6, 30.2, 3.2]),
            ingredient_parts: Some(r#"c("blueberries", "granulated sugar")"#.into()),
            ingredient_quantities: Some(r#"c("4", "1/4")"#.into()),
            instructions: Some(r#"c("Toss berries.", "Freeze.")"#.into()),
            images: Some("https://img.example/38.jpg".into()),
            servings: None,
        }
    }

    #[test]
    fn test_combines_quantities_and_names() {
        let combined = ingredients_with_counts(
            Some(&encode(&["salt", "pepper"])),
            Some(&encode(&["1", "2"])),
        );
        assert_eq!(combined, "1 salt, 2 pepper");
    }

    #[test]
    fn test_mismatched_lists_pair_up_to_shorter() {
        let combined = ingredients_with_counts(
            Some(r#"c("salt", "pepper", "oil")"#),
            Some(r#"c("1")"#),
        );
        assert_eq!(combined, "1 salt");
        assert_eq!(ingredients_with_counts(Some("salt"), Some("1")), "");
        assert_eq!(ingredients_with_counts(None, None), "");
    }

    #[test]
    fn test_instructions_are_flattened() {
        assert_eq!(
            instructions_text(Some(r#"c("Toss berries.", "Freeze.")"#)),
            "Toss berries., Freeze."
        );
        assert_eq!(instructions_text(Some("  Just bake it. ")), "Just bake it.");
        assert_eq!(instructions_text(None), "");
    }

    #[test]
    fn test_normalize_defaults_servings() {
        let record = normalize(&recipe(), 1);
        assert_eq!(record.rank, 1);
        assert_eq!(record.recipe_id, "38");
        assert_eq!(record.servings, DEFAULT_SERVINGS);
        assert_eq!(record.calories, 170.9);
        assert_eq!(record.ingredients_with_counts, "4 blueberries, 1/4 granulated sugar");
        assert_eq!(record.instructions, "Toss berries., Freeze.");
    }
}
