//! Synthetic catalog shared by the service unit tests.

use crate::{
    ml::EmbeddingSettings,
    models::{Diet, NutrientVector, Recipe},
    services::{catalog::RecommendationEngine, list_literal::encode},
};

/// Three nutritional profiles, interleaved in catalog order:
/// light vegan salads, rich veg desserts and heavy non-veg mains.
/// Every tenth recipe (index 9, 19, ...) has no image.
pub fn synthetic_recipes(n: usize) -> Vec<Recipe> {
    (0..n)
        .map(|i| {
            let v = (i / 3) as f64;
            let (diet, category, nutrients, parts) = match i % 3 {
                0 => (
                    Diet::Vegan,
                    "Salad",
                    [
                        120.0 + 5.0 * v,
                        3.0 + 0.2 * v,
                        0.5 + 0.05 * v,
                        0.0,
                        200.0 + 10.0 * v,
                        20.0 + v,
                        5.0 + 0.1 * v,
                        6.0 + 0.2 * v,
                        4.0 + 0.3 * v,
                    ],
                    vec!["tomato", "basil", "olive oil"],
                ),
                1 => (
                    Diet::Veg,
                    "Dessert",
                    [
                        350.0 + 8.0 * v,
                        15.0 + 0.5 * v,
                        8.0 + 0.1 * v,
                        40.0 + v,
                        150.0 + 5.0 * v,
                        55.0 + 2.0 * v,
                        2.0,
                        35.0 + v,
                        6.0 + 0.2 * v,
                    ],
                    vec!["milk", "sugar", "butter"],
                ),
                _ => (
                    Diet::NonVeg,
                    "Main",
                    [
                        450.0 + 10.0 * v,
                        25.0 + v,
                        9.0 + 0.2 * v,
                        90.0 + 3.0 * v,
                        800.0 + 20.0 * v,
                        30.0 + v,
                        3.0,
                        4.0,
                        35.0 + v,
                    ],
                    vec!["chicken", "garlic", "tomato"],
                ),
            };
            let quantities: Vec<String> = (1..=parts.len()).map(|q| q.to_string()).collect();

            Recipe {
                id: (i + 1).to_string(),
                name: format!("{} #{}", category, i + 1),
                category: Some(category.to_string()),
                diet,
                nutrients: NutrientVector::new(nutrients),
                ingredient_parts: Some(encode(&parts)),
                ingredient_quantities: Some(encode(&quantities)),
                instructions: Some(encode(&["Prepare.", "Serve."])),
                images: (i % 10 != 9).then(|| format!("https://img.example/{}.jpg", i + 1)),
                servings: if i % 2 == 0 { Some(2.0) } else { None },
            }
        })
        .collect()
}

pub fn small_settings() -> EmbeddingSettings {
    EmbeddingSettings {
        n_components: 3,
        n_clusters: 3,
        max_iter: 100,
        tolerance: 1e-8,
        ..EmbeddingSettings::default()
    }
}

pub fn engine() -> RecommendationEngine {
    RecommendationEngine::build(synthetic_recipes(60), &small_settings())
        .expect("synthetic catalog builds")
}
