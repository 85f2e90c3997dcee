#![allow(dead_code)]

use recipe_recommender_api::{
    ml::EmbeddingSettings,
    models::Recipe,
    services::{
        catalog::{read_catalog, read_regional_catalog},
        list_literal::encode,
        RecommendationEngine, RecommendationService, RecommendationSettings, RegionalCatalog,
    },
};

const HEADER: [&str; 18] = [
    "RecipeId",
    "Name",
    "RecipeCategory",
    "Images",
    "RecipeIngredientQuantities",
    "RecipeIngredientParts",
    "Calories",
    "FatContent",
    "SaturatedFatContent",
    "CholesterolContent",
    "SodiumContent",
    "CarbohydrateContent",
    "FiberContent",
    "SugarContent",
    "ProteinContent",
    "RecipeServings",
    "RecipeInstructions",
    "Diet",
];

/// Catalog CSV with three interleaved profiles: light vegan salads, sugary
/// veg desserts and heavy non-veg mains. Rows 10, 20, ... have no image.
pub fn catalog_csv(n: usize) -> String {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(HEADER).unwrap();

    for i in 0..n {
        let v = (i / 3) as f64;
        let (diet, category, nutrients, parts): (&str, &str, [f64; 9], [&str; 3]) = match i % 3 {
            0 => (
                "Vegan",
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
                ["tomato", "basil", "olive oil"],
            ),
            1 => (
                "Veg",
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
                ["milk", "sugar", "butter"],
            ),
            _ => (
                "Non-Veg",
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
                ["chicken", "garlic", "tomato"],
            ),
        };

        let image = if i % 10 == 9 {
            String::new()
        } else {
            format!("https://img.example/{}.jpg", i + 1)
        };
        let servings = if i % 2 == 0 { "2" } else { "" };

        let mut record = vec![
            (i + 1).to_string(),
            format!("{} #{}", category, i + 1),
            category.to_string(),
            image,
            encode(&["1", "2", "3"]),
            encode(&parts),
        ];
        record.extend(nutrients.iter().map(|n| n.to_string()));
        record.push(servings.to_string());
        record.push(encode(&["Prepare.", "Serve."]));
        record.push(diet.to_string());
        writer.write_record(&record).unwrap();
    }

    String::from_utf8(writer.into_inner().unwrap()).unwrap()
}

pub fn recipes(n: usize) -> Vec<Recipe> {
    read_catalog(catalog_csv(n).as_bytes()).unwrap()
}

pub const REGIONAL_CSV: &str = "\
RecipeName,Ingredients,Instructions,Calories,Diet,Images,Cuisine,Course
Masoor Dal,\"red lentils, turmeric, salt\",Simmer.,250,Vegan,dal.jpg,North Indian,Main
Paneer Tikka,\"paneer, yogurt, chilli\",Grill.,420,Veg,paneer.jpg,Punjabi,Starter
Butter Chicken,\"chicken, butter, tomato\",Simmer.,980,Non-Veg,chicken.jpg,Punjabi,Main
Chana Masala,\"chickpeas, onion, tomato\",Simmer.,390,Vegan,chana.jpg,North Indian,Main
Aloo Gobi,\"potato, cauliflower\",Saute.,310,Vegan,aloo.jpg,North Indian,Main
Upma,\"semolina, mustard seeds\",Stir.,280,Vegan,upma.jpg,South Indian,Breakfast
Idli,\"rice, urad dal\",Steam.,150,Vegan,idli.jpg,South Indian,Breakfast
Dosa,\"rice, urad dal\",Fry.,210,Vegan,dosa.jpg,South Indian,Breakfast
Poha,\"flattened rice, peanuts\",Stir.,240,Vegan,poha.jpg,Maharashtrian,Breakfast
Khichdi,\"rice, moong dal\",Cook.,330,Vegan,khichdi.jpg,Gujarati,Main
Rajma,\"kidney beans, tomato\",Simmer.,360,Vegan,rajma.jpg,Punjabi,Main
Lassi,\"yogurt, sugar\",Blend.,180,Veg,lassi.jpg,Punjabi,Drink
Mystery Curry,\"spices\",Cook.,unknown,Vegan,mystery.jpg,Fusion,Main
Imageless Sabzi,\"vegetables\",Cook.,200,Vegan,,North Indian,Main
";

pub fn settings() -> EmbeddingSettings {
    EmbeddingSettings {
        n_components: 3,
        n_clusters: 3,
        max_iter: 100,
        tolerance: 1e-8,
        ..EmbeddingSettings::default()
    }
}

pub fn engine() -> RecommendationEngine {
    RecommendationEngine::build(recipes(60), &settings()).unwrap()
}

pub fn service() -> RecommendationService {
    let regional = read_regional_catalog(REGIONAL_CSV.as_bytes()).unwrap();
    RecommendationService::new(
        engine(),
        RegionalCatalog::new(regional),
        RecommendationSettings::default(),
    )
}
