use crate::{
    error::{ApiError, Result},
    ml::{EmbeddingModel, EmbeddingSettings},
    models::{Diet, Nutrient, NutrientVector, Recipe, RegionalRecipe, NUTRIENT_COUNT},
};
use csv::ReaderBuilder;
use log::info;
use ndarray::{Array1, Array2, ArrayView1};
use serde::Deserialize;
use std::{fs::File, io::Read, path::Path};

#[derive(Debug, Deserialize)]
struct RecipeCsvRecord {
    #[serde(rename = "RecipeId")]
    id: String,
    #[serde(rename = "Name", default)]
    name: Option<String>,
    #[serde(rename = "RecipeCategory", default)]
    category: Option<String>,
    #[serde(rename = "Diet")]
    diet: String,
    #[serde(rename = "Calories")]
    calories: f64,
    #[serde(rename = "FatContent")]
    fat: f64,
    #[serde(rename = "SaturatedFatContent")]
    saturated_fat: f64,
    #[serde(rename = "CholesterolContent")]
    cholesterol: f64,
    #[serde(rename = "SodiumContent")]
    sodium: f64,
    #[serde(rename = "CarbohydrateContent")]
    carbohydrates: f64,
    #[serde(rename = "FiberContent")]
    fiber: f64,
    #[serde(rename = "SugarContent")]
    sugar: f64,
    #[serde(rename = "ProteinContent")]
    protein: f64,
    #[serde(rename = "RecipeIngredientParts", default)]
    ingredient_parts: Option<String>,
    #[serde(rename = "RecipeIngredientQuantities", default)]
    ingredient_quantities: Option<String>,
    #[serde(rename = "RecipeInstructions", default)]
    instructions: Option<String>,
    #[serde(rename = "Images", default)]
    images: Option<String>,
    #[serde(rename = "RecipeServings", default)]
    servings: Option<String>,
}

/// Validate a raw row; `line` is only used for error messages
fn validate_recipe(record: RecipeCsvRecord, line: u64) -> Result<Recipe> {
    let nutrients = NutrientVector::new([
        record.calories,
        record.fat,
        record.saturated_fat,
        record.cholesterol,
        record.sodium,
        record.carbohydrates,
        record.fiber,
        record.sugar,
        record.protein,
    ]);

    if let Some((nutrient, value)) = nutrients.iter().find(|(_, v)| !v.is_finite() || *v < 0.0) {
        return Err(ApiError::CatalogLoad(format!(
            "line {}: {} must be a non-negative number, got {}",
            line,
            nutrient.column(),
            value
        )));
    }

    let diet: Diet = record
        .diet
        .parse()
        .map_err(|e| ApiError::CatalogLoad(format!("line {}: {}", line, e)))?;

    // Servings are informational; anything unparseable falls back downstream
    let servings = record
        .servings
        .and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|s| s.is_finite() && *s > 0.0);

    Ok(Recipe {
        id: record.id.trim().to_string(),
        name: record.name.unwrap_or_default(),
        category: record.category,
        diet,
        nutrients,
        ingredient_parts: record.ingredient_parts,
        ingredient_quantities: record.ingredient_quantities,
        instructions: record.instructions,
        images: record.images,
        servings,
    })
}

/// Read the main catalog. Missing nutrient columns and invalid nutrient or
/// diet values are load errors, never skipped rows.
pub fn read_catalog<R: Read>(reader: R) -> Result<Vec<Recipe>> {
    let mut csv_reader = ReaderBuilder::new().flexible(true).from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    for nutrient in Nutrient::ALL {
        if !headers.iter().any(|h| h.trim() == nutrient.column()) {
            return Err(ApiError::CatalogLoad(format!(
                "missing nutrient column '{}'",
                nutrient.column()
            )));
        }
    }

    let mut recipes = Vec::new();
    for result in csv_reader.deserialize::<RecipeCsvRecord>() {
        let record = result?;
        let line = recipes.len() as u64 + 2;
        recipes.push(validate_recipe(record, line)?);
    }

    Ok(recipes)
}

pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Vec<Recipe>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        ApiError::CatalogLoad(format!("cannot open {}: {}", path.display(), e))
    })?;
    let recipes = read_catalog(file)?;
    info!("Loaded {} recipes from {}", recipes.len(), path.display());
    Ok(recipes)
}

/// Read the regional catalog; every column is optional
pub fn read_regional_catalog<R: Read>(reader: R) -> Result<Vec<RegionalRecipe>> {
    let mut csv_reader = ReaderBuilder::new().flexible(true).from_reader(reader);
    csv_reader
        .deserialize::<RegionalRecipe>()
        .map(|row| row.map_err(ApiError::from))
        .collect()
}

pub fn load_regional_catalog<P: AsRef<Path>>(path: P) -> Result<Vec<RegionalRecipe>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        ApiError::CatalogLoad(format!("cannot open {}: {}", path.display(), e))
    })?;
    let recipes = read_regional_catalog(file)?;
    info!("Loaded {} regional recipes from {}", recipes.len(), path.display());
    Ok(recipes)
}

/// A catalog recipe together with its embedding-derived data
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    recipe: Recipe,
    cluster: usize,
    standardized: Array1<f64>,
}

impl CatalogEntry {
    pub fn new(recipe: Recipe, cluster: usize, standardized: Array1<f64>) -> Self {
        Self {
            recipe,
            cluster,
            standardized,
        }
    }

    pub fn recipe(&self) -> &Recipe {
        &self.recipe
    }

    pub fn cluster(&self) -> usize {
        self.cluster
    }

    pub fn standardized(&self) -> ArrayView1<'_, f64> {
        self.standardized.view()
    }
}

/// The catalog with cluster labels fixed at build time, in catalog order
#[derive(Debug, Clone, Default)]
pub struct LabeledCatalog {
    entries: Vec<CatalogEntry>,
}

impl LabeledCatalog {
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries per cluster label
    pub fn cluster_sizes(&self, n_clusters: usize) -> Vec<usize> {
        let mut sizes = vec![0; n_clusters];
        for entry in &self.entries {
            if let Some(size) = sizes.get_mut(entry.cluster) {
                *size += 1;
            }
        }
        sizes
    }
}

/// Embedding model plus labeled catalog, built once and then read-only
#[derive(Debug, Clone)]
pub struct RecommendationEngine {
    model: EmbeddingModel,
    catalog: LabeledCatalog,
}

impl RecommendationEngine {
    pub fn build(recipes: Vec<Recipe>, settings: &EmbeddingSettings) -> Result<Self> {
        let matrix = Array2::from_shape_fn((recipes.len(), NUTRIENT_COUNT), |(i, j)| {
            recipes[i].nutrients.values()[j]
        });

        let fitted = EmbeddingModel::fit(&matrix, settings)?;

        let entries = recipes
            .into_iter()
            .zip(fitted.labels)
            .enumerate()
            .map(|(i, (recipe, cluster))| {
                CatalogEntry::new(recipe, cluster, fitted.standardized.row(i).to_owned())
            })
            .collect();

        let engine = Self {
            model: fitted.model,
            catalog: LabeledCatalog { entries },
        };

        info!(
            "Recommendation engine ready: {} recipes, cluster sizes {:?}",
            engine.catalog.len(),
            engine.catalog.cluster_sizes(engine.model.n_clusters())
        );

        Ok(engine)
    }

    pub fn model(&self) -> &EmbeddingModel {
        &self.model
    }

    pub fn catalog(&self) -> &LabeledCatalog {
        &self.catalog
    }
}
