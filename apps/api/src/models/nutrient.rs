use ndarray::Array1;
use serde::{Deserialize, Serialize};
use std::ops::Index;

/// Number of nutrient columns in the catalog schema.
pub const NUTRIENT_COUNT: usize = 9;

/// The fixed nutrient schema, in catalog column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Nutrient {
    Calories,
    Fat,
    SaturatedFat,
    Cholesterol,
    Sodium,
    Carbohydrates,
    Fiber,
    Sugar,
    Protein,
}

impl Nutrient {
    pub const ALL: [Nutrient; NUTRIENT_COUNT] = [
        Nutrient::Calories,
        Nutrient::Fat,
        Nutrient::SaturatedFat,
        Nutrient::Cholesterol,
        Nutrient::Sodium,
        Nutrient::Carbohydrates,
        Nutrient::Fiber,
        Nutrient::Sugar,
        Nutrient::Protein,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Header of the catalog CSV column holding this nutrient
    pub fn column(self) -> &'static str {
        match self {
            Nutrient::Calories => "Calories",
            Nutrient::Fat => "FatContent",
            Nutrient::SaturatedFat => "SaturatedFatContent",
            Nutrient::Cholesterol => "CholesterolContent",
            Nutrient::Sodium => "SodiumContent",
            Nutrient::Carbohydrates => "CarbohydrateContent",
            Nutrient::Fiber => "FiberContent",
            Nutrient::Sugar => "SugarContent",
            Nutrient::Protein => "ProteinContent",
        }
    }

    /// Field name used in request payloads
    pub fn key(self) -> &'static str {
        match self {
            Nutrient::Calories => "calories",
            Nutrient::Fat => "fat",
            Nutrient::SaturatedFat => "saturated_fat",
            Nutrient::Cholesterol => "cholesterol",
            Nutrient::Sodium => "sodium",
            Nutrient::Carbohydrates => "carbohydrates",
            Nutrient::Fiber => "fiber",
            Nutrient::Sugar => "sugar",
            Nutrient::Protein => "protein",
        }
    }
}

/// Nutrient magnitudes in [`Nutrient::ALL`] order.
///
/// Used for catalog rows, user targets and per-nutrient maxima alike.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NutrientVector([f64; NUTRIENT_COUNT]);

impl NutrientVector {
    pub const fn new(values: [f64; NUTRIENT_COUNT]) -> Self {
        Self(values)
    }

    pub fn get(&self, nutrient: Nutrient) -> f64 {
        self.0[nutrient.index()]
    }

    pub fn with(mut self, nutrient: Nutrient, value: f64) -> Self {
        self.0[nutrient.index()] = value;
        self
    }

    pub fn values(&self) -> &[f64; NUTRIENT_COUNT] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = (Nutrient, f64)> + '_ {
        Nutrient::ALL.iter().map(move |&n| (n, self.get(n)))
    }

    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|v| v.is_finite())
    }

    pub fn to_array(&self) -> Array1<f64> {
        Array1::from(self.0.to_vec())
    }
}

impl Index<Nutrient> for NutrientVector {
    type Output = f64;

    fn index(&self, nutrient: Nutrient) -> &f64 {
        &self.0[nutrient.index()]
    }
}
