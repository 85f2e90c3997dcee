//! Body-metric helpers behind the profile-driven endpoints: BMI, basal
//! metabolic rate (Mifflin-St Jeor) and per-meal calorie targets.

use crate::{
    error::{ApiError, Result},
    models::PersonalInfoRequest,
};
use serde::Serialize;
use tracing::warn;

/// Daily deficit per unit of requested weekly weight loss
pub const KCAL_PER_WEIGHT_LOSS_UNIT: f64 = 500.0;
pub const DEFAULT_MEALS_PER_DAY: u32 = 3;

/// Recognised activity levels and their energy multipliers.
///
/// Labels are matched case-insensitively. An unrecognised label resolves to
/// [`ActivityLevel::FALLBACK`] and is logged, never rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ActivityLevel {
    Sedentary,
    LightlyActive,
    ModeratelyActive,
    VeryActive,
    SuperActive,
}

impl ActivityLevel {
    pub const ALL: [ActivityLevel; 5] = [
        ActivityLevel::Sedentary,
        ActivityLevel::LightlyActive,
        ActivityLevel::ModeratelyActive,
        ActivityLevel::VeryActive,
        ActivityLevel::SuperActive,
    ];

    pub const FALLBACK: ActivityLevel = ActivityLevel::ModeratelyActive;

    pub fn label(self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::LightlyActive => "lightly active",
            ActivityLevel::ModeratelyActive => "moderately active",
            ActivityLevel::VeryActive => "very active",
            ActivityLevel::SuperActive => "super active",
        }
    }

    pub fn multiplier(self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::LightlyActive => 1.375,
            ActivityLevel::ModeratelyActive => 1.55,
            ActivityLevel::VeryActive => 1.725,
            ActivityLevel::SuperActive => 1.9,
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        let wanted = label.trim().to_lowercase();
        Self::ALL.into_iter().find(|level| level.label() == wanted)
    }

    pub fn resolve(label: &str) -> Self {
        Self::from_label(label).unwrap_or_else(|| {
            warn!(
                "Unrecognised activity level '{}', using '{}'",
                label,
                Self::FALLBACK.label()
            );
            Self::FALLBACK
        })
    }
}

/// Selects the BMR constant: +5 for male, -161 otherwise
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn from_label(label: &str) -> Self {
        if label.trim().eq_ignore_ascii_case("male") {
            Gender::Male
        } else {
            Gender::Female
        }
    }

    fn bmr_constant(self) -> f64 {
        match self {
            Gender::Male => 5.0,
            Gender::Female => -161.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PersonalProfile {
    pub weight_kg: f64,
    pub height_cm: f64,
    pub age: u32,
    pub gender: Gender,
    pub activity: ActivityLevel,
    pub weight_loss: f64,
    pub meals_per_day: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalorieTargets {
    pub daily: f64,
    pub per_meal: f64,
}

fn required(value: Option<f64>, field: &str) -> Result<f64> {
    value.ok_or_else(|| ApiError::InvalidInput(format!("{} is required and must be numeric", field)))
}

impl TryFrom<&PersonalInfoRequest> for PersonalProfile {
    type Error = ApiError;

    fn try_from(request: &PersonalInfoRequest) -> Result<Self> {
        let weight_kg = required(request.weight, "weight")?;
        let height_cm = required(request.height, "height")?;
        let age = required(request.age, "age")?;
        let gender = request
            .gender
            .as_deref()
            .ok_or_else(|| ApiError::InvalidInput("gender is required".into()))?;
        let activity = request
            .activity_level
            .as_deref()
            .ok_or_else(|| ApiError::InvalidInput("activity_level is required".into()))?;

        if weight_kg <= 0.0 || height_cm <= 0.0 {
            return Err(ApiError::InvalidInput(
                "weight and height must be positive".into(),
            ));
        }
        if age < 0.0 {
            return Err(ApiError::InvalidInput("age must not be negative".into()));
        }

        let meals_per_day = match request.meals_per_day {
            None => DEFAULT_MEALS_PER_DAY,
            Some(m) if m >= 1.0 => m as u32,
            Some(m) => {
                return Err(ApiError::InvalidInput(format!(
                    "meals_per_day must be at least 1, got {}",
                    m
                )))
            }
        };

        Ok(PersonalProfile {
            weight_kg,
            height_cm,
            age: age as u32,
            gender: Gender::from_label(gender),
            activity: ActivityLevel::resolve(activity),
            weight_loss: request.weight_loss.unwrap_or(0.0),
            meals_per_day,
        })
    }
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Body mass index from kilograms and centimetres, rounded to 2 decimals
pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> f64 {
    let height_m = height_cm / 100.0;
    round2(weight_kg / (height_m * height_m))
}

/// Mifflin-St Jeor basal metabolic rate
pub fn basal_metabolic_rate(weight_kg: f64, height_cm: f64, age: u32, gender: Gender) -> f64 {
    10.0 * weight_kg + 6.25 * height_cm - 5.0 * age as f64 + gender.bmr_constant()
}

/// Daily and per-meal calorie targets, each rounded to 2 decimals
pub fn calculate_calories(profile: &PersonalProfile) -> CalorieTargets {
    let bmr = basal_metabolic_rate(
        profile.weight_kg,
        profile.height_cm,
        profile.age,
        profile.gender,
    );
    let daily =
        bmr * profile.activity.multiplier() - profile.weight_loss * KCAL_PER_WEIGHT_LOSS_UNIT;

    CalorieTargets {
        daily: round2(daily),
        per_meal: round2(daily / profile.meals_per_day.max(1) as f64),
    }
}
