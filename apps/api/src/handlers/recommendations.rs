use crate::{
    error::{ApiError, Result},
    models::{
        CalorieResponse, ErrorResponse, NutritionRequest, PersonalInfoRequest,
        RecommendationResponse, RegionalRecommendationResponse,
    },
    services::{
        nutrition::{calculate_bmi, calculate_calories, CalorieTargets, PersonalProfile},
        RecommendationService,
    },
};
use actix_web::{
    web::{self, Json},
    HttpResponse,
};
use tracing::info;

pub fn recommendations_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/recommend-by-nutrition").route(web::post().to(recommend_by_nutrition)),
    )
    .service(
        web::resource("/recommend-by-personal-info")
            .route(web::post().to(recommend_by_personal_info)),
    )
    .service(
        web::resource("/recommend-by-personal-india")
            .route(web::post().to(recommend_by_personal_india)),
    )
    .service(web::resource("/calories").route(web::post().to(calories)));
}

/// Validated profile plus its calorie targets
fn profile_targets(request: &PersonalInfoRequest) -> Result<(PersonalProfile, CalorieTargets)> {
    let profile = PersonalProfile::try_from(request)?;
    let targets = calculate_calories(&profile);
    info!(
        "Profile resolved to {:.2} kcal/day, {:.2} kcal/meal ({})",
        targets.daily,
        targets.per_meal,
        profile.activity.label()
    );
    Ok((profile, targets))
}

/// Run a CPU-bound pipeline call off the async workers
async fn blocking<T, F>(job: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    web::block(job)
        .await
        .map_err(|e| ApiError::InternalError(format!("recommendation task failed: {}", e)))?
}

/// Recommend recipes close to explicit nutrient targets
#[utoipa::path(
    post,
    path = "/recommend-by-nutrition",
    tag = "Recommendations",
    request_body = NutritionRequest,
    responses(
        (status = 200, description = "Recipes ranked by nutritional similarity; empty when nothing satisfies the constraints", body = RecommendationResponse),
        (status = 400, description = "Malformed request body", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    summary = "Recommend recipes by nutrient targets",
    description = "Every nutrient target doubles as a maximum. Missing or non-numeric targets fall back to defaults. Ingredient lists are comma-separated and matched case-insensitively."
)]
pub async fn recommend_by_nutrition(
    request: Json<NutritionRequest>,
    recommendation_service: web::Data<RecommendationService>,
) -> Result<HttpResponse> {
    let query = request.to_query(recommendation_service.settings().top_k);
    let service = recommendation_service.into_inner();

    let recommendations = blocking(move || service.recommend(&query)).await?;

    Ok(HttpResponse::Ok().json(RecommendationResponse { recommendations }))
}

/// Recommend recipes for a personal profile
#[utoipa::path(
    post,
    path = "/recommend-by-personal-info",
    tag = "Recommendations",
    request_body = PersonalInfoRequest,
    responses(
        (status = 200, description = "Recipes ranked against the profile's per-meal targets", body = RecommendationResponse),
        (status = 400, description = "Missing or invalid profile fields", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    summary = "Recommend recipes by personal profile",
    description = "Derives per-meal calories from weight, height, age, gender and activity level, then searches the main catalog with fixed limits for the other nutrients."
)]
pub async fn recommend_by_personal_info(
    request: Json<PersonalInfoRequest>,
    recommendation_service: web::Data<RecommendationService>,
) -> Result<HttpResponse> {
    let (_, targets) = profile_targets(&request)?;
    let query = request.to_query(targets.per_meal, recommendation_service.settings().top_k);
    let service = recommendation_service.into_inner();

    let recommendations = blocking(move || service.recommend(&query)).await?;

    Ok(HttpResponse::Ok().json(RecommendationResponse { recommendations }))
}

/// Recommend regional recipes for a personal profile
#[utoipa::path(
    post,
    path = "/recommend-by-personal-india",
    tag = "Recommendations",
    request_body = PersonalInfoRequest,
    responses(
        (status = 200, description = "Regional recipes under the per-meal calorie bound, highest calories first", body = RegionalRecommendationResponse),
        (status = 400, description = "Missing or invalid profile fields", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    summary = "Recommend regional recipes by personal profile"
)]
pub async fn recommend_by_personal_india(
    request: Json<PersonalInfoRequest>,
    recommendation_service: web::Data<RecommendationService>,
) -> Result<HttpResponse> {
    let (_, targets) = profile_targets(&request)?;
    let query = request.to_regional_query(targets.per_meal);

    let recommendations = recommendation_service.recommend_regional(&query)?;

    Ok(HttpResponse::Ok().json(RegionalRecommendationResponse { recommendations }))
}

/// BMI and calorie targets for a personal profile
#[utoipa::path(
    post,
    path = "/calories",
    tag = "Nutrition",
    request_body = PersonalInfoRequest,
    responses(
        (status = 200, description = "Derived energy figures", body = CalorieResponse),
        (status = 400, description = "Missing or invalid profile fields", body = ErrorResponse),
    ),
    summary = "Calculate BMI and calorie targets"
)]
pub async fn calories(request: Json<PersonalInfoRequest>) -> Result<HttpResponse> {
    let (profile, targets) = profile_targets(&request)?;

    Ok(HttpResponse::Ok().json(CalorieResponse {
        bmi: calculate_bmi(profile.weight_kg, profile.height_cm),
        daily_calories: targets.daily,
        calories_per_meal: targets.per_meal,
        activity_level: profile.activity.label().to_string(),
    }))
}
