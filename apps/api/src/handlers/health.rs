use crate::{models::HealthResponse, services::RecommendationService};
use actix_web::{get, web, HttpResponse};

/// Liveness plus the sizes of the loaded catalogs
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    responses(
        (status = 200, description = "Service is up and both catalogs are loaded", body = HealthResponse)
    )
)]
#[get("/health")]
pub async fn health_check(
    recommendation_service: web::Data<RecommendationService>,
) -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok".to_string(),
        recipes: recommendation_service.recipe_count(),
        regional_recipes: recommendation_service.regional_recipe_count(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}
