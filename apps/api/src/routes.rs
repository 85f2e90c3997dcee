use actix_web::{web, HttpResponse};
use utoipa::OpenApi;

use crate::app::ApiDoc;
use crate::handlers::{health_check, recommendations_config};

/// Configure all routes for the API. Paths sit at the root to keep the
/// existing client contract.
pub fn api_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(health_check).configure(recommendations_config);
}

/// Configure OpenAPI documentation JSON endpoint
pub fn openapi_route() -> actix_web::Resource {
    web::resource("/api-docs/openapi.json")
        .route(web::get().to(|| async {
            HttpResponse::Ok()
                .append_header(("Content-Type", "application/json"))
                .json(ApiDoc::openapi())
        }))
        .route(
            web::route()
                .method(actix_web::http::Method::OPTIONS)
                .to(|| async { HttpResponse::Ok().finish() }),
        )
}
