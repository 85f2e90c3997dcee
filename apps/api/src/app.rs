use crate::{
    config::Config,
    error::{ApiError, Result},
    handlers,
    models::{
        CalorieResponse, ErrorResponse, HealthResponse, NutritionRequest, PersonalInfoRequest,
        RecommendationResponse, RecommendedRecipe, RegionalRecommendation,
        RegionalRecommendationResponse,
    },
    routes::{api_routes, openapi_route},
    services::{
        load_catalog, load_regional_catalog, RecommendationEngine, RecommendationService,
        RegionalCatalog,
    },
};
use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::Context;
use log::info;
use std::net::TcpListener;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Recipe Recommender API",
        description = "Nutrition-aware recipe recommendations over a clustered nutrient embedding"
    ),
    paths(
        handlers::recommendations::recommend_by_nutrition,
        handlers::recommendations::recommend_by_personal_info,
        handlers::recommendations::recommend_by_personal_india,
        handlers::recommendations::calories,
        handlers::health::health_check,
    ),
    components(schemas(
        NutritionRequest,
        PersonalInfoRequest,
        RecommendationResponse,
        RecommendedRecipe,
        RegionalRecommendationResponse,
        RegionalRecommendation,
        CalorieResponse,
        HealthResponse,
        ErrorResponse,
    )),
    tags(
        (name = "Recommendations", description = "Recipe recommendation endpoints"),
        (name = "Nutrition", description = "Body metric helpers"),
        (name = "System", description = "Service status"),
    )
)]
pub struct ApiDoc;

/// Routes plus the JSON extractor config; malformed bodies become 400s
pub fn configure(cfg: &mut web::ServiceConfig) {
    let json_config = web::JsonConfig::default()
        .error_handler(|err, _req| ApiError::InvalidInput(err.to_string()).into());

    cfg.app_data(json_config)
        .configure(api_routes)
        .service(openapi_route());
}

/// Load both catalogs and fit the embedding on a blocking thread
pub async fn build_service(config: &Config) -> Result<RecommendationService> {
    let config = config.clone();

    tokio::task::spawn_blocking(move || -> Result<RecommendationService> {
        let recipes = load_catalog(&config.catalog_path)?;
        let regional = load_regional_catalog(&config.regional_catalog_path)?;
        let engine = RecommendationEngine::build(recipes, &config.embedding_settings())?;

        Ok(RecommendationService::new(
            engine,
            RegionalCatalog::new(regional),
            config.recommendation_settings(),
        ))
    })
    .await
    .context("Catalog build task failed")?
}

pub struct Application {
    port: u16,
    host: String,
    config: Config,
}

impl Application {
    /// Create a new application instance
    pub fn new(config: &Config) -> Self {
        Self {
            port: config.port,
            host: config.host.clone(),
            config: config.clone(),
        }
    }

    /// Build and run the server
    pub async fn run(&self) -> Result<()> {
        let bind_address = format!("{}:{}", self.host, self.port);
        let listener = TcpListener::bind(&bind_address)?;
        info!("Starting server at http://{}", bind_address);

        self.run_with_listener(listener).await
    }

    /// Run the server with a specific TCP listener
    /// This is useful for testing where we want to use a random port
    pub async fn run_with_listener(&self, listener: TcpListener) -> Result<()> {
        info!("Building recommendation engine...");
        let recommendation_service = web::Data::new(build_service(&self.config).await?);

        HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header();

            App::new()
                .wrap(cors)
                .wrap(Logger::default())
                .app_data(recommendation_service.clone())
                .configure(configure)
        })
        .listen(listener)?
        .run()
        .await?;

        Ok(())
    }
}
