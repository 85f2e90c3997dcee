use crate::{
    error::{ApiError, Result},
    ml::EmbeddingSettings,
    services::RecommendationSettings,
};
use config::{builder::DefaultState, ConfigBuilder, Environment};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub catalog_path: PathBuf,
    pub regional_catalog_path: PathBuf,
    pub n_components: usize,
    pub n_clusters: usize,
    pub random_seed: u64,
    pub max_iter: usize,
    pub n_init: usize,
    pub tolerance: f64,
    pub top_k: usize,
    pub regional_limit: usize,
}

impl Config {
    /// Load from `.env` and `APP_*` environment variables on top of the
    /// built-in defaults. A bare `PORT` wins over `APP_PORT` for hosts
    /// that inject it.
    pub fn load() -> Result<Self> {
        dotenv::dotenv().ok();

        let port = std::env::var("PORT").ok();
        let settings = Self::defaults()?
            .add_source(Environment::with_prefix("APP").try_parsing(true))
            .set_override_option("port", port)?
            .build()?;

        let config: Config = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>> {
        Ok(config::Config::builder()
            .set_default("host", "127.0.0.1")?
            .set_default("port", 5000_i64)?
            .set_default("catalog_path", "data/recipes.csv")?
            .set_default("regional_catalog_path", "data/regional_recipes.csv")?
            .set_default("n_components", 5_i64)?
            .set_default("n_clusters", 10_i64)?
            .set_default("random_seed", 42_i64)?
            .set_default("max_iter", 300_i64)?
            .set_default("n_init", 1_i64)?
            .set_default("tolerance", 1e-4)?
            .set_default("top_k", 12_i64)?
            .set_default("regional_limit", 9_i64)?)
    }

    pub fn validate(&self) -> Result<()> {
        let counts = [
            ("n_components", self.n_components),
            ("n_clusters", self.n_clusters),
            ("max_iter", self.max_iter),
            ("n_init", self.n_init),
            ("top_k", self.top_k),
            ("regional_limit", self.regional_limit),
        ];
        if let Some((name, _)) = counts.iter().find(|(_, value)| *value == 0) {
            return Err(ApiError::Configuration(format!("{} must be at least 1", name)));
        }
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(ApiError::Configuration(format!(
                "tolerance must be a non-negative number, got {}",
                self.tolerance
            )));
        }
        Ok(())
    }

    pub fn embedding_settings(&self) -> EmbeddingSettings {
        EmbeddingSettings {
            n_components: self.n_components,
            n_clusters: self.n_clusters,
            max_iter: self.max_iter,
            n_init: self.n_init,
            tolerance: self.tolerance,
            random_seed: self.random_seed,
        }
    }

    pub fn recommendation_settings(&self) -> RecommendationSettings {
        RecommendationSettings {
            top_k: self.top_k,
            regional_limit: self.regional_limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn built(overrides: &[(&str, &str)]) -> Result<Config> {
        let mut builder = Config::defaults()?;
        for (key, value) in overrides {
            builder = builder.set_override(*key, *value)?;
        }
        let config: Config = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    #[test]
    fn test_defaults() {
        let config = built(&[]).unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 5000);
        assert_eq!(config.catalog_path, PathBuf::from("data/recipes.csv"));
        assert_eq!(config.embedding_settings(), EmbeddingSettings::default());
        assert_eq!(
            config.recommendation_settings(),
            RecommendationSettings::default()
        );
    }

    #[test]
    fn test_string_overrides_are_parsed() {
        let config = built(&[("n_clusters", "4"), ("tolerance", "0.001"), ("port", "8080")]).unwrap();
        assert_eq!(config.n_clusters, 4);
        assert_eq!(config.tolerance, 0.001);
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_invalid_values_are_fatal() {
        assert!(matches!(
            built(&[("n_clusters", "0")]),
            Err(ApiError::Configuration(_))
        ));
        assert!(matches!(
            built(&[("n_components", "many")]),
            Err(ApiError::Configuration(_))
        ));
        assert!(matches!(
            built(&[("tolerance", "-1")]),
            Err(ApiError::Configuration(_))
        ));
    }
}
