pub mod embedding;
pub mod kmeans;
pub mod pca;
pub mod scaler;

pub use embedding::{EmbeddingModel, EmbeddingSettings, FittedEmbedding};
pub use kmeans::{KMeans, KMeansSettings};
pub use pca::Pca;
pub use scaler::StandardScaler;
