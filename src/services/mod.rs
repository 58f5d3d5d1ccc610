pub mod extractor;
pub mod generator;
pub mod prompt;
pub mod providers;
pub mod recommendations;
pub mod resolver;

pub use recommendations::RecommendationPipeline;
