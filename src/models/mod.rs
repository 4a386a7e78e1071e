pub mod article;
pub mod config;
pub mod headline;
pub mod prediction;
