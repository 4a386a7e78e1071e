pub mod article;
pub mod candidate;
pub mod headline;
pub mod prediction;
