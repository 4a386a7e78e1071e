pub mod classifier;
pub mod crawlers;
pub mod db;
pub mod domain;
pub mod models;
pub mod processing;
pub mod ranking;
pub mod repository;
pub mod scheduler;
pub mod schema;
pub mod server;
