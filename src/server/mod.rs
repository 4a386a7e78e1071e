//! HTTP API consumed by the browser extension.

pub mod error;

use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;

use crate::domain::headline::Headline;
use crate::processing::analysis::AnalysisOutcome;
use crate::processing::{NewsPipeline, NewsRepository};
use crate::server::error::ApiError;

pub fn create_router<R>(pipeline: NewsPipeline<R>) -> Router
where
    R: NewsRepository + Clone + 'static,
{
    Router::new()
        .route("/healthz", get(health_handler))
        .route("/api/receive-url", post(receive_url_handler::<R>))
        .route("/api/headlines", get(headlines_handler::<R>))
        .layer(CorsLayer::permissive())
        .with_state(pipeline)
}

#[derive(Debug, Deserialize)]
pub struct ReceiveUrlRequest {
    pub url: Option<String>,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// Classifies the submitted article and lists similar stored articles.
pub async fn receive_url_handler<R>(
    State(pipeline): State<NewsPipeline<R>>,
    Json(request): Json<ReceiveUrlRequest>,
) -> Result<Json<AnalysisOutcome>, ApiError>
where
    R: NewsRepository + Clone + 'static,
{
    let url = request
        .url
        .map(|url| url.trim().to_string())
        .filter(|url| !url.is_empty())
        .ok_or_else(|| ApiError::InvalidRequest("URL is required".to_string()))?;

    log::info!("Received analysis request for {url}");
    let outcome = pipeline.analyze(&url).await?;
    Ok(Json(outcome))
}

/// Headlines analyzed during the recent window, newest first.
pub async fn headlines_handler<R>(
    State(pipeline): State<NewsPipeline<R>>,
) -> Result<Json<Vec<Headline>>, ApiError>
where
    R: NewsRepository + Clone + 'static,
{
    Ok(Json(pipeline.recent_headlines()?))
}
