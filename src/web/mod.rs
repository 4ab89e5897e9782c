use axum::{middleware::from_fn, response::Json, routing::get, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::PriceFinder;

pub mod handlers;
pub mod middleware;

pub use handlers::find_product;

#[derive(Clone)]
pub struct AppState {
    pub finder: Arc<PriceFinder>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct FindParams {
    /// Overrides `scraper.offer_limit` for one request.
    pub limit: Option<usize>,
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/find/:search", get(find_product))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                        .on_response(DefaultOnResponse::new().level(Level::INFO)),
                )
                .layer(from_fn(middleware::request_logging))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now(),
        "version": env!("CARGO_PKG_VERSION"),
        "service": "offer-finder"
    }))
}
