use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::db::Repository;
use crate::error::Result;
use crate::models::{NewsItem, RawNews, UpsertOutcome};

const TRENDING_LIMIT: u32 = 20;
const CATEGORY_LIMIT: u32 = 50;

#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/news/raw", post(ingest_raw))
        .route("/api/trending", get(trending))
        .route("/api/category/:cat", get(by_category))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> &'static str {
    "OK"
}

/// POST /api/news/raw
/// Ingest one raw item; responds with exactly one of the three outcomes.
async fn ingest_raw(
    State(state): State<AppState>,
    Json(raw): Json<RawNews>,
) -> Result<Json<Value>> {
    let outcome = state.repo.ingest(raw).await?;
    let body = match outcome {
        UpsertOutcome::Skipped => json!({ "skipped": true }),
        UpsertOutcome::Saved => json!({ "saved": true }),
        UpsertOutcome::Updated => json!({ "updated": true }),
    };
    Ok(Json(body))
}

/// GET /api/trending
async fn trending(State(state): State<AppState>) -> Result<Json<Vec<NewsItem>>> {
    let items = state.repo.top_trending(TRENDING_LIMIT).await?;
    Ok(Json(items))
}

/// GET /api/category/:cat
async fn by_category(
    State(state): State<AppState>,
    Path(cat): Path<String>,
) -> Result<Json<Vec<NewsItem>>> {
    let items = state.repo.top_by_category(&cat, CATEGORY_LIMIT).await?;
    Ok(Json(items))
}
