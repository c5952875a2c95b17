use axum::{routing::get, Router};
use crate::state::AppState;
use super::handlers::{index, health, list_articles, article_attribute};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/", get(index))
        .route("/api/articles", get(list_articles))
        .route("/api/articles/:id/:attribute", get(article_attribute))
        .with_state(state)
}
