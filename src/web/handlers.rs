use axum::{extract::{Path, State}, response::Html, Json};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::domain::{article::Article, stamp::Stamp};
use crate::error::{AppError, Result};
use crate::services::visit::VisitTracker;
use crate::state::AppState;
use crate::web::utils::article_list_page;

#[derive(Debug, Serialize)]
pub struct ArticleView {
    pub id: Uuid,
    pub title: String,
    pub created_at: Stamp,
    pub updated_at: Stamp,
    pub novelty: Value,
}

#[derive(Debug, Serialize)]
pub struct AttributeView {
    pub attribute: String,
    pub value: Value,
}

pub async fn health() -> &'static str {
    "ok"
}

pub async fn index(
    State(state): State<AppState>,
    mut tracker: VisitTracker,
) -> (VisitTracker, Html<String>) {
    let views = label_all(&state, &mut tracker).await;
    let prev = tracker.previous_visit();
    (tracker, Html(article_list_page(&views, &prev)))
}

pub async fn list_articles(
    State(state): State<AppState>,
    mut tracker: VisitTracker,
) -> (VisitTracker, Json<Vec<ArticleView>>) {
    let views = label_all(&state, &mut tracker).await;
    (tracker, Json(views))
}

pub async fn article_attribute(
    State(state): State<AppState>,
    Path((id, attribute)): Path<(Uuid, String)>,
    mut tracker: VisitTracker,
) -> Result<(VisitTracker, Json<AttributeView>)> {
    let article = state.catalog.find(id).await.ok_or(AppError::NotFound(id))?;
    let value = state
        .behavior
        .attribute(&article, &attribute, &mut tracker)
        .ok_or_else(|| AppError::UnknownAttribute(attribute.clone()))?;
    Ok((tracker, Json(AttributeView { attribute, value })))
}

async fn label_all(state: &AppState, tracker: &mut VisitTracker) -> Vec<ArticleView> {
    let articles = state.catalog.snapshot().await;
    let views: Vec<ArticleView> = articles
        .into_iter()
        .map(|article| {
            let novelty = state.behavior.novelty(&article, tracker);
            view(article, novelty)
        })
        .collect();
    tracing::info!(
        articles = views.len(),
        prev_visit = tracker.previous_visit_unix(),
        "labelled articles"
    );
    views
}

fn view(article: Article, novelty: Value) -> ArticleView {
    ArticleView {
        id: article.id,
        title: article.title,
        created_at: article.created_at,
        updated_at: article.updated_at,
        novelty,
    }
}
