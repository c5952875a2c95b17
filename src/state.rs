use crate::config::NoveltySettings;
use crate::services::{behavior::NoveltyBehavior, catalog::Catalog};
use axum::extract::FromRef;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<NoveltySettings>,
    pub behavior: NoveltyBehavior,
    pub catalog: Catalog,
}

impl AppState {
    pub fn new(settings: NoveltySettings, catalog: Catalog) -> Self {
        let settings = Arc::new(settings);
        Self { behavior: NoveltyBehavior::new(settings.clone()), settings, catalog }
    }
}

impl FromRef<AppState> for Arc<NoveltySettings> {
    fn from_ref(state: &AppState) -> Self {
        state.settings.clone()
    }
}
