use std::sync::Arc;

use time::{Duration, OffsetDateTime};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::domain::article::Article;
use crate::domain::stamp::TimestampFormat;

/// In-memory articles the demo server labels. Nothing here is persisted.
#[derive(Clone, Default)]
pub struct Catalog {
    articles: Arc<Mutex<Vec<Article>>>,
}

impl Catalog {
    pub fn new(articles: Vec<Article>) -> Self {
        Self { articles: Arc::new(Mutex::new(articles)) }
    }

    /// A handful of articles spread around `boot`, stamped in `format`.
    pub fn seeded(format: &TimestampFormat, boot: OffsetDateTime) -> Self {
        let at = |ago: Duration| format.stamp_at(boot - ago);
        Self::new(vec![
            Article::new("Welcome aboard", at(Duration::days(90)), at(Duration::days(90))),
            Article::new("Release notes", at(Duration::days(30)), at(Duration::minutes(10))),
            Article::new("Fresh off the press", at(Duration::ZERO), at(Duration::ZERO)),
            Article::new("Archive", at(Duration::days(365)), at(Duration::days(200))),
        ])
    }

    pub async fn push(&self, article: Article) {
        self.articles.lock().await.push(article);
    }

    pub async fn find(&self, id: Uuid) -> Option<Article> {
        self.articles.lock().await.iter().find(|a| a.id == id).cloned()
    }

    pub async fn snapshot(&self) -> Vec<Article> {
        self.articles.lock().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::stamp::Stamp;

    #[tokio::test]
    async fn seeded_articles_use_the_format() {
        let boot = OffsetDateTime::from_unix_timestamp(1_700_000_000).unwrap();
        let catalog = Catalog::seeded(&TimestampFormat::Unix, boot);
        let articles = catalog.snapshot().await;
        assert_eq!(articles.len(), 4);
        assert!(articles.iter().all(|a| matches!(a.created_at, Stamp::Unix(_))));
        assert!(articles.iter().any(|a| a.created_at == Stamp::Unix(1_700_000_000)));
    }

    #[tokio::test]
    async fn find_by_id() {
        let catalog = Catalog::default();
        let article = Article::new("x", Stamp::Unix(1), Stamp::Unix(2));
        let id = article.id;
        catalog.push(article).await;
        assert_eq!(catalog.find(id).await.map(|a| a.title), Some("x".to_owned()));
        assert!(catalog.find(Uuid::new_v4()).await.is_none());
    }
}
