use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use ns_core::{Article, ArticleSource, Result};

const DEFAULT_LIMIT: usize = 10;

/// Article source backed by a fixed, per-company list.
#[derive(Debug, Clone)]
pub struct InMemorySource {
    articles: Arc<RwLock<HashMap<String, Vec<Article>>>>,
    limit: usize,
}

impl Default for InMemorySource {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemorySource {
    pub fn new() -> Self {
        Self {
            articles: Arc::new(RwLock::new(HashMap::new())),
            limit: DEFAULT_LIMIT,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Builder-style registration, for use before the source is shared.
    pub fn with_articles(self, company_name: &str, articles: Vec<Article>) -> Self {
        if let Ok(mut map) = self.articles.try_write() {
            map.insert(company_name.to_lowercase(), articles);
        }
        self
    }

    pub async fn insert(&self, company_name: &str, articles: Vec<Article>) {
        let mut map = self.articles.write().await;
        map.insert(company_name.to_lowercase(), articles);
    }

    /// A small offline data set for demos.
    pub fn sample() -> Self {
        Self::new()
            .with_articles(
                "Acme",
                vec![
                    Article::new(
                        "Acme reports strong growth and record profits",
                        "https://news.example.com/acme/growth",
                    ),
                    Article::new(
                        "Acme faces lawsuit over bad product safety",
                        "https://news.example.com/acme/lawsuit",
                    ),
                    Article::new(
                        "Acme opens office in Berlin",
                        "https://news.example.com/acme/berlin",
                    ),
                ],
            )
            .with_articles(
                "Globex",
                vec![
                    Article::new(
                        "Globex shares fall after weak quarter",
                        "https://news.example.com/globex/quarter",
                    ),
                    Article::new(
                        "Globex announces great new partnership",
                        "https://news.example.com/globex/partnership",
                    ),
                ],
            )
    }
}

#[async_trait]
impl ArticleSource for InMemorySource {
    fn name(&self) -> &str {
        "memory"
    }

    async fn fetch(&self, company_name: &str) -> Result<Vec<Article>> {
        let map = self.articles.read().await;
        Ok(map
            .get(&company_name.to_lowercase())
            .map(|articles| articles.iter().take(self.limit).cloned().collect())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_source_lookup_is_case_insensitive() {
        let source = InMemorySource::sample();
        let articles = source.fetch("ACME").await.unwrap();
        assert_eq!(articles.len(), 3);
        assert_eq!(articles[0].title, "Acme reports strong growth and record profits");
    }

    #[tokio::test]
    async fn test_memory_source_unknown_company_is_empty() {
        let source = InMemorySource::sample();
        assert!(source.fetch("Initech").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_memory_source_respects_limit() {
        let articles = (0..15)
            .map(|i| Article::new(format!("Story {}", i), format!("https://example.com/{}", i)))
            .collect();
        let source = InMemorySource::new().with_limit(10);
        source.insert("Initech", articles).await;

        let fetched = source.fetch("initech").await.unwrap();
        assert_eq!(fetched.len(), 10);
        assert_eq!(fetched[9].title, "Story 9");
    }
}
