use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, warn};

use ns_core::config::NewsConfig;
use ns_core::{Article, ArticleSource, Error, Result};

/// NewsAPI marks withdrawn articles with this title.
const REMOVED_PLACEHOLDER: &str = "[Removed]";

#[derive(Debug, Deserialize)]
struct EverythingResponse {
    #[serde(default)]
    status: String,
    #[serde(default, rename = "totalResults")]
    total_results: u64,
    #[serde(default)]
    articles: Vec<NewsApiArticle>,
}

#[derive(Debug, Deserialize)]
struct NewsApiArticle {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    source: Option<NewsApiSourceRef>,
    #[serde(default, rename = "publishedAt")]
    published_at: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NewsApiSourceRef {
    #[serde(default)]
    name: Option<String>,
}

impl NewsApiArticle {
    fn into_article(self) -> Option<Article> {
        let title = self.title.filter(|t| !t.trim().is_empty() && t != REMOVED_PLACEHOLDER)?;
        let link = self.url.filter(|u| !u.trim().is_empty())?;
        let published_at = self
            .published_at
            .as_deref()
            .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
            .map(|dt| dt.with_timezone(&Utc));

        Some(Article {
            title,
            link,
            source: self.source.and_then(|s| s.name),
            published_at,
        })
    }
}

pub struct NewsApiSource {
    client: Client,
    base_url: String,
    api_key: String,
    max_articles: usize,
    language: Option<String>,
    sort_by: Option<String>,
}

impl NewsApiSource {
    pub fn new(config: &NewsConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| Error::Config("a NewsAPI key is required (set NEWS_API_KEY)".to_string()))?
            .to_string();

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("news-sentiment/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
            max_articles: config.max_articles,
            language: config.language.clone(),
            sort_by: config.sort_by.clone(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/v2/everything", self.base_url)
    }
}

impl fmt::Debug for NewsApiSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewsApiSource")
            .field("client", &"<reqwest::Client>")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("max_articles", &self.max_articles)
            .finish()
    }
}

#[async_trait]
impl ArticleSource for NewsApiSource {
    fn name(&self) -> &str {
        "NewsAPI"
    }

    async fn fetch(&self, company_name: &str) -> Result<Vec<Article>> {
        debug!(company = %company_name, "Querying NewsAPI");

        let mut params: Vec<(&str, &str)> = vec![("q", company_name), ("apiKey", self.api_key.as_str())];
        if let Some(language) = &self.language {
            params.push(("language", language.as_str()));
        }
        if let Some(sort_by) = &self.sort_by {
            params.push(("sortBy", sort_by.as_str()));
        }

        let response = self
            .client
            .get(self.endpoint())
            .query(&params)
            .send()
            .await
            .map_err(|e| Error::from_transport("fetch", e))?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = %status, company = %company_name, "NewsAPI returned an error");
            return Err(Error::UpstreamFetch { status: status.as_u16() });
        }

        let body: EverythingResponse = response
            .json()
            .await
            .map_err(|e| Error::from_transport("fetch", e))?;
        debug!(status = %body.status, total = body.total_results, "NewsAPI response decoded");

        let articles: Vec<Article> = body
            .articles
            .into_iter()
            .take(self.max_articles)
            .filter_map(NewsApiArticle::into_article)
            .collect();

        info!("📰 Fetched {} articles for {}", articles.len(), company_name);
        Ok(articles)
    }
}
