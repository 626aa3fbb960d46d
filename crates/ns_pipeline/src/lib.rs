use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use futures::future::try_join_all;
use tracing::{info, warn};

use ns_core::config::PipelineConfig;
use ns_core::{
    Article, ArticleSource, AudioArtifact, Error, ProcessedArticle, Query, Report, Result,
    SentimentCounts,
};
use ns_inference::SentimentClassifier;
use ns_speech::SummarySpeaker;

pub mod aggregate;
pub mod filter;

pub use aggregate::{aggregate, render_report};
pub use filter::filter_articles;

/// Everything produced for one company once articles have been classified.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub company: String,
    pub articles: Vec<ProcessedArticle>,
    pub counts: SentimentCounts,
    pub report: Report,
}

impl Analysis {
    pub fn total(&self) -> usize {
        self.articles.len()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PipelineOutcome {
    /// The provider returned nothing for the company.
    NoArticles,
    /// Articles were found but none matched the keyword.
    NoMatches { keyword: String },
    Analyzed(Analysis),
}

pub struct Pipeline {
    source: Arc<dyn ArticleSource>,
    classifier: SentimentClassifier,
    speaker: Option<SummarySpeaker>,
    config: PipelineConfig,
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("source", &self.source.name())
            .field("classifier", &self.classifier)
            .field("speaker", &self.speaker)
            .field("config", &self.config)
            .finish()
    }
}

async fn bounded<T>(limit: Duration, stage: &'static str, fut: impl Future<Output = Result<T>>) -> Result<T> {
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => {
            warn!("⏱️ {} exceeded {:?}", stage, limit);
            Err(Error::UpstreamTimeout { stage })
        }
    }
}

impl Pipeline {
    pub fn new(source: Arc<dyn ArticleSource>, classifier: SentimentClassifier, config: PipelineConfig) -> Self {
        Self {
            source,
            classifier,
            speaker: None,
            config,
        }
    }

    pub fn with_speaker(mut self, speaker: SummarySpeaker) -> Self {
        self.speaker = Some(speaker);
        self
    }

    pub fn speaker(&self) -> Option<&SummarySpeaker> {
        self.speaker.as_ref()
    }

    pub async fn fetch(&self, company_name: &str) -> Result<Vec<Article>> {
        bounded(self.config.fetch_timeout(), "fetch", self.source.fetch(company_name)).await
    }

    /// Classify every article; results keep the input order.
    pub async fn classify_all(&self, articles: Vec<Article>) -> Result<Vec<ProcessedArticle>> {
        let limit = self.config.classify_timeout();
        let tasks = articles.into_iter().map(|article| async move {
            let sentiment = bounded(limit, "classify", self.classifier.classify(&article.title)).await?;
            Ok::<_, Error>(ProcessedArticle::new(article, sentiment))
        });
        try_join_all(tasks).await
    }

    pub async fn run(&self, query: &Query) -> Result<PipelineOutcome> {
        info!("🔎 Fetching news for {}", query.company_name);
        let articles = self.fetch(&query.company_name).await?;
        if articles.is_empty() {
            info!("📭 No articles found for {}", query.company_name);
            return Ok(PipelineOutcome::NoArticles);
        }

        let articles = match &query.filter_keyword {
            Some(keyword) => {
                let filtered = filter_articles(&articles, keyword);
                info!("🧹 {} of {} articles match '{}'", filtered.len(), articles.len(), keyword);
                if filtered.is_empty() {
                    return Ok(PipelineOutcome::NoMatches {
                        keyword: keyword.clone(),
                    });
                }
                filtered
            }
            None => articles,
        };

        info!("🧠 Classifying {} articles with {}", articles.len(), self.classifier.scorer_name());
        let processed = self.classify_all(articles).await?;
        let (counts, report) = aggregate(&processed);
        info!(
            "📊 {}: {} positive, {} negative, {} neutral",
            query.company_name, counts.positive, counts.negative, counts.neutral
        );

        Ok(PipelineOutcome::Analyzed(Analysis {
            company: query.company_name.clone(),
            articles: processed,
            counts,
            report,
        }))
    }

    /// Synthesize the spoken summary of an analysis. Failure leaves the
    /// analysis untouched.
    pub async fn speak(&self, analysis: &Analysis) -> Result<AudioArtifact> {
        let speaker = self
            .speaker
            .as_ref()
            .ok_or_else(|| Error::Config("speech synthesis is not configured".to_string()))?;
        bounded(
            self.config.synthesize_timeout(),
            "synthesize",
            speaker.speak(&analysis.company, &analysis.counts, analysis.total()),
        )
        .await
    }
}

pub mod prelude {
    pub use super::{aggregate, filter_articles, Analysis, Pipeline, PipelineOutcome};
    pub use ns_core::{Article, Error, ProcessedArticle, Query, Result, SentimentCounts, SentimentLabel};
}
