use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use ns_core::{Article, AudioArtifact, ProcessedArticle, Query, SentimentCounts};
use ns_pipeline::{Analysis, PipelineOutcome};

use crate::error::ApiError;
use crate::AppState;

pub const NO_ARTICLES_MESSAGE: &str = "No news articles found.";
pub const TTS_SUCCESS_MESSAGE: &str = "TTS audio generated successfully";

pub fn no_matches_message(keyword: &str) -> String {
    format!("No articles found related to '{}'.", keyword)
}

pub fn audio_reference(artifact: &AudioArtifact) -> String {
    format!("/audio/{}", artifact.file_name())
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsRequest {
    #[serde(default, alias = "company_name")]
    pub company_name: String,
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub speak: bool,
}

impl NewsRequest {
    fn to_query(&self) -> Result<Query, ApiError> {
        Ok(Query::new(&self.company_name, self.query.as_deref())?)
    }
}

#[derive(Debug, Serialize)]
pub struct ArticleLink {
    pub title: String,
    pub link: String,
}

impl From<Article> for ArticleLink {
    fn from(article: Article) -> Self {
        Self {
            title: article.title,
            link: article.link,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct NewsListing {
    pub company: String,
    pub articles: Vec<ArticleLink>,
}

#[derive(Debug, Serialize)]
pub struct ArticleRow {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Sentiment")]
    pub sentiment: String,
    #[serde(rename = "Link")]
    pub link: String,
}

impl From<&ProcessedArticle> for ArticleRow {
    fn from(article: &ProcessedArticle) -> Self {
        Self {
            title: article.title().to_string(),
            sentiment: article.sentiment.to_string(),
            link: article.link().to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisBody {
    pub company: String,
    pub total_articles: usize,
    pub sentiment_counts: SentimentCounts,
    pub sentiment_report: String,
    pub articles: Vec<ArticleRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_file_reference: Option<String>,
}

impl From<&Analysis> for AnalysisBody {
    fn from(analysis: &Analysis) -> Self {
        Self {
            company: analysis.company.clone(),
            total_articles: analysis.total(),
            sentiment_counts: analysis.counts,
            sentiment_report: analysis.report.as_str().to_string(),
            articles: analysis.articles.iter().map(ArticleRow::from).collect(),
            audio_file_reference: None,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum FetchNewsResponse {
    Message { message: String },
    Analysis(AnalysisBody),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TtsResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_file_reference: Option<String>,
}

fn empty_outcome_message(outcome: &PipelineOutcome) -> Option<String> {
    match outcome {
        PipelineOutcome::NoArticles => Some(NO_ARTICLES_MESSAGE.to_string()),
        PipelineOutcome::NoMatches { keyword } => Some(no_matches_message(keyword)),
        PipelineOutcome::Analyzed(_) => None,
    }
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn get_news(
    State(state): State<Arc<AppState>>,
    Path(company_name): Path<String>,
) -> Result<Json<NewsListing>, ApiError> {
    let query = Query::new(&company_name, None)?;
    let articles = state.pipeline.fetch(&query.company_name).await?;
    Ok(Json(NewsListing {
        company: query.company_name,
        articles: articles.into_iter().map(ArticleLink::from).collect(),
    }))
}

pub async fn fetch_news(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewsRequest>, JsonRejection>,
) -> Result<Json<FetchNewsResponse>, ApiError> {
    let Json(request) = payload?;
    let query = request.to_query()?;
    let outcome = state.pipeline.run(&query).await?;

    let analysis = match outcome {
        PipelineOutcome::Analyzed(analysis) => analysis,
        other => {
            let message = empty_outcome_message(&other).unwrap_or_default();
            return Ok(Json(FetchNewsResponse::Message { message }));
        }
    };

    let mut body = AnalysisBody::from(&analysis);
    if request.speak {
        let artifact = state.pipeline.speak(&analysis).await?;
        body.audio_file_reference = Some(audio_reference(&artifact));
    }
    Ok(Json(FetchNewsResponse::Analysis(body)))
}

pub async fn generate_tts(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewsRequest>, JsonRejection>,
) -> Result<Json<TtsResponse>, ApiError> {
    let Json(request) = payload?;
    let query = request.to_query()?;
    let outcome = state.pipeline.run(&query).await?;

    let analysis = match outcome {
        PipelineOutcome::Analyzed(analysis) => analysis,
        other => {
            return Ok(Json(TtsResponse {
                message: empty_outcome_message(&other).unwrap_or_default(),
                audio_file_reference: None,
            }));
        }
    };

    let artifact = state.pipeline.speak(&analysis).await?;
    Ok(Json(TtsResponse {
        message: TTS_SUCCESS_MESSAGE.to_string(),
        audio_file_reference: Some(audio_reference(&artifact)),
    }))
}
