use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use ns_core::config::{NewsConfig, PipelineConfig};
use ns_core::{Article, ArticleSource};
use ns_inference::models::FixedScorer;
use ns_inference::SentimentClassifier;
use ns_pipeline::Pipeline;
use ns_sources::{InMemorySource, NewsApiSource};
use ns_speech::{SilentSynthesizer, SummarySpeaker};

use crate::{create_app, AppState};

struct TestApp {
    router: Router,
    _dir: tempfile::TempDir,
}

fn scenario_source() -> InMemorySource {
    InMemorySource::new().with_articles(
        "X",
        vec![
            Article::new("X raises funds", "https://x.com/funds"),
            Article::new("X lawsuit filed", "https://x.com/lawsuit"),
            Article::new("X launches product", "https://x.com/product"),
        ],
    )
}

fn test_app(source: Arc<dyn ArticleSource>) -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    let scorer = FixedScorer::new(0.0)
        .with_score("X raises funds", 0.5)
        .with_score("X lawsuit filed", -0.3);
    let speaker = SummarySpeaker::new(
        Arc::new(SilentSynthesizer),
        dir.path().join("audio"),
        "hi".to_string(),
    );
    let pipeline = Pipeline::new(
        source,
        SentimentClassifier::new(Arc::new(scorer)),
        PipelineConfig::default(),
    )
    .with_speaker(speaker);

    TestApp {
        router: create_app(AppState::new(pipeline)),
        _dir: dir,
    }
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec())
}

async fn post_json(router: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let (status, bytes) = send(router, request).await;
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn get(router: &Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(router, request).await
}

async fn post_form(router: &Router, body: &str) -> (StatusCode, String) {
    let request = Request::builder()
        .method("POST")
        .uri("/ui")
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap();
    let (status, bytes) = send(router, request).await;
    (status, String::from_utf8(bytes).unwrap())
}

#[tokio::test]
async fn test_health() {
    let app = test_app(Arc::new(scenario_source()));
    let (status, body) = get(&app.router, "/health").await;
    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body, json!({"status": "ok"}));
}

#[tokio::test]
async fn test_get_news_lists_articles() {
    let app = test_app(Arc::new(scenario_source()));
    let (status, body) = get(&app.router, "/news/X").await;
    assert_eq!(status, StatusCode::OK);

    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["company"], "X");
    assert_eq!(body["articles"].as_array().unwrap().len(), 3);
    assert_eq!(
        body["articles"][0],
        json!({"title": "X raises funds", "link": "https://x.com/funds"})
    );
}

#[tokio::test]
async fn test_fetch_news_returns_report() {
    let app = test_app(Arc::new(scenario_source()));
    let (status, body) = post_json(&app.router, "/fetch-news", json!({"companyName": "X"})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["company"], "X");
    assert_eq!(body["totalArticles"], 3);
    assert_eq!(
        body["sentimentCounts"],
        json!({"Positive": 1, "Negative": 1, "Neutral": 1})
    );
    assert!(body["sentimentReport"]
        .as_str()
        .unwrap()
        .starts_with("📊 **Sentiment Analysis Report:**"));
    assert_eq!(
        body["articles"][1],
        json!({"Title": "X lawsuit filed", "Sentiment": "Negative", "Link": "https://x.com/lawsuit"})
    );
    assert!(body.get("audioFileReference").is_none());
}

#[tokio::test]
async fn test_fetch_news_with_speech() {
    let app = test_app(Arc::new(scenario_source()));
    let (status, body) = post_json(
        &app.router,
        "/fetch-news",
        json!({"companyName": "X", "speak": true}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let reference = body["audioFileReference"].as_str().unwrap();
    assert!(reference.starts_with("/audio/summary-"));
}

#[tokio::test]
async fn test_fetch_news_accepts_snake_case() {
    let app = test_app(Arc::new(scenario_source()));
    let (status, body) = post_json(
        &app.router,
        "/fetch-news/",
        json!({"company_name": "X", "query": "funds"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalArticles"], 1);
}

#[tokio::test]
async fn test_fetch_news_no_articles_message() {
    let app = test_app(Arc::new(scenario_source()));
    let (status, body) = post_json(&app.router, "/fetch-news", json!({"companyName": "Nobody"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "No news articles found."}));
}

#[tokio::test]
async fn test_fetch_news_no_matches_message() {
    let app = test_app(Arc::new(scenario_source()));
    let (status, body) = post_json(
        &app.router,
        "/fetch-news",
        json!({"companyName": "X", "query": "merger"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "No articles found related to 'merger'."}));
}

#[tokio::test]
async fn test_fetch_news_rejects_blank_company() {
    let app = test_app(Arc::new(scenario_source()));
    let (status, body) = post_json(&app.router, "/fetch-news", json!({"companyName": "  "})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("company name"));
}

#[tokio::test]
async fn test_missing_company_is_a_validation_error() {
    let app = test_app(Arc::new(scenario_source()));
    for uri in ["/fetch-news", "/generate-tts"] {
        let (status, body) = post_json(&app.router, uri, json!({"query": "funds"})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert!(body["error"].as_str().unwrap().contains("company name"));
    }
}

#[tokio::test]
async fn test_malformed_json_is_a_validation_error() {
    let app = test_app(Arc::new(scenario_source()));
    let request = Request::builder()
        .method("POST")
        .uri("/fetch-news")
        .header("content-type", "application/json")
        .body(Body::from("{\"companyName\": "))
        .unwrap();
    let (status, bytes) = send(&app.router, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_upstream_failure_maps_to_bad_gateway() {
    let server = wiremock::MockServer::start().await;
    wiremock::Mock::given(wiremock::matchers::method("GET"))
        .respond_with(wiremock::ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let source = NewsApiSource::new(&NewsConfig {
        base_url: server.uri(),
        api_key: Some("key".to_string()),
        ..NewsConfig::default()
    })
    .unwrap();

    let app = test_app(Arc::new(source));
    let (status, body) = post_json(&app.router, "/fetch-news", json!({"companyName": "X"})).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body["error"].as_str().unwrap().contains("500"));
}

#[tokio::test]
async fn test_generate_tts_serves_audio() {
    let app = test_app(Arc::new(scenario_source()));
    let (status, body) = post_json(&app.router, "/generate-tts", json!({"companyName": "X"})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "TTS audio generated successfully");
    let reference = body["audioFileReference"].as_str().unwrap().to_string();

    let (status, audio) = get(&app.router, &reference).await;
    assert_eq!(status, StatusCode::OK);
    assert!(audio.starts_with(b"ID3"));
}

#[tokio::test]
async fn test_generate_tts_without_articles() {
    let app = test_app(Arc::new(scenario_source()));
    let (status, body) = post_json(&app.router, "/generate-tts", json!({"companyName": "Nobody"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "No news articles found."}));
}

#[tokio::test]
async fn test_ui_index() {
    let app = test_app(Arc::new(scenario_source()));
    let (status, body) = get(&app.router, "/").await;
    assert_eq!(status, StatusCode::OK);
    let body = String::from_utf8(body).unwrap();
    assert!(body.contains(r#"<form method="post" action="/ui">"#));
}

#[tokio::test]
async fn test_ui_renders_report_and_audio() {
    let app = test_app(Arc::new(scenario_source()));
    let (status, body) = post_form(&app.router, "company=X&query=").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Sentiment Analysis Report"));
    assert!(body.contains("X lawsuit filed"));
    assert!(body.contains(r#"<audio controls src="/audio/summary-"#));
}

#[tokio::test]
async fn test_ui_messages_are_localized() {
    let app = test_app(Arc::new(scenario_source()));

    let (_, body) = post_form(&app.router, "company=Nobody&query=").await;
    assert!(body.contains("कोई समाचार लेख नहीं मिला।"));

    let (_, body) = post_form(&app.router, "company=X&query=merger").await;
    assert!(body.contains("कोई लेख &#39;merger&#39; से संबंधित नहीं मिला।"));

    let (_, body) = post_form(&app.router, "company=&query=").await;
    assert!(body.contains("कृपया कंपनी का नाम दर्ज करें।"));
}
