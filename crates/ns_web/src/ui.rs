//! Minimal browser front end. Messages shown to the user are in Hindi.

use std::sync::Arc;

use axum::extract::State;
use axum::Form;
use axum::response::Html;
use serde::Deserialize;
use tracing::warn;

use ns_core::{Error, Query};
use ns_pipeline::PipelineOutcome;

use crate::handlers::audio_reference;
use crate::AppState;

const TITLE: &str = "📰 News Summarization & Comparative Sentiment Analysis";
const DESCRIPTION: &str = "Enter a company name to fetch news, analyze sentiment, \
compare news coverage, and search specific topics.";

const MSG_NO_ARTICLES: &str = "कोई समाचार लेख नहीं मिला।";
const MSG_MISSING_COMPANY: &str = "कृपया कंपनी का नाम दर्ज करें।";

fn msg_no_matches(keyword: &str) -> String {
    format!("कोई लेख '{}' से संबंधित नहीं मिला।", keyword)
}

fn msg_failure(err: &Error) -> String {
    format!("समाचार प्राप्त करने में त्रुटि: {}", err)
}

fn msg_audio_failure(err: &Error) -> String {
    format!("ऑडियो बनाने में त्रुटि: {}", err)
}

#[derive(Debug, Default, Deserialize)]
pub struct UiForm {
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub query: String,
}

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn page(form: &UiForm, result: &str) -> Html<String> {
    Html(format!(
        r#"<!DOCTYPE html>
<html lang="hi">
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>
body {{ font-family: sans-serif; max-width: 52rem; margin: 2rem auto; padding: 0 1rem; }}
pre {{ white-space: pre-wrap; background: #f6f6f6; padding: 1rem; }}
.message {{ padding: 0.75rem; background: #fff4e5; }}
</style>
</head>
<body>
<h1>{title}</h1>
<p>{description}</p>
<form method="post" action="/ui">
<label>Company <input name="company" value="{company}" required></label>
<label>Topic <input name="query" value="{query}"></label>
<button type="submit">Analyze</button>
</form>
<section id="result">
{result}
</section>
</body>
</html>
"#,
        title = TITLE,
        description = DESCRIPTION,
        company = escape_html(&form.company),
        query = escape_html(&form.query),
        result = result,
    ))
}

fn message_block(message: &str) -> String {
    format!(r#"<p class="message">{}</p>"#, escape_html(message))
}

pub async fn index() -> Html<String> {
    page(&UiForm::default(), "")
}

pub async fn analyze(State(state): State<Arc<AppState>>, Form(form): Form<UiForm>) -> Html<String> {
    let query = match Query::new(&form.company, Some(form.query.as_str())) {
        Ok(query) => query,
        Err(_) => return page(&form, &message_block(MSG_MISSING_COMPANY)),
    };

    let analysis = match state.pipeline.run(&query).await {
        Ok(PipelineOutcome::Analyzed(analysis)) => analysis,
        Ok(PipelineOutcome::NoArticles) => return page(&form, &message_block(MSG_NO_ARTICLES)),
        Ok(PipelineOutcome::NoMatches { keyword }) => {
            return page(&form, &message_block(&msg_no_matches(&keyword)))
        }
        Err(err) => {
            warn!("⚠️ UI request failed: {}", err);
            return page(&form, &message_block(&msg_failure(&err)));
        }
    };

    let mut result = format!("<pre>{}</pre>\n", escape_html(analysis.report.as_str()));
    match state.pipeline.speak(&analysis).await {
        Ok(artifact) => result.push_str(&format!(
            r#"<audio controls src="{}"></audio>"#,
            escape_html(&audio_reference(&artifact))
        )),
        Err(err) => {
            warn!("⚠️ Audio synthesis failed: {}", err);
            result.push_str(&message_block(&msg_audio_failure(&err)));
        }
    }

    page(&form, &result)
}
