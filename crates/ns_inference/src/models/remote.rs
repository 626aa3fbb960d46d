use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::warn;

use ns_core::{Error, PolarityScorer, Result};

#[derive(Serialize)]
struct ScoreRequest<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct ScoreResponse {
    polarity: f64,
}

/// Scorer that delegates to an HTTP service: `POST {"text"}` -> `{"polarity"}`.
pub struct RemoteScorer {
    client: Client,
    url: String,
}

impl RemoteScorer {
    pub fn new(url: &str, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self {
            client,
            url: url.to_string(),
        })
    }
}

impl fmt::Debug for RemoteScorer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteScorer")
            .field("client", &"<reqwest::Client>")
            .field("url", &self.url)
            .finish()
    }
}

fn transport_error(err: reqwest::Error) -> Error {
    if err.is_timeout() {
        Error::UpstreamTimeout { stage: "classify" }
    } else {
        Error::Classification(format!("scorer request failed: {}", err))
    }
}

#[async_trait]
impl PolarityScorer for RemoteScorer {
    fn name(&self) -> &str {
        "remote"
    }

    async fn polarity(&self, text: &str) -> Result<f64> {
        let response = self
            .client
            .post(&self.url)
            .json(&ScoreRequest { text })
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = %status, "Sentiment scorer returned an error");
            return Err(Error::Classification(format!("scorer returned status {}", status)));
        }

        let body: ScoreResponse = response.json().await.map_err(transport_error)?;
        Ok(body.polarity)
    }
}
