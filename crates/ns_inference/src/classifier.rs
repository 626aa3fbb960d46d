use std::fmt;
use std::sync::Arc;

use ns_core::{Error, PolarityScorer, Result, SentimentLabel};
use tracing::debug;

/// Scores strictly above this are positive.
pub const POSITIVE_THRESHOLD: f64 = 0.1;
/// Scores strictly below this are negative.
pub const NEGATIVE_THRESHOLD: f64 = -0.1;

pub fn label_for(score: f64) -> SentimentLabel {
    if score > POSITIVE_THRESHOLD {
        SentimentLabel::Positive
    } else if score < NEGATIVE_THRESHOLD {
        SentimentLabel::Negative
    } else {
        SentimentLabel::Neutral
    }
}

#[derive(Clone)]
pub struct SentimentClassifier {
    scorer: Arc<dyn PolarityScorer>,
}

impl fmt::Debug for SentimentClassifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SentimentClassifier")
            .field("scorer", &self.scorer.name())
            .finish()
    }
}

impl SentimentClassifier {
    pub fn new(scorer: Arc<dyn PolarityScorer>) -> Self {
        Self { scorer }
    }

    pub fn scorer_name(&self) -> &str {
        self.scorer.name()
    }

    pub async fn classify(&self, text: &str) -> Result<SentimentLabel> {
        let score = self.scorer.polarity(text).await.map_err(|e| match e {
            Error::Classification(_) | Error::UpstreamTimeout { .. } => e,
            other => Error::Classification(other.to_string()),
        })?;

        if !score.is_finite() || !(-1.0..=1.0).contains(&score) {
            return Err(Error::Classification(format!(
                "{} returned out-of-range polarity {}",
                self.scorer.name(),
                score
            )));
        }

        let label = label_for(score);
        debug!(score, label = %label, "Classified text");
        Ok(label)
    }
}
