use std::collections::HashMap;
use std::fmt;

use ns_core::{Error, PolarityScorer, Result};

/// Deterministic scorer: a lookup table with a fallback score.
pub struct FixedScorer {
    scores: HashMap<String, f64>,
    default_score: f64,
    fail: bool,
}

impl fmt::Debug for FixedScorer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FixedScorer")
            .field("entries", &self.scores.len())
            .field("default_score", &self.default_score)
            .finish()
    }
}

impl FixedScorer {
    pub fn new(default_score: f64) -> Self {
        Self {
            scores: HashMap::new(),
            default_score,
            fail: false,
        }
    }

    /// A scorer whose every call fails, for exercising error paths.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new(0.0)
        }
    }

    pub fn with_score(mut self, text: impl Into<String>, score: f64) -> Self {
        self.scores.insert(text.into(), score);
        self
    }
}

#[async_trait::async_trait]
impl PolarityScorer for FixedScorer {
    fn name(&self) -> &str {
        "fixed"
    }

    async fn polarity(&self, text: &str) -> Result<f64> {
        if self.fail {
            return Err(Error::External(anyhow::anyhow!("scorer unavailable")));
        }
        Ok(self.scores.get(text).copied().unwrap_or(self.default_score))
    }
}
