use std::collections::HashMap;

use async_trait::async_trait;
use lazy_static::lazy_static;

use ns_core::{PolarityScorer, Result};

/// Tokens after a negator that it still applies to.
const NEGATION_WINDOW: usize = 3;
const NEGATION_FACTOR: f64 = -0.5;

lazy_static! {
    static ref POLARITY: HashMap<&'static str, f64> = [
        // favourable
        ("good", 0.7),
        ("great", 0.8),
        ("excellent", 1.0),
        ("best", 1.0),
        ("better", 0.5),
        ("strong", 0.433),
        ("stronger", 0.4),
        ("growth", 0.3),
        ("grow", 0.3),
        ("grows", 0.3),
        ("profit", 0.3),
        ("profits", 0.3),
        ("profitable", 0.5),
        ("success", 0.5),
        ("successful", 0.75),
        ("win", 0.5),
        ("wins", 0.5),
        ("gain", 0.3),
        ("gains", 0.3),
        ("surge", 0.4),
        ("surges", 0.4),
        ("soar", 0.5),
        ("soars", 0.5),
        ("boost", 0.4),
        ("boosts", 0.4),
        ("rally", 0.3),
        ("beat", 0.3),
        ("beats", 0.3),
        ("upgrade", 0.4),
        ("innovative", 0.5),
        ("breakthrough", 0.6),
        ("positive", 0.227),
        ("happy", 0.8),
        ("new", 0.136),
        ("high", 0.16),
        ("optimistic", 0.5),
        ("confident", 0.5),
        ("impressive", 1.0),
        ("award", 0.4),
        ("wonderful", 1.0),
        // unfavourable
        ("bad", -0.7),
        ("worse", -0.4),
        ("worst", -1.0),
        ("weak", -0.375),
        ("poor", -0.4),
        ("lawsuit", -0.3),
        ("sued", -0.4),
        ("loss", -0.3),
        ("losses", -0.3),
        ("fall", -0.2),
        ("falls", -0.2),
        ("decline", -0.3),
        ("declines", -0.3),
        ("drop", -0.2),
        ("drops", -0.2),
        ("crash", -0.6),
        ("plunge", -0.5),
        ("plunges", -0.5),
        ("slump", -0.5),
        ("fraud", -0.7),
        ("scandal", -0.6),
        ("fail", -0.5),
        ("fails", -0.5),
        ("failed", -0.5),
        ("failure", -0.5),
        ("risk", -0.2),
        ("concern", -0.2),
        ("concerns", -0.2),
        ("layoffs", -0.4),
        ("recall", -0.3),
        ("probe", -0.2),
        ("terrible", -1.0),
        ("awful", -1.0),
        ("negative", -0.3),
        ("crisis", -0.6),
        ("collapse", -0.7),
        ("threat", -0.4),
        ("downgrade", -0.4),
        ("disappointing", -0.6),
    ]
    .into_iter()
    .collect();

    static ref INTENSIFIERS: HashMap<&'static str, f64> = [
        ("very", 1.3),
        ("really", 1.2),
        ("extremely", 1.5),
        ("highly", 1.3),
        ("incredibly", 1.4),
        ("hugely", 1.4),
        ("slightly", 0.5),
    ]
    .into_iter()
    .collect();
}

fn is_negator(token: &str) -> bool {
    matches!(token, "not" | "no" | "never" | "without" | "nor") || token.ends_with("n't")
}

fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric() && c != '\'')
        .map(|t| t.trim_matches('\''))
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Local lexicon-based scorer: averages the polarity of sentiment-bearing
/// words, scaled by a preceding intensifier and damped/flipped by a nearby
/// negator.
#[derive(Debug, Default, Clone)]
pub struct LexiconScorer;

impl LexiconScorer {
    pub fn new() -> Self {
        Self
    }

    pub fn score(&self, text: &str) -> f64 {
        let mut values = Vec::new();
        let mut multiplier = 1.0;
        let mut negation_left = 0usize;

        for token in tokenize(text) {
            if let Some(factor) = INTENSIFIERS.get(token.as_str()) {
                multiplier *= factor;
                continue;
            }
            if is_negator(&token) {
                negation_left = NEGATION_WINDOW;
                multiplier = 1.0;
                continue;
            }

            if let Some(polarity) = POLARITY.get(token.as_str()) {
                let mut value = polarity * multiplier;
                if negation_left > 0 {
                    value *= NEGATION_FACTOR;
                }
                values.push(value);
            }

            multiplier = 1.0;
            negation_left = negation_left.saturating_sub(1);
        }

        if values.is_empty() {
            return 0.0;
        }
        let mean = values.iter().sum::<f64>() / values.len() as f64;
        mean.clamp(-1.0, 1.0)
    }
}

#[async_trait]
impl PolarityScorer for LexiconScorer {
    fn name(&self) -> &str {
        "lexicon"
    }

    async fn polarity(&self, text: &str) -> Result<f64> {
        Ok(self.score(text))
    }
}
